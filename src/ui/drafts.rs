//! Drafts view: generated replies held for review, never sent

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::store::Draft;

use super::theme::Theme;
use super::widgets::{StatusInfo, error_bar, help_bar, status_bar, truncate_string, window_start};

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    status_bar(
        frame,
        chunks[0],
        &StatusInfo {
            view: state.view.title(),
            emails: state.emails.len(),
            drafts: state.drafts.len(),
            configured: state.configured,
            loading: state.status.loading,
            message: &state.status.message,
        },
    );

    if state.drafts.is_empty() {
        render_empty(frame, chunks[1]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);

        render_list(frame, panes[0], state);
        render_draft(frame, panes[1], state);
    }

    if let Some(ref error) = state.status.error {
        error_bar(frame, chunks[2], error);
    } else {
        let hints: &[(&str, &str)] = if state.drafts_view.editing {
            &[("C-s", "save edits"), ("Esc", "discard")]
        } else {
            &[
                ("j/k", "select"),
                ("Enter", "edit body"),
                ("Esc", "back to inbox"),
                ("q", "quit"),
            ]
        };
        help_bar(frame, chunks[2], hints);
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  No drafts yet.", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "  Ask the agent to 'draft a reply' from the inbox chat.",
            Theme::text_muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" Drafts for Review ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let start = window_start(state.drafts_view.selected, state.drafts.len(), visible);
    let width = (inner.width as usize).saturating_sub(4);

    let mut lines = Vec::new();
    for (i, draft) in state.drafts.iter().enumerate().skip(start).take(visible) {
        let style = if i == state.drafts_view.selected {
            Theme::selection()
        } else {
            Theme::text()
        };
        let marker = if state.drafts_view.edits.contains_key(&i) {
            "*"
        } else {
            " "
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:>2}{} {}",
                i + 1,
                marker,
                truncate_string(&draft.subject, width)
            ),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_draft(frame: &mut Frame, area: Rect, state: &AppState) {
    let index = state.drafts_view.selected;
    let Some(draft) = state.drafts.get(index) else {
        return;
    };

    let border = if state.drafts_view.editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Draft ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = header_lines(draft, state.drafts_view.edits.contains_key(&index));

    let body = if state.drafts_view.editing {
        state.drafts_view.buffer.as_str()
    } else {
        state.draft_body(index).unwrap_or(&draft.body)
    };
    for line in body.lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Theme::text())));
    }
    if state.drafts_view.editing {
        let cursor = Span::styled("█", Theme::border_focused());
        match lines.pop() {
            Some(mut last) if !body.is_empty() && !body.ends_with('\n') => {
                last.push_span(cursor);
                lines.push(last);
            }
            Some(last) => {
                lines.push(last);
                lines.push(Line::from(cursor));
            }
            None => lines.push(Line::from(cursor)),
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Suggested follow-up: ", Theme::label()),
        Span::styled(&draft.suggested_follow_ups, Theme::text()),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn header_lines(draft: &Draft, edited: bool) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", draft.status),
            Theme::warning(),
        )),
        Line::from(vec![
            Span::styled("From: ", Theme::label()),
            Span::styled(&draft.from, Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("To: ", Theme::label()),
            Span::styled(&draft.to, Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Subject: ", Theme::label()),
            Span::styled(&draft.subject, Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Theme::label()),
            Span::styled(
                draft.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                Theme::text_muted(),
            ),
        ]),
    ];

    if edited {
        lines.push(Line::from(Span::styled(
            "(edited locally - the stored draft is unchanged)",
            Theme::text_muted(),
        )));
    }
    lines.push(Line::from(""));
    lines
}
