//! Inbox view: email table, detail pane, processed data, and agent chat

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{AppState, Role};
use crate::constants::CHAT_INPUT_HEIGHT;
use crate::store::Email;

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

    if state.emails.is_empty() {
        render_empty(frame, chunks[1]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(state.split_ratio),
                Constraint::Percentage(100 - state.split_ratio),
            ])
            .split(chunks[1]);

        render_table(frame, panes[0], state);
        render_detail(frame, panes[1], state);
    }

    if let Some(ref error) = state.status.error {
        error_bar(frame, chunks[2], error);
    } else {
        let hints: &[(&str, &str)] = if state.chat.editing {
            &[("Enter", "send"), ("Esc", "cancel")]
        } else {
            &[
                ("L", "load inbox"),
                ("P", "process"),
                ("j/k", "select"),
                ("c", "chat"),
                ("1/2/3", "views"),
                ("q", "quit"),
            ]
        };
        help_bar(frame, chunks[2], hints);
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  No emails loaded.",
            Theme::title(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press L to load the mock inbox, then P to run the agent pipeline.",
            Theme::text_muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" Inbox ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One line for the header, the rest for rows
    let visible = inner.height.saturating_sub(1) as usize;
    let start = window_start(state.inbox.selected, state.emails.len(), visible);

    let subject_width = (inner.width as usize).saturating_sub(44).max(12);

    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<6} {:<16} {:<sw$} {:<16} Category",
            "ID",
            "Sender",
            "Subject",
            "Time",
            sw = subject_width
        ),
        Theme::label(),
    ))];

    for (i, email) in state
        .emails
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
    {
        let row_style = if i == state.inbox.selected {
            Theme::selection()
        } else {
            Theme::text()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{:<6} {:<16} {:<sw$} {:<16} ",
                    truncate_string(&email.id.to_string(), 6),
                    truncate_string(email.display_sender(), 16),
                    truncate_string(&email.subject, subject_width),
                    truncate_string(&email.timestamp, 16),
                    sw = subject_width
                ),
                row_style,
            ),
            Span::styled(
                truncate_string(&email.category, 18),
                if i == state.inbox.selected {
                    row_style
                } else {
                    Theme::category(&email.category)
                },
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(email) = state.selected_email() else {
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(38), // Raw email
            Constraint::Percentage(27), // Processed data
            Constraint::Min(0),         // Chat thread
            Constraint::Length(CHAT_INPUT_HEIGHT),
        ])
        .split(area);

    render_email(frame, sections[0], email);
    render_processed(frame, sections[1], email);
    render_chat(frame, sections[2], state, email);
    render_chat_input(frame, sections[3], state);
}

fn render_email(frame: &mut Frame, area: Rect, email: &Email) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" Email ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(&email.subject, Theme::title())),
        Line::from(vec![
            Span::styled("From: ", Theme::label()),
            Span::styled(&email.sender, Theme::text()),
            Span::styled("  Time: ", Theme::label()),
            Span::styled(&email.timestamp, Theme::text()),
        ]),
        Line::from(""),
    ];
    for line in email.body.lines() {
        lines.push(Line::from(Span::styled(line, Theme::text())));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_processed(frame: &mut Frame, area: Rect, email: &Email) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" Processed Data ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled("Category: ", Theme::label()),
        Span::styled(&email.category, Theme::category(&email.category)),
    ])];

    // Stored actions are valid JSON but not necessarily an array (a failed
    // call stores an error object); fall back to the raw text for those.
    match serde_json::from_str::<Vec<serde_json::Value>>(&email.actions) {
        Ok(items) if items.is_empty() => {
            lines.push(Line::from(Span::styled(
                "No action items.",
                Theme::text_muted(),
            )));
        }
        Ok(items) => {
            for item in &items {
                let task = item
                    .get("task")
                    .and_then(|t| t.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string());
                let deadline = item.get("deadline").and_then(|d| d.as_str());

                let text = match deadline {
                    Some(deadline) if deadline != "N/A" => {
                        format!("• {} (due {})", task, deadline)
                    }
                    _ => format!("• {}", task),
                };
                lines.push(Line::from(Span::styled(text, Theme::text())));
            }
        }
        Err(_) => {
            lines.push(Line::from(Span::styled(
                "Action items are not a JSON list; raw output:",
                Theme::warning(),
            )));
            for line in email.actions.lines() {
                lines.push(Line::from(Span::styled(line, Theme::text_muted())));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_chat(frame: &mut Frame, area: Rect, state: &AppState, email: &Email) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" Agent Chat ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for turn in state.chat.turns(&email.id) {
        let (prefix, style) = match turn.role {
            Role::User => ("You: ", Theme::chat_user()),
            Role::Assistant => ("Agent: ", Theme::chat_assistant()),
        };
        for (i, content_line) in turn.content.lines().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(content_line.to_string(), Theme::text()),
                ]));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("       {}", content_line),
                    Theme::text(),
                )));
            }
        }
    }

    if state.chat.thinking {
        lines.push(Line::from(Span::styled(
            "Agent is thinking...",
            Theme::text_muted(),
        )));
    } else if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask the agent to summarize, list tasks, or draft a reply.",
            Theme::text_muted(),
        )));
    }

    // Tail-window: keep the newest lines in view
    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_chat_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let border = if state.chat.editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Ask the agent ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if state.chat.editing {
        Line::from(vec![
            Span::styled(state.chat.input.as_str(), Theme::text()),
            Span::styled("█", Theme::border_focused()),
        ])
    } else {
        Line::from(Span::styled(
            "press c to ask about this email",
            Theme::text_muted(),
        ))
    };

    frame.render_widget(Paragraph::new(line), inner);
}
