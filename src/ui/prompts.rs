//! Prompt configuration view: the four agent prompts as editable fields

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{AppState, PromptField};

use super::theme::Theme;
use super::widgets::{StatusInfo, error_bar, help_bar, status_bar};

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Prompt fields
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

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(25); 4])
        .split(chunks[1]);

    for field in PromptField::ALL {
        render_field(frame, fields[field.index()], state, field);
    }

    if let Some(ref error) = state.status.error {
        error_bar(frame, chunks[2], error);
    } else {
        let hints: &[(&str, &str)] = if state.prompts.editing {
            &[
                ("C-s", "save all"),
                ("Tab", "next field"),
                ("Esc", "stop editing"),
            ]
        } else {
            &[
                ("j/k", "field"),
                ("Enter", "edit"),
                ("C-s", "save all"),
                ("Esc", "back to inbox"),
            ]
        };
        help_bar(frame, chunks[2], hints);
    }
}

fn render_field(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    state: &AppState,
    field: PromptField,
) {
    let focused = state.prompts.focused == field;
    let editing = focused && state.prompts.editing;

    let mut title = format!(" {} ", field.label());
    if state.prompts.unsaved {
        title.push_str("* ");
    }
    if editing {
        title.push_str("(editing) ");
    }

    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = state
        .prompts
        .buffer(field)
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Theme::text())))
        .collect();

    if editing {
        let cursor = Span::styled("█", Theme::border_focused());
        match lines.pop() {
            Some(mut last) => {
                last.push_span(cursor);
                lines.push(last);
            }
            None => lines.push(Line::from(cursor)),
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
