//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Theme;

/// Data shown in the top status bar, assembled per view.
pub struct StatusInfo<'a> {
    pub view: &'a str,
    pub emails: usize,
    pub drafts: usize,
    pub configured: bool,
    pub loading: bool,
    pub message: &'a str,
}

pub fn status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let mut spans = vec![
        Span::styled(" mailmind ", Theme::title()),
        Span::styled(format!("│ {} ", info.view), Theme::text()),
        Span::styled(
            format!("│ {} emails │ {} drafts ", info.emails, info.drafts),
            Theme::text_muted(),
        ),
    ];

    if !info.configured {
        spans.push(Span::styled("│ no API key ", Theme::warning()));
    }

    if info.loading {
        spans.push(Span::styled("│ working... ", Theme::warning()));
    } else if !info.message.is_empty() {
        spans.push(Span::styled(format!("│ {} ", info.message), Theme::text()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(paragraph, area);
}

pub fn error_bar(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(format!(" Error: {} ", message)).style(Theme::error_bar());
    frame.render_widget(paragraph, area);
}

pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    use unicode_width::UnicodeWidthStr;

    let available_width = area.width as usize;

    // Fit as many hints as the width allows, separator included
    let mut total_width = 0;
    let mut hints_to_show = 0;
    for (i, (key, desc)) in hints.iter().enumerate() {
        let width = format!(" {} ", key).width()
            + desc.width()
            + if i < hints.len() - 1 { 3 } else { 1 };
        if total_width + width > available_width {
            break;
        }
        total_width += width;
        hints_to_show += 1;
    }
    let hints_to_show = hints_to_show.max(1).min(hints.len());

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().take(hints_to_show).enumerate() {
        spans.push(Span::styled(format!(" {} ", key), Theme::help_key()));
        spans.push(Span::styled(desc.to_string(), Theme::help_desc()));
        if i < hints_to_show - 1 {
            spans.push(Span::styled(" │ ", Theme::text_muted()));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

/// Truncate to a character budget, appending `...` when something was cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// First index of the visible window so `selected` stays in view.
pub fn window_start(selected: usize, total: usize, visible: usize) -> usize {
    if visible == 0 || total <= visible {
        0
    } else if selected >= visible {
        (selected + 1 - visible).min(total - visible)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer subject line", 10), "a longe...");
        assert_eq!(truncate_string("abc", 2), "ab");
    }

    #[test]
    fn test_window_start_keeps_selection_visible() {
        assert_eq!(window_start(0, 20, 5), 0);
        assert_eq!(window_start(4, 20, 5), 0);
        assert_eq!(window_start(5, 20, 5), 1);
        assert_eq!(window_start(19, 20, 5), 15);
        assert_eq!(window_start(3, 3, 5), 0);
        assert_eq!(window_start(3, 10, 0), 0);
    }
}
