//! Centralized theming for the mailmind TUI
//!
//! Single source of truth for all colors and styles used throughout the
//! application.

use ratatui::style::{Color, Modifier, Style};

// Dark palette
const TEXT: Color = Color::Rgb(205, 214, 244);
const TEXT_MUTED: Color = Color::Rgb(108, 112, 134);
const SURFACE: Color = Color::Rgb(49, 50, 68);
const SELECTION: Color = Color::Rgb(69, 71, 90);
const ACCENT: Color = Color::Rgb(137, 180, 250);
const LABEL: Color = Color::Rgb(148, 226, 213);
const GREEN: Color = Color::Rgb(166, 227, 161);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const RED: Color = Color::Rgb(243, 139, 168);

pub struct Theme;

impl Theme {
    pub fn text() -> Style {
        Style::default().fg(TEXT)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(TEXT_MUTED)
    }

    pub fn title() -> Style {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default().fg(LABEL)
    }

    pub fn border() -> Style {
        Style::default().fg(SURFACE)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn selection() -> Style {
        Style::default().bg(SELECTION).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(TEXT).bg(SELECTION)
    }

    pub fn error_bar() -> Style {
        Style::default().fg(Color::Black).bg(RED)
    }

    pub fn warning() -> Style {
        Style::default().fg(YELLOW)
    }

    pub fn help_key() -> Style {
        Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
    }

    pub fn help_desc() -> Style {
        Style::default().fg(TEXT_MUTED)
    }

    pub fn chat_user() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn chat_assistant() -> Style {
        Style::default().fg(GREEN).add_modifier(Modifier::BOLD)
    }

    /// Style for a category tag in the inbox table and detail pane.
    pub fn category(category: &str) -> Style {
        if category == "Unprocessed" {
            Self::text_muted()
        } else if category.starts_with("Error processing") {
            Style::default().fg(RED)
        } else {
            Style::default().fg(LABEL)
        }
    }
}
