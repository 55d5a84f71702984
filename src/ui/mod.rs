//! Pure render layer: draws snapshots of [`AppState`], owns no state

mod drafts;
mod inbox;
mod prompts;
pub mod theme;
mod widgets;

use ratatui::Frame;

use crate::app::state::{AppState, View};

pub fn render(frame: &mut Frame, state: &AppState) {
    match state.view {
        View::Inbox => inbox::render(frame, state),
        View::Prompts => prompts::render(frame, state),
        View::Drafts => drafts::render(frame, state),
    }
}
