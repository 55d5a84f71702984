use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::AppState;

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) => handle_key(key_event, state, bindings),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Text entry captures everything except a few control keys
    if state.text_entry_active() {
        return handle_text_entry(key, state);
    }

    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    InputResult::Continue
}

fn handle_text_entry(key: KeyEvent, state: &AppState) -> InputResult {
    // Control chords keep working while editing
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => InputResult::Action(Action::Save),
            _ => InputResult::Continue,
        };
    }

    match key.code {
        KeyCode::Esc => InputResult::Action(Action::Back),
        // Enter sends the chat line; in multi-line buffers it is a newline
        KeyCode::Enter if state.chat.editing => InputResult::Action(Action::Submit),
        KeyCode::Enter => InputResult::Char('\n'),
        KeyCode::Tab if state.prompts.editing => InputResult::Action(Action::NextField),
        KeyCode::BackTab if state.prompts.editing => InputResult::Action(Action::PrevField),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Char(c) => InputResult::Char(c),
        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingMode;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_key_quits_outside_text_entry() {
        let state = AppState::default();
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        assert!(matches!(
            handle_input(key(KeyCode::Char('q')), &state, &bindings),
            InputResult::Quit
        ));
    }

    #[test]
    fn test_chars_go_to_buffer_while_chat_editing() {
        let mut state = AppState::default();
        state.chat.editing = true;
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        assert!(matches!(
            handle_input(key(KeyCode::Char('q')), &state, &bindings),
            InputResult::Char('q')
        ));
        assert!(matches!(
            handle_input(key(KeyCode::Enter), &state, &bindings),
            InputResult::Action(Action::Submit)
        ));
        assert!(matches!(
            handle_input(key(KeyCode::Esc), &state, &bindings),
            InputResult::Action(Action::Back)
        ));
    }

    #[test]
    fn test_enter_is_newline_in_prompt_editing() {
        let mut state = AppState::default();
        state.prompts.editing = true;
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        assert!(matches!(
            handle_input(key(KeyCode::Enter), &state, &bindings),
            InputResult::Char('\n')
        ));
    }

    #[test]
    fn test_ctrl_s_saves_while_editing() {
        let mut state = AppState::default();
        state.prompts.editing = true;
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        let event = Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(matches!(
            handle_input(event, &state, &bindings),
            InputResult::Action(Action::Save)
        ));
    }
}
