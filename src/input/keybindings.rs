use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,

    // View switching
    NextView,
    PrevView,
    ViewInbox,
    ViewPrompts,
    ViewDrafts,

    // Inbox
    LoadInbox,
    RunIngestion,
    Chat,

    // Editing
    Edit,
    NextField,
    PrevField,
    Save,
    /// Send the chat input line (synthesized by the handler, not bound)
    Submit,

    Back,
    Quit,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = Self::common_bindings();

        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = Self::common_bindings();

        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);

        map
    }

    /// Bindings shared by both modes. Arrow keys always work.
    fn common_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Down), Action::Down);

        // View switching (] = next, [ = prev, digits jump directly)
        map.insert(key(']'), Action::NextView);
        map.insert(key('['), Action::PrevView);
        map.insert(key('1'), Action::ViewInbox);
        map.insert(key('2'), Action::ViewPrompts);
        map.insert(key('3'), Action::ViewDrafts);

        // Inbox actions
        map.insert(shift_key('L'), Action::LoadInbox);
        map.insert(shift_key('P'), Action::RunIngestion);
        map.insert(key('c'), Action::Chat);

        // Editing
        map.insert(key_code(KeyCode::Enter), Action::Edit);
        map.insert(key_code(KeyCode::Tab), Action::NextField);
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevField);
        map.insert(ctrl_key('s'), Action::Save);

        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key('q'), Action::Quit);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_mode_maps_j_to_down() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        assert_eq!(bindings.get(&key('j')), Some(Action::Down));
        assert_eq!(bindings.get(&key('q')), Some(Action::Quit));
    }

    #[test]
    fn test_arrow_mode_has_no_vim_letters() {
        let bindings = KeyBindings::new(&KeybindingMode::Arrows);
        assert_eq!(bindings.get(&key('j')), None);
        assert_eq!(bindings.get(&key_code(KeyCode::Down)), Some(Action::Down));
    }

    #[test]
    fn test_both_modes_share_common_actions() {
        for mode in [KeybindingMode::Vim, KeybindingMode::Arrows] {
            let bindings = KeyBindings::new(&mode);
            assert_eq!(bindings.get(&shift_key('L')), Some(Action::LoadInbox));
            assert_eq!(bindings.get(&shift_key('P')), Some(Action::RunIngestion));
            assert_eq!(bindings.get(&ctrl_key('s')), Some(Action::Save));
        }
    }
}
