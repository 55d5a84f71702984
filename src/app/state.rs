//! Session state types
//!
//! All application state lives here, owned by the session. The UI renders
//! snapshots of this state and owns nothing itself (selection, chat history,
//! and edit buffers are session state, not widget state).

use std::collections::HashMap;

use crate::constants::ERROR_TTL_SECS;
use crate::store::{Draft, Email, EmailId, PromptSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Inbox,
    Prompts,
    Drafts,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            Self::Inbox => Self::Prompts,
            Self::Prompts => Self::Drafts,
            Self::Drafts => Self::Inbox,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Inbox => Self::Drafts,
            Self::Prompts => Self::Inbox,
            Self::Drafts => Self::Prompts,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Prompts => "Prompts",
            Self::Drafts => "Drafts",
        }
    }
}

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Loading, error, and status message state
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub loading: bool,
    pub error: Option<String>,
    pub error_time: Option<std::time::Instant>,
    pub message: String,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(std::time::Instant::now());
    }

    /// Clear error if TTL expired. Returns true if the error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.error = None;
            self.error_time = None;
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

/// Inbox table selection
#[derive(Debug, Clone, Default)]
pub struct InboxState {
    pub selected: usize,
}

/// Per-email chat threads plus the shared input line
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub history: HashMap<EmailId, Vec<ChatTurn>>,
    pub input: String,
    /// Chat input line has focus
    pub editing: bool,
    /// An agent call is in flight for the last submitted query
    pub thinking: bool,
}

impl ChatState {
    pub fn turns(&self, id: &EmailId) -> &[ChatTurn] {
        self.history.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, id: &EmailId, role: Role, content: String) {
        self.history
            .entry(id.clone())
            .or_default()
            .push(ChatTurn { role, content });
    }
}

/// The four editable prompt fields, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptField {
    #[default]
    Categorization,
    ActionItems,
    AutoReply,
    Summarization,
}

impl PromptField {
    pub const ALL: [PromptField; 4] = [
        Self::Categorization,
        Self::ActionItems,
        Self::AutoReply,
        Self::Summarization,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Categorization => 0,
            Self::ActionItems => 1,
            Self::AutoReply => 2,
            Self::Summarization => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Categorization => "Categorization (text output)",
            Self::ActionItems => "Action Item Extraction (JSON output)",
            Self::AutoReply => "Auto-Reply Draft",
            Self::Summarization => "Summarization",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Prompt editor: one buffer per field, saved wholesale to the prompt store
#[derive(Debug, Clone, Default)]
pub struct PromptPanelState {
    pub buffers: [String; 4],
    pub focused: PromptField,
    pub editing: bool,
    /// Buffers differ from the last loaded/saved set
    pub unsaved: bool,
}

impl PromptPanelState {
    pub fn from_set(set: &PromptSet) -> Self {
        Self {
            buffers: [
                set.categorization.clone(),
                set.action_item_extraction.clone(),
                set.auto_reply_draft.clone(),
                set.summarization.clone(),
            ],
            ..Default::default()
        }
    }

    pub fn to_set(&self) -> PromptSet {
        PromptSet {
            categorization: self.buffers[0].clone(),
            action_item_extraction: self.buffers[1].clone(),
            auto_reply_draft: self.buffers[2].clone(),
            summarization: self.buffers[3].clone(),
        }
    }

    pub fn buffer(&self, field: PromptField) -> &str {
        &self.buffers[field.index()]
    }

    pub fn focused_buffer_mut(&mut self) -> &mut String {
        &mut self.buffers[self.focused.index()]
    }
}

/// Drafts review: selection plus local-only body edits
#[derive(Debug, Clone, Default)]
pub struct DraftsState {
    pub selected: usize,
    pub editing: bool,
    /// Active edit buffer for the selected draft's body
    pub buffer: String,
    /// Saved local edits by draft index; the draft store is never mutated
    pub edits: HashMap<usize, String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub emails: Vec<Email>,
    /// Render snapshot of the draft store, oldest first
    pub drafts: Vec<Draft>,
    pub inbox: InboxState,
    pub chat: ChatState,
    pub prompts: PromptPanelState,
    pub drafts_view: DraftsState,
    pub status: StatusState,
    pub split_ratio: u16,
    /// Model client has an API key; when false the agent runs degraded
    pub configured: bool,
}

impl AppState {
    pub fn selected_email(&self) -> Option<&Email> {
        self.emails.get(self.inbox.selected)
    }

    /// Body shown for a draft: the saved local edit if one exists,
    /// otherwise the stored body.
    pub fn draft_body(&self, index: usize) -> Option<&str> {
        let draft = self.drafts.get(index)?;
        Some(
            self.drafts_view
                .edits
                .get(&index)
                .map(String::as_str)
                .unwrap_or(&draft.body),
        )
    }

    /// Whether keystrokes currently go into a text buffer.
    pub fn text_entry_active(&self) -> bool {
        self.chat.editing || self.prompts.editing || self.drafts_view.editing
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle_is_closed() {
        assert_eq!(View::Inbox.next(), View::Prompts);
        assert_eq!(View::Drafts.next(), View::Inbox);
        assert_eq!(View::Inbox.prev(), View::Drafts);
        for view in [View::Inbox, View::Prompts, View::Drafts] {
            assert_eq!(view.next().prev(), view);
        }
    }

    #[test]
    fn test_prompt_panel_round_trips_prompt_set() {
        let set = PromptSet {
            categorization: "a".to_string(),
            action_item_extraction: "b".to_string(),
            auto_reply_draft: "c".to_string(),
            summarization: "d".to_string(),
        };
        assert_eq!(PromptPanelState::from_set(&set).to_set(), set);
    }

    #[test]
    fn test_prompt_field_cycle() {
        let mut field = PromptField::Categorization;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, PromptField::Categorization);
        assert_eq!(PromptField::Categorization.prev(), PromptField::Summarization);
    }

    #[test]
    fn test_chat_turns_default_to_empty() {
        let chat = ChatState::default();
        assert!(chat.turns(&EmailId::Number(1)).is_empty());
    }

    #[test]
    fn test_draft_body_prefers_local_edit() {
        let mut state = AppState {
            drafts: vec![Draft {
                from: "Agent (Drafted)".to_string(),
                to: "a@example.com".to_string(),
                subject: "RE: x".to_string(),
                body: "original".to_string(),
                status: crate::store::DRAFT_STATUS.to_string(),
                suggested_follow_ups: String::new(),
                created_at: chrono::Utc::now(),
            }],
            ..Default::default()
        };
        assert_eq!(state.draft_body(0), Some("original"));

        state
            .drafts_view
            .edits
            .insert(0, "edited locally".to_string());
        assert_eq!(state.draft_body(0), Some("edited locally"));
        assert_eq!(state.drafts[0].body, "original");
    }
}
