//! Action handlers: user intent applied to session state and stores

use crate::app::state::{PromptField, Role, View};
use crate::input::Action;

use super::{App, PendingOp};

impl App {
    pub(crate) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Up | Action::Down | Action::Top | Action::Bottom => self.navigate(action),

            Action::NextView => self.state.view = self.state.view.next(),
            Action::PrevView => self.state.view = self.state.view.prev(),
            Action::ViewInbox => self.state.view = View::Inbox,
            Action::ViewPrompts => self.state.view = View::Prompts,
            Action::ViewDrafts => self.state.view = View::Drafts,

            Action::LoadInbox => self.load_inbox(),
            Action::RunIngestion => self.start_ingestion(),
            Action::Chat => self.focus_chat(),

            Action::Edit => self.begin_edit(),
            Action::NextField => self.cycle_field(true),
            Action::PrevField => self.cycle_field(false),
            Action::Save => self.save(),
            Action::Submit => self.submit_chat(),

            Action::Back => self.go_back(),
            // Quit is intercepted by the event loop
            Action::Quit => {}
        }
    }

    fn navigate(&mut self, action: Action) {
        match self.state.view {
            View::Inbox => {
                let len = self.state.emails.len();
                if len == 0 {
                    return;
                }
                let selected = &mut self.state.inbox.selected;
                *selected = match action {
                    Action::Up => selected.saturating_sub(1),
                    Action::Down => (*selected + 1).min(len - 1),
                    Action::Top => 0,
                    _ => len - 1,
                };
            }
            View::Prompts => {
                self.state.prompts.focused = match action {
                    Action::Up => self.state.prompts.focused.prev(),
                    Action::Down => self.state.prompts.focused.next(),
                    Action::Top => PromptField::Categorization,
                    _ => PromptField::Summarization,
                };
            }
            View::Drafts => {
                let len = self.state.drafts.len();
                if len == 0 {
                    return;
                }
                let selected = &mut self.state.drafts_view.selected;
                *selected = match action {
                    Action::Up => selected.saturating_sub(1),
                    Action::Down => (*selected + 1).min(len - 1),
                    Action::Top => 0,
                    _ => len - 1,
                };
            }
        }
    }

    fn load_inbox(&mut self) {
        if self.state.view != View::Inbox {
            return;
        }

        self.state.emails = self.inbox_store.load(&self.processed);
        self.state.inbox.selected = 0;
        self.state.chat.editing = false;

        if self.state.emails.is_empty() {
            self.state
                .set_status("Loaded 0 emails. Run 'mailmind setup' to seed the sample inbox.");
        } else {
            self.state
                .set_status(format!("Loaded {} sample emails", self.state.emails.len()));
        }
        tracing::info!(count = self.state.emails.len(), "inbox loaded");
    }

    fn start_ingestion(&mut self) {
        if self.state.view != View::Inbox {
            return;
        }
        if self.state.emails.is_empty() {
            self.state.set_error("Load the inbox before processing");
            return;
        }

        self.state.status.loading = true;
        self.state
            .set_status("Running categorization and action extraction...");
        self.pending = Some(PendingOp::Ingestion);
    }

    fn focus_chat(&mut self) {
        if self.state.view == View::Inbox && self.state.selected_email().is_some() {
            self.state.chat.editing = true;
        }
    }

    /// Enter starts the context-appropriate edit mode.
    fn begin_edit(&mut self) {
        match self.state.view {
            View::Inbox => self.focus_chat(),
            View::Prompts => self.state.prompts.editing = true,
            View::Drafts => self.begin_draft_edit(),
        }
    }

    fn cycle_field(&mut self, forward: bool) {
        if self.state.view != View::Prompts {
            return;
        }
        let focused = self.state.prompts.focused;
        self.state.prompts.focused = if forward { focused.next() } else { focused.prev() };
    }

    fn save(&mut self) {
        match self.state.view {
            View::Prompts => self.save_prompts(),
            View::Drafts => self.save_draft_edits(),
            View::Inbox => {}
        }
    }

    fn save_prompts(&mut self) {
        let set = self.state.prompts.to_set();
        match self.prompt_store.save(&set) {
            Ok(()) => {
                self.state.prompts.unsaved = false;
                self.state.set_status("Prompts saved");
                tracing::info!("prompt document updated");
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "prompt save failed");
                self.state.set_error(format!("{e:#}"));
            }
        }
    }

    fn submit_chat(&mut self) {
        let query = self.state.chat.input.trim().to_string();
        if query.is_empty() {
            return;
        }
        let Some(email) = self.state.selected_email() else {
            return;
        };
        let id = email.id.clone();

        self.state.chat.input.clear();
        self.state.chat.push(&id, Role::User, query.clone());
        self.state.chat.thinking = true;
        self.state.status.loading = true;
        self.state.set_status("Agent is thinking...");
        self.pending = Some(PendingOp::Chat { id, query });
    }

    fn begin_draft_edit(&mut self) {
        let index = self.state.drafts_view.selected;
        let Some(body) = self.state.draft_body(index).map(str::to_string) else {
            return;
        };
        self.state.drafts_view.buffer = body;
        self.state.drafts_view.editing = true;
    }

    /// Keep the edited body in UI-local state only; the draft store is
    /// append-only and never mutated.
    fn save_draft_edits(&mut self) {
        if !self.state.drafts_view.editing {
            return;
        }
        let index = self.state.drafts_view.selected;
        let buffer = std::mem::take(&mut self.state.drafts_view.buffer);
        self.state.drafts_view.edits.insert(index, buffer);
        self.state.drafts_view.editing = false;
        self.state
            .set_status("Draft edits saved locally (drafts are never sent)");
    }

    fn go_back(&mut self) {
        if self.state.chat.editing {
            self.state.chat.editing = false;
        } else if self.state.prompts.editing {
            self.state.prompts.editing = false;
        } else if self.state.drafts_view.editing {
            // Discard the buffer; saved edits keep their last state
            self.state.drafts_view.editing = false;
            self.state.drafts_view.buffer.clear();
        } else if self.state.view != View::Inbox {
            self.state.view = View::Inbox;
        }
    }

    pub(crate) fn handle_char(&mut self, c: char) {
        if self.state.chat.editing {
            self.state.chat.input.push(c);
        } else if self.state.prompts.editing {
            self.state.prompts.focused_buffer_mut().push(c);
            self.state.prompts.unsaved = true;
        } else if self.state.drafts_view.editing {
            self.state.drafts_view.buffer.push(c);
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        if self.state.chat.editing {
            self.state.chat.input.pop();
        } else if self.state.prompts.editing {
            self.state.prompts.focused_buffer_mut().pop();
            self.state.prompts.unsaved = true;
        } else if self.state.drafts_view.editing {
            self.state.drafts_view.buffer.pop();
        }
    }
}
