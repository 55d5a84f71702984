//! Main event loop
//!
//! One loop drives everything: render when dirty, execute queued agent work,
//! poll for input. Agent work runs to completion on this loop, so the
//! interface blocks for the duration of a pipeline run or chat call - the
//! frame rendered just before carries the in-progress status.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::ai::AgentReply;
use crate::app::state::Role;
use crate::constants::{LOGGED_QUERY_LEN, POLL_TIMEOUT_MS};
use crate::input::{InputResult, handle_input};

use super::{App, PendingOp};

impl App {
    pub(crate) async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Clear expired errors
            if self.state.status.clear_error_if_expired() {
                self.dirty = true;
            }

            // Render only when dirty
            if self.dirty {
                terminal.draw(|f| crate::ui::render(f, &self.state))?;
                self.dirty = false;
            }

            // Execute queued agent work. This blocks until the remote
            // call(s) return; input received meanwhile is handled after.
            if let Some(op) = self.pending.take() {
                self.execute_pending(op).await;
                self.dirty = true;
                continue;
            }

            if event::poll(Duration::from_millis(POLL_TIMEOUT_MS))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action),
                    InputResult::Char(c) => self.handle_char(c),
                    InputResult::Backspace => self.handle_backspace(),
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    async fn execute_pending(&mut self, op: PendingOp) {
        // Prompts are re-read per operation so saved edits apply immediately
        let prompts = self.prompt_store.get();

        match op {
            PendingOp::Ingestion => {
                tracing::info!(count = self.state.emails.len(), "running ingestion pipeline");
                let count = self
                    .agent
                    .run_ingestion(&self.state.emails, &prompts, &mut self.processed)
                    .await;

                // Reload so the table and detail pane pick up the new
                // category/action annotations
                self.state.emails = self.inbox_store.load(&self.processed);
                self.state.inbox.selected = self
                    .state
                    .inbox
                    .selected
                    .min(self.state.emails.len().saturating_sub(1));
                self.state.status.loading = false;
                self.state
                    .set_status(format!("Processing complete: {} emails processed", count));
            }

            PendingOp::Chat { id, query } => {
                let Some(email) = self.state.emails.iter().find(|e| e.id == id).cloned() else {
                    self.state.chat.thinking = false;
                    self.state.status.loading = false;
                    return;
                };

                tracing::debug!(
                    id = %id,
                    query = %query.chars().take(LOGGED_QUERY_LEN).collect::<String>(),
                    "handling chat query"
                );

                use crate::store::DraftStore;
                let reply = self
                    .agent
                    .respond(&query, &email, &prompts, &self.processed, &mut self.drafts)
                    .await;

                let content = match reply {
                    AgentReply::Text(text) => text,
                    AgentReply::DraftCreated(draft) => {
                        self.state.drafts = self.drafts.list().to_vec();
                        format!(
                            "Draft created for '{}'. Review it in the Drafts view (3).",
                            draft.subject
                        )
                    }
                };

                self.state.chat.push(&id, Role::Assistant, content);
                self.state.chat.thinking = false;
                self.state.status.loading = false;
                self.state.set_status("");
            }
        }
    }
}
