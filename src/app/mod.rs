//! Application core - session object owning stores, agent, and state

mod actions;
mod event_loop;
pub mod state;

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::ai::{Agent, ModelClient};
use crate::config::Config;
use crate::constants::{SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};
use crate::input::KeyBindings;
use crate::store::{EmailId, InboxStore, MemoryDraftStore, MemoryProcessedStore, PromptStore};
use state::{AppState, PromptPanelState};

/// Agent work queued by an input handler. It is executed right after the
/// next render so the in-progress status is on screen while the call blocks
/// the loop (there is no background processing and no cancellation).
#[derive(Debug)]
pub(crate) enum PendingOp {
    Ingestion,
    Chat { id: EmailId, query: String },
}

pub struct App {
    pub(crate) prompt_store: PromptStore,
    pub(crate) inbox_store: InboxStore,
    pub(crate) processed: MemoryProcessedStore,
    pub(crate) drafts: MemoryDraftStore,
    pub(crate) agent: Agent,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    pub(crate) pending: Option<PendingOp>,
    /// Dirty flag: when true, the UI needs a re-render.
    pub(crate) dirty: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let prompt_store = PromptStore::new(config.store.prompts_path()?);
        let inbox_store = InboxStore::new(config.store.inbox_path()?);

        let agent = Agent::new(ModelClient::new(&config.model));
        if !agent.is_configured() {
            tracing::warn!("no API key configured, model calls will return sentinel errors");
        }

        let bindings = KeyBindings::new(&config.ui.keybinding_mode);

        let prompts = prompt_store.get();
        let mut state = AppState {
            prompts: PromptPanelState::from_set(&prompts),
            split_ratio: config.ui.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX),
            configured: agent.is_configured(),
            ..Default::default()
        };
        state.set_status("Press L to load the mock inbox");

        Ok(Self {
            prompt_store,
            inbox_store,
            processed: MemoryProcessedStore::new(),
            drafts: MemoryDraftStore::new(),
            agent,
            state,
            bindings,
            pending: None,
            dirty: true, // Start dirty for initial render
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode().ok();
        execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();

        result
    }
}
