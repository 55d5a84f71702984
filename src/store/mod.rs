//! Data stores: durable JSON documents and process-local collections

pub mod drafts;
pub mod inbox;
pub mod processed;
pub mod prompts;

pub use drafts::{DRAFT_STATUS, Draft, DraftStore, MemoryDraftStore};
pub use inbox::{Email, EmailId, InboxStore};
pub use processed::{MemoryProcessedStore, ProcessedData, ProcessedStore};
pub use prompts::{PromptSet, PromptStore};
