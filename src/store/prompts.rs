//! Prompt configuration store
//!
//! The four agent prompts live in a single JSON document, rewritten wholesale
//! on save. Reads never fail: a missing or malformed document yields the
//! hardcoded defaults, and individually missing keys are filled per field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ai::prompts;

/// The four named prompts driving the agent. All fields are always present;
/// defaults are substituted for anything the document omits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSet {
    #[serde(default = "default_categorization")]
    pub categorization: String,
    #[serde(default = "default_action_item_extraction")]
    pub action_item_extraction: String,
    #[serde(default = "default_auto_reply_draft")]
    pub auto_reply_draft: String,
    #[serde(default = "default_summarization")]
    pub summarization: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            categorization: default_categorization(),
            action_item_extraction: default_action_item_extraction(),
            auto_reply_draft: default_auto_reply_draft(),
            summarization: default_summarization(),
        }
    }
}

fn default_categorization() -> String {
    prompts::CATEGORIZATION.to_string()
}

fn default_action_item_extraction() -> String {
    prompts::ACTION_ITEM_EXTRACTION.to_string()
}

fn default_auto_reply_draft() -> String {
    prompts::AUTO_REPLY_DRAFT.to_string()
}

fn default_summarization() -> String {
    prompts::SUMMARIZATION.to_string()
}

pub struct PromptStore {
    path: PathBuf,
}

impl PromptStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the current prompt set. Never fails: read or parse problems fall
    /// back to [`PromptSet::default`].
    pub fn get(&self) -> PromptSet {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "prompt document unreadable, using defaults");
                return PromptSet::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "prompt document malformed, using defaults");
            PromptSet::default()
        })
    }

    /// Overwrite the prompt document. Failures propagate to the caller.
    pub fn save(&self, prompts: &PromptSet) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let content =
            serde_json::to_string_pretty(prompts).context("Failed to serialize prompts")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write prompt document: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_document_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PromptStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get(), PromptSet::default());
    }

    #[test]
    fn test_malformed_document_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(&path, "{not json").unwrap();
        let store = PromptStore::new(path);
        assert_eq!(store.get(), PromptSet::default());
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = PromptStore::new(dir.path().join("prompts.json"));

        let prompts = PromptSet {
            categorization: "Sort this email.".to_string(),
            action_item_extraction: "List the tasks as JSON.".to_string(),
            auto_reply_draft: "Write a short reply.".to_string(),
            summarization: "Summarize in one line.".to_string(),
        };

        store.save(&prompts).unwrap();
        assert_eq!(store.get(), prompts);
    }

    #[test]
    fn test_missing_keys_filled_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(&path, r#"{"categorization": "Custom sort prompt."}"#).unwrap();

        let prompts = PromptStore::new(path).get();
        assert_eq!(prompts.categorization, "Custom sort prompt.");
        assert_eq!(prompts.summarization, PromptSet::default().summarization);
    }

    #[test]
    fn test_save_into_missing_directory_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = PromptStore::new(dir.path().join("nested/prompts.json"));
        store.save(&PromptSet::default()).unwrap();
        assert_eq!(store.get(), PromptSet::default());
    }
}
