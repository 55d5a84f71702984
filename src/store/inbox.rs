//! Mock inbox store
//!
//! The inbox is a fixed JSON document of sample emails. Loading annotates
//! each record with the current ingestion results so the table can show
//! category tags without a second lookup.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::processed::ProcessedStore;

/// Opaque email identifier. The inbox document may use strings or numbers;
/// equality follows the JSON form exactly, so `1` and `"1"` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum EmailId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One mock email record, immutable after load. `category` and `actions`
/// are annotations from the processed store, not part of the document.
#[derive(Debug, Clone, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    pub subject: String,
    pub timestamp: String,
    pub body: String,
    #[serde(skip)]
    pub category: String,
    #[serde(skip)]
    pub actions: String,
}

impl Email {
    /// Sender display name: the part before any `<address>` suffix.
    pub fn display_sender(&self) -> &str {
        self.sender
            .split('<')
            .next()
            .unwrap_or(&self.sender)
            .trim()
    }
}

pub struct InboxStore {
    path: PathBuf,
}

impl InboxStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the mock inbox in document order, annotating each email from the
    /// processed store. Read or parse failures yield an empty inbox, never
    /// an error.
    pub fn load(&self, processed: &dyn ProcessedStore) -> Vec<Email> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "inbox document unreadable");
                return Vec::new();
            }
        };

        let mut emails: Vec<Email> = match serde_json::from_str(&content) {
            Ok(emails) => emails,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "inbox document malformed");
                return Vec::new();
            }
        };

        for email in &mut emails {
            let data = processed.get(&email.id);
            email.category = data.category;
            email.actions = data.actions;
        }

        emails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::processed::{MemoryProcessedStore, ProcessedStore};

    const SAMPLE: &str = r#"[
        {"id": 1, "sender": "Alice Chen <alice@example.com>", "subject": "Q3 numbers", "timestamp": "2025-09-01 09:15", "body": "Please review the attached figures."},
        {"id": "msg-2", "sender": "bob@example.com", "subject": "RE: Standup", "timestamp": "2025-09-01 10:00", "body": "Moving standup to 9:30."}
    ]"#;

    fn store_with(content: &str) -> (tempfile::TempDir, InboxStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.json");
        fs::write(&path, content).unwrap();
        (dir, InboxStore::new(path))
    }

    #[test]
    fn test_load_parses_mixed_id_types() {
        let (_dir, store) = store_with(SAMPLE);
        let emails = store.load(&MemoryProcessedStore::new());

        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].id, EmailId::Number(1));
        assert_eq!(emails[1].id, EmailId::Text("msg-2".to_string()));
        assert_eq!(emails[0].subject, "Q3 numbers");
    }

    #[test]
    fn test_load_annotates_unprocessed_defaults() {
        let (_dir, store) = store_with(SAMPLE);
        let emails = store.load(&MemoryProcessedStore::new());

        assert_eq!(emails[0].category, "Unprocessed");
        assert_eq!(emails[0].actions, "[]");
    }

    #[test]
    fn test_load_annotates_from_processed_store() {
        let (_dir, store) = store_with(SAMPLE);
        let mut processed = MemoryProcessedStore::new();
        processed.save(
            &EmailId::Number(1),
            "Urgent".to_string(),
            r#"[{"task": "review figures", "deadline": "N/A"}]"#.to_string(),
        );

        let emails = store.load(&processed);
        assert_eq!(emails[0].category, "Urgent");
        assert!(emails[0].actions.contains("review figures"));
        assert_eq!(emails[1].category, "Unprocessed");
    }

    #[test]
    fn test_missing_document_yields_empty_inbox() {
        let dir = tempfile::tempdir().unwrap();
        let store = InboxStore::new(dir.path().join("absent.json"));
        assert!(store.load(&MemoryProcessedStore::new()).is_empty());
    }

    #[test]
    fn test_malformed_document_yields_empty_inbox() {
        let (_dir, store) = store_with("[{broken");
        assert!(store.load(&MemoryProcessedStore::new()).is_empty());
    }

    #[test]
    fn test_display_sender_strips_address() {
        let (_dir, store) = store_with(SAMPLE);
        let emails = store.load(&MemoryProcessedStore::new());
        assert_eq!(emails[0].display_sender(), "Alice Chen");
        assert_eq!(emails[1].display_sender(), "bob@example.com");
    }
}
