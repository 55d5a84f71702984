//! Generated reply drafts, held in memory for human review

use chrono::{DateTime, Utc};

/// Fixed status carried by every draft. Drafts never transition to "sent".
pub const DRAFT_STATUS: &str = "DRAFT - NEVER SENT AUTOMATICALLY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub suggested_follow_ups: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only contract for generated drafts. Insertion order is display
/// order; the store never mutates or deletes entries.
pub trait DraftStore {
    fn save(&mut self, draft: Draft);

    /// All drafts, oldest first.
    fn list(&self) -> &[Draft];
}

#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: Vec<Draft>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn save(&mut self, draft: Draft) {
        self.drafts.push(draft);
    }

    fn list(&self) -> &[Draft] {
        &self.drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(subject: &str) -> Draft {
        Draft {
            from: "Agent (Drafted)".to_string(),
            to: "alice@example.com".to_string(),
            subject: subject.to_string(),
            body: "body".to_string(),
            status: DRAFT_STATUS.to_string(),
            suggested_follow_ups: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = MemoryDraftStore::new();
        store.save(draft("RE: first"));
        store.save(draft("RE: second"));
        store.save(draft("RE: third"));

        let subjects: Vec<_> = store.list().iter().map(|d| d.subject.as_str()).collect();
        assert_eq!(subjects, ["RE: first", "RE: second", "RE: third"]);
    }

    #[test]
    fn test_status_is_fixed_sentinel() {
        let mut store = MemoryDraftStore::new();
        store.save(draft("RE: x"));
        assert_eq!(store.list()[0].status, "DRAFT - NEVER SENT AUTOMATICALLY");
    }
}
