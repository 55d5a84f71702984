//! Processed-data store: per-email results from the ingestion pipeline

use std::collections::HashMap;

use super::inbox::EmailId;

/// Category tag for emails the pipeline has not touched.
pub const UNPROCESSED_CATEGORY: &str = "Unprocessed";

/// Action list stored for emails the pipeline has not touched.
pub const EMPTY_ACTIONS: &str = "[]";

/// Stored when the model's action-item output is not valid JSON.
pub const FAILED_EXTRACTION_PLACEHOLDER: &str =
    r#"[{"task": "Failed to extract due to LLM error", "deadline": "N/A"}]"#;

/// Per-email results: a category tag and the action-item list as JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedData {
    pub category: String,
    pub actions: String,
}

impl ProcessedData {
    fn unprocessed() -> Self {
        Self {
            category: UNPROCESSED_CATEGORY.to_string(),
            actions: EMPTY_ACTIONS.to_string(),
        }
    }
}

/// Key-value contract for ingestion results.
///
/// Only the in-memory implementation is wired up today; a durable
/// implementation can be swapped in without changing the get/save semantics.
pub trait ProcessedStore {
    /// Store results for an email, overwriting any prior entry. `actions`
    /// must parse as JSON; text that does not is replaced with
    /// [`FAILED_EXTRACTION_PLACEHOLDER`].
    fn save(&mut self, id: &EmailId, category: String, actions: String);

    /// Stored data for an email, or the unprocessed sentinel for unknown ids.
    fn get(&self, id: &EmailId) -> ProcessedData;
}

#[derive(Debug, Default)]
pub struct MemoryProcessedStore {
    entries: HashMap<EmailId, ProcessedData>,
}

impl MemoryProcessedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProcessedStore for MemoryProcessedStore {
    fn save(&mut self, id: &EmailId, category: String, actions: String) {
        let actions = if serde_json::from_str::<serde_json::Value>(&actions).is_ok() {
            actions
        } else {
            tracing::warn!(id = %id, "action items are not valid JSON, storing placeholder");
            FAILED_EXTRACTION_PLACEHOLDER.to_string()
        };

        self.entries
            .insert(id.clone(), ProcessedData { category, actions });
    }

    fn get(&self, id: &EmailId) -> ProcessedData {
        self.entries
            .get(id)
            .cloned()
            .unwrap_or_else(ProcessedData::unprocessed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> EmailId {
        EmailId::Number(n)
    }

    #[test]
    fn test_unknown_id_returns_unprocessed_sentinel() {
        let store = MemoryProcessedStore::new();
        let data = store.get(&id(42));
        assert_eq!(data.category, "Unprocessed");
        assert_eq!(data.actions, "[]");
    }

    #[test]
    fn test_invalid_json_replaced_with_placeholder() {
        let mut store = MemoryProcessedStore::new();
        store.save(&id(1), "Urgent".to_string(), "not json at all".to_string());

        let data = store.get(&id(1));
        assert_eq!(data.category, "Urgent");
        assert_eq!(data.actions, FAILED_EXTRACTION_PLACEHOLDER);
        // The placeholder itself is a one-element JSON array
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&data.actions).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_valid_json_stored_verbatim() {
        let mut store = MemoryProcessedStore::new();
        let actions = r#"[{"task": "Reply to Bob", "deadline": "Friday"}]"#;
        store.save(&id(1), "Action Required".to_string(), actions.to_string());
        assert_eq!(store.get(&id(1)).actions, actions);

        // Non-array JSON is still valid JSON and kept as-is
        let object = r#"{"error": "upstream failure"}"#;
        store.save(&id(2), "Meeting".to_string(), object.to_string());
        assert_eq!(store.get(&id(2)).actions, object);
    }

    #[test]
    fn test_save_overwrites_prior_entry() {
        let mut store = MemoryProcessedStore::new();
        store.save(&id(1), "Spam".to_string(), "[]".to_string());
        store.save(&id(1), "Personal".to_string(), r#"["x"]"#.to_string());

        let data = store.get(&id(1));
        assert_eq!(data.category, "Personal");
        assert_eq!(data.actions, r#"["x"]"#);
    }

    #[test]
    fn test_string_and_numeric_ids_are_distinct() {
        let mut store = MemoryProcessedStore::new();
        store.save(&id(1), "Urgent".to_string(), "[]".to_string());

        let text_id = EmailId::Text("1".to_string());
        assert_eq!(store.get(&text_id).category, "Unprocessed");
    }
}
