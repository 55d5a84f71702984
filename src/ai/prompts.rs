//! Default prompt texts for the prompt store
//!
//! These are the fallback values substituted when the prompt document is
//! missing, malformed, or missing individual keys. Users edit their own
//! versions in the Prompts view.

/// Default categorization prompt (plain-text output, one category name)
pub const CATEGORIZATION: &str = r#"You are an email triage assistant. Assign the email to exactly one of these categories: Urgent, Action Required, Meeting, Newsletter, Personal, Spam. Respond with the category name only, no explanation or punctuation."#;

/// Default action-item extraction prompt (JSON output)
pub const ACTION_ITEM_EXTRACTION: &str = r#"You are an action item extraction assistant. Extract every task the recipient is expected to perform from the email. Respond with a JSON array of objects, each with a "task" key (short imperative phrase) and a "deadline" key (verbatim from the email, or "N/A" when none is given). Respond with an empty array if there are no tasks."#;

/// Default auto-reply drafting prompt
pub const AUTO_REPLY_DRAFT: &str = r#"Draft a brief, polite reply to the email. Acknowledge the sender's main point, answer any direct question you can answer from the email itself, and close by proposing a concrete next step. Return only the reply body, no subject line or signature."#;

/// Default summarization prompt
pub const SUMMARIZATION: &str = r#"You are an email summarization assistant. Summarize the email concisely in 2-3 sentences, capturing the key points and any action items. Be direct and factual. Do not include greetings or sign-offs in your summary."#;
