//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers to make them discoverable and configurable.

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

/// Input poll timeout in milliseconds for the event loop.
pub const POLL_TIMEOUT_MS: u64 = 150;

/// Minimum split ratio percentage for the inbox split view.
pub const SPLIT_RATIO_MIN: u16 = 30;

/// Maximum split ratio percentage for the inbox split view.
pub const SPLIT_RATIO_MAX: u16 = 70;

/// Height in lines of the chat input field in the inbox view.
pub const CHAT_INPUT_HEIGHT: u16 = 3;

/// Maximum characters of a chat query echoed into the log.
pub const LOGGED_QUERY_LEN: usize = 80;
