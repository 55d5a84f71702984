//! AI integration: the chat-completion client and the email agent
//!
//! The client is the only place network failures exist; the agent converts
//! them into sentinel text and store entries the rest of the app can render.

mod agent;
mod client;
pub mod prompts;

pub use agent::{Agent, AgentReply, QueryIntent, reply_subject};
pub use client::{ModelClient, ModelError};
