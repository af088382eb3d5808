//! Post intention analysis on top of the chat gateway
//!
//! Sends a post to the configured provider with a fixed structured-output
//! schema and turns the model's JSON reply into an [`Analysis`].

#![allow(clippy::must_use_candidate)]

mod analyzer;
mod error;
mod schema;
mod types;

pub use analyzer::{Analyzer, AnalyzerSettings, humanize};
pub use error::AnalyzeError;
pub use schema::{IntentTag, SYSTEM_PROMPT, intent_schema};
pub use types::{AnalyzeReply, AnalyzeRequest, Analysis, Intention};
