//! Multi-provider chat gateway
//!
//! Accepts one normalized [`Request`], validates it, translates it into the
//! wire format of the selected provider (Ollama, `OpenAI`, Gemini or Grok),
//! performs a single HTTP exchange and normalizes the reply into a
//! [`ChatResponse`] of the same shape for every provider.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod provider;
pub mod transport;
pub mod types;
pub mod validate;

pub use error::{GatewayError, MessageFault};
pub use gateway::Gateway;
pub use provider::Provider;
pub use transport::{HttpTransport, Transport};
pub use types::{ChatResponse, Message, Request, ResponseMessage, ResponseType, Role};
pub use validate::{ValidatedRequest, validate};
