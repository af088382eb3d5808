//! Normalized, provider-agnostic request and response types
//!
//! Callers build a [`Request`], the gateway validates it and translates it
//! into a provider wire format, and every provider reply comes back as a
//! [`ChatResponse`].

pub mod message;
pub mod request;
pub mod response;

pub use message::{Message, Role};
pub use request::{Request, ResponseType};
pub use response::{ChatResponse, ResponseMessage};
