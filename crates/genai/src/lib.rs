//! REST client for the Gemini `generateContent` endpoint.
//!
//! Sends a single text prompt and returns the first candidate's parts as
//! typed [`ContentPart`]s with inline image data already base64-decoded.

pub mod api;
pub mod messages;

pub use api::{GenAiApi, GenAiConfig, GenAiError};
pub use messages::ContentPart;
