//! Gemini `generateContent` client.
//!
//! One request per call: no retry, no streaming. Non-success statuses become
//! [`HubError::RemoteApi`](crate::error::HubError::RemoteApi), a success with
//! no text becomes [`HubError::EmptyResponse`](crate::error::HubError::EmptyResponse).

mod client;
mod types;

pub use client::{
    generate, Gemini, GeminiConfig, GenerationRequest, TextGenerator, DEFAULT_BASE_URL,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use types::{error_detail, GenerateContentRequest, GenerateContentResponse};
