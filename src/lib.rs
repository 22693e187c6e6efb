//! Admissions text assistant backed by Gemini.
//!
//! A student pastes admissions material and picks one of three
//! [`ToolMode`]s. The crate builds the fixed instruction text, calls
//! `generateContent` once and returns plain text or a classified
//! [`HubError`]. The API key lives in one of two local storage targets
//! managed by [`CredentialStore`].
//!
//! ```no_run
//! use ipsi::gemini::{Gemini, GeminiConfig, GenerationRequest, TextGenerator};
//! use ipsi::ToolMode;
//!
//! # async fn demo() -> Result<(), ipsi::HubError> {
//! let gemini = Gemini::new(GeminiConfig::default())?;
//! let request = GenerationRequest::new("AIza...", ToolMode::Summary, "2026학년도 수시 모집요강 ...")?;
//! println!("{}", gemini.generate(&request).await?);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod credential;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod storage;
pub mod view;

pub use controller::HubController;
pub use credential::{Credential, CredentialStore};
pub use error::HubError;
pub use prompt::ToolMode;
pub use storage::{JsonFileBackend, MemoryBackend, StorageBackend, StorageTarget};
pub use view::{Outcome, ViewState};
