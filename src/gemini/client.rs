use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::HubError;
use crate::prompt::{compose_user_text, ToolMode, SYSTEM_INSTRUCTION};

use super::types::{
    error_detail, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1200;

pub(crate) const MISSING_CREDENTIAL_MESSAGE: &str = "먼저 API Key를 저장해 주세요.";
pub(crate) const MISSING_INPUT_MESSAGE: &str = "입력 텍스트를 작성해 주세요.";

/// Endpoint settings for the Gemini client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Scheme and host, without the `/v1beta` path.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds; unset means wait for the server.
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: None,
        }
    }
}

/// One validated call: credential, mode, trimmed input and sampling settings.
#[derive(Debug)]
pub struct GenerationRequest {
    credential: Credential,
    mode: ToolMode,
    input: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GenerationRequest {
    /// Fails with a validation error when either the credential or the input
    /// is blank after trimming.
    pub fn new(credential: &str, mode: ToolMode, input: &str) -> Result<Self, HubError> {
        let credential = Credential::parse(credential)
            .ok_or_else(|| HubError::validation(MISSING_CREDENTIAL_MESSAGE))?;
        Self::with_credential(credential, mode, input)
    }

    pub fn with_credential(
        credential: Credential,
        mode: ToolMode,
        input: &str,
    ) -> Result<Self, HubError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(HubError::validation(MISSING_INPUT_MESSAGE));
        }
        Ok(Self {
            credential,
            mode,
            input: input.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// JSON body sent to `generateContent`.
    pub fn body(&self) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
            contents: vec![Content::text(
                Some("user"),
                compose_user_text(self.mode, &self.input),
            )],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

/// Anything that can turn a [`GenerationRequest`] into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, HubError>;
}

/// Client for Gemini's `generateContent` endpoint.
///
/// Configuration sits behind an `Arc`, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct Gemini {
    pub config: Arc<GeminiConfig>,
    pub client: Client,
}

impl Gemini {
    pub fn new(config: GeminiConfig) -> Result<Self, HubError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: GeminiConfig) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for Gemini {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, HubError> {
        let body = request.body();

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Gemini request payload: {}", json);
            }
        }
        log::debug!(
            "Gemini generateContent model={} mode={}",
            self.config.model,
            request.mode()
        );

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", request.credential().expose())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("Gemini HTTP status: {}", status);
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(HubError::RemoteApi {
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        let output = GenerateContentResponse::from_body(&text).text();
        if output.is_empty() {
            return Err(HubError::EmptyResponse);
        }
        Ok(output)
    }
}

/// Builds a request and performs a single call against `config`.
pub async fn generate(
    config: &GeminiConfig,
    credential: &str,
    mode: ToolMode,
    input: &str,
    temperature: f32,
    max_output_tokens: u32,
) -> Result<String, HubError> {
    let request = GenerationRequest::new(credential, mode, input)?
        .temperature(temperature)
        .max_output_tokens(max_output_tokens);
    Gemini::new(config.clone())?.generate(&request).await
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    fn body_json(mode: ToolMode) -> Value {
        let request = GenerationRequest::new("key", mode, " 원문 ").unwrap();
        serde_json::to_value(request.body()).unwrap()
    }

    #[test]
    fn blank_credential_or_input_is_rejected() {
        let err = GenerationRequest::new("  ", ToolMode::Summary, "text").unwrap_err();
        assert_eq!(err.to_string(), MISSING_CREDENTIAL_MESSAGE);
        let err = GenerationRequest::new("key", ToolMode::Summary, "\n\t ").unwrap_err();
        assert_eq!(err.to_string(), MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn body_has_expected_shape_and_defaults() {
        let body = body_json(ToolMode::Summary);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], SYSTEM_INSTRUCTION);
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["temperature"].as_f64().unwrap() as f32, 0.4);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1200);
    }

    #[rstest]
    #[case(ToolMode::Summary)]
    #[case(ToolMode::Questions)]
    #[case(ToolMode::Strategy)]
    fn only_user_turn_prefix_changes_between_modes(#[case] mode: ToolMode) {
        let body = body_json(mode);
        let baseline = body_json(ToolMode::Summary);
        assert_eq!(body["systemInstruction"], baseline["systemInstruction"]);
        assert_eq!(body["generationConfig"], baseline["generationConfig"]);
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            format!("{}\n\n원문", mode.instruction())
        );
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let gemini = Gemini::with_client(
            Client::new(),
            GeminiConfig {
                base_url: "http://localhost:8080/".to_string(),
                model: "gemini-test".to_string(),
                timeout_seconds: None,
            },
        );
        assert_eq!(
            gemini.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }
}
