use ipsi::gemini::{
    GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSection {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_seconds: None,
        }
    }
}

impl GeminiSection {
    pub fn client_config(&self, model_override: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            base_url: self.base_url.clone(),
            model: model_override.unwrap_or(&self.model).to_string(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}
