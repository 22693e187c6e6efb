use serde::{Deserialize, Serialize};

use super::{GeminiSection, LoggingConfig, StorageConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub gemini: GeminiSection,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
