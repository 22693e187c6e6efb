use ipsi::StorageTarget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the durable credential file.
    pub data_dir: Option<String>,
    /// Directory of the session-scoped credential file.
    pub session_dir: Option<String>,
    /// Gate selection when no preference has been saved yet.
    pub default_target: StorageTarget,
}
