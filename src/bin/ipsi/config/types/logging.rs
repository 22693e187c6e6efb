use serde::{Deserialize, Serialize};

/// `[logging]` section. The log file is the only sink; stdout and stderr
/// stay reserved for generated text and user-facing errors.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// flexi_logger spec string. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for log files; `<data_dir>/logs` when unset.
    pub directory: Option<String>,
    /// Base name of the log file. A trailing `.log` is ignored.
    pub file_name: String,
    /// Size in bytes at which the file is rotated.
    pub rotate_size: u64,
    /// Rotated files kept besides the current one.
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            // HTTP client crates log every connection at info; only this
            // crate's own records are wanted at that level.
            level: "warn,ipsi=info".to_string(),
            directory: None,
            file_name: "ipsi".to_string(),
            rotate_size: 2 * 1024 * 1024,
            rotate_keep: 3,
        }
    }
}
