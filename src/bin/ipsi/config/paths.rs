use std::path::PathBuf;

use super::error::ConfigError;
use super::types::AppConfig;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub session_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(
        config_override: Option<PathBuf>,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        let storage = &config.storage;
        let config_file = match config_override {
            Some(path) => path,
            None => Self::default_config_file()?,
        };
        let data_dir = match &storage.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let session_dir = storage
            .session_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_session_dir);
        let logs_dir = config
            .logging
            .directory
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("logs"));
        Ok(Self {
            config_file,
            data_dir,
            session_dir,
            logs_dir,
        })
    }

    pub fn default_config_file() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
        Ok(home.join(".config").join("ipsi").join("config.toml"))
    }

    /// Durable credential target.
    pub fn credentials_file(&self) -> PathBuf {
        self.data_dir.join("credentials.json")
    }

    /// Session-scoped credential target.
    pub fn session_file(&self) -> PathBuf {
        self.session_dir.join("session.json")
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
    Ok(home.join(".local").join("share").join("ipsi"))
}

// XDG_RUNTIME_DIR is removed at logout, which is what makes this target
// session-scoped.
fn default_session_dir() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ipsi")
}
