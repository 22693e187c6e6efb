use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::load::secure_file_permissions;
use super::types::AppConfig;

/// Writes `config` to `path` as TOML, creating the parent directory.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    secure_file_permissions(path)?;
    Ok(())
}

/// Like [`save_config`], but leaves an existing file alone unless
/// `overwrite` is set.
pub fn init_config(config: &AppConfig, path: &Path, overwrite: bool) -> Result<(), ConfigError> {
    if !overwrite && path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    save_config(config, path)
}
