use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
}

pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let read = match &path_override {
        Some(path) => read_config(path)?,
        None => read_config(&ConfigPaths::default_config_file()?)?,
    };
    let paths = ConfigPaths::resolve(path_override, &read)?;
    fs::create_dir_all(&paths.logs_dir)?;
    secure_file_permissions(&paths.config_file)?;
    Ok(LoadedConfig {
        config: read,
        paths,
    })
}

pub(super) fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(err) => Err(ConfigError::Io(err)),
    }
}

pub(super) fn secure_file_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            let mode = perms.mode() & 0o777;
            if mode & 0o077 != 0 {
                perms.set_mode(0o600);
                fs::set_permissions(path, perms)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.gemini.model, ipsi::gemini::DEFAULT_MODEL);
        assert_eq!(config.logging.level, "warn,ipsi=info");
        assert_eq!(config.logging.file_name, "ipsi");
    }

    #[test]
    fn partial_file_is_filled_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[gemini]\nmodel = \"gemini-2.5-pro\"\ntemperature = 0.7\n\n[storage]\ndefault_target = \"session\"\n",
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.temperature, 0.7);
        assert_eq!(config.gemini.max_output_tokens, 1200);
        assert_eq!(config.gemini.base_url, ipsi::gemini::DEFAULT_BASE_URL);
        assert_eq!(
            config.storage.default_target,
            ipsi::StorageTarget::Session
        );
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gemini\nmodel = 1").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn override_path_points_data_dirs_from_storage_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let data_dir = dir.path().join("data");
        let session_dir = dir.path().join("session");
        fs::write(
            &path,
            format!(
                "[storage]\ndata_dir = {:?}\nsession_dir = {:?}\n",
                data_dir.display().to_string(),
                session_dir.display().to_string()
            ),
        )
        .unwrap();

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded.paths.config_file, path);
        assert_eq!(loaded.paths.credentials_file(), data_dir.join("credentials.json"));
        assert_eq!(loaded.paths.session_file(), session_dir.join("session.json"));
        assert!(loaded.paths.logs_dir.starts_with(&data_dir));
    }
}
