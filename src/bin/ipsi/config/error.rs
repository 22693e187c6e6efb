use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("config file already exists: {} (use --force to replace it)", .0.display())]
    AlreadyExists(PathBuf),
    #[error("missing home directory for config paths")]
    MissingHome,
}
