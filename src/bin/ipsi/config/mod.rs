mod error;
mod load;
mod paths;
mod save;
mod types;

pub use load::load_config;
pub use paths::ConfigPaths;
pub use save::init_config;
pub use types::{AppConfig, LoggingConfig};
