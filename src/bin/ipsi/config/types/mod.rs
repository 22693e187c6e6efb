mod app;
mod gemini;
mod logging;
mod storage;

pub use app::AppConfig;
pub use gemini::GeminiSection;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
