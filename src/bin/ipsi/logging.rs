use std::path::PathBuf;

use flexi_logger::{
    detailed_format, Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming,
};

use crate::config::{ConfigPaths, LoggingConfig};

/// Starts the rotating file logger. The returned handle must outlive every
/// log call; dropping it flushes and stops the writer.
pub fn init_logging(config: &LoggingConfig, paths: &ConfigPaths) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(file_spec(config, paths))
        .format_for_files(detailed_format)
        .append()
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    log::debug!("logging to {}", log_file(config, paths).display());
    Ok(handle)
}

fn file_spec(config: &LoggingConfig, paths: &ConfigPaths) -> FileSpec {
    FileSpec::default()
        .directory(&paths.logs_dir)
        .basename(basename(&config.file_name))
        .suffix("log")
        .suppress_timestamp()
}

/// Base path of the log file; rotation inserts its own `_r` infix.
fn log_file(config: &LoggingConfig, paths: &ConfigPaths) -> PathBuf {
    paths
        .logs_dir
        .join(format!("{}.log", basename(&config.file_name)))
}

fn basename(file_name: &str) -> &str {
    let stem = file_name.trim();
    let stem = stem.strip_suffix(".log").unwrap_or(stem);
    if stem.is_empty() {
        "ipsi"
    } else {
        stem
    }
}
