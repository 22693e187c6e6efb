mod commands;
mod input;
mod render;
mod shell;

use clap::Parser;
use ipsi::gemini::Gemini;
use ipsi::{CredentialStore, JsonFileBackend, MemoryBackend, StorageBackend};

use crate::args::{CliArgs, Command};
use crate::config::{load_config, AppConfig, ConfigPaths};
use crate::logging::init_logging;

pub(crate) type BoxedStore = CredentialStore<Box<dyn StorageBackend>, Box<dyn StorageBackend>>;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    log::debug!("config file: {}", loaded.paths.config_file.display());

    let store = open_store(&loaded.paths, args.ephemeral)?;
    match &args.command {
        Some(Command::Key(cmd)) => commands::handle_key(cmd, store),
        Some(Command::Run(run)) => {
            commands::run_once(run, &args, &loaded.config, &store).await
        }
        Some(Command::Modes) => {
            commands::list_modes();
            Ok(())
        }
        Some(Command::Config(cmd)) => commands::handle_config(cmd, &loaded.config, &loaded.paths),
        None => {
            let gemini = build_gemini(&loaded.config, args.model.as_deref())?;
            shell::run_shell(store, gemini, &loaded.config).await
        }
    }
}

fn open_store(paths: &ConfigPaths, ephemeral: bool) -> anyhow::Result<BoxedStore> {
    if ephemeral {
        log::info!("ephemeral mode: API key kept in memory only");
        let durable: Box<dyn StorageBackend> = Box::new(MemoryBackend::new());
        let session: Box<dyn StorageBackend> = Box::new(MemoryBackend::new());
        return Ok(CredentialStore::new(durable, session));
    }
    let durable: Box<dyn StorageBackend> =
        Box::new(JsonFileBackend::open(paths.credentials_file())?);
    let session: Box<dyn StorageBackend> = Box::new(JsonFileBackend::open(paths.session_file())?);
    Ok(CredentialStore::new(durable, session))
}

pub(crate) fn build_gemini(config: &AppConfig, model: Option<&str>) -> anyhow::Result<Gemini> {
    Ok(Gemini::new(config.gemini.client_config(model))?)
}
