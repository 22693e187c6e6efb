use std::fs;
use std::io::{self, IsTerminal, Read};

use ipsi::gemini::{GenerationRequest, TextGenerator};
use ipsi::{HubError, StorageTarget, ToolMode};

use crate::args::{CliArgs, ConfigCommand, KeyCommand, RunArgs};
use crate::config::{init_config, AppConfig, ConfigPaths};

use super::input::read_masked;
use super::render;
use super::{build_gemini, BoxedStore};

pub fn handle_config(
    cmd: &ConfigCommand,
    config: &AppConfig,
    paths: &ConfigPaths,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Init { force } => {
            init_config(config, &paths.config_file, *force)?;
            log::info!("config written to {}", paths.config_file.display());
            println!("설정 파일을 저장했습니다: {}", paths.config_file.display());
        }
        ConfigCommand::Path => println!("{}", paths.config_file.display()),
    }
    Ok(())
}

pub fn handle_key(cmd: &KeyCommand, mut store: BoxedStore) -> anyhow::Result<()> {
    match cmd {
        KeyCommand::Set { key, session } => {
            let target = if *session {
                StorageTarget::Session
            } else {
                StorageTarget::Durable
            };
            let raw = match key {
                Some(key) => key.clone(),
                None => read_key()?,
            };
            store
                .save(&raw, target)
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
            println!("API Key를 {target} 저장소에 저장했습니다.");
        }
        KeyCommand::Show => match store.load_credential() {
            Some(credential) => println!("{}: {}", store.preference(), credential.masked()),
            None => println!("저장된 API Key가 없습니다."),
        },
        KeyCommand::Clear => {
            store.clear();
            println!("저장된 API Key를 삭제했습니다.");
        }
    }
    Ok(())
}

fn read_key() -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        return Ok(read_masked("Gemini API Key: ")?.unwrap_or_default());
    }
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}

pub async fn run_once(
    run: &RunArgs,
    args: &CliArgs,
    config: &AppConfig,
    store: &BoxedStore,
) -> anyhow::Result<()> {
    let input = resolve_input(run)?;
    let request = GenerationRequest::new(&store.load(), run.mode, &input)
        .map_err(|err| anyhow::anyhow!(err.user_message()))?
        .temperature(run.temperature.unwrap_or(config.gemini.temperature))
        .max_output_tokens(run.max_tokens.unwrap_or(config.gemini.max_output_tokens));

    let gemini = build_gemini(config, args.model.as_deref())?;
    match gemini.generate(&request).await {
        Ok(text) => {
            println!("{text}");
            Ok(())
        }
        Err(err) => Err(report(err)),
    }
}

fn report(err: HubError) -> anyhow::Error {
    log::error!("generation failed: {err:?}");
    anyhow::anyhow!(err.user_message())
}

fn resolve_input(run: &RunArgs) -> anyhow::Result<String> {
    if let Some(text) = &run.input {
        return Ok(text.clone());
    }
    if let Some(path) = &run.file {
        return Ok(fs::read_to_string(path)?);
    }
    if io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "no input provided; use --input, --file or pipe text"
        ));
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

pub fn list_modes() {
    for mode in ToolMode::ALL {
        println!("{}", render::mode_line(mode));
    }
}
