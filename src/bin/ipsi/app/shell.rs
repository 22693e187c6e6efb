use std::io::{self, BufRead, IsTerminal, Write};

use ipsi::gemini::Gemini;
use ipsi::{HubController, StorageTarget, ToolMode};

use crate::config::AppConfig;

use super::input::read_masked;
use super::render;
use super::BoxedStore;

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Help,
    Quit,
    Target(StorageTarget),
    SaveKey,
    ClearKey,
    Tab(ToolMode),
    Run,
    Show,
    Reset,
    Text(String),
    Unknown(String),
}

fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return ShellCommand::Text(line.trim_end_matches(['\r', '\n']).to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next().unwrap_or(""), parts.next()) {
        ("help" | "h", None) => ShellCommand::Help,
        ("quit" | "q" | "exit", None) => ShellCommand::Quit,
        ("local", None) => ShellCommand::Target(StorageTarget::Durable),
        ("session", None) => ShellCommand::Target(StorageTarget::Session),
        ("save", None) => ShellCommand::SaveKey,
        ("clear", None) => ShellCommand::ClearKey,
        ("tab", Some(name)) => match name.parse() {
            Ok(mode) => ShellCommand::Tab(mode),
            Err(_) => ShellCommand::Unknown(trimmed.to_string()),
        },
        ("run", None) => ShellCommand::Run,
        ("show", None) => ShellCommand::Show,
        ("reset", None) => ShellCommand::Reset,
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

type Controller = HubController<Gemini, Box<dyn ipsi::StorageBackend>, Box<dyn ipsi::StorageBackend>>;

pub async fn run_shell(store: BoxedStore, gemini: Gemini, config: &AppConfig) -> anyhow::Result<()> {
    let mut ctl: Controller = HubController::new(store, gemini)
        .with_generation(config.gemini.temperature, config.gemini.max_output_tokens);
    if ctl.store().stored_preference().is_none() {
        ctl.select_storage_target(config.storage.default_target);
    }
    print_screen(&ctl);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", render::prompt(&ctl.view));
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let was_gated = ctl.view.gate_open();
        match parse_line(&line) {
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Help => println!("{}", render::HELP),
            ShellCommand::Target(target) => {
                ctl.select_storage_target(target);
                println!("저장 위치: {target}");
            }
            ShellCommand::SaveKey => {
                let Some(raw) = prompt_key()? else {
                    continue;
                };
                ctl.view.edit_draft_key(raw);
                ctl.save_key();
                print_outcome(&ctl);
            }
            ShellCommand::ClearKey => {
                ctl.clear_key();
                print_outcome(&ctl);
            }
            command if was_gated => {
                log::debug!("ignored while gated: {command:?}");
                println!("먼저 :save 로 API Key를 저장해 주세요.");
            }
            ShellCommand::Tab(mode) => {
                ctl.select_tab(mode);
                println!("{}", render::workspace(&ctl.view));
            }
            ShellCommand::Run => {
                println!("생성 중...");
                ctl.run().await;
                print_outcome(&ctl);
            }
            ShellCommand::Show => println!("{}", ctl.view.input),
            ShellCommand::Reset => ctl.view.edit_input(String::new()),
            ShellCommand::Text(text) => {
                let mut input = std::mem::take(&mut ctl.view.input);
                if !input.is_empty() {
                    input.push('\n');
                }
                input.push_str(&text);
                ctl.view.edit_input(input);
            }
            ShellCommand::Unknown(raw) => println!("알 수 없는 명령: {raw} (:help)"),
        }
        if was_gated != ctl.view.gate_open() {
            print_screen(&ctl);
        }
    }
}

fn prompt_key() -> io::Result<Option<String>> {
    if io::stdin().is_terminal() {
        return read_masked("Gemini API Key: ");
    }
    let mut raw = String::new();
    if io::stdin().lock().read_line(&mut raw)? == 0 {
        return Ok(None);
    }
    Ok(Some(raw))
}

fn print_screen(ctl: &Controller) {
    if ctl.view.gate_open() {
        println!("{}", render::gate(&ctl.view));
    } else {
        println!("{}", render::workspace(&ctl.view));
    }
}

fn print_outcome(ctl: &Controller) {
    if let Some(outcome) = &ctl.view.outcome {
        println!("{}", render::outcome(outcome));
    }
}
