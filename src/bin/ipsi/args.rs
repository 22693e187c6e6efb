use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ipsi::ToolMode;

#[derive(Parser, Debug)]
#[command(
    name = "ipsi",
    version,
    about = "대입 입시 정보 허브: summaries, interview questions and strategy notes from admissions text"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Keep the API key in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,
    #[arg(long, short = 'm', global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the stored Gemini API key
    #[command(subcommand)]
    Key(KeyCommand),
    /// Run one tool on the given text and print the result
    Run(RunArgs),
    /// List the available tools
    Modes,
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the effective settings to the config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Save a key; prompts with masked input when KEY is omitted
    Set {
        key: Option<String>,
        /// Store in the session-scoped target instead of the durable one
        #[arg(long)]
        session: bool,
    },
    /// Show which target holds the key, masked
    Show,
    /// Delete the key from both targets
    Clear,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// summary, questions or strategy
    pub mode: ToolMode,
    #[arg(long, short = 'i', conflicts_with = "file")]
    pub input: Option<String>,
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub temperature: Option<f32>,
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_mode_and_overrides() {
        let args = CliArgs::parse_from([
            "ipsi",
            "run",
            "questions",
            "--input",
            "면접 준비",
            "--max-tokens",
            "500",
            "--ephemeral",
        ]);
        assert!(args.ephemeral);
        let Some(Command::Run(run)) = args.command else {
            panic!("expected run command");
        };
        assert_eq!(run.mode, ToolMode::Questions);
        assert_eq!(run.input.as_deref(), Some("면접 준비"));
        assert_eq!(run.max_tokens, Some(500));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(CliArgs::try_parse_from(["ipsi", "run", "essay"]).is_err());
    }

    #[test]
    fn input_and_file_conflict() {
        assert!(
            CliArgs::try_parse_from(["ipsi", "run", "summary", "-i", "a", "-f", "b.txt"]).is_err()
        );
    }

    #[test]
    fn key_set_session_flag() {
        let args = CliArgs::parse_from(["ipsi", "key", "set", "AIza", "--session"]);
        assert!(matches!(
            args.command,
            Some(Command::Key(KeyCommand::Set { key: Some(_), session: true }))
        ));
    }

    #[test]
    fn config_init_takes_force_flag() {
        let args = CliArgs::parse_from(["ipsi", "config", "init", "--force"]);
        assert!(matches!(
            args.command,
            Some(Command::Config(ConfigCommand::Init { force: true }))
        ));
        let args = CliArgs::parse_from(["ipsi", "-c", "/tmp/ipsi.toml", "config", "path"]);
        assert!(matches!(args.command, Some(Command::Config(ConfigCommand::Path))));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/ipsi.toml")));
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let args = CliArgs::parse_from(["ipsi"]);
        assert!(args.command.is_none());
    }
}
