use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{log, shell, status, suggest};

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(about = "Study planner - Track exam preparation and log study sessions")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Custom config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Study log file (overrides the configured location)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Also write diagnostics to this file
    #[arg(long, global = true)]
    pub trace_file: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend the subject to study next
    Suggest(suggest::Args),

    /// Show progress for every subject and the latest study sessions
    Status(status::Args),

    /// Inspect or edit the study session log
    Log(log::Args),

    /// Start an interactive study session with periodic reminders
    Shell(shell::Args),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "studyplan",
            "status",
            "--log-file",
            "/tmp/log.json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.log_file, Some(PathBuf::from("/tmp/log.json")));
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn cli_parses_log_add() {
        let cli = Cli::try_parse_from([
            "studyplan",
            "log",
            "add",
            "History and Social Science",
            "Read chapter 3",
            "--completed",
            "65",
        ])
        .unwrap();

        match cli.command {
            Commands::Log(args) => match args.command {
                log::LogCommand::Add {
                    subject,
                    notes,
                    completed,
                } => {
                    assert_eq!(subject, "History and Social Science");
                    assert_eq!(notes, "Read chapter 3");
                    assert_eq!(completed.as_deref(), Some("65"));
                }
                _ => panic!("cli_parses_log_add: expected Add"),
            },
            _ => panic!("cli_parses_log_add: expected Log"),
        }
    }
}
