use anyhow::Result;
use chrono::NaiveDate;
use clap::Args as ClapArgs;
use std::io::{BufRead, Write as _};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::GlobalOpts;
use crate::commands::common;
use crate::config::DisplayConfig;
use crate::planner::select_subject;
use crate::registry::{update_progress, SubjectRegistry};
use crate::reminder::Reminder;
use crate::store::{log_session, SessionLogStore};

const HELP: &str = "\
Commands:
  suggest                      Recommend the next subject
  status                       Progress overview and recent sessions
  study                        Start studying the recommended subject
  update <subject> <percent>   Set completion for a subject
  log <subject> <notes...>     Record a study session
  logs                         List all recorded sessions
  remove <index>               Delete a recorded session
  remind [on|off]              Show or toggle study reminders
  help                         Show this help
  quit                         Leave the session
Quote multi-word subject names, e.g. update \"Digital Technology\" 75";

#[derive(ClapArgs)]
pub struct Args {
    /// Start with study reminders switched off
    #[arg(long)]
    pub no_remind: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Suggest,
    Status,
    Study,
    Update { args: Vec<String> },
    Log { args: Vec<String> },
    Logs,
    Remove { index: usize },
    Remind(Option<bool>),
    Help,
    Quit,
}

/// What the input loop should do after a command has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Reminder(Option<bool>),
    Quit,
}

/// Split a line into words, keeping double-quoted text together.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut tokens = tokenize(line)?.into_iter();
    let Some(head) = tokens.next() else {
        return Ok(ShellCommand::Empty);
    };
    let args: Vec<String> = tokens.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "suggest" | "next" => ShellCommand::Suggest,
        "status" => ShellCommand::Status,
        "study" | "start" => ShellCommand::Study,
        "update" => ShellCommand::Update { args },
        "log" => ShellCommand::Log { args },
        "logs" | "history" => ShellCommand::Logs,
        "remove" | "rm" => match args.as_slice() {
            [index] => ShellCommand::Remove {
                index: index
                    .parse()
                    .map_err(|_| format!("Invalid index: {}", index))?,
            },
            _ => return Err("Usage: remove <index>".to_string()),
        },
        "remind" => match args.first().map(|s| s.to_ascii_lowercase()).as_deref() {
            None => ShellCommand::Remind(None),
            Some("on") => ShellCommand::Remind(Some(true)),
            Some("off") => ShellCommand::Remind(Some(false)),
            Some(_) => return Err("Usage: remind [on|off]".to_string()),
        },
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {}. Type 'help'.", other)),
    };
    Ok(command)
}

/// State owned by one interactive session.
pub struct ShellSession {
    registry: SubjectRegistry,
    store: SessionLogStore,
    display: DisplayConfig,
}

impl ShellSession {
    pub fn new(registry: SubjectRegistry, store: SessionLogStore, display: DisplayConfig) -> Self {
        Self {
            registry,
            store,
            display,
        }
    }

    /// Longest leading run of words naming a registered subject, and the rest.
    ///
    /// Falls back to the first word when nothing matches.
    fn split_subject(&self, words: &[String]) -> (String, Vec<String>) {
        for take in (1..=words.len()).rev() {
            let candidate = words[..take].join(" ");
            if let Some(name) = self.registry.resolve_name(&candidate) {
                return (name.to_string(), words[take..].to_vec());
            }
        }
        match words.split_first() {
            Some((first, rest)) => (first.clone(), rest.to_vec()),
            None => (String::new(), Vec::new()),
        }
    }

    fn suggestion(&self, today: NaiveDate) -> String {
        match common::render_suggestion(&self.registry, today, &self.display) {
            Ok(text) => text,
            Err(e) => format!("Error: {}\n", e),
        }
    }

    pub fn handle(&mut self, command: ShellCommand, today: NaiveDate) -> (String, Action) {
        debug!(?command, "Shell command");
        match command {
            ShellCommand::Empty => (String::new(), Action::Continue),
            ShellCommand::Suggest => (self.suggestion(today), Action::Continue),
            ShellCommand::Status => (
                common::render_status(&self.registry, &self.store, today, &self.display),
                Action::Continue,
            ),
            ShellCommand::Study => {
                let text = match select_subject(&self.registry, today) {
                    Ok(name) => format!("You selected to study {}. Good luck!\n", name),
                    Err(e) => format!("Error: {}\n", e),
                };
                (text, Action::Continue)
            }
            ShellCommand::Update { args } => {
                let (value, words) = match args.split_last() {
                    Some((value, words)) => (value.clone(), words.to_vec()),
                    None => (String::new(), Vec::new()),
                };
                let subject = self
                    .registry
                    .resolve_name(&words.join(" "))
                    .map(str::to_string)
                    .unwrap_or_else(|| words.join(" "));

                let text = match update_progress(&mut self.registry, &subject, &value) {
                    Ok(update) if !update.changed() => {
                        format!("{} is already at {}%\n", update.subject, update.current)
                    }
                    Ok(update) => format!(
                        "{}: {}% -> {}%\n\n{}\n{}",
                        update.subject,
                        update.previous,
                        update.current,
                        common::render_status(&self.registry, &self.store, today, &self.display),
                        self.suggestion(today)
                    ),
                    Err(e) => format!("Error: {}\n", e),
                };
                (text, Action::Continue)
            }
            ShellCommand::Log { args } => {
                let (subject, notes) = self.split_subject(&args);
                let notes = notes.join(" ");
                let text = match log_session(
                    &mut self.store,
                    &self.registry,
                    &subject,
                    &notes,
                    today,
                ) {
                    Ok(()) => common::render_log(&self.store),
                    Err(e) => format!("Error: {}\n", e),
                };
                (text, Action::Continue)
            }
            ShellCommand::Logs => (common::render_log(&self.store), Action::Continue),
            ShellCommand::Remove { index } => {
                let text = match self.store.remove_at(index) {
                    Ok(removed) => format!(
                        "Removed: {}\n{}",
                        removed.summary(),
                        common::render_log(&self.store)
                    ),
                    Err(e) => format!("Error: {}\n", e),
                };
                (text, Action::Continue)
            }
            ShellCommand::Remind(toggle) => (String::new(), Action::Reminder(toggle)),
            ShellCommand::Help => (format!("{}\n", HELP), Action::Continue),
            ShellCommand::Quit => (String::new(), Action::Quit),
        }
    }
}

/// Read stdin on a plain thread so a pending read never holds up runtime shutdown.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn prompt() {
    print!("studyplan> ");
    let _ = std::io::stdout().flush();
}

pub async fn execute(global: &GlobalOpts, args: Args) -> Result<()> {
    let config = common::load_config(global)?;
    let store = common::open_store(&config)?;
    info!(
        path = %store.path().display(),
        entries = store.len(),
        "Starting study session"
    );

    let mut session =
        ShellSession::new(SubjectRegistry::builtin(), store, config.display.clone());

    let (notice_tx, mut notices) = mpsc::unbounded_channel();
    let reminder = Reminder::spawn(
        config.reminder.interval(),
        config.reminder.message.clone(),
        config.reminder.enabled && !args.no_remind,
        notice_tx,
    );

    println!("Study planner. Type 'help' for commands.\n");
    print!("{}", session.suggestion(common::today()));

    let mut input = spawn_input_reader();
    let result: Result<()> = loop {
        prompt();
        tokio::select! {
            line = input.recv() => {
                let line = match line {
                    Some(Ok(line)) => line,
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message);
                        continue;
                    }
                };
                let (text, action) = session.handle(command, common::today());
                print!("{}", text);
                match action {
                    Action::Continue => {}
                    Action::Quit => break Ok(()),
                    Action::Reminder(Some(active)) => {
                        reminder.set_active(active);
                        println!("Reminders {}", if active { "on" } else { "off" });
                    }
                    Action::Reminder(None) => {
                        println!(
                            "Reminders {} (every {}s)",
                            if reminder.is_active() { "on" } else { "off" },
                            config.reminder.interval().as_secs()
                        );
                    }
                }
            }
            Some(notice) = notices.recv() => {
                println!("\n*** {} ***", notice);
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break Ok(());
            }
        }
    };

    reminder.shutdown().await;
    info!("Study session ended");
    result
}
