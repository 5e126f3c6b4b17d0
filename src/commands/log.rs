use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Subcommand};

use crate::cli::GlobalOpts;
use crate::commands::common;
use crate::registry::{update_progress, SubjectRegistry};
use crate::store::log_session;

#[derive(ClapArgs)]
pub struct Args {
    #[command(subcommand)]
    pub command: LogCommand,
}

#[derive(Subcommand)]
pub enum LogCommand {
    /// List every logged session with its index
    List,

    /// Record a study session for a subject
    Add {
        /// Subject name
        subject: String,

        /// What was studied
        notes: String,

        /// Completion percentage to record instead of the built-in value
        #[arg(long)]
        completed: Option<String>,
    },

    /// Remove the session at the given index (see `log list`)
    Remove {
        /// Zero-based index as shown by `log list`
        index: usize,
    },
}

pub fn execute(global: &GlobalOpts, args: Args) -> Result<()> {
    let config = common::load_config(global)?;
    let mut store = common::open_store(&config)?;

    match args.command {
        LogCommand::List => {
            print!("{}", common::render_log(&store));
        }
        LogCommand::Add {
            subject,
            notes,
            completed,
        } => {
            let mut registry = SubjectRegistry::builtin();
            let subject = common::resolve_subject(&registry, &subject).to_string();

            if let Some(raw) = completed {
                update_progress(&mut registry, &subject, &raw)
                    .with_context(|| format!("Cannot record completion for {}", subject))?;
            }

            log_session(&mut store, &registry, &subject, &notes, common::today())?;
            if let Some(entry) = store.entries().last() {
                println!("Logged: {}", entry.summary());
            }
        }
        LogCommand::Remove { index } => {
            let removed = store.remove_at(index)?;
            println!("Removed: {}", removed.summary());
        }
    }

    Ok(())
}
