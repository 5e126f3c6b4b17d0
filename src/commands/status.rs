use anyhow::Result;
use chrono::NaiveDate;
use clap::Args as ClapArgs;

use crate::cli::GlobalOpts;
use crate::commands::common;
use crate::registry::SubjectRegistry;

#[derive(ClapArgs)]
pub struct Args {
    /// Count days from this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn execute(global: &GlobalOpts, args: Args) -> Result<()> {
    let config = common::load_config(global)?;
    let store = common::open_store(&config)?;
    let registry = SubjectRegistry::builtin();
    let today = args.date.unwrap_or_else(common::today);

    print!(
        "{}",
        common::render_status(&registry, &store, today, &config.display)
    );
    Ok(())
}
