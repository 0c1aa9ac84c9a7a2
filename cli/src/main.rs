mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    AppSession, StdinConfirm, cmd_add, cmd_avoid_recent, cmd_clear, cmd_defaults, cmd_export,
    cmd_import, cmd_list, cmd_quick_add, cmd_remove, cmd_reset, cmd_stats, cmd_suggest,
};
use crate::config::Config;
use dinner_core::session::Session;
use dinner_core::storage::SqliteStore;

#[derive(Parser)]
#[command(
    name = "dinner",
    version,
    about = "Can't decide what's for dinner? Let fate decide.",
    long_about = "Keep a list of meals you like and get a random pick for tonight.\n\
                  Meals picked in the last 7 days are skipped unless everything was."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a meal to the list
    Add {
        /// Meal name (e.g. "butter chicken")
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a meal by its exact name
    Remove {
        /// Meal name as shown by `dinner list`
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show all meals, sorted by name
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pick tonight's meal
    Suggest {
        /// Date to pick for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show pick statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Skip meals picked in the last 7 days: on or off
    AvoidRecent {
        /// on or off
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a common meal, or list the ones not on your list yet
    QuickAdd {
        /// Suggestion to add (omit to list available suggestions)
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the list with the default meals (keeps settings)
    Defaults {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every meal
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore default meals and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write meals and settings as JSON (to stdout if no path is given)
    Export {
        /// Destination file
        path: Option<PathBuf>,
    },
    /// Replace meals and settings from a JSON export
    Import {
        /// Path to the export file
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        EnvFilter::new("dinner=debug,dinner_core=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = SqliteStore::open(&config.db_path)?;
    let mut session: AppSession = Session::open(store);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        meals = session.registry().len(),
        "session opened"
    );

    match cli.command {
        Commands::Add { name, json } => cmd_add(&mut session, &name, json),
        Commands::Remove { name, json } => cmd_remove(&mut session, &name, json),
        Commands::List { json } => cmd_list(&session, json),
        Commands::Suggest { date, json } => cmd_suggest(&mut session, date, json),
        Commands::Stats { json } => cmd_stats(&session, json),
        Commands::AvoidRecent { value, json } => cmd_avoid_recent(&mut session, &value, json),
        Commands::QuickAdd { name, json } => cmd_quick_add(&mut session, name.as_deref(), json),
        Commands::Defaults { json } => cmd_defaults(&mut session, json),
        Commands::Clear { yes, json } => {
            cmd_clear(&mut session, &mut StdinConfirm { assume_yes: yes }, json)
        }
        Commands::Reset { yes, json } => {
            cmd_reset(&mut session, &mut StdinConfirm { assume_yes: yes }, json)
        }
        Commands::Export { path } => cmd_export(&session, path.as_deref()),
        Commands::Import { path, json } => cmd_import(&mut session, &path, json),
    }
}
