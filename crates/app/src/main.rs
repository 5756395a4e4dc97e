//! Eatsplit - split bills with friends
//!
//! Terminal frontend for the Eatsplit roster. Keeps a running balance per
//! friend and records bill splits against them.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eatsplit_core::Payer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod shell;
mod state;
mod viewmodel;

#[derive(Parser)]
#[command(name = "eatsplit")]
#[command(author, version, about = "Split bills with friends")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for storage files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all friends and balances
    List,
    /// Add a friend
    Add {
        name: String,

        /// Avatar service base URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Delete a friend by id
    Remove { id: String },
    /// Split a bill with a friend
    Split {
        /// Friend id
        id: String,

        /// Bill value
        #[arg(long)]
        bill: String,

        /// Your expense
        #[arg(long)]
        paid: String,

        /// Who is paying the bill (`user` or `friend`)
        #[arg(long, default_value = "user", value_parser = parse_payer)]
        payer: Payer,
    },
    /// Interactive session (default)
    Shell,
}

fn parse_payer(s: &str) -> Result<Payer, String> {
    s.parse().map_err(|e: eatsplit_core::Error| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let app_state = match state::AppState::new(cli.config, cli.data_dir) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_state.config().log.filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    tracing::debug!(data_dir = %app_state.data_dir().display(), "Starting Eatsplit");

    if let Err(e) = run(&app_state, cli.command.unwrap_or(Commands::Shell)) {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run(app_state: &state::AppState, command: Commands) -> eatsplit_core::Result<()> {
    let mut ledger = app_state.open_ledger()?;
    let avatar_base = &app_state.config().avatar.base_url;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::List => commands::list(&ledger, &mut out)?,
        Commands::Add { name, avatar } => {
            let avatar = avatar.as_deref().unwrap_or(avatar_base);
            commands::add(&mut ledger, &name, avatar, &mut out)?;
        }
        Commands::Remove { id } => commands::remove(&mut ledger, &id, &mut out)?,
        Commands::Split {
            id,
            bill,
            paid,
            payer,
        } => commands::split(&mut ledger, &id, &bill, &paid, payer, &mut out)?,
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = shell::Shell::new(ledger, avatar_base, out);
            shell.run(stdin.lock())?;
            return Ok(());
        }
    }

    out.flush()?;
    Ok(())
}
