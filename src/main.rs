// src/main.rs

use clap::Parser;
use std::path::PathBuf;
use tealog::{default_db_path, Result, TeaStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tealog - a personal log of tea events",
    long_about = "Opens the tea log database and prints the recorded teas, ordered by name. Logging, deleting and renaming go through the UI front end; this shell only renders the current state of the store."
)]
struct Cli {
    /// Only show teas whose name contains this text.
    term: Option<String>,

    /// Path to the database file. Defaults to ~/.config/tealog/tea_log.db.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let db_path = match cli.db {
        Some(p) => p,
        None => default_db_path()?,
    };
    tracing::debug!("Using database at {}", db_path.display());

    let store = TeaStore::open(&db_path)?;
    let entries = store.search(cli.term.as_deref().unwrap_or(""));

    if entries.is_empty() {
        println!("No teas logged.");
        return Ok(());
    }

    for entry in &entries {
        // Reformat the local timestamp for display; fall back to the raw
        // column text if it does not parse.
        let logged = entry
            .local_datetime()
            .map(|dt| dt.format("%b %e %Y, %H:%M").to_string())
            .unwrap_or_else(|| entry.local_time.clone());
        println!("[{}] {} (logged {})", entry.id, entry.tea_name, logged);
    }
    println!("{} tea(s).", entries.len());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
