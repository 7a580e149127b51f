//! Hive CLI - Command-line interface for the Hive document graph.

use clap::Parser;
use hive_cli::commands;
use hive_cli::config::OutputFormat;
use hive_cli::{Cli, Command, Config, Formatter};
use hive_store::SqliteStore;
use std::fs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color_enabled = !cli.no_color;
    if let Err(e) = run(cli).await {
        let formatter = Formatter::new(OutputFormat::Table, color_enabled);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

/// Log to stderr, honouring RUST_LOG when set
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> hive_cli::Result<()> {
    // Load config, falling back to defaults when absent
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.corpus.path = Some(db);
    }

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut store = SqliteStore::new(&db_path)?;

    let output = match cli.command {
        Command::Ingest(args) => {
            let pipeline = commands::ollama_pipeline(&config, args.model.as_deref())?;
            commands::execute_ingest(&args, &pipeline, &mut store, &formatter).await?
        }
        Command::Query(args) => commands::execute_query(&args, &store, &formatter)?,
        Command::List => commands::execute_list(&store, &formatter)?,
        Command::Show(args) => commands::execute_show(&args, &store, &formatter)?,
        Command::Traverse(args) => commands::execute_traverse(&args, &store, &formatter)?,
    };

    println!("{}", output);
    Ok(())
}
