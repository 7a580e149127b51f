//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use hive_domain::SourceType;
use std::path::PathBuf;

/// Hive CLI - Turn documents into a navigable graph of hexes.
#[derive(Debug, Parser)]
#[command(name = "hive")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Corpus database path
    #[arg(long, global = true, env = "HIVE_DB")]
    pub db: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn documents into hexes and save them
    Ingest(IngestArgs),

    /// Rank hexes against an intent
    Query(QueryArgs),

    /// List every hex in the corpus
    List,

    /// Show one hex
    Show(ShowArgs),

    /// Follow the edges of a hex that match an intent
    Traverse(TraverseArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Markdown or text files to ingest (repeatable)
    #[arg(short = 'F', long = "file", conflicts_with = "text", required_unless_present = "text")]
    pub files: Vec<PathBuf>,

    /// Text to ingest directly
    #[arg(short, long)]
    pub text: Option<String>,

    /// Source name (defaults to the file name, or "Pasted Text")
    #[arg(short, long)]
    pub name: Option<String>,

    /// Source type (defaults to one inferred from the file extension)
    #[arg(long = "type", value_enum)]
    pub source_type: Option<SourceTypeArg>,

    /// Model to extract with, overriding the configured one
    #[arg(short, long, env = "HIVE_MODEL")]
    pub model: Option<String>,

    /// Extract and print hexes without saving them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// What you are looking for
    pub intent: String,

    /// Maximum number of results
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub limit: u16,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Hex identifier
    pub id: String,
}

/// Arguments for the traverse command.
#[derive(Debug, Parser)]
pub struct TraverseArgs {
    /// Hex to start from
    pub id: String,

    /// Intent evaluated against edge conditions
    #[arg(short, long, default_value = "")]
    pub intent: String,

    /// JSON object carried along the edges
    #[arg(short, long)]
    pub payload: Option<String>,
}

/// Source type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SourceTypeArg {
    /// Plain text
    Text,
    /// Markdown
    Markdown,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SourceTypeArg> for SourceType {
    fn from(source_type: SourceTypeArg) -> Self {
        match source_type {
            SourceTypeArg::Text => SourceType::Text,
            SourceTypeArg::Markdown => SourceType::Markdown,
        }
    }
}
