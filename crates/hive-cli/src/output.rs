//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use hive_domain::{Hex, Traversal};
use hive_ingest::BatchResult;
use hive_query::QueryResult;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest cell shown in tables before clipping
const MAX_CELL_CHARS: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of hexes.
    pub fn format_hexes(&self, hexes: &[Hex]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(hexes)?),
            OutputFormat::Quiet => Ok(ids(hexes.iter().map(|h| h.id.as_str()))),
            OutputFormat::Table => {
                if hexes.is_empty() {
                    return Ok(self.colorize("No hexes found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Type", "Entry Hints", "Edges", "Tags"]);
                for hex in hexes {
                    builder.push_record([
                        hex.id.clone(),
                        clip(&hex.name),
                        hex.kind.as_str().to_string(),
                        clip(&hex.entry_hints.join(", ")),
                        hex.edges.len().to_string(),
                        clip(&hex.tags.join(", ")),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format one hex with its edges.
    pub fn format_hex(&self, hex: &Hex) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(hex)?),
            OutputFormat::Quiet => Ok(hex.id.clone()),
            OutputFormat::Table => {
                let mut out = format!(
                    "{} {}\n",
                    self.colorize(&hex.name, "cyan"),
                    self.colorize(&format!("({}, {})", hex.id, hex.kind.as_str()), "magenta")
                );
                if let Some(description) = &hex.description {
                    out.push_str(description);
                    out.push('\n');
                }
                out.push_str(&format!("Entry hints: {}\n", hex.entry_hints.join(", ")));
                if !hex.tags.is_empty() {
                    out.push_str(&format!("Tags: {}\n", hex.tags.join(", ")));
                }
                if let Some(text) = hex.contents.data.as_ref().and_then(|d| d.as_text()) {
                    out.push_str(&format!("\n{}\n", text));
                }

                if hex.edges.is_empty() {
                    out.push_str(&self.colorize("\nNo edges.", "yellow"));
                    return Ok(out);
                }

                let mut builder = Builder::default();
                builder.push_record(["Edge", "To", "Priority", "When", "Description"]);
                for edge in &hex.edges {
                    builder.push_record([
                        edge.id.clone(),
                        edge.to.clone(),
                        edge.priority.to_string(),
                        clip(&serde_json::to_string(&edge.when)?),
                        clip(&edge.description),
                    ]);
                }
                out.push('\n');
                out.push_str(&render(builder));
                Ok(out)
            }
        }
    }

    /// Format ranked query results.
    pub fn format_query_results(&self, results: &[QueryResult<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_results: Vec<serde_json::Value> = results
                    .iter()
                    .map(|r| {
                        json!({
                            "id": r.hex.id,
                            "name": r.hex.name,
                            "type": r.hex.kind.as_str(),
                            "score": r.score,
                            "matchedHints": r.matched_hints,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_results)?)
            }
            OutputFormat::Quiet => Ok(ids(results.iter().map(|r| r.hex.id.as_str()))),
            OutputFormat::Table => {
                if results.is_empty() {
                    return Ok(self.colorize("No matching hexes.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "ID", "Name", "Score", "Matched Hints"]);
                for (rank, result) in results.iter().enumerate() {
                    builder.push_record([
                        (rank + 1).to_string(),
                        result.hex.id.clone(),
                        clip(&result.hex.name),
                        format!("{:.1}", result.score),
                        clip(&result.matched_hints.join(", ")),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the edges followed from a hex.
    pub fn format_traversals(&self, traversals: &[Traversal]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(traversals)?),
            OutputFormat::Quiet => Ok(ids(traversals.iter().map(|t| t.to.as_str()))),
            OutputFormat::Table => {
                if traversals.is_empty() {
                    return Ok(self.colorize("No edge matches this intent.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Edge", "To", "Priority", "Payload"]);
                for traversal in traversals {
                    builder.push_record([
                        traversal.edge_id.clone(),
                        traversal.to.clone(),
                        traversal.priority.to_string(),
                        clip(&serde_json::to_string(&traversal.payload)?),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the outcome of an ingest run.
    pub fn format_ingest(&self, result: &BatchResult, saved: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let failures: Vec<_> = result
                    .documents
                    .iter()
                    .flat_map(|d| d.failures.iter())
                    .collect();
                let output = json!({
                    "summary": result.summary,
                    "saved": saved,
                    "hexes": result.hexes,
                    "failures": failures,
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Quiet => Ok(ids(result.hexes.iter().map(|h| h.id.as_str()))),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                let verb = if saved { "Saved" } else { "Extracted" };
                lines.push(self.success(&format!("{} {} hex(es)", verb, result.hexes.len())));
                lines.push(self.info(&result.summary));

                for document in &result.documents {
                    for failure in &document.failures {
                        lines.push(self.warning(&format!("{}: {}", document.source_name, failure)));
                    }
                }

                if !result.hexes.is_empty() {
                    lines.push(self.format_hexes(&result.hexes)?);
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}

/// Shorten long cell text, counting characters
fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_CELL_CHARS - 3).collect();
    format!("{}...", head)
}
