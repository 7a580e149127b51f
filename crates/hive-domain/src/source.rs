//! Source document types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of document a hex was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Text pulled out of a PDF
    Pdf,

    /// Plain or pasted text
    Text,

    /// A fetched web page
    Url,

    /// Markdown document
    Markdown,
}

impl SourceType {
    /// Get the source type as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Pdf => "pdf",
            SourceType::Text => "text",
            SourceType::Url => "url",
            SourceType::Markdown => "markdown",
        }
    }

    /// Infer the source type from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(SourceType::Pdf),
            "txt" | "text" => Some(SourceType::Text),
            "md" | "markdown" => Some(SourceType::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(SourceType::Pdf),
            "text" => Ok(SourceType::Text),
            "url" => Ok(SourceType::Url),
            "markdown" => Ok(SourceType::Markdown),
            other => Err(format!(
                "Invalid source type '{}'. Must be one of: pdf, text, url, markdown",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceType::from_extension("MD"), Some(SourceType::Markdown));
        assert_eq!(SourceType::from_extension("txt"), Some(SourceType::Text));
        assert_eq!(SourceType::from_extension("pdf"), Some(SourceType::Pdf));
        assert_eq!(SourceType::from_extension("docx"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("URL".parse::<SourceType>().unwrap(), SourceType::Url);
        assert!("html".parse::<SourceType>().is_err());
    }
}
