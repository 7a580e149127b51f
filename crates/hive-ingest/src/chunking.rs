//! Splitting documents into titled chunks

use crate::config::IngestConfig;
use crate::types::DocumentChunk;

/// Default discard threshold for short chunks (characters)
pub const DEFAULT_MIN_CHUNK_CHARS: usize = 100;

const MAIN_CONTENT_TITLE: &str = "Main Content";

const PREAMBLE_TITLE: &str = "Introduction";

/// Splits a document into ordered chunks.
///
/// Strategies are tried in order: Markdown headings, then paragraph groups
/// for long documents, then the whole document as one chunk. A strategy only
/// wins when it yields at least two chunks.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_chunk_size: usize,
    min_chunk_chars: usize,
}

impl Chunker {
    /// Create a chunker
    pub fn new(max_chunk_size: usize, min_chunk_chars: usize) -> Self {
        Self {
            max_chunk_size,
            min_chunk_chars,
        }
    }

    /// Create a chunker from the pipeline configuration
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.max_chunk_size, config.min_chunk_chars)
    }

    /// Chunk the given text.
    ///
    /// Blank text yields no chunks; any other text yields at least one.
    pub fn chunk(&self, text: &str) -> Vec<DocumentChunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        if let Some(chunks) = self.chunk_by_heading(text) {
            return chunks;
        }

        if char_len(text) > self.max_chunk_size {
            if let Some(chunks) = self.chunk_by_paragraph(text) {
                return chunks;
            }
        }

        vec![DocumentChunk {
            title: MAIN_CONTENT_TITLE.to_string(),
            content: text.trim().to_string(),
            index: 0,
        }]
    }

    /// Split at level 1-3 headings; each chunk keeps its heading line.
    /// Text before the first heading becomes an "Introduction" section.
    fn chunk_by_heading(&self, text: &str) -> Option<Vec<DocumentChunk>> {
        let mut preamble: Vec<&str> = Vec::new();
        let mut sections: Vec<(String, Vec<&str>)> = Vec::new();

        for line in text.lines() {
            if let Some(title) = heading_text(line) {
                sections.push((title.to_string(), vec![line]));
            } else if let Some((_, lines)) = sections.last_mut() {
                lines.push(line);
            } else {
                preamble.push(line);
            }
        }

        if sections.is_empty() {
            return None;
        }
        if preamble.iter().any(|line| !line.trim().is_empty()) {
            sections.insert(0, (PREAMBLE_TITLE.to_string(), preamble));
        }

        if sections.len() < 2 {
            return None;
        }

        let chunks: Vec<DocumentChunk> = sections
            .into_iter()
            .map(|(title, lines)| (title, lines.join("\n").trim().to_string()))
            .filter(|(_, content)| char_len(content) > self.min_chunk_chars)
            .enumerate()
            .map(|(index, (title, content))| DocumentChunk {
                title,
                content,
                index,
            })
            .collect();

        (chunks.len() >= 2).then_some(chunks)
    }

    /// Greedily group blank-line separated paragraphs up to the size limit
    fn chunk_by_paragraph(&self, text: &str) -> Option<Vec<DocumentChunk>> {
        let mut groups: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for paragraph in paragraphs(text) {
            let paragraph_len = char_len(&paragraph);
            if !current.is_empty() && current_len + 2 + paragraph_len > self.max_chunk_size {
                groups.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push_str("\n\n");
                current_len += 2;
            }
            current.push_str(&paragraph);
            current_len += paragraph_len;
        }
        if !current.is_empty() {
            groups.push(current);
        }

        if groups
            .last()
            .is_some_and(|last| char_len(last.trim()) <= self.min_chunk_chars)
        {
            groups.pop();
        }

        if groups.len() < 2 {
            return None;
        }

        Some(
            groups
                .into_iter()
                .enumerate()
                .map(|(index, content)| DocumentChunk {
                    title: format!("Section {}", index + 1),
                    content,
                    index,
                })
                .collect(),
        )
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

/// Chunk `text` with the default short-chunk threshold
pub fn chunk(text: &str, max_chunk_size: usize) -> Vec<DocumentChunk> {
    Chunker::new(max_chunk_size, DEFAULT_MIN_CHUNK_CHARS).chunk(text)
}

/// Heading text of a `#`, `##` or `###` line
fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let title = rest.trim();
    (!title.is_empty()).then_some(title)
}

/// Blank-line separated paragraphs, trimmed, without empty ones
fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }

    paragraphs
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn test_two_headings_become_two_chunks() {
        let text = format!("# Intro\n{}\n# Details\n{}", filler(25), filler(25));
        let chunks = chunk(&text, 8_000);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].title, "Intro");
        assert_eq!(chunks[1].title, "Details");
        assert!(chunks[0].content.starts_with("# Intro"));
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_short_sections_are_dropped() {
        let text = format!(
            "## A\n{}\n## Tiny\nshort\n### C\n{}",
            filler(25),
            filler(25)
        );
        let chunks = chunk(&text, 8_000);
        let titles: Vec<_> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_preamble_before_first_heading_is_kept() {
        let preamble = format!("PREAMBLE-MARK {}", filler(50));
        let text = format!("{}

# Intro
{}
# Details
{}", preamble, filler(25), filler(25));
        let chunks = chunk(&text, 8_000);

        let titles: Vec<_> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction", "Intro", "Details"]);
        assert_eq!(chunks[0].content, preamble);
        assert_eq!(chunks[2].index, 2);
    }

    #[test]
    fn test_short_preamble_is_dropped() {
        let text = format!("draft
# Intro
{}
# Details
{}", filler(25), filler(25));
        let titles: Vec<_> = chunk(&text, 8_000).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Intro", "Details"]);
    }

    #[test]
    fn test_preamble_and_one_heading_split_in_two() {
        let text = format!("{}
# Details
{}", filler(25), filler(25));
        let chunks = chunk(&text, 8_000);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].title, "Introduction");
        assert_eq!(chunks[1].title, "Details");
    }

    #[test]
    fn test_blank_text_has_no_chunks() {
        assert!(chunk("", 8_000).is_empty());
        assert!(chunk(" \n\t\n ", 8_000).is_empty());
    }

    #[test]
    fn test_deep_headings_are_not_boundaries() {
        let text = format!("#### Four\n{}\n#### Levels\n{}", filler(25), filler(25));
        let chunks = chunk(&text, 8_000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Main Content");
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        assert_eq!(heading_text("#hashtag"), None);
        assert_eq!(heading_text("#   "), None);
        assert_eq!(heading_text("### Title  "), Some("Title"));
    }

    #[test]
    fn test_one_surviving_section_falls_through() {
        let text = format!("# Big\n{}\n# Small\nbrief", filler(40));
        let chunks = chunk(&text, 8_000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Main Content");
    }

    #[test]
    fn test_small_document_is_one_chunk() {
        let chunks = chunk("Just a short note about nothing.", 8_000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].content, "Just a short note about nothing.");
    }

    #[test]
    fn test_long_document_splits_on_paragraphs() {
        let paragraph = filler(30); // 179 chars
        let text = vec![paragraph.as_str(); 6].join("\n\n");
        let chunks = chunk(&text, 400);

        assert_eq!(chunks.len(), 3);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.title, format!("Section {}", i + 1));
            assert!(c.content.chars().count() <= 400);
        }
    }

    #[test]
    fn test_short_trailing_group_is_dropped() {
        let text = format!("{}\n\n{}\n\ntail", filler(30), filler(30));
        let chunks = chunk(&text, 180);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| !c.content.contains("tail")));
    }

    #[test]
    fn test_no_chunk_is_empty() {
        let text = format!("# A\n{}\n\n\n# B\n\n{}\n\n", filler(30), filler(30));
        for c in chunk(&text, 100) {
            assert!(!c.content.trim().is_empty());
        }
    }
}
