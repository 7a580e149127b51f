//! LLM prompt engineering for hex extraction

use hive_domain::SourceType;

/// Builds prompts for the LLM to extract hexes
pub struct PromptBuilder<'a> {
    text: &'a str,
    source_name: &'a str,
    source_type: SourceType,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, source_name: &'a str, source_type: SourceType) -> Self {
        Self {
            text,
            source_name,
            source_type,
        }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            SYSTEM_INSTRUCTIONS.len() + RESPONSE_FORMAT.len() + self.text.len() + 128,
        );

        // 1. Role, schema and guidelines
        prompt.push_str(SYSTEM_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The text to analyze
        prompt.push_str(&format!(
            "Analyze this {} document named \"{}\" and create hex node(s):\n\n",
            self.source_type, self.source_name
        ));
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        // 3. Output format
        prompt.push_str(RESPONSE_FORMAT);

        prompt
    }
}

const SYSTEM_INSTRUCTIONS: &str = r#"You are a knowledge extraction assistant. Your job is to analyze documents and create structured "hex" nodes for a knowledge graph.

Each hex represents a distinct concept, topic, or piece of information. A hex has:
- id: lowercase alphanumeric with hyphens (e.g., "react-hooks-guide")
- name: short human-readable title (max 100 chars)
- type: "data" for information, "tool" for actionable items, "gateway" for entry points, "junction" for decision points
- description: 1-2 sentence summary
- entryHints: CRITICAL - array of phrases someone might search to find this. Include synonyms, related terms, question phrasings. More is better.
- tags: categorization labels
- contents.data: the actual extracted information (structured JSON or plain text)
- edges: connections to other hexes from the same document (optional)

Guidelines:
1. Create 1-5 hexes depending on document complexity
2. For simple documents, one comprehensive hex is fine
3. For complex documents with distinct sections, create multiple focused hexes
4. entryHints drive search. Include the main topic phrase, related synonyms, questions someone might ask and key terms from the content
5. Keep contents.data focused but complete
6. Edge priorities are whole numbers from 0 to 100"#;

const RESPONSE_FORMAT: &str = r#"Respond with JSON in this exact format:
{
  "hexes": [
    {
      "id": "example-topic",
      "name": "Example Topic",
      "type": "data",
      "description": "Brief description",
      "entryHints": ["example topic", "what is example", "example guide"],
      "tags": ["example", "guide"],
      "contents": { "data": "The extracted information..." },
      "edges": []
    }
  ],
  "summary": "Brief summary of what was extracted"
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
