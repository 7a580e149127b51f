//! LLM-backed document extractor

use crate::prompt::PromptBuilder;
use hive_domain::traits::{DocumentExtractor, LlmProvider};
use hive_domain::SourceType;
use tracing::debug;

/// Schema hint passed to providers that support structured output
const RESPONSE_SCHEMA: &str = r#"{"type":"object","required":["hexes","summary"],"properties":{"hexes":{"type":"array"},"summary":{"type":"string"}}}"#;

/// Extractor that prompts a language model and returns its raw answer
pub struct LlmExtractor<L> {
    llm_provider: L,
}

impl<L: LlmProvider> LlmExtractor<L> {
    /// Create a new extractor around a provider
    pub fn new(llm_provider: L) -> Self {
        Self { llm_provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }
}

impl<L: LlmProvider> DocumentExtractor for LlmExtractor<L> {
    type Error = L::Error;

    fn extract(
        &self,
        text: &str,
        source_name: &str,
        source_type: SourceType,
    ) -> Result<String, Self::Error> {
        let prompt = PromptBuilder::new(text, source_name, source_type).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self.llm_provider.generate_structured(&prompt, RESPONSE_SCHEMA)?;
        debug!("LLM response length: {} chars", response.len());
        Ok(response)
    }
}
