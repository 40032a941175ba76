use crate::llm::{CompletionBackend, LlmError};
use crate::prompt::PromptTemplate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Summarizes extracted document text through a remote model.
///
/// The backend is constructed once by the caller and injected; this type
/// never reads configuration itself.
pub struct Summarizer<B> {
    backend: B,
    prompt: PromptTemplate,
}

impl<B: CompletionBackend> Summarizer<B> {
    pub fn new(backend: B, prompt: PromptTemplate) -> Self {
        Self { backend, prompt }
    }

    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn max_length(&self) -> usize {
        self.prompt.max_length()
    }

    /// One request per call, no retries. Summaries longer than the configured
    /// maximum are cut to exactly that many characters.
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult, LlmError> {
        tracing::info!(
            model = self.backend.model(),
            chars = text.chars().count(),
            "Summarizing document text"
        );

        let prompt = self.prompt.render(text);
        let completion = self
            .backend
            .complete(&prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize text"))?;

        let (summary, truncated) = truncate_chars(&completion.text, self.max_length());
        if truncated {
            tracing::warn!(
                max_length = self.max_length(),
                returned_length = completion.text.chars().count(),
                "Summary truncated due to length limit"
            );
        }

        tracing::debug!(
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            "Token usage"
        );

        Ok(SummaryResult {
            summary,
            input_tokens: completion.input_tokens,
            output_tokens: completion.output_tokens,
        })
    }
}

/// Hard cut at `max` characters (not bytes, not word boundaries).
/// Returns the kept text and whether anything was removed.
pub fn truncate_chars(text: &str, max: usize) -> (String, bool) {
    match text.char_indices().nth(max) {
        Some((end, _)) => (text[..end].to_string(), true),
        None => (text.to_string(), false),
    }
}
