const DOCUMENT_PLACEHOLDER: &str = "{document}";

/// Summarization instructions with the length limit already filled in.
/// Built once per run and shared across documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    /// Byte offset of the document placeholder within `template`
    placeholder_at: usize,
    max_length: usize,
}

impl PromptTemplate {
    pub fn summary(max_length: usize) -> Self {
        let before = format!(
            r#"You are an expert summarization assistant. Write a concise summary of the document below.

RULES:
1. The summary must not exceed {max_length} characters
2. Respond with the summary only - no introduction, preamble, or closing remarks
3. Focus on the most important points and skip repeated or minor details
4. Use only information contained in the document

Document:
"#,
            max_length = max_length,
        );
        let after = format!("\n\nSummary (max {} characters):", max_length);

        Self {
            template: format!("{}{}{}", before, DOCUMENT_PLACEHOLDER, after),
            placeholder_at: before.len(),
            max_length,
        }
    }

    /// The template as persisted alongside each summary, placeholder intact.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Substitute the document text. Braces inside the document are kept verbatim.
    pub fn render(&self, document: &str) -> String {
        let before = &self.template[..self.placeholder_at];
        let after = &self.template[self.placeholder_at + DOCUMENT_PLACEHOLDER.len()..];

        let mut prompt = String::with_capacity(before.len() + document.len() + after.len());
        prompt.push_str(before);
        prompt.push_str(document);
        prompt.push_str(after);
        prompt
    }
}
