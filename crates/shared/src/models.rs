use serde::{Deserialize, Serialize};

use crate::summarizer::SummaryResult;

/// One persisted summary per input document. Field order is the key order
/// of the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub input_html: String,
    pub prompt: String,
    pub summary: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub model: String,
    pub created_at: String,
}

impl OutputRecord {
    pub fn new(
        input_html: impl Into<String>,
        prompt: impl Into<String>,
        model: impl Into<String>,
        result: SummaryResult,
    ) -> Self {
        Self {
            input_html: input_html.into(),
            prompt: prompt.into(),
            summary: result.summary,
            input_tokens: result.input_tokens,
            output_tokens: result.output_tokens,
            model: model.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
