use std::sync::{Arc, Mutex};

use shared::{Completion, CompletionBackend, LlmError};

/// Replies with a fixed summary, or fails for prompts containing a marker.
#[derive(Clone)]
pub struct MockBackend {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_when_prompt_contains: Option<String>,
}

impl MockBackend {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_when_prompt_contains: None,
        }
    }

    pub fn failing_on(summary: &str, marker: &str) -> Self {
        Self {
            fail_when_prompt_contains: Some(marker.to_string()),
            ..Self::new(summary)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CompletionBackend for MockBackend {
    fn model(&self) -> &str {
        "mock-grok"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if let Some(marker) = &self.fail_when_prompt_contains {
            if prompt.contains(marker.as_str()) {
                return Err(LlmError::Api {
                    status: 503,
                    message: "service unavailable".into(),
                });
            }
        }

        Ok(Completion {
            text: self.summary.clone(),
            input_tokens: 256,
            output_tokens: 32,
        })
    }
}
