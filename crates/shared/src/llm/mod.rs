pub mod anthropic;
pub mod openai;

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::config::{LlmConfig, Provider};

pub use anthropic::AnthropicClient;
pub use openai::OpenAiCompatibleClient;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Client configuration error: {0}")]
    Config(String),
}

/// Text returned by the model plus the provider's own token accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A remote model that turns a fully rendered prompt into a completion.
pub trait CompletionBackend {
    fn model(&self) -> &str;

    fn complete(&self, prompt: &str) -> impl Future<Output = Result<Completion, LlmError>>;
}

/// Backend chosen from configuration at startup.
pub enum LlmClient {
    OpenAi(OpenAiCompatibleClient),
    Anthropic(AnthropicClient),
}

impl LlmClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = build_http_client(config.timeout_secs)?;

        let client = match config.provider {
            Provider::Xai | Provider::OpenAi => {
                let base_url = config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| default_base_url(config.provider).to_string());
                LlmClient::OpenAi(
                    OpenAiCompatibleClient::new(http, &config.api_key, &config.model)
                        .with_base_url(base_url)
                        .with_temperature(config.temperature),
                )
            }
            Provider::Anthropic => {
                let mut client = AnthropicClient::new(http, &config.api_key, &config.model)
                    .with_temperature(config.temperature)
                    .with_max_tokens(config.max_tokens);
                if let Some(base_url) = &config.base_url {
                    client = client.with_base_url(base_url);
                }
                LlmClient::Anthropic(client)
            }
        };

        Ok(client)
    }
}

impl CompletionBackend for LlmClient {
    fn model(&self) -> &str {
        match self {
            LlmClient::OpenAi(client) => client.model(),
            LlmClient::Anthropic(client) => client.model(),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        match self {
            LlmClient::OpenAi(client) => client.complete(prompt).await,
            LlmClient::Anthropic(client) => client.complete(prompt).await,
        }
    }
}

fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::Xai => "https://api.x.ai/v1",
        Provider::OpenAi => "https://api.openai.com/v1",
        Provider::Anthropic => anthropic::DEFAULT_BASE_URL,
    }
}

fn build_http_client(timeout_secs: u64) -> Result<Client, LlmError> {
    if timeout_secs == 0 {
        return Err(LlmError::Config("timeout_secs must be greater than zero".into()));
    }

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Read an error body for an unsuccessful response.
async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("unknown error"));
    LlmError::Api { status, message }
}
