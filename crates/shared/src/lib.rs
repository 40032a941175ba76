// Public modules
pub mod config;
pub mod extractor;
pub mod io;
pub mod llm;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod summarizer;

// Re-export commonly used types
pub use config::{Config, ConfigError, LlmConfig, LoggingConfig, Provider};
pub use extractor::HtmlTextExtractor;
pub use io::{list_html_files, output_path_for, save_record};
pub use llm::{Completion, CompletionBackend, LlmClient, LlmError};
pub use logging::LogHandle;
pub use models::OutputRecord;
pub use pipeline::{FileOutcome, Pipeline, RunSummary};
pub use prompt::PromptTemplate;
pub use summarizer::{Summarizer, SummaryResult};
