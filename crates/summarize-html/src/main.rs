use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, LlmClient, LogHandle, Pipeline, PromptTemplate, Summarizer};
use std::path::PathBuf;
use tracing::instrument::WithSubscriber;

#[derive(Parser)]
#[command(name = "summarize-html")]
#[command(about = "Summarize a directory of HTML documents with an LLM and save the results as JSON")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = shared::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the input directory from the config file
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Override the output directory from the config file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Override the maximum summary length in characters
    #[arg(short, long)]
    max_length: Option<usize>,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(dir) = &self.input_dir {
            config.directories.input = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.directories.output = dir.clone();
        }
        if let Some(max_length) = self.max_length {
            if max_length == 0 {
                anyhow::bail!("--max-length must be greater than zero");
            }
            config.summary.max_length = max_length;
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    args.apply_overrides(&mut config)?;

    let logging = LogHandle::init(&config.logging).context("Failed to set up logging")?;

    let client = LlmClient::from_config(&config.llm).context("Failed to create LLM client")?;
    let prompt = PromptTemplate::summary(config.summary.max_length);
    let summarizer = Summarizer::new(client, prompt);

    let pipeline = Pipeline::new(
        &config.directories.input,
        &config.directories.output,
        summarizer,
    );

    let summary = pipeline
        .run()
        .with_subscriber(logging.dispatch().clone())
        .await?;

    println!(
        "✓ Processed {} files: {} written, {} skipped, {} failed",
        summary.found, summary.written, summary.skipped, summary.failed
    );

    Ok(())
}
