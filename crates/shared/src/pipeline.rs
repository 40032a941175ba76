use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::extractor::HtmlTextExtractor;
use crate::io::{ensure_dir, list_html_files, output_path_for, save_record};
use crate::llm::CompletionBackend;
use crate::models::OutputRecord;
use crate::summarizer::Summarizer;

/// Terminal state of a file that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    /// The output already existed before extraction started
    Skipped(PathBuf),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives extraction, summarization and writing for every HTML file in a
/// directory, one file at a time.
pub struct Pipeline<B> {
    input_dir: PathBuf,
    output_dir: PathBuf,
    summarizer: Summarizer<B>,
}

impl<B: CompletionBackend> Pipeline<B> {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        summarizer: Summarizer<B>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            summarizer,
        }
    }

    /// Process every `*.html` file in the input directory.
    ///
    /// Only directory setup failures are returned as errors; a failing
    /// document is logged and counted, and the run moves on.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!(
            input_dir = %self.input_dir.display(),
            output_dir = %self.output_dir.display(),
            max_length = self.summarizer.max_length(),
            "Starting HTML summarization run"
        );

        let files = self.prepare().inspect_err(|e| {
            let error = format!("{:#}", e);
            tracing::error!(%error, "Failed to prepare input and output directories");
        })?;
        let mut summary = RunSummary {
            found: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            tracing::info!(input_dir = %self.input_dir.display(), "No HTML files found");
            return Ok(summary);
        }

        for path in &files {
            match self.process_file(path).await {
                Ok(FileOutcome::Written(_)) => summary.written += 1,
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    summary.failed += 1;
                    let error = format!("{:#}", e);
                    tracing::error!(file = %display_name(path), %error, "Failed to process file");
                }
            }
        }

        tracing::info!(
            found = summary.found,
            written = summary.written,
            skipped = summary.skipped,
            failed = summary.failed,
            "Processing completed"
        );

        Ok(summary)
    }

    fn prepare(&self) -> Result<Vec<PathBuf>> {
        ensure_dir(&self.input_dir)?;
        ensure_dir(&self.output_dir)?;
        list_html_files(&self.input_dir)
    }

    /// pending -> extracted -> summarized -> written, or skipped when the
    /// output file is already present.
    #[tracing::instrument(skip_all, fields(file = %display_name(path)))]
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let output_path = output_path_for(&self.output_dir, path);
        if output_path.exists() {
            tracing::info!("Skipping: output file already exists");
            return Ok(FileOutcome::Skipped(output_path));
        }

        let text = HtmlTextExtractor::extract_file(path)?;

        let result = self
            .summarizer
            .summarize(&text)
            .await
            .with_context(|| format!("Summarization failed for {}", path.display()))?;

        let record = OutputRecord::new(
            resolved_path(path),
            self.summarizer.prompt().template(),
            self.summarizer.model(),
            result,
        );
        save_record(&record, &output_path)?;

        tracing::info!(
            output = %output_path.display(),
            input_tokens = record.input_tokens,
            output_tokens = record.output_tokens,
            "Summary written"
        );

        Ok(FileOutcome::Written(output_path))
    }
}

fn resolved_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
