use anyhow::{Context, Result};
use scraper::{Html, Node};
use std::fs;
use std::path::Path;

/// Elements whose text content is never rendered.
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

pub struct HtmlTextExtractor;

impl HtmlTextExtractor {
    /// Read an HTML file and return its visible text, one text block per line.
    pub fn extract_file(path: &Path) -> Result<String> {
        tracing::info!(path = %path.display(), "Extracting text from HTML file");

        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read HTML file: {}", path.display()))
            .inspect_err(|e| {
                tracing::error!(path = %path.display(), error = %e, "Text extraction failed")
            })?;

        Ok(Self::extract_html(&html))
    }

    /// Parsing is lenient: unclosed or misnested tags never fail.
    pub fn extract_html(html: &str) -> String {
        let document = Html::parse_document(html);

        let mut lines = Vec::new();
        for node in document.tree.root().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
                Node::Element(element) => NON_VISIBLE_ELEMENTS.contains(&element.name()),
                _ => false,
            });
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed);
            }
        }

        lines.join("\n")
    }
}
