use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::OutputRecord;

const OUTPUT_SUFFIX: &str = "_summary.json";

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// `<output_dir>/<input-stem>_summary.json`
pub fn output_path_for(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// List `*.html` files directly inside `dir`, sorted by path
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("html") {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

/// Save a summary record as pretty-printed JSON (4-space indent, non-ASCII unescaped)
pub fn save_record(record: &OutputRecord, path: &Path) -> Result<()> {
    tracing::info!(path = %path.display(), "Saving summary record");

    let json = to_pretty_json(record).context("Failed to serialize summary record")?;

    fs::write(path, json)
        .with_context(|| format!("Failed to write summary file: {}", path.display()))
        .inspect_err(|e| tracing::error!(path = %path.display(), error = %e, "Save failed"))
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::SummaryResult;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "summarize-html-io-{}-{}",
                name,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn record(summary: &str) -> OutputRecord {
        OutputRecord::new(
            "/data/in/page.html",
            "Summarize {document}",
            "grok-2-latest",
            SummaryResult {
                summary: summary.to_string(),
                input_tokens: 10,
                output_tokens: 3,
            },
        )
    }

    #[test]
    fn test_output_path_uses_stem() {
        let path = output_path_for(Path::new("/out"), Path::new("/in/report.v2.html"));
        assert_eq!(path, PathBuf::from("/out/report.v2_summary.json"));
    }

    #[test]
    fn test_list_html_files_is_flat_and_sorted() {
        let dir = TempDir::new("list");
        fs::write(dir.0.join("b.html"), "<p>b</p>").unwrap();
        fs::write(dir.0.join("a.html"), "<p>a</p>").unwrap();
        fs::write(dir.0.join("notes.txt"), "skip").unwrap();
        fs::write(dir.0.join("upper.HTML"), "skip").unwrap();
        fs::create_dir_all(dir.0.join("nested.html")).unwrap();
        fs::write(dir.0.join("nested.html").join("c.html"), "<p>c</p>").unwrap();

        let files = list_html_files(&dir.0).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.html", "b.html"]);
    }

    #[test]
    fn test_list_missing_dir_is_error() {
        assert!(list_html_files(Path::new("/nonexistent/summarize-html/in")).is_err());
    }

    #[test]
    fn test_save_record_format() {
        let dir = TempDir::new("save");
        let path = dir.0.join("page_summary.json");
        save_record(&record("Résumé: 要約"), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"summary\": \"Résumé: 要約\""));
        assert!(written.contains("\n    \"input_html\""));
        assert!(written.ends_with("}\n"));

        let keys = ["input_html", "prompt", "summary", "input_tokens", "output_tokens"];
        let positions: Vec<_> = keys
            .iter()
            .map(|k| written.find(&format!("\"{}\"", k)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let loaded: OutputRecord = serde_json::from_str(&written).unwrap();
        assert_eq!(loaded.summary, "Résumé: 要約");
        assert_eq!(loaded.input_tokens, 10);
    }

    #[test]
    fn test_save_to_missing_dir_is_error() {
        let path = Path::new("/nonexistent/summarize-html/out/page_summary.json");
        assert!(save_record(&record("x"), path).is_err());
    }
}
