use std::fs;
use std::path::PathBuf;

use shared::OutputRecord;

/// Input and output directories under the system temp dir, removed on drop.
pub struct TestWorkspace {
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "summarize-html-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("input")).unwrap();
        Self { root }
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join("input")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn add_html(&self, name: &str, html: &str) -> PathBuf {
        let path = self.input_dir().join(name);
        fs::write(&path, html).unwrap();
        path
    }

    pub fn output_files(&self) -> Vec<String> {
        let dir = self.output_dir();
        if !dir.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir().join(name)
    }

    pub fn read_record(&self, name: &str) -> OutputRecord {
        let path = self.output_path(name);
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        serde_json::from_str(&content).unwrap()
    }
}

impl Drop for TestWorkspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
