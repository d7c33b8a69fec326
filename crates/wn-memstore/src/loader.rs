//! Lexicon document loader
//!
//! Loads YAML lexicon documents from a data directory into a [`MemoryStore`].
//! The directory itself is chosen by the caller, normally from `wn::Settings`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::document::LexiconDocument;
use crate::store::MemoryStore;

pub struct DocumentLoader {
    data_dir: PathBuf,
}

impl DocumentLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load one lexicon document.
    pub fn load_file(&self, path: &Path) -> Result<LexiconDocument> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        LexiconDocument::from_yaml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load every `*.yaml`/`*.yml` document in the data directory, sorted by
    /// file name. The sort order is the install order.
    pub fn load_all(&self) -> Result<Vec<LexiconDocument>> {
        info!("Loading lexicons from {}", self.data_dir.display());
        let mut paths = Vec::new();
        let entries = std::fs::read_dir(&self.data_dir)
            .with_context(|| format!("Failed to read directory {}", self.data_dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "yaml" || e == "yml");
            if path.is_file() && is_yaml {
                paths.push(path);
            }
        }
        paths.sort();
        paths.iter().map(|p| self.load_file(p)).collect()
    }

    /// Install every document in the data directory; returns how many.
    pub fn load_into(&self, store: &MemoryStore) -> Result<usize> {
        let documents = self.load_all()?;
        let count = documents.len();
        for doc in documents {
            let specifier = doc.specifier();
            store
                .add_document(doc)
                .with_context(|| format!("Failed to install lexicon {specifier}"))?;
        }
        info!("Loaded {} lexicons", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_core::WordnetStore;

    const DOC_A: &str = r#"
lexicon: { id: aa, version: "1", label: A, language: en }
synsets:
  - { id: ss-1, pos: n }
"#;

    const DOC_B: &str = r#"
lexicon: { id: bb, version: "1", label: B, language: fr }
"#;

    #[test]
    fn test_load_directory_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("20-b.yaml"), DOC_B).unwrap();
        std::fs::write(dir.path().join("10-a.yml"), DOC_A).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = MemoryStore::new();
        let loader = DocumentLoader::new(dir.path());
        assert_eq!(loader.load_into(&store).unwrap(), 2);
        let ids: Vec<_> = store
            .list_lexicons()
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["aa", "bb"]);
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "lexicon: [").unwrap();
        let err = DocumentLoader::new(dir.path()).load_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DocumentLoader::new(dir.path().join("absent"));
        assert!(loader.load_all().is_err());
    }
}
