//! Engine settings
//!
//! Loads optional YAML settings and applies environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::lexicon::LexiconFilters;

pub const CONFIG_ENV: &str = "WN_CONFIG";
pub const DATA_DIR_ENV: &str = "WN_DATA_DIR";
pub const LEXICON_ENV: &str = "WN_LEXICON";
pub const LANG_ENV: &str = "WN_LANG";
pub const EXPAND_ENV: &str = "WN_EXPAND";

/// Settings file name looked up in the working directory.
pub const SETTINGS_FILE: &str = "wn.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of lexicon documents.
    pub data_dir: PathBuf,
    /// Default lexicon specifier for `Wordnet::from_settings`.
    pub lexicon: Option<String>,
    /// Default language filter.
    pub lang: Option<String>,
    /// Default expand specifier; `""` disables expand lexicons.
    pub expand: Option<String>,
    /// Attach the default form normalizer.
    pub normalize: bool,
    /// Match alternative forms as well as lemmas.
    pub search_all_forms: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            lexicon: None,
            lang: None,
            expand: None,
            normalize: true,
            search_all_forms: true,
        }
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(".wn_data"),
        None => PathBuf::from(".wn_data"),
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse settings")
    }

    /// The lexicon filters these settings describe.
    pub fn filters(&self) -> LexiconFilters {
        LexiconFilters {
            lexicon: self.lexicon.clone(),
            lang: self.lang.clone(),
            expand: self.expand.clone(),
        }
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(lexicon) = var(LEXICON_ENV) {
            self.lexicon = Some(lexicon);
        }
        if let Some(lang) = var(LANG_ENV) {
            self.lang = Some(lang);
        }
        if let Some(expand) = var(EXPAND_ENV) {
            self.expand = Some(expand);
        }
    }
}

pub struct SettingsLoader {
    path: Option<PathBuf>,
}

impl SettingsLoader {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Create loader from WN_CONFIG or default to "wn.yaml"
    ///
    /// Path resolution order:
    /// 1. WN_CONFIG environment variable (a `.env` file is honored)
    /// 2. "wn.yaml" in the working directory, if present
    /// 3. No file: built-in defaults
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::new(Some(PathBuf::from(path)));
        }

        if Path::new(SETTINGS_FILE).is_file() {
            return Self::new(Some(PathBuf::from(SETTINGS_FILE)));
        }

        Self::new(None)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the settings file (if any), then apply `WN_*` overrides.
    pub fn load(&self) -> Result<Settings> {
        self.load_with(|name| std::env::var(name).ok())
    }

    fn load_with<F>(&self, var: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match &self.path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let settings = Settings::from_yaml(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                info!("Loaded settings from {}", path.display());
                settings
            }
            None => Settings::default(),
        };
        settings.apply_overrides(var);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.normalize);
        assert!(s.search_all_forms);
        assert!(s.data_dir.ends_with(".wn_data"));
        assert_eq!(s.filters(), LexiconFilters::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let s = Settings::from_yaml("lexicon: test-en\nnormalize: false\n").unwrap();
        assert_eq!(s.lexicon.as_deref(), Some("test-en"));
        assert!(!s.normalize);
        assert!(s.search_all_forms);
    }

    #[test]
    fn test_load_file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wn.yaml");
        std::fs::write(&path, "lexicon: test-en\nexpand: ''\n").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([(LANG_ENV, "ja"), (DATA_DIR_ENV, "/srv/wn")]);
        let s = SettingsLoader::new(Some(path))
            .load_with(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(s.lexicon.as_deref(), Some("test-en"));
        assert_eq!(s.lang.as_deref(), Some("ja"));
        assert_eq!(s.expand.as_deref(), Some(""));
        assert_eq!(s.data_dir, PathBuf::from("/srv/wn"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let loader = SettingsLoader::new(Some(PathBuf::from("/nonexistent/wn.yaml")));
        let err = loader.load_with(|_| None).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/wn.yaml"));
    }
}
