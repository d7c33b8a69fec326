//! The store handle plus resolved configuration carried by every entity.

use std::sync::Arc;

use wn_core::{Result, WordnetStore};

use crate::lexicon::{Lexicon, LexiconConfiguration, LexiconFilters};

/// Shared query context: the data-access port and the configuration that
/// produced an entity. Cloning is two reference-count bumps.
#[derive(Clone)]
pub struct WordnetContext {
    store: Arc<dyn WordnetStore>,
    config: Arc<LexiconConfiguration>,
}

impl WordnetContext {
    pub fn new(store: Arc<dyn WordnetStore>, config: LexiconConfiguration) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn WordnetStore {
        self.store.as_ref()
    }

    pub fn store_handle(&self) -> Arc<dyn WordnetStore> {
        Arc::clone(&self.store)
    }

    pub fn config(&self) -> &LexiconConfiguration {
        &self.config
    }

    pub fn lexicon(&self, key: &str) -> Result<Lexicon> {
        Lexicon::from_key(key, self.config.index())
    }

    /// Same store, new configuration.
    pub(crate) fn with_config(&self, config: LexiconConfiguration) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::new(config),
        }
    }

    /// Re-resolve `filters` against the store, keeping this context's
    /// normalizer, lemmatizer and form-search settings.
    pub(crate) fn rebound(&self, filters: &LexiconFilters) -> Result<Self> {
        let config = LexiconConfiguration::resolve(self.store.list_lexicons()?, filters)?
            .with_strategies_of(&self.config);
        Ok(self.with_config(config))
    }
}

impl std::fmt::Debug for WordnetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordnetContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
