//! Module-level convenience queries.
//!
//! Each call builds a throwaway [`Wordnet`] from the filters and runs a
//! single query. Callers running many queries should build a `Wordnet` once.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use wn_core::{IliStatus, Result, WordnetStore};
use wn_memstore::{DocumentLoader, MemoryStore};

use crate::entities::{Ili, Sense, Synset, Word};
use crate::lexicon::{Lexicon, LexiconFilters};
use crate::settings::Settings;
use crate::wordnet::Wordnet;

fn wordnet(store: &Arc<dyn WordnetStore>, filters: &LexiconFilters) -> Result<Wordnet> {
    Wordnet::builder(Arc::clone(store))
        .filters(filters.clone())
        .build()
}

pub fn lexicons(store: &Arc<dyn WordnetStore>, filters: &LexiconFilters) -> Result<Vec<Lexicon>> {
    wordnet(store, filters)?.lexicons()
}

pub fn words(
    store: &Arc<dyn WordnetStore>,
    form: Option<&str>,
    pos: Option<&str>,
    filters: &LexiconFilters,
) -> Result<Vec<Word>> {
    wordnet(store, filters)?.words(form, pos)
}

pub fn senses(
    store: &Arc<dyn WordnetStore>,
    form: Option<&str>,
    pos: Option<&str>,
    filters: &LexiconFilters,
) -> Result<Vec<Sense>> {
    wordnet(store, filters)?.senses(form, pos)
}

pub fn synsets(
    store: &Arc<dyn WordnetStore>,
    form: Option<&str>,
    pos: Option<&str>,
    ili: Option<&str>,
    filters: &LexiconFilters,
) -> Result<Vec<Synset>> {
    wordnet(store, filters)?.synsets(form, pos, ili)
}

pub fn word(store: &Arc<dyn WordnetStore>, id: &str, filters: &LexiconFilters) -> Result<Word> {
    wordnet(store, filters)?.word(id)
}

pub fn sense(store: &Arc<dyn WordnetStore>, id: &str, filters: &LexiconFilters) -> Result<Sense> {
    wordnet(store, filters)?.sense(id)
}

pub fn synset(store: &Arc<dyn WordnetStore>, id: &str, filters: &LexiconFilters) -> Result<Synset> {
    wordnet(store, filters)?.synset(id)
}

pub fn ili(store: &Arc<dyn WordnetStore>, id: &str, filters: &LexiconFilters) -> Result<Ili> {
    wordnet(store, filters)?.ili(id)
}

pub fn ilis(
    store: &Arc<dyn WordnetStore>,
    status: Option<IliStatus>,
    filters: &LexiconFilters,
) -> Result<Vec<Ili>> {
    wordnet(store, filters)?.ilis(status)
}

/// A memory store holding every lexicon document in `settings.data_dir`.
pub fn open_memory_store(settings: &Settings) -> anyhow::Result<Arc<dyn WordnetStore>> {
    let store = MemoryStore::new();
    let count = DocumentLoader::new(&settings.data_dir)
        .load_into(&store)
        .with_context(|| format!("Failed to open wordnet data in {}", settings.data_dir.display()))?;
    info!("Opened memory store with {} lexicons", count);
    Ok(Arc::new(store))
}
