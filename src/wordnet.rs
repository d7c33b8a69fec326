//! The configuration-bound query object.
//!
//! A [`Wordnet`] resolves its lexicon filters once, at construction, and
//! every entity it returns carries that configuration. Primary lookups by
//! form try, per lemmatizer candidate:
//! 1. Exact match against stored forms.
//! 2. With a normalizer: the query form against precomputed normalized forms.
//! 3. With a normalizer: the normalized query form against normalized forms.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;
use wn_core::{
    DefaultNormalizer, EntityKind, FormQuery, IliStatus, Lemmatize, LemmatizeResult,
    Normalize, Pos, Result, WnError, WordnetStore,
};

use crate::context::WordnetContext;
use crate::entities::{dedup_entities, Form, Ili, ScopedEntity, Sense, Synset, Word};
use crate::lexicon::{Lexicon, LexiconConfiguration, LexiconFilters};
use crate::settings::Settings;

// ── Builder ───────────────────────────────────────────────────

pub struct WordnetBuilder {
    store: Arc<dyn WordnetStore>,
    filters: LexiconFilters,
    normalizer: Option<Arc<dyn Normalize>>,
    lemmatizer: Option<Arc<dyn Lemmatize>>,
    search_all_forms: bool,
}

impl WordnetBuilder {
    fn new(store: Arc<dyn WordnetStore>) -> Self {
        Self {
            store,
            filters: LexiconFilters::default(),
            normalizer: Some(Arc::new(DefaultNormalizer)),
            lemmatizer: None,
            search_all_forms: true,
        }
    }

    /// Space-separated lexicon specifiers, e.g. `"test-en:1 test-ja"`.
    pub fn lexicon(mut self, lexicon: impl Into<String>) -> Self {
        self.filters.lexicon = Some(lexicon.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.filters.lang = Some(lang.into());
        self
    }

    /// Expand lexicon specifiers; `""` disables expand lexicons.
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.filters.expand = Some(expand.into());
        self
    }

    pub fn filters(mut self, filters: LexiconFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn normalizer(mut self, normalizer: Arc<dyn Normalize>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Exact-match lookups only.
    pub fn no_normalizer(mut self) -> Self {
        self.normalizer = None;
        self
    }

    pub fn lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatize>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    pub fn search_all_forms(mut self, search_all_forms: bool) -> Self {
        self.search_all_forms = search_all_forms;
        self
    }

    pub fn build(self) -> Result<Wordnet> {
        let config = LexiconConfiguration::resolve(self.store.list_lexicons()?, &self.filters)?
            .with_normalizer(self.normalizer)
            .with_lemmatizer(self.lemmatizer)
            .with_search_all_forms(self.search_all_forms);
        Ok(Wordnet {
            ctx: WordnetContext::new(self.store, config),
        })
    }
}

// ── Wordnet ───────────────────────────────────────────────────

/// A view of the store restricted to a resolved set of lexicons.
#[derive(Clone, Debug)]
pub struct Wordnet {
    ctx: WordnetContext,
}

impl Wordnet {
    pub fn builder(store: Arc<dyn WordnetStore>) -> WordnetBuilder {
        WordnetBuilder::new(store)
    }

    /// Default mode over every installed lexicon, with the default normalizer.
    pub fn new(store: Arc<dyn WordnetStore>) -> Result<Self> {
        Self::builder(store).build()
    }

    pub fn from_settings(store: Arc<dyn WordnetStore>, settings: &Settings) -> Result<Self> {
        let builder = Self::builder(store)
            .filters(settings.filters())
            .search_all_forms(settings.search_all_forms);
        if settings.normalize {
            builder.build()
        } else {
            builder.no_normalizer().build()
        }
    }

    pub fn context(&self) -> &WordnetContext {
        &self.ctx
    }

    pub fn config(&self) -> &LexiconConfiguration {
        self.ctx.config()
    }

    /// The same view with a lemmatizer attached.
    pub fn with_lemmatizer(&self, lemmatizer: Arc<dyn Lemmatize>) -> Self {
        let config = self.ctx.config().clone().with_lemmatizer(Some(lemmatizer));
        Self {
            ctx: self.ctx.with_config(config),
        }
    }

    /// The lexicons primary queries search.
    pub fn lexicons(&self) -> Result<Vec<Lexicon>> {
        self.config()
            .lexicons()
            .iter()
            .map(|key| self.ctx.lexicon(key))
            .collect()
    }

    /// The expand lexicons consulted for relation traversal.
    pub fn expanded_lexicons(&self) -> Result<Vec<Lexicon>> {
        self.config()
            .expands()
            .iter()
            .map(|key| self.ctx.lexicon(key))
            .collect()
    }

    // ── Primary queries ──────────────────────────────────────────

    /// Words matching `form` and `pos`; no arguments returns every word.
    pub fn words(&self, form: Option<&str>, pos: Option<&str>) -> Result<Vec<Word>> {
        self.find_words(form, Pos::parse_filter(pos)?)
    }

    /// Senses whose word matches `form` and `pos`.
    pub fn senses(&self, form: Option<&str>, pos: Option<&str>) -> Result<Vec<Sense>> {
        self.find_senses(form, Pos::parse_filter(pos)?)
    }

    /// Synsets with a member word matching `form`, filtered by `pos` and `ili`.
    pub fn synsets(&self, form: Option<&str>, pos: Option<&str>, ili: Option<&str>) -> Result<Vec<Synset>> {
        self.find_synsets(form, Pos::parse_filter(pos)?, ili)
    }

    pub(crate) fn find_words(&self, form: Option<&str>, pos: Option<Pos>) -> Result<Vec<Word>> {
        let store = self.ctx.store();
        self.find(form, pos, None, |q| store.find_words(q), |row| {
            Word::from_row(row, self.ctx.clone())
        })
    }

    pub(crate) fn find_senses(&self, form: Option<&str>, pos: Option<Pos>) -> Result<Vec<Sense>> {
        let store = self.ctx.store();
        self.find(form, pos, None, |q| store.find_senses(q), |row| {
            Sense::from_row(row, self.ctx.clone())
        })
    }

    pub(crate) fn find_synsets(
        &self,
        form: Option<&str>,
        pos: Option<Pos>,
        ili: Option<&str>,
    ) -> Result<Vec<Synset>> {
        let store = self.ctx.store();
        self.find(form, pos, ili, |q| store.find_synsets(q), |row| {
            Synset::from_row(row, self.ctx.clone())
        })
    }

    fn find<R, T, Q, B>(
        &self,
        form: Option<&str>,
        pos: Option<Pos>,
        ili: Option<&str>,
        query: Q,
        build: B,
    ) -> Result<Vec<T>>
    where
        T: ScopedEntity,
        Q: Fn(&FormQuery) -> Result<Vec<R>>,
        B: Fn(R) -> T,
    {
        let config = self.config();
        let base = FormQuery::new(config.lexicons().to_vec())
            .ili(ili.map(str::to_string))
            .search_all_forms(config.search_all_forms());

        let Some(form) = form else {
            return Ok(query(&base.pos(pos))?.into_iter().map(build).collect());
        };

        let mut candidates: LemmatizeResult = config
            .lemmatizer()
            .map(|l| l.lemmatize(form, pos))
            .unwrap_or_default();
        candidates.retain(|_, forms| !forms.is_empty());
        if candidates.is_empty() {
            candidates.insert(pos, BTreeSet::from([form.to_string()]));
        } else {
            debug!(form, candidates = ?candidates, "lemmatizer candidates");
        }

        let mut results = Vec::new();
        for (candidate_pos, forms) in &candidates {
            let forms: Vec<String> = forms.iter().cloned().collect();
            let q = base.clone().pos(*candidate_pos);
            let mut rows = query(&q.clone().forms(forms.clone()))?;
            if let Some(normalizer) = config.normalizer().filter(|_| rows.is_empty()) {
                rows = query(&q.clone().forms(forms.clone()).normalized(true))?;
                if rows.is_empty() {
                    let normalized: Vec<String> = forms.iter().map(|f| normalizer.normalize(f)).collect();
                    debug!(form, normalized = ?normalized, "retrying with normalized form");
                    rows = query(&q.forms(normalized).normalized(true))?;
                }
            }
            results.extend(rows.into_iter().map(&build));
        }

        let mut results = dedup_entities(results);
        results.sort_by_key(|e| config.lexicon_rank(e.lexicon_key()));
        Ok(results)
    }

    /// Distinct lemma strings of the matching words, in result order.
    pub fn lemmas(&self, form: Option<&str>, pos: Option<&str>) -> Result<Vec<String>> {
        let mut seen = BTreeSet::new();
        Ok(self
            .lemma_forms(form, pos)?
            .into_iter()
            .map(|f| f.value)
            .filter(|v| seen.insert(v.clone()))
            .collect())
    }

    /// Lemma forms of the matching words.
    pub fn lemma_forms(&self, form: Option<&str>, pos: Option<&str>) -> Result<Vec<Form>> {
        self.words(form, pos)?.iter().map(Word::lemma).collect()
    }

    // ── By-identifier lookups ────────────────────────────────────

    /// The first word with `id` in lexicon order.
    pub fn word(&self, id: &str) -> Result<Word> {
        let store = self.ctx.store();
        for lexicon in self.config().lexicons() {
            if let Some(row) = store.get_word(id, lexicon)? {
                return Ok(Word::from_row(row, self.ctx.clone()));
            }
        }
        Err(WnError::not_found(EntityKind::Word, id))
    }

    pub fn sense(&self, id: &str) -> Result<Sense> {
        let store = self.ctx.store();
        for lexicon in self.config().lexicons() {
            if let Some(row) = store.get_sense(id, lexicon)? {
                return Ok(Sense::from_row(row, self.ctx.clone()));
            }
        }
        Err(WnError::not_found(EntityKind::Sense, id))
    }

    pub fn synset(&self, id: &str) -> Result<Synset> {
        let store = self.ctx.store();
        for lexicon in self.config().lexicons() {
            if let Some(row) = store.get_synset(id, lexicon)? {
                return Ok(Synset::from_row(row, self.ctx.clone()));
            }
        }
        Err(WnError::not_found(EntityKind::Synset, id))
    }

    /// An ILI referenced by a synset of this wordnet's lexicons.
    pub fn ili(&self, id: &str) -> Result<Ili> {
        self.ctx
            .store()
            .find_ilis(None, self.config().lexicons())?
            .into_iter()
            .find(|row| row.id.as_deref() == Some(id))
            .map(Ili::from)
            .ok_or_else(|| WnError::not_found(EntityKind::Ili, id))
    }

    /// ILIs referenced by this wordnet's synsets, optionally by status.
    pub fn ilis(&self, status: Option<IliStatus>) -> Result<Vec<Ili>> {
        Ok(self
            .ctx
            .store()
            .find_ilis(status, self.config().lexicons())?
            .into_iter()
            .map(Ili::from)
            .collect())
    }

    // ── Description ──────────────────────────────────────────────

    /// Summary of the primary and expand lexicons with entity counts.
    pub fn describe(&self) -> Result<String> {
        let mut out = String::from("Primary lexicons:\n");
        for lexicon in self.lexicons()? {
            self.describe_lexicon(&lexicon, &mut out)?;
        }
        let expands = self.expanded_lexicons()?;
        if !expands.is_empty() {
            out.push_str("Expand lexicons:\n");
            for lexicon in expands {
                self.describe_lexicon(&lexicon, &mut out)?;
            }
        }
        Ok(out)
    }

    fn describe_lexicon(&self, lexicon: &Lexicon, out: &mut String) -> Result<()> {
        let stats = self.ctx.store().lexicon_stats(&lexicon.specifier())?;
        let lines = [
            format!("  {}", lexicon.specifier()),
            format!("    Label  : {}", lexicon.label()),
            format!("    URL    : {}", lexicon.url().unwrap_or("")),
            format!("    License: {}", lexicon.license()),
            format!("    Words  : {}", pos_counts(&stats.words_by_pos)),
            format!("    Senses : {:>6}", stats.senses),
            format!("    Synsets: {}", pos_counts(&stats.synsets_by_pos)),
            format!("    ILIs   : {:>6}", stats.ilis),
        ];
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(())
    }
}

fn pos_counts(counts: &[(Pos, usize)]) -> String {
    let by_pos: BTreeMap<&str, usize> = counts.iter().map(|(p, n)| (p.as_str(), *n)).collect();
    let total: usize = by_pos.values().sum();
    let parts: Vec<String> = by_pos.iter().map(|(p, n)| format!("{p}: {n}")).collect();
    format!("{total:>6} ({})", parts.join(", "))
}

