//! Lexicons and the lexicon configuration threaded through every query.
//!
//! A [`LexiconConfiguration`] is resolved once per query chain and carried,
//! immutably, by every entity derived from it. It fixes:
//! - which lexicons primary queries search
//! - which lexicons serve as expand sources for relation traversal
//! - whether default mode is active (no `lexicon`/`lang` filter given)
//! - the attached normalizer and lemmatizer strategies

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};
use wn_core::specifier::resolve_specifiers;
use wn_core::{LexiconRecord, Lemmatize, Metadata, Normalize, Result, WnError};

// ── Installed-lexicon snapshot ────────────────────────────────

/// Snapshot of the installed lexicons, in install order.
#[derive(Debug, Clone, Default)]
pub struct LexiconIndex {
    installed: Arc<Vec<LexiconRecord>>,
}

impl LexiconIndex {
    pub fn new(installed: Vec<LexiconRecord>) -> Self {
        Self {
            installed: Arc::new(installed),
        }
    }

    pub fn records(&self) -> &[LexiconRecord] {
        &self.installed
    }

    pub fn get(&self, key: &str) -> Option<&LexiconRecord> {
        self.installed.iter().find(|r| r.specifier() == key)
    }

    /// Keys of the lexicons `key` extends, nearest first. `depth < 0` is unbounded.
    pub fn bases(&self, key: &str, depth: i32) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut current = key.to_string();
        while depth < 0 || out.len() < depth as usize {
            let Some(base) = self
                .get(&current)
                .and_then(|r| r.extends.as_ref())
                .map(|b| b.specifier())
                .filter(|b| self.get(b).is_some())
            else {
                break;
            };
            if base == key || out.contains(&base) {
                break;
            }
            out.push(base.clone());
            current = base;
        }
        out
    }

    /// Keys of lexicons extending `key`, breadth first. `depth < 0` is unbounded.
    pub fn extensions(&self, key: &str, depth: i32) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut queue: VecDeque<(String, i32)> = VecDeque::from([(key.to_string(), 0)]);
        while let Some((current, level)) = queue.pop_front() {
            if depth >= 0 && level >= depth {
                continue;
            }
            for rec in self.installed.iter() {
                let extends_current = rec
                    .extends
                    .as_ref()
                    .is_some_and(|b| b.specifier() == current);
                let spec = rec.specifier();
                if extends_current && spec != key && !out.contains(&spec) {
                    out.push(spec.clone());
                    queue.push_back((spec, level + 1));
                }
            }
        }
        out
    }

    /// The lexicon, its bases and its extensions, in install order.
    pub fn family(&self, key: &str) -> Vec<String> {
        let mut members = vec![key.to_string()];
        members.extend(self.bases(key, -1));
        members.extend(self.extensions(key, -1));
        self.installed
            .iter()
            .map(|r| r.specifier())
            .filter(|s| members.contains(s))
            .collect()
    }
}

// ── Lexicon handle ────────────────────────────────────────────

/// An installed lexicon.
#[derive(Clone)]
pub struct Lexicon {
    record: LexiconRecord,
    index: LexiconIndex,
}

impl Lexicon {
    pub(crate) fn new(record: LexiconRecord, index: LexiconIndex) -> Self {
        Self { record, index }
    }

    pub(crate) fn from_key(key: &str, index: &LexiconIndex) -> Result<Self> {
        index
            .get(key)
            .cloned()
            .map(|rec| Self::new(rec, index.clone()))
            .ok_or_else(|| WnError::not_found(wn_core::EntityKind::Lexicon, key))
    }

    pub fn record(&self) -> &LexiconRecord {
        &self.record
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn version(&self) -> &str {
        &self.record.version
    }

    pub fn label(&self) -> &str {
        &self.record.label
    }

    pub fn language(&self) -> &str {
        &self.record.language
    }

    pub fn email(&self) -> &str {
        &self.record.email
    }

    pub fn license(&self) -> &str {
        &self.record.license
    }

    pub fn url(&self) -> Option<&str> {
        self.record.url.as_deref()
    }

    pub fn citation(&self) -> Option<&str> {
        self.record.citation.as_deref()
    }

    pub fn logo(&self) -> Option<&str> {
        self.record.logo.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.record.metadata
    }

    /// The `id:version` specifier.
    pub fn specifier(&self) -> String {
        self.record.specifier()
    }

    pub fn confidence(&self) -> f64 {
        self.record.confidence()
    }

    /// Declared dependencies, each paired with the installed lexicon if present.
    pub fn requires(&self) -> Vec<(String, Option<Lexicon>)> {
        self.record
            .requires
            .iter()
            .map(|dep| {
                let spec = dep.specifier();
                let installed = Lexicon::from_key(&spec, &self.index).ok();
                (spec, installed)
            })
            .collect()
    }

    /// The lexicon this one extends, if it is an installed extension.
    pub fn extends(&self) -> Option<Lexicon> {
        self.index
            .bases(&self.specifier(), 1)
            .first()
            .and_then(|key| Lexicon::from_key(key, &self.index).ok())
    }

    /// Lexicons extending this one. `depth = 1` gives direct extensions;
    /// a negative depth gives all descendants.
    pub fn extensions(&self, depth: i32) -> Vec<Lexicon> {
        self.index
            .extensions(&self.specifier(), depth)
            .iter()
            .filter_map(|key| Lexicon::from_key(key, &self.index).ok())
            .collect()
    }
}

impl PartialEq for Lexicon {
    fn eq(&self, other: &Self) -> bool {
        self.record.id == other.record.id && self.record.version == other.record.version
    }
}

impl Eq for Lexicon {}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Lexicon {} [{}]>",
            self.record.specifier(),
            self.record.language
        )
    }
}

impl std::fmt::Display for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.record.specifier())
    }
}

// ── Configuration ─────────────────────────────────────────────

/// Caller-supplied lexicon filters. Empty strings count as absent, except
/// `expand = Some("")`, which explicitly disables expand lexicons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconFilters {
    pub lexicon: Option<String>,
    pub lang: Option<String>,
    pub expand: Option<String>,
}

impl LexiconFilters {
    pub fn lexicon(mut self, lexicon: impl Into<String>) -> Self {
        self.lexicon = Some(lexicon.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    fn lexicon_filter(&self) -> Option<&str> {
        self.lexicon.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn lang_filter(&self) -> Option<&str> {
        self.lang.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// No lexicon or language filter: default mode.
    pub fn is_default_mode(&self) -> bool {
        self.lexicon_filter().is_none() && self.lang_filter().is_none()
    }
}

/// Resolved query context. Immutable and cheap to share.
#[derive(Clone)]
pub struct LexiconConfiguration {
    lexicons: Vec<String>,
    expands: Vec<String>,
    default_mode: bool,
    index: LexiconIndex,
    normalizer: Option<Arc<dyn Normalize>>,
    lemmatizer: Option<Arc<dyn Lemmatize>>,
    search_all_forms: bool,
}

impl LexiconConfiguration {
    /// Resolve filters against the installed lexicons.
    ///
    /// In explicit mode an unspecified `expand` defaults to the installed
    /// dependencies of the resolved lexicons; missing dependencies are logged.
    /// In default mode it defaults to every installed lexicon.
    pub fn resolve(installed: Vec<LexiconRecord>, filters: &LexiconFilters) -> Result<Self> {
        let index = LexiconIndex::new(installed);
        let default_mode = filters.is_default_mode();
        let lang = filters.lang_filter();

        let resolved = resolve_specifiers(
            filters.lexicon_filter().unwrap_or("*"),
            lang,
            index.records(),
            false,
        )?;
        if let (Some(lang), None) = (lang, filters.lexicon_filter()) {
            if resolved.len() > 1 {
                warn!(
                    lang,
                    count = resolved.len(),
                    "multiple lexicons match language filter"
                );
            }
        }
        let lexicons: Vec<String> = resolved.iter().map(|r| r.specifier()).collect();

        let expands: Vec<String> = match filters.expand.as_deref().map(str::trim) {
            Some("") => Vec::new(),
            Some(spec) => resolve_specifiers(spec, None, index.records(), false)?
                .iter()
                .map(|r| r.specifier())
                .collect(),
            None if default_mode => index.records().iter().map(|r| r.specifier()).collect(),
            None => {
                let mut deps: Vec<String> = Vec::new();
                let mut missing: Vec<String> = Vec::new();
                for dep in resolved.iter().flat_map(|r| r.requires.iter()) {
                    let spec = dep.specifier();
                    if index.get(&spec).is_some() {
                        if !deps.contains(&spec) {
                            deps.push(spec);
                        }
                    } else if !missing.contains(&spec) {
                        missing.push(spec);
                    }
                }
                if !missing.is_empty() {
                    warn!(missing = %missing.join(" "), "lexicon dependencies not available");
                }
                deps
            }
        };

        debug!(
            lexicons = ?lexicons,
            expands = ?expands,
            default_mode,
            "resolved lexicon configuration"
        );

        Ok(Self {
            lexicons,
            expands,
            default_mode,
            index,
            normalizer: None,
            lemmatizer: None,
            search_all_forms: true,
        })
    }

    pub fn with_normalizer(mut self, normalizer: Option<Arc<dyn Normalize>>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Option<Arc<dyn Lemmatize>>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn with_search_all_forms(mut self, search_all_forms: bool) -> Self {
        self.search_all_forms = search_all_forms;
        self
    }

    /// Copy the query strategies of another configuration.
    pub(crate) fn with_strategies_of(mut self, other: &LexiconConfiguration) -> Self {
        self.normalizer = other.normalizer.clone();
        self.lemmatizer = other.lemmatizer.clone();
        self.search_all_forms = other.search_all_forms;
        self
    }

    /// Keys of the lexicons primary queries search, in resolution order.
    pub fn lexicons(&self) -> &[String] {
        &self.lexicons
    }

    /// Keys of the expand lexicons consulted for relation traversal.
    pub fn expands(&self) -> &[String] {
        &self.expands
    }

    pub fn default_mode(&self) -> bool {
        self.default_mode
    }

    pub fn index(&self) -> &LexiconIndex {
        &self.index
    }

    pub fn normalizer(&self) -> Option<&dyn Normalize> {
        self.normalizer.as_deref()
    }

    pub fn lemmatizer(&self) -> Option<&dyn Lemmatize> {
        self.lemmatizer.as_deref()
    }

    pub fn search_all_forms(&self) -> bool {
        self.search_all_forms
    }

    /// Position of a lexicon in the resolved order, for stable result sorting.
    pub(crate) fn lexicon_rank(&self, key: &str) -> usize {
        self.lexicons
            .iter()
            .position(|k| k == key)
            .unwrap_or(self.lexicons.len())
    }

    /// Lexicons visible to secondary navigation from an entity in `key`.
    ///
    /// Default mode narrows to the entity's own lexicon plus its bases and
    /// extensions. Explicit mode uses the resolved lexicons, except for
    /// entities outside them (reached through an expand lexicon), which are
    /// scoped like default mode.
    pub fn scope_for(&self, key: &str) -> Vec<String> {
        if self.default_mode || !self.lexicons.iter().any(|k| k == key) {
            self.index.family(key)
        } else {
            self.lexicons.clone()
        }
    }
}

impl std::fmt::Debug for LexiconConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconConfiguration")
            .field("lexicons", &self.lexicons)
            .field("expands", &self.expands)
            .field("default_mode", &self.default_mode)
            .field("normalizer", &self.normalizer.is_some())
            .field("lemmatizer", &self.lemmatizer.is_some())
            .field("search_all_forms", &self.search_all_forms)
            .finish()
    }
}
