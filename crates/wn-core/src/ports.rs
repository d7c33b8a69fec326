//! Port trait for wordnet data access.
//!
//! The engine never touches storage directly; every lookup goes through
//! [`WordnetStore`]. Adapters (the in-memory store, a relational store) implement it.
//!
//! Lexicons are addressed by their `id:version` specifier, called the
//! lexicon *key* throughout. Every list-valued method that takes a `lexicons`
//! slice returns rows grouped by lexicon in the order of that slice, and within
//! one lexicon in the store's natural insertion/rank order. An empty `lexicons`
//! slice matches nothing.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::relations::RelationFilter;
use crate::types::{AdjPosition, EntityKind, IliStatus, LexiconRecord, Metadata, Pos, Pronunciation, Tag};

// ── Row records ───────────────────────────────────────────────

/// Reference to a lexicon-scoped entity: kind, id and owning lexicon key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
    pub lexicon: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>, lexicon: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            lexicon: lexicon.into(),
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} [{}]", self.kind, self.id, self.lexicon)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRow {
    pub id: String,
    pub pos: Pos,
    pub lexicon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRow {
    pub form: String,
    pub id: Option<String>,
    pub script: Option<String>,
    /// 0 for the lemma, then alternative forms in declaration order.
    pub rank: u32,
    pub normalized: Option<String>,
    pub pronunciations: Vec<Pronunciation>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseRow {
    pub id: String,
    pub word_id: String,
    pub synset_id: String,
    pub lexicon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynsetRow {
    pub id: String,
    pub pos: Pos,
    pub ili: Option<String>,
    pub lexicon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IliRow {
    /// `None` only for proposed ILIs.
    pub id: Option<String>,
    pub status: IliStatus,
    pub definition: Option<String>,
    pub metadata: Metadata,
}

/// A relation edge leaving some source entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEdge {
    pub rel_type: String,
    pub target: EntityRef,
    /// Key of the lexicon that declared the edge.
    pub lexicon: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionRow {
    pub text: String,
    pub language: Option<String>,
    pub source_sense: Option<String>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRow {
    pub text: String,
    pub language: Option<String>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRow {
    pub value: u64,
    pub metadata: Metadata,
}

/// Entity counts for one lexicon, used for descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconStats {
    pub words_by_pos: Vec<(Pos, usize)>,
    pub synsets_by_pos: Vec<(Pos, usize)>,
    pub senses: usize,
    pub ilis: usize,
}

// ── Queries ───────────────────────────────────────────────────

/// Filters for a primary lookup of words, senses or synsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormQuery {
    /// Candidate spellings; `None` means no form filter.
    pub forms: Option<Vec<String>>,
    pub pos: Option<Pos>,
    pub ili: Option<String>,
    /// Lexicon keys to search, in result order.
    pub lexicons: Vec<String>,
    /// Also match `forms` against the precomputed normalized forms.
    pub normalized: bool,
    /// Match alternative forms as well as rank-0 lemmas.
    pub search_all_forms: bool,
}

impl FormQuery {
    pub fn new(lexicons: Vec<String>) -> Self {
        Self {
            lexicons,
            search_all_forms: true,
            ..Self::default()
        }
    }

    pub fn forms(mut self, forms: Vec<String>) -> Self {
        self.forms = Some(forms);
        self
    }

    pub fn pos(mut self, pos: Option<Pos>) -> Self {
        self.pos = pos;
        self
    }

    pub fn ili(mut self, ili: Option<String>) -> Self {
        self.ili = ili;
        self
    }

    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub fn search_all_forms(mut self, search_all_forms: bool) -> Self {
        self.search_all_forms = search_all_forms;
        self
    }
}

// ── Port trait ────────────────────────────────────────────────

/// Read access to an installed wordnet store.
///
/// Implementations must be safe for overlapping readers. Writes (adding or
/// removing lexicons) are outside this trait and are expected to be serialized
/// against readers by the adapter.
pub trait WordnetStore: Send + Sync {
    // Lexicons

    /// All installed lexicons, oldest installation first.
    fn list_lexicons(&self) -> Result<Vec<LexiconRecord>>;

    /// Entity counts for a lexicon.
    fn lexicon_stats(&self, lexicon: &str) -> Result<LexiconStats>;

    // Primary lookup

    /// Words whose forms match the query.
    fn find_words(&self, query: &FormQuery) -> Result<Vec<WordRow>>;

    /// Senses of words whose forms match the query; `pos` filters the word.
    fn find_senses(&self, query: &FormQuery) -> Result<Vec<SenseRow>>;

    /// Synsets matching the query, each at most once per lexicon.
    fn find_synsets(&self, query: &FormQuery) -> Result<Vec<SynsetRow>>;

    /// ILIs referenced by synsets in `lexicons`, optionally filtered by status.
    fn find_ilis(&self, status: Option<IliStatus>, lexicons: &[String]) -> Result<Vec<IliRow>>;

    // By-identifier lookup

    fn get_word(&self, id: &str, lexicon: &str) -> Result<Option<WordRow>>;
    fn get_sense(&self, id: &str, lexicon: &str) -> Result<Option<SenseRow>>;
    fn get_synset(&self, id: &str, lexicon: &str) -> Result<Option<SynsetRow>>;
    fn get_ili(&self, id: &str) -> Result<Option<IliRow>>;

    /// The ILI proposed by a synset that has no assigned identifier.
    fn proposed_ili(&self, synset: &EntityRef) -> Result<Option<IliRow>>;

    /// Synsets in `lexicons` linked to any of `ilis`, in `lexicons` order.
    fn synsets_by_ili(&self, ilis: &[String], lexicons: &[String]) -> Result<Vec<SynsetRow>>;

    // Navigation joins

    /// Forms of a word ordered by rank; rank 0 is the lemma.
    fn word_forms(&self, word: &EntityRef) -> Result<Vec<FormRow>>;

    /// Senses of a word ordered by their rank within the word.
    fn word_senses(&self, word: &EntityRef) -> Result<Vec<SenseRow>>;

    /// Member senses of a synset ordered by their rank within the synset.
    fn synset_senses(&self, synset: &EntityRef) -> Result<Vec<SenseRow>>;

    /// Relation edges leaving `source` whose target has `target_kind`.
    ///
    /// Only edges whose type passes `types` and whose declaring lexicon and
    /// target lexicon are both in `lexicons` are returned.
    fn relations(
        &self,
        source: &EntityRef,
        target_kind: EntityKind,
        types: &RelationFilter,
        lexicons: &[String],
    ) -> Result<Vec<RelationEdge>>;

    // Entity details

    fn definitions(&self, synset: &EntityRef) -> Result<Vec<DefinitionRow>>;
    fn examples(&self, entity: &EntityRef) -> Result<Vec<ExampleRow>>;
    fn counts(&self, sense: &EntityRef) -> Result<Vec<CountRow>>;
    fn frames(&self, sense: &EntityRef) -> Result<Vec<String>>;
    fn adjposition(&self, sense: &EntityRef) -> Result<Option<AdjPosition>>;
    fn lexicalized(&self, entity: &EntityRef) -> Result<bool>;
    fn lexfile(&self, synset: &EntityRef) -> Result<Option<String>>;
    fn metadata(&self, entity: &EntityRef) -> Result<Metadata>;
}
