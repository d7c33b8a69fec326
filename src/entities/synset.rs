use std::collections::BTreeMap;

use wn_core::relations::{HOLONYM_RELATIONS, HYPERNYM_RELATIONS, HYPONYM_RELATIONS, MERONYM_RELATIONS};
use wn_core::{
    DefinitionRow, EntityKind, ExampleRow, Pos, RelationFilter, RelationKind, Result, SynsetRow,
};

use super::{dedup_entities, Element, Form, Ili, ScopedEntity, Sense, Word};
use crate::context::WordnetContext;
use crate::lexicon::LexiconFilters;
use crate::relations::{self, Closure, RelationPaths, Relatable};
use crate::taxonomy;

/// Identifier of the synthetic root joining separate taxonomies.
pub const SIMULATED_ROOT_ID: &str = "*ROOT*";

/// Where a synset handle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynsetOrigin {
    Stored,
    /// The virtual top node appended by `simulate_root` taxonomy calls.
    SimulatedRoot,
}

/// A set of senses sharing one meaning.
#[derive(Clone)]
pub struct Synset {
    el: Element,
    pos: Pos,
    ili: Option<String>,
    origin: SynsetOrigin,
}

scoped_entity!(Synset, EntityKind::Synset, |s: &Synset| s.is_simulated_root());

impl Synset {
    pub(crate) fn from_row(row: SynsetRow, ctx: WordnetContext) -> Self {
        Self {
            el: Element::new(row.id, row.lexicon, ctx),
            pos: row.pos,
            ili: row.ili,
            origin: SynsetOrigin::Stored,
        }
    }

    /// The virtual root above every taxonomy. All simulated roots are equal
    /// whatever lexicon they were built from.
    pub(crate) fn simulated_root(of: &Synset) -> Self {
        Self {
            el: Element::new(SIMULATED_ROOT_ID, of.lexicon_key(), of.context().clone()),
            pos: of.pos,
            ili: None,
            origin: SynsetOrigin::SimulatedRoot,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn origin(&self) -> SynsetOrigin {
        self.origin
    }

    pub fn is_simulated_root(&self) -> bool {
        self.origin == SynsetOrigin::SimulatedRoot
    }

    /// Outside the wordnet's configured lexicons, as for a synset reached
    /// through an expand lexicon. Always false in default mode, where every
    /// installed lexicon is configured.
    pub fn is_foreign(&self) -> bool {
        !self
            .context()
            .config()
            .lexicons()
            .iter()
            .any(|k| k == self.lexicon_key())
    }

    /// The assigned interlingual identifier, if any.
    pub fn ili_id(&self) -> Option<&str> {
        self.ili.as_deref()
    }

    /// The ILI entry, including a proposed ILI that has no identifier yet.
    pub fn ili(&self) -> Result<Option<Ili>> {
        if self.is_simulated_root() {
            return Ok(None);
        }
        let store = self.context().store();
        let row = match &self.ili {
            Some(id) => store.get_ili(id)?,
            None => store.proposed_ili(&self.entity_ref())?,
        };
        Ok(row.map(Ili::from))
    }

    // ── Details ──────────────────────────────────────────────────

    /// The first definition's text.
    pub fn definition(&self) -> Result<Option<String>> {
        Ok(self.definitions()?.into_iter().next().map(|d| d.text))
    }

    pub fn definitions(&self) -> Result<Vec<DefinitionRow>> {
        if self.is_simulated_root() {
            return Ok(Vec::new());
        }
        self.context().store().definitions(&self.entity_ref())
    }

    pub fn examples(&self) -> Result<Vec<ExampleRow>> {
        if self.is_simulated_root() {
            return Ok(Vec::new());
        }
        self.context().store().examples(&self.entity_ref())
    }

    pub fn lexicalized(&self) -> Result<bool> {
        if self.is_simulated_root() {
            return Ok(false);
        }
        self.context().store().lexicalized(&self.entity_ref())
    }

    pub fn lexfile(&self) -> Result<Option<String>> {
        if self.is_simulated_root() {
            return Ok(None);
        }
        self.context().store().lexfile(&self.entity_ref())
    }

    // ── Members ──────────────────────────────────────────────────

    /// Member senses in synset order.
    pub fn senses(&self) -> Result<Vec<Sense>> {
        if self.is_simulated_root() {
            return Ok(Vec::new());
        }
        let ctx = self.context();
        Ok(ctx
            .store()
            .synset_senses(&self.entity_ref())?
            .into_iter()
            .map(|row| Sense::from_row(row, ctx.clone()))
            .collect())
    }

    pub fn words(&self) -> Result<Vec<Word>> {
        let words = self
            .senses()?
            .iter()
            .map(Sense::word)
            .collect::<Result<Vec<_>>>()?;
        Ok(dedup_entities(words))
    }

    /// Lemma forms of the member words.
    pub fn lemmas(&self) -> Result<Vec<Form>> {
        self.words()?.iter().map(Word::lemma).collect()
    }

    // ── Relations ────────────────────────────────────────────────

    /// Synset relations grouped by relation name, local edges first.
    pub fn relations(&self, types: &[&str]) -> Result<BTreeMap<String, Vec<Synset>>> {
        let filter = RelationFilter::parse(RelationKind::SynsetSynset, types)?;
        Ok(relations::group_by_type(self.related_with_types(&filter)?))
    }

    /// Synsets related by any of `types`; no types (or `"*"`) means all.
    pub fn get_related(&self, types: &[&str]) -> Result<Vec<Synset>> {
        let filter = RelationFilter::parse(RelationKind::SynsetSynset, types)?;
        self.related_synsets(&filter)
    }

    pub(crate) fn related_synsets(&self, filter: &RelationFilter) -> Result<Vec<Synset>> {
        let related = self.related_with_types(filter)?;
        Ok(dedup_entities(related.into_iter().map(|(_, s)| s).collect()))
    }

    /// Hypernyms and instance hypernyms.
    pub fn hypernyms(&self) -> Result<Vec<Synset>> {
        self.related_synsets(&RelationFilter::of(HYPERNYM_RELATIONS))
    }

    /// Hyponyms and instance hyponyms.
    pub fn hyponyms(&self) -> Result<Vec<Synset>> {
        self.related_synsets(&RelationFilter::of(HYPONYM_RELATIONS))
    }

    pub fn holonyms(&self) -> Result<Vec<Synset>> {
        self.related_synsets(&RelationFilter::of(HOLONYM_RELATIONS))
    }

    pub fn meronyms(&self) -> Result<Vec<Synset>> {
        self.related_synsets(&RelationFilter::of(MERONYM_RELATIONS))
    }

    /// Lazy transitive closure, e.g. `synset.closure(&["hypernym"])`.
    pub fn closure(&self, types: &[&str]) -> Result<Closure<Synset>> {
        let filter = RelationFilter::parse(RelationKind::SynsetSynset, types)?;
        Ok(Closure::new(self.clone(), filter))
    }

    /// Relation paths from this synset, ending at `end` when given.
    pub fn relation_paths(&self, types: &[&str], end: Option<&Synset>) -> Result<RelationPaths<Synset>> {
        let filter = RelationFilter::parse(RelationKind::SynsetSynset, types)?;
        Ok(RelationPaths::new(self.clone(), filter, end.cloned()))
    }

    // ── Taxonomy ─────────────────────────────────────────────────

    /// Hypernym chains from the immediate parent to a root.
    pub fn hypernym_paths(&self, simulate_root: bool) -> Result<Vec<Vec<Synset>>> {
        taxonomy::hypernym_paths(self, simulate_root)
    }

    pub fn min_depth(&self, simulate_root: bool) -> Result<usize> {
        taxonomy::min_depth(self, simulate_root)
    }

    pub fn max_depth(&self, simulate_root: bool) -> Result<usize> {
        taxonomy::max_depth(self, simulate_root)
    }

    pub fn shortest_path(&self, other: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
        taxonomy::shortest_path(self, other, simulate_root)
    }

    pub fn common_hypernyms(&self, other: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
        taxonomy::common_hypernyms(self, other, simulate_root)
    }

    pub fn lowest_common_hypernyms(&self, other: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
        taxonomy::lowest_common_hypernyms(self, other, simulate_root)
    }

    // ── Translation ──────────────────────────────────────────────

    /// Synsets sharing this synset's ILI in the lexicons selected by
    /// `lexicon`/`lang`. With neither filter, every installed lexicon is
    /// searched.
    pub fn translate(&self, lexicon: Option<&str>, lang: Option<&str>) -> Result<Vec<Synset>> {
        let Some(ili) = self.ili.clone() else {
            return Ok(Vec::new());
        };
        let mut filters = LexiconFilters::default();
        filters.lexicon = lexicon.map(str::to_string);
        filters.lang = lang.map(str::to_string);
        let ctx = self.context().rebound(&filters)?;
        let rows = ctx.store().synsets_by_ili(&[ili], ctx.config().lexicons())?;
        Ok(rows
            .into_iter()
            .map(|row| Synset::from_row(row, ctx.clone()))
            .collect())
    }
}

impl Relatable for Synset {
    fn related_with_types(&self, types: &RelationFilter) -> Result<Vec<(String, Self)>> {
        if self.is_simulated_root() {
            return Ok(Vec::new());
        }
        relations::synset_relations(self, types)
    }
}
