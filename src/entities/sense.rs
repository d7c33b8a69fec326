use std::collections::BTreeMap;

use wn_core::{
    AdjPosition, EntityKind, ExampleRow, RelationFilter, RelationKind, Result, SenseRow, WnError,
};

use super::{dedup_entities, Count, Element, ScopedEntity, Synset, Word};
use crate::context::WordnetContext;
use crate::relations::{self, Closure, RelationPaths, Relatable};

/// A pairing of one word with one synset.
#[derive(Clone)]
pub struct Sense {
    el: Element,
    word_id: String,
    synset_id: String,
}

scoped_entity!(Sense, EntityKind::Sense);

impl Sense {
    pub(crate) fn from_row(row: SenseRow, ctx: WordnetContext) -> Self {
        Self {
            el: Element::new(row.id, row.lexicon, ctx),
            word_id: row.word_id,
            synset_id: row.synset_id,
        }
    }

    pub fn word_id(&self) -> &str {
        &self.word_id
    }

    pub fn synset_id(&self) -> &str {
        &self.synset_id
    }

    pub fn word(&self) -> Result<Word> {
        let ctx = self.context();
        ctx.store()
            .get_word(&self.word_id, self.lexicon_key())?
            .map(|row| Word::from_row(row, ctx.clone()))
            .ok_or_else(|| {
                WnError::Integrity(format!("{} refers to missing word {}", self.entity_ref(), self.word_id))
            })
    }

    pub fn synset(&self) -> Result<Synset> {
        let ctx = self.context();
        ctx.store()
            .get_synset(&self.synset_id, self.lexicon_key())?
            .map(|row| Synset::from_row(row, ctx.clone()))
            .ok_or_else(|| {
                WnError::Integrity(format!(
                    "{} refers to missing synset {}",
                    self.entity_ref(),
                    self.synset_id
                ))
            })
    }

    // ── Details ──────────────────────────────────────────────────

    pub fn examples(&self) -> Result<Vec<ExampleRow>> {
        self.context().store().examples(&self.entity_ref())
    }

    pub fn lexicalized(&self) -> Result<bool> {
        self.context().store().lexicalized(&self.entity_ref())
    }

    pub fn adjposition(&self) -> Result<Option<AdjPosition>> {
        self.context().store().adjposition(&self.entity_ref())
    }

    /// Syntactic frames, e.g. `"Somebody ----s something"`.
    pub fn frames(&self) -> Result<Vec<String>> {
        self.context().store().frames(&self.entity_ref())
    }

    pub fn counts(&self) -> Result<Vec<Count>> {
        Ok(self
            .context()
            .store()
            .counts(&self.entity_ref())?
            .into_iter()
            .map(Count::from)
            .collect())
    }

    // ── Relations ────────────────────────────────────────────────

    /// Sense relations grouped by relation name.
    pub fn relations(&self, types: &[&str]) -> Result<BTreeMap<String, Vec<Sense>>> {
        let filter = RelationFilter::parse(RelationKind::SenseSense, types)?;
        Ok(relations::group_by_type(self.related_with_types(&filter)?))
    }

    /// Senses related by any of `types`; no types (or `"*"`) means all.
    pub fn get_related(&self, types: &[&str]) -> Result<Vec<Sense>> {
        let filter = RelationFilter::parse(RelationKind::SenseSense, types)?;
        self.related_senses(&filter)
    }

    pub(crate) fn related_senses(&self, filter: &RelationFilter) -> Result<Vec<Sense>> {
        let related = self.related_with_types(filter)?;
        Ok(dedup_entities(related.into_iter().map(|(_, s)| s).collect()))
    }

    /// Synsets targeted by sense-to-synset relations such as `domain_topic`.
    pub fn get_related_synsets(&self, types: &[&str]) -> Result<Vec<Synset>> {
        let filter = RelationFilter::parse(RelationKind::SenseSynset, types)?;
        let related = relations::sense_synset_relations(self, &filter)?;
        Ok(dedup_entities(related.into_iter().map(|(_, s)| s).collect()))
    }

    /// Lazy transitive closure over sense relations.
    pub fn closure(&self, types: &[&str]) -> Result<Closure<Sense>> {
        let filter = RelationFilter::parse(RelationKind::SenseSense, types)?;
        Ok(Closure::new(self.clone(), filter))
    }

    /// Relation paths from this sense, ending at `end` when given.
    pub fn relation_paths(&self, types: &[&str], end: Option<&Sense>) -> Result<RelationPaths<Sense>> {
        let filter = RelationFilter::parse(RelationKind::SenseSense, types)?;
        Ok(RelationPaths::new(self.clone(), filter, end.cloned()))
    }

    // ── Translation ──────────────────────────────────────────────

    /// Senses of the translated synsets in the lexicons selected by
    /// `lexicon`/`lang`.
    pub fn translate(&self, lexicon: Option<&str>, lang: Option<&str>) -> Result<Vec<Sense>> {
        let mut senses = Vec::new();
        for synset in self.synset()?.translate(lexicon, lang)? {
            senses.extend(synset.senses()?);
        }
        Ok(dedup_entities(senses))
    }
}

impl Relatable for Sense {
    fn related_with_types(&self, types: &RelationFilter) -> Result<Vec<(String, Self)>> {
        relations::sense_relations(self, types)
    }
}
