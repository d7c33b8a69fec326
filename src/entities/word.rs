use wn_core::{EntityKind, Pos, RelationFilter, Result, WnError, WordRow};

use super::{dedup_entities, Element, Form, ScopedEntity, Sense, Synset};
use crate::context::WordnetContext;

/// A lexical entry: a lemma with its alternative forms and senses.
#[derive(Clone)]
pub struct Word {
    el: Element,
    pos: Pos,
}

scoped_entity!(Word, EntityKind::Word);

impl Word {
    pub(crate) fn from_row(row: WordRow, ctx: WordnetContext) -> Self {
        Self {
            el: Element::new(row.id, row.lexicon, ctx),
            pos: row.pos,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// All forms ordered by rank; the lemma comes first.
    pub fn forms(&self) -> Result<Vec<Form>> {
        Ok(self
            .context()
            .store()
            .word_forms(&self.entity_ref())?
            .into_iter()
            .map(Form::from)
            .collect())
    }

    /// The rank-0 form.
    pub fn lemma(&self) -> Result<Form> {
        self.forms()?
            .into_iter()
            .find(Form::is_lemma)
            .ok_or_else(|| WnError::Integrity(format!("{} has no lemma", self.entity_ref())))
    }

    pub fn senses(&self) -> Result<Vec<Sense>> {
        let ctx = self.context();
        Ok(ctx
            .store()
            .word_senses(&self.entity_ref())?
            .into_iter()
            .map(|row| Sense::from_row(row, ctx.clone()))
            .collect())
    }

    /// Synsets of the word's senses, in sense order.
    pub fn synsets(&self) -> Result<Vec<Synset>> {
        let synsets = self
            .senses()?
            .iter()
            .map(Sense::synset)
            .collect::<Result<Vec<_>>>()?;
        Ok(dedup_entities(synsets))
    }

    /// Words reached through `derivation` relations of any of this word's senses.
    pub fn derived_words(&self) -> Result<Vec<Word>> {
        let filter = RelationFilter::of(&["derivation"]);
        let mut words = Vec::new();
        for sense in self.senses()? {
            for related in sense.related_senses(&filter)? {
                words.push(related.word()?);
            }
        }
        Ok(dedup_entities(words))
    }

    /// Translate each sense into the lexicons selected by `lexicon`/`lang`.
    ///
    /// Every sense appears in the result, paired with the words of its
    /// translations; senses without a counterpart map to an empty list.
    pub fn translate(&self, lexicon: Option<&str>, lang: Option<&str>) -> Result<Vec<(Sense, Vec<Word>)>> {
        let mut out = Vec::new();
        for sense in self.senses()? {
            let words = sense
                .translate(lexicon, lang)?
                .iter()
                .map(Sense::word)
                .collect::<Result<Vec<_>>>()?;
            out.push((sense, dedup_entities(words)));
        }
        Ok(out)
    }
}
