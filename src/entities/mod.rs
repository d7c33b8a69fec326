//! Word, Sense, Synset and ILI entities.
//!
//! Every lexicon-scoped entity is a value-like handle: identity (id plus
//! owning lexicon key) and the [`WordnetContext`] that produced it. Navigation
//! methods re-derive scope from that carried context, so chains such as
//! `sense.synset()?.words()?` stay scoped the way the original query was.
//! Equality and hashing use identity only.

pub use ili::Ili;
pub use sense::Sense;
pub use synset::{Synset, SynsetOrigin};
pub use word::Word;

use wn_core::types::confidence_from;
use wn_core::{CountRow, EntityKind, EntityRef, FormRow, Metadata, Pronunciation, Result, Tag};

use crate::context::WordnetContext;
use crate::lexicon::Lexicon;

// ── Shared plumbing ───────────────────────────────────────────

/// Identity and context shared by all lexicon-scoped entities.
#[derive(Clone)]
pub(crate) struct Element {
    pub(crate) id: String,
    pub(crate) lexicon: String,
    pub(crate) ctx: WordnetContext,
}

impl Element {
    pub(crate) fn new(id: impl Into<String>, lexicon: impl Into<String>, ctx: WordnetContext) -> Self {
        Self {
            id: id.into(),
            lexicon: lexicon.into(),
            ctx,
        }
    }

    /// Identity key. Synthetic entities belong to no lexicon, so only their
    /// id counts.
    pub(crate) fn key(&self, synthetic: bool) -> (&str, &str) {
        if synthetic {
            (self.id.as_str(), "")
        } else {
            (self.id.as_str(), self.lexicon.as_str())
        }
    }
}

/// Capability shared by every lexicon-scoped entity.
pub trait ScopedEntity {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// The `id:version` key of the owning lexicon.
    fn lexicon_key(&self) -> &str;

    fn context(&self) -> &WordnetContext;

    fn entity_ref(&self) -> EntityRef {
        EntityRef::new(Self::KIND, self.id(), self.lexicon_key())
    }

    /// Identity key: (id, lexicon key). The lexicon key is empty for
    /// synthetic entities.
    fn identity(&self) -> (String, String) {
        let lexicon = if self.is_synthetic() { "" } else { self.lexicon_key() };
        (self.id().to_string(), lexicon.to_string())
    }

    fn lexicon(&self) -> Result<Lexicon> {
        self.context().lexicon(self.lexicon_key())
    }

    /// Lexicon keys visible to secondary navigation from this entity.
    fn scope(&self) -> Vec<String> {
        self.context().config().scope_for(self.lexicon_key())
    }

    /// True for entities that exist only in memory (simulated roots).
    fn is_synthetic(&self) -> bool {
        false
    }

    fn metadata(&self) -> Result<Metadata> {
        if self.is_synthetic() {
            return Ok(Metadata::new());
        }
        self.context().store().metadata(&self.entity_ref())
    }

    /// Confidence from the entity's metadata, else its lexicon's.
    fn confidence(&self) -> Result<f64> {
        match confidence_from(&self.metadata()?) {
            Some(c) => Ok(c),
            None => Ok(self.lexicon()?.confidence()),
        }
    }
}

macro_rules! scoped_entity {
    ($ty:ty, $kind:expr) => {
        $crate::entities::scoped_entity!($ty, $kind, |_e: &$ty| false);
    };
    ($ty:ty, $kind:expr, $synthetic:expr) => {
        impl $crate::entities::ScopedEntity for $ty {
            const KIND: wn_core::EntityKind = $kind;

            fn id(&self) -> &str {
                &self.el.id
            }

            fn lexicon_key(&self) -> &str {
                &self.el.lexicon
            }

            fn context(&self) -> &$crate::context::WordnetContext {
                &self.el.ctx
            }

            fn is_synthetic(&self) -> bool {
                ($synthetic)(self)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                use $crate::entities::ScopedEntity as _;
                self.el.key(self.is_synthetic()) == other.el.key(other.is_synthetic())
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                use $crate::entities::ScopedEntity as _;
                std::hash::Hash::hash(&self.el.key(self.is_synthetic()), state);
            }
        }

        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?} @ {})", stringify!($ty), self.el.id, self.el.lexicon)
            }
        }
    };
}
pub(crate) use scoped_entity;

mod ili;
mod sense;
mod synset;
mod word;

// ── Forms ─────────────────────────────────────────────────────

/// A written form of a word. Rank 0 is the lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub value: String,
    pub id: Option<String>,
    pub script: Option<String>,
    pub rank: u32,
    pub pronunciations: Vec<Pronunciation>,
    pub tags: Vec<Tag>,
}

impl Form {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_lemma(&self) -> bool {
        self.rank == 0
    }
}

impl From<FormRow> for Form {
    fn from(row: FormRow) -> Self {
        Self {
            value: row.form,
            id: row.id,
            script: row.script,
            rank: row.rank,
            pronunciations: row.pronunciations,
            tags: row.tags,
        }
    }
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq<str> for Form {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Form {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

// ── Counts ────────────────────────────────────────────────────

/// A corpus count attached to a sense.
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub value: u64,
    pub metadata: Metadata,
}

impl From<CountRow> for Count {
    fn from(row: CountRow) -> Self {
        Self {
            value: row.value,
            metadata: row.metadata,
        }
    }
}

/// Order-preserving dedup by identity.
pub(crate) fn dedup_entities<T: ScopedEntity>(items: Vec<T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.identity()))
        .collect()
}
