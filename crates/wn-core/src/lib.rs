//! wn-core: pure wordnet domain types and the data-access port
//!
//! This crate contains the storage-free half of the wordnet engine:
//! - Error taxonomy shared by every layer
//! - Value types (parts of speech, ILI status, lexicon records)
//! - Relation-type vocabularies and validated relation filters
//! - The `WordnetStore` port trait and its row records
//! - Lexicon specifier parsing and resolution
//! - Form normalization and the normalizer/lemmatizer strategy traits
//!
//! Query configuration, entities and graph algorithms live in `wn`; concrete
//! stores live in adapter crates such as `wn-memstore`.

pub mod error;
pub mod normalize;
pub mod ports;
pub mod relations;
pub mod specifier;
pub mod types;

pub use error::{Result, WnError};
pub use normalize::{normalize_form, DefaultNormalizer, LemmatizeResult, Lemmatize, Normalize};
pub use ports::{
    CountRow, DefinitionRow, EntityRef, ExampleRow, FormQuery, FormRow, IliRow, LexiconStats,
    RelationEdge, SenseRow, SynsetRow, WordRow, WordnetStore,
};
pub use relations::{RelationFilter, RelationKind};
pub use specifier::{resolve_specifiers, LexiconSpecifier};
pub use types::{
    AdjPosition, EntityKind, IliStatus, LexiconDependency, LexiconRecord, Metadata, Pos,
    Pronunciation, Tag,
};
