//! wn: wordnet query and traversal engine
//!
//! Builds on the storage-free `wn-core` crate:
//! - `lexicon`: lexicon handles and the resolved query configuration
//! - `wordnet`: the configuration-bound query object and form lookup
//! - `entities`: words, senses, synsets and ILIs navigated through a store
//! - `relations`: relation resolution across expand lexicons, closures and paths
//! - `taxonomy` and `similarity`: hypernym algorithms and similarity metrics
//! - `morphy`: a rule-based English lemmatizer
//! - `settings` and `functions`: YAML/environment settings and one-shot queries
//!
//! ```no_run
//! use wn::{functions, Settings, Wordnet};
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = wn::SettingsLoader::from_env().load()?;
//! let store = functions::open_memory_store(&settings)?;
//! let en = Wordnet::from_settings(store, &settings)?;
//! for synset in en.synsets(Some("dog"), Some("n"), None)? {
//!     println!("{synset:?}: {:?}", synset.definition()?);
//! }
//! # let _ = Settings::default();
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod entities;
pub mod functions;
pub mod lexicon;
pub mod morphy;
pub mod relations;
pub mod settings;
pub mod similarity;
pub mod taxonomy;
pub mod wordnet;

pub use context::WordnetContext;
pub use entities::{Count, Form, Ili, ScopedEntity, Sense, Synset, SynsetOrigin, Word};
pub use lexicon::{Lexicon, LexiconConfiguration, LexiconFilters, LexiconIndex};
pub use morphy::Morphy;
pub use relations::{Closure, Relatable, RelationPaths};
pub use settings::{Settings, SettingsLoader};
pub use similarity::IcWeights;
pub use wordnet::{Wordnet, WordnetBuilder};

pub use wn_core::{
    AdjPosition, DefaultNormalizer, EntityKind, IliStatus, LemmatizeResult, Lemmatize,
    LexiconRecord, Metadata, Normalize, Pos, RelationFilter, RelationKind, Result, WnError,
    WordnetStore,
};
pub use wn_memstore::MemoryStore;
