//! wn-memstore: in-memory wordnet store
//!
//! Implements the `wn-core` store port over lexicon documents held in memory:
//! - YAML lexicon document model
//! - Indexed, lock-guarded tables with load-time integrity checks
//! - Directory loader installing every document of a data directory

pub mod document;
pub mod loader;
pub mod store;

pub use document::LexiconDocument;
pub use loader::DocumentLoader;
pub use store::MemoryStore;
