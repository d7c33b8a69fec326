//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wn::{MemoryStore, Wordnet, WordnetStore};
use wn_memstore::LexiconDocument;

const TEST_EN: &str = include_str!("../fixtures/test-en.yaml");
const TEST_JA: &str = include_str!("../fixtures/test-ja.yaml");
const TEST_CYCLE: &str = include_str!("../fixtures/test-cycle.yaml");

/// Route `tracing` output through the test harness. `RUST_LOG` selects levels.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn document(yaml: &str) -> LexiconDocument {
    LexiconDocument::from_yaml(yaml).expect("fixture document parses")
}

/// English, Japanese (requiring English) and a cyclic graph, in that install order.
pub fn fixture_store() -> Arc<dyn WordnetStore> {
    init_tracing();
    let store = MemoryStore::from_documents(vec![
        document(TEST_EN),
        document(TEST_JA),
        document(TEST_CYCLE),
    ])
    .expect("fixture store builds");
    Arc::new(store)
}

fn versioned(version: &str, lemma: &str) -> LexiconDocument {
    document(&format!(
        r#"
lexicon: {{ id: test-ver, version: "{version}", label: Versioned, language: en }}
entries:
  - id: w-1
    pos: n
    lemma: {{ form: {lemma} }}
    senses:
      - {{ id: s-1, synset: ss-1 }}
synsets:
  - {{ id: ss-1, pos: n }}
"#
    ))
}

/// Two versions of one lexicon id: "2" installed before "1".
pub fn versioned_store() -> Arc<dyn WordnetStore> {
    init_tracing();
    let store = MemoryStore::from_documents(vec![versioned("2", "newer"), versioned("1", "older")])
        .expect("versioned store builds");
    Arc::new(store)
}

pub fn english(store: &Arc<dyn WordnetStore>) -> Wordnet {
    Wordnet::builder(Arc::clone(store))
        .lexicon("test-en")
        .build()
        .expect("test-en resolves")
}

pub fn japanese(store: &Arc<dyn WordnetStore>) -> Wordnet {
    Wordnet::builder(Arc::clone(store))
        .lexicon("test-ja")
        .build()
        .expect("test-ja resolves")
}

pub fn ids<T: wn::ScopedEntity>(entities: &[T]) -> Vec<&str> {
    entities.iter().map(|e| e.id()).collect()
}

/// A single-lexicon store of `nodes` noun synsets `n0..` joined by
/// `rel_type` edges.
pub fn graph_store(nodes: usize, edges: &[(usize, usize)], rel_type: &str) -> Arc<dyn WordnetStore> {
    let mut yaml = String::from(
        "lexicon: { id: graph, version: \"1\", label: Graph, language: en }\nsynsets:\n",
    );
    for node in 0..nodes {
        let relations: Vec<String> = edges
            .iter()
            .filter(|(source, _)| *source == node)
            .map(|(_, target)| format!("{{ type: {rel_type}, target: n{target} }}"))
            .collect();
        yaml.push_str(&format!(
            "  - {{ id: n{node}, pos: n, relations: [{}] }}\n",
            relations.join(", ")
        ));
    }
    let store = MemoryStore::from_documents(vec![document(&yaml)]).expect("graph store builds");
    Arc::new(store)
}
