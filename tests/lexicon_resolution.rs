//! Lexicon selection, default/explicit mode and configuration errors.

mod helpers;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wn::{functions, LexiconFilters, ScopedEntity, Settings, WnError, Wordnet};

use helpers::{english, fixture_store, ids, japanese, versioned_store};

// ── Specifiers ────────────────────────────────────────────────────

#[test]
fn test_bare_id_resolves_to_most_recent_install() {
    let store = versioned_store();
    let wn = Wordnet::builder(Arc::clone(&store)).lexicon("test-ver").build().unwrap();
    let keys: Vec<String> = wn.lexicons().unwrap().iter().map(|l| l.specifier()).collect();
    assert_eq!(keys, vec!["test-ver:1"]);
    assert_eq!(wn.lemmas(None, None).unwrap(), vec!["older"]);
}

#[test]
fn test_version_wildcard_resolves_every_version() {
    let store = versioned_store();
    let wn = Wordnet::builder(store).lexicon("test-ver:*").build().unwrap();
    let keys: Vec<String> = wn.lexicons().unwrap().iter().map(|l| l.specifier()).collect();
    assert_eq!(keys, vec!["test-ver:2", "test-ver:1"]);
    // Same id in both lexicons: two distinct entities.
    let words = wn.words(None, None).unwrap();
    assert_eq!(words.len(), 2);
    assert_ne!(words[0], words[1]);
    assert_eq!(wn.word("w-1").unwrap().lexicon_key(), "test-ver:2");
}

#[test]
fn test_exact_version_and_glob() {
    let store = versioned_store();
    let wn = Wordnet::builder(Arc::clone(&store)).lexicon("test-ver:2").build().unwrap();
    assert_eq!(wn.lemmas(None, None).unwrap(), vec!["newer"]);
    let wn = Wordnet::builder(store).lexicon("test-*").build().unwrap();
    assert_eq!(wn.lexicons().unwrap().len(), 2);
}

// ── Modes ─────────────────────────────────────────────────────────

#[test]
fn test_default_mode_searches_everything() {
    let store = fixture_store();
    let wn = Wordnet::new(store).unwrap();
    assert!(wn.config().default_mode());
    let keys: Vec<String> = wn.lexicons().unwrap().iter().map(|l| l.specifier()).collect();
    assert_eq!(keys, vec!["test-en:1", "test-ja:1", "test-cycle:1"]);
    assert_eq!(wn.expanded_lexicons().unwrap().len(), 3);
}

#[test]
fn test_explicit_mode_expands_to_dependencies() {
    let store = fixture_store();
    let ja = japanese(&store);
    assert!(!ja.config().default_mode());
    let expands: Vec<String> = ja
        .expanded_lexicons()
        .unwrap()
        .iter()
        .map(|l| l.specifier())
        .collect();
    assert_eq!(expands, vec!["test-en:1"]);
    assert!(english(&store).expanded_lexicons().unwrap().is_empty());
}

#[test]
fn test_lang_filter_selects_lexicons() {
    let store = fixture_store();
    let wn = Wordnet::builder(store).lang("ja").build().unwrap();
    assert_eq!(wn.lexicons().unwrap()[0].id(), "test-ja");
    assert_eq!(ids(&wn.words(Some("犬"), None).unwrap()), vec!["w-inu-n"]);
    assert!(wn.words(Some("dog"), None).unwrap().is_empty());
}

#[test]
fn test_default_mode_narrows_navigation_to_entity_lexicon() {
    let store = fixture_store();
    let wn = Wordnet::new(store).unwrap();
    let dog = wn.synset("ss-dog").unwrap();
    assert_eq!(dog.scope(), vec!["test-en:1"]);
    assert_eq!(ids(&dog.senses().unwrap()), vec!["s-dog-n-1", "s-hound-n-1"]);
}

// ── Errors ────────────────────────────────────────────────────────

#[test]
fn test_configuration_errors_are_eager() {
    let store = fixture_store();
    let unknown = Wordnet::builder(Arc::clone(&store)).lexicon("nope").build();
    assert!(matches!(unknown, Err(WnError::Config(_))));
    let bad_lang = Wordnet::builder(Arc::clone(&store)).lang("zz").build();
    assert!(matches!(bad_lang, Err(WnError::Config(_))));
    let bad_expand = Wordnet::builder(store).lexicon("test-ja").expand("nope").build();
    assert!(matches!(bad_expand, Err(WnError::Config(_))));
}

#[test]
fn test_invalid_tokens_fail_at_the_call() {
    let store = fixture_store();
    let wn = english(&store);
    let err = wn.words(Some("dog"), Some("x")).unwrap_err();
    assert!(matches!(err, WnError::InvalidPos(_)));
    assert_eq!(err.category(), "validation");

    let dog = wn.synset("ss-dog").unwrap();
    match dog.get_related(&["hypernim"]) {
        Err(WnError::InvalidRelation { name, suggestion, .. }) => {
            assert_eq!(name, "hypernim");
            assert_eq!(suggestion.as_deref(), Some("hypernym"));
        }
        other => panic!("expected invalid relation, got {other:?}"),
    }
}

#[test]
fn test_missing_ids_are_not_found() {
    let store = fixture_store();
    let wn = english(&store);
    assert!(matches!(wn.word("w-inu-n"), Err(WnError::NotFound { .. })));
    assert!(matches!(wn.sense("nope"), Err(WnError::NotFound { .. })));
    assert!(matches!(wn.synset("sj-inu"), Err(WnError::NotFound { .. })));
    assert!(matches!(wn.ili("i999"), Err(WnError::NotFound { .. })));
    assert!(wn.words(Some("unicorn"), None).unwrap().is_empty());
}

// ── Description ───────────────────────────────────────────────────

#[test]
fn test_describe_lists_counts() {
    let store = fixture_store();
    let expected = "\
Primary lexicons:
  test-en:1
    Label  : Test English
    URL    : https://example.org/test-en
    License: https://creativecommons.org/licenses/by/4.0/
    Words  :      9 (n: 8, v: 1)
    Senses :     11
    Synsets:     10 (n: 7, v: 3)
    ILIs   :      8
";
    assert_eq!(english(&store).describe().unwrap(), expected);

    let described = japanese(&store).describe().unwrap();
    assert!(described.starts_with("Primary lexicons:\n  test-ja:1\n"));
    assert!(described.contains("Expand lexicons:\n  test-en:1\n"));
}

// ── Settings and one-shot functions ───────────────────────────────

#[test]
fn test_functions_build_throwaway_wordnets() {
    let store = fixture_store();
    let filters = LexiconFilters::default().lexicon("test-en");
    let words = functions::words(&store, Some("dog"), Some("n"), &filters).unwrap();
    assert_eq!(ids(&words), vec!["w-dog-n"]);
    let synsets = functions::synsets(&store, None, None, Some("i100"), &LexiconFilters::default()).unwrap();
    assert_eq!(ids(&synsets), vec!["ss-dog", "sj-inu"]);
    assert_eq!(functions::sense(&store, "s-dog-n-1", &filters).unwrap().synset_id(), "ss-dog");
    assert_eq!(functions::lexicons(&store, &filters).unwrap().len(), 1);
}

#[test]
fn test_settings_drive_wordnet_and_store() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("10-en.yaml"), include_str!("fixtures/test-en.yaml")).unwrap();
    std::fs::write(dir.path().join("20-ja.yaml"), include_str!("fixtures/test-ja.yaml")).unwrap();
    let settings = Settings {
        data_dir: dir.path().to_path_buf(),
        lexicon: Some("test-ja".into()),
        normalize: false,
        ..Settings::default()
    };
    let store = functions::open_memory_store(&settings).unwrap();
    let wn = Wordnet::from_settings(store, &settings).unwrap();
    assert!(wn.config().normalizer().is_none());
    assert_eq!(wn.expanded_lexicons().unwrap()[0].id(), "test-en");
    assert_eq!(ids(&wn.synsets(Some("犬"), None, None).unwrap()), vec!["sj-inu"]);
}

#[test]
fn test_open_memory_store_reports_missing_directory() {
    let settings = Settings {
        data_dir: "/nonexistent/wn-data".into(),
        ..Settings::default()
    };
    let Err(err) = functions::open_memory_store(&settings) else {
        panic!("a missing data directory should not open");
    };
    assert!(format!("{err:#}").contains("/nonexistent/wn-data"));
}
