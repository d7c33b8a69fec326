//! Primary lookups, entity navigation, ILIs and translation.

mod helpers;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wn::{IliStatus, Morphy, Pos, ScopedEntity, Wordnet};

use helpers::{english, fixture_store, ids, japanese};

// ── Primary lookup ────────────────────────────────────────────────

#[test]
fn test_lookup_by_form_and_pos() {
    let store = fixture_store();
    let wn = english(&store);
    assert_eq!(ids(&wn.words(Some("dog"), None).unwrap()), vec!["w-dog-n"]);
    assert_eq!(ids(&wn.words(Some("dogs"), Some("n")).unwrap()), vec!["w-dog-n"]);
    assert!(wn.words(Some("dog"), Some("v")).unwrap().is_empty());
    assert_eq!(ids(&wn.senses(Some("run"), None).unwrap()), vec!["s-run-v-1", "s-run-v-2", "s-run-v-3"]);
    assert_eq!(ids(&wn.synsets(Some("hound"), None, None).unwrap()), vec!["ss-dog"]);
    assert_eq!(ids(&wn.synsets(None, Some("n"), Some("i200")).unwrap()), vec!["ss-car"]);
    assert_eq!(wn.words(None, Some("v")).unwrap().len(), 1);
}

#[test]
fn test_search_all_forms_off_matches_lemmas_only() {
    let store = fixture_store();
    let wn = Wordnet::builder(store)
        .lexicon("test-en")
        .search_all_forms(false)
        .build()
        .unwrap();
    assert!(wn.words(Some("dogs"), None).unwrap().is_empty());
    assert_eq!(ids(&wn.words(Some("dog"), None).unwrap()), vec!["w-dog-n"]);
}

#[test]
fn test_normalized_lookup_matches_unaccented_form() {
    let store = fixture_store();
    let wn = english(&store);
    let accented = wn.words(Some("résumé"), None).unwrap();
    let plain = wn.words(Some("resume"), None).unwrap();
    assert_eq!(accented, plain);
    assert_eq!(ids(&accented), vec!["w-resume-n"]);
    assert_eq!(ids(&wn.words(Some("DOG"), None).unwrap()), vec!["w-dog-n"]);

    let exact = Wordnet::builder(store)
        .lexicon("test-en")
        .no_normalizer()
        .build()
        .unwrap();
    assert!(exact.words(Some("résumé"), None).unwrap().is_empty());
}

#[test]
fn test_lemmatizer_expands_query() {
    let store = fixture_store();
    let wn = english(&store);
    assert!(wn.words(Some("hounds"), Some("n")).unwrap().is_empty());

    let morphy = Morphy::for_wordnet(&wn).unwrap();
    assert!(morphy.is_bound());
    let wn = wn.with_lemmatizer(Arc::new(morphy));
    assert_eq!(ids(&wn.words(Some("hounds"), Some("n")).unwrap()), vec!["w-hound-n"]);
    assert_eq!(ids(&wn.words(Some("cars"), None).unwrap()), vec!["w-car-n"]);
    assert_eq!(wn.lemmas(Some("hounds"), None).unwrap(), vec!["hound"]);
}

#[test]
fn test_results_follow_lexicon_order() {
    let store = fixture_store();
    let wn = Wordnet::builder(store)
        .lexicon("test-ja test-en")
        .build()
        .unwrap();
    let synsets = wn.synsets(None, Some("n"), Some("i2")).unwrap();
    assert_eq!(ids(&synsets), vec!["sj-doubutsu", "ss-animal"]);
}

// ── Words, senses and synsets ─────────────────────────────────────

#[test]
fn test_every_word_has_one_lemma_form() {
    let store = fixture_store();
    let wn = Wordnet::new(store).unwrap();
    for word in wn.words(None, None).unwrap() {
        let forms = word.forms().unwrap();
        let lemmas: Vec<_> = forms.iter().filter(|f| f.is_lemma()).collect();
        assert_eq!(lemmas.len(), 1, "{word:?}");
        assert_eq!(&word.lemma().unwrap(), lemmas[0]);
    }
    let run = english(&fixture_store()).word("w-run-v").unwrap();
    let forms: Vec<String> = run.forms().unwrap().iter().map(|f| f.to_string()).collect();
    assert_eq!(forms, vec!["run", "ran"]);
}

#[test]
fn test_sense_synset_membership_is_symmetric() {
    let store = fixture_store();
    let wn = Wordnet::new(store).unwrap();
    for sense in wn.senses(None, None).unwrap() {
        let synset = sense.synset().unwrap();
        assert!(synset.senses().unwrap().contains(&sense), "{sense:?}");
        assert!(sense.word().unwrap().senses().unwrap().contains(&sense));
    }
}

#[test]
fn test_synset_details() {
    let store = fixture_store();
    let wn = english(&store);
    let dog = wn.synset("ss-dog").unwrap();
    assert_eq!(dog.pos(), Pos::Noun);
    assert_eq!(dog.definition().unwrap().as_deref(), Some("a domesticated canine"));
    assert_eq!(dog.examples().unwrap()[0].text, "the dog barked");
    assert_eq!(dog.lexfile().unwrap().as_deref(), Some("noun.animal"));
    assert!(dog.lexicalized().unwrap());
    let lemmas: Vec<String> = dog.lemmas().unwrap().iter().map(|f| f.to_string()).collect();
    assert_eq!(lemmas, vec!["dog", "hound"]);
    assert_eq!(ids(&dog.words().unwrap()), vec!["w-dog-n", "w-hound-n"]);
    assert_eq!(dog.lexicon().unwrap().label(), "Test English");

    let sense = wn.sense("s-dog-n-1").unwrap();
    assert_eq!(sense.counts().unwrap()[0].value, 7);
    assert_eq!(sense.word().unwrap().id(), "w-dog-n");
    assert!(sense.frames().unwrap().is_empty());
    assert_eq!(sense.confidence().unwrap(), 1.0);
}

#[test]
fn test_derived_words_follow_sense_derivations() {
    let store = fixture_store();
    let run = english(&store).word("w-run-v").unwrap();
    assert_eq!(ids(&run.derived_words().unwrap()), vec!["w-runner-n"]);
    let sense = english(&store).sense("s-run-v-1").unwrap();
    let related = sense.relations(&["derivation"]).unwrap();
    assert_eq!(ids(&related["derivation"]), vec!["s-runner-n-1"]);
}

// ── ILIs ──────────────────────────────────────────────────────────

#[test]
fn test_ili_lookup_and_status() {
    let store = fixture_store();
    let wn = english(&store);
    let i1 = wn.ili("i1").unwrap();
    assert_eq!(i1.status(), IliStatus::Active);
    assert_eq!(i1.definition(), Some("that which exists"));
    assert_eq!(wn.ili("i2").unwrap().status(), IliStatus::Presupposed);

    let deprecated = wn.ilis(Some(IliStatus::Deprecated)).unwrap();
    assert_eq!(deprecated.len(), 1);
    assert_eq!(deprecated[0].id(), Some("i300"));

    let proposed = wn.synset("ss-runner").unwrap().ili().unwrap().unwrap();
    assert_eq!(proposed.id(), None);
    assert_eq!(proposed.status(), IliStatus::Proposed);
    assert_eq!(proposed.definition(), Some("someone who runs"));
    assert!(wn.synset("ss-resume").unwrap().ili().unwrap().is_none());
}

// ── Translation ───────────────────────────────────────────────────

#[test]
fn test_word_translate_keeps_every_sense() {
    let store = fixture_store();
    let run = english(&store).word("w-run-v").unwrap();
    let translated = run.translate(Some("test-ja"), None).unwrap();
    assert_eq!(translated.len(), 3);
    let keys: Vec<&str> = translated.iter().map(|(s, _)| s.id()).collect();
    assert_eq!(keys, vec!["s-run-v-1", "s-run-v-2", "s-run-v-3"]);
    assert_eq!(ids(&translated[0].1), vec!["w-hashiru-v"]);
    assert!(translated[1].1.is_empty());
    assert!(translated[2].1.is_empty());
}

#[test]
fn test_synset_translate_by_language() {
    let store = fixture_store();
    let dog = english(&store).synset("ss-dog").unwrap();
    let ja = dog.translate(None, Some("ja")).unwrap();
    assert_eq!(ids(&ja), vec!["sj-inu"]);
    assert_eq!(ja[0].lexicon_key(), "test-ja:1");
    assert_eq!(ids(&ja[0].words().unwrap()), vec!["w-inu-n"]);

    // No filters: every lexicon sharing the ILI, self included.
    assert_eq!(ids(&dog.translate(None, None).unwrap()), vec!["ss-dog", "sj-inu"]);
    assert!(english(&store)
        .synset("ss-resume")
        .unwrap()
        .translate(None, Some("ja"))
        .unwrap()
        .is_empty());

    let inu = japanese(&store).sense("sj-inu-n-1").unwrap();
    assert_eq!(ids(&inu.translate(Some("test-en"), None).unwrap()), vec!["s-dog-n-1", "s-hound-n-1"]);
}
