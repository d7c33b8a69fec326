//! Form normalization and the pluggable normalizer/lemmatizer strategies.
//!
//! The default normalizer folds case and strips diacritics:
//! - Lowercase conversion
//! - Unicode NFKD decomposition (non-ASCII input only)
//! - Combining marks removed

use std::collections::{BTreeMap, BTreeSet};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::Pos;

/// Normalize a word form for lookup.
///
/// # Examples
///
/// ```
/// use wn_core::normalize::normalize_form;
///
/// assert_eq!(normalize_form("Résumé"), "resume");
/// assert_eq!(normalize_form("ŁÓDŹ"), "łodz");
/// assert_eq!(normalize_form("dog"), "dog");
/// ```
pub fn normalize_form(s: &str) -> String {
    let lower = s.to_lowercase();
    if lower.is_ascii() {
        return lower;
    }
    lower.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Candidate forms produced by a lemmatizer, keyed by part of speech.
/// A `None` key means "any part of speech".
pub type LemmatizeResult = BTreeMap<Option<Pos>, BTreeSet<String>>;

/// Maps a query form to the form used for normalized-form matching.
pub trait Normalize: Send + Sync {
    fn normalize(&self, form: &str) -> String;
}

impl<F> Normalize for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, form: &str) -> String {
        self(form)
    }
}

/// Expands a query form into candidate lemmas per part of speech.
///
/// An empty result means the lemmatizer does not cover the form; the query
/// then falls back to the original form and part of speech.
pub trait Lemmatize: Send + Sync {
    fn lemmatize(&self, form: &str, pos: Option<Pos>) -> LemmatizeResult;
}

impl<F> Lemmatize for F
where
    F: Fn(&str, Option<Pos>) -> LemmatizeResult + Send + Sync,
{
    fn lemmatize(&self, form: &str, pos: Option<Pos>) -> LemmatizeResult {
        self(form, pos)
    }
}

/// The default normalizer as a strategy value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl Normalize for DefaultNormalizer {
    fn normalize(&self, form: &str) -> String {
        normalize_form(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize_form("résumé"), "resume");
        assert_eq!(normalize_form("naïve"), "naive");
    }

    #[test]
    fn test_normalize_lowercases_ascii() {
        assert_eq!(normalize_form("Dog"), "dog");
        assert_eq!(normalize_form("NASA"), "nasa");
    }

    #[test]
    fn test_normalize_keeps_non_latin_letters() {
        assert_eq!(normalize_form("犬"), "犬");
    }

    #[test]
    fn test_closure_strategies() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(Normalize::normalize(&upper, "abc"), "ABC");

        let lem = |form: &str, pos: Option<Pos>| {
            let mut out = LemmatizeResult::new();
            out.entry(pos)
                .or_default()
                .insert(form.trim_end_matches('s').to_string());
            out
        };
        let got = lem.lemmatize("dogs", Some(Pos::Noun));
        assert!(got[&Some(Pos::Noun)].contains("dog"));
    }

    #[test]
    fn test_default_normalizer() {
        assert_eq!(DefaultNormalizer.normalize("Café"), "cafe");
    }
}
