//! Rule-based English lemmatizer.
//!
//! Morphy proposes base forms for inflected English words:
//! - Suffix detachment per part of speech (`dogs` → `dog`, `running` → `run`)
//! - Hyphenated compounds (`mothers-in-law` → `mother-in-law`)
//! - Collocations (`attorneys general` → `attorney general`)
//! - `-ful` compounds (`boatsful` → `boatful`)
//! - Period stripping (`u.s.` → `us`) when nothing else matched
//!
//! An unbound [`Morphy`] accepts every candidate. Bound to a wordnet (or to an
//! explicit lemma list) it keeps only forms attested there.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use tracing::debug;
use wn_core::{LemmatizeResult, Lemmatize, Pos, Result};

use crate::wordnet::Wordnet;

// ── Rules ─────────────────────────────────────────────────────

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "among", "around", "athwart", "at", "before", "behind",
    "below", "beneath", "beside", "besides", "between", "betwixt", "beyond", "but", "by",
    "during", "except", "for", "from", "into", "in", "near", "off", "of", "onto", "on", "out",
    "over", "since", "till", "to", "under", "until", "unto", "upon", "with",
];

/// Inflected pattern to lemma pattern. `(PL)`/`(SING)` mark a word that is
/// itself lemmatized, `(PREP)` a preposition and `(ANY)` any text; both of
/// the latter are kept unchanged.
const HYPHENATED: &[(&str, &str)] = &[
    ("sons-of-(PL)", "son-of-a-(SING)"),
    ("(PL)-(PREP)-(ANY)", "(SING)-(PREP)-(ANY)"),
    ("(PREP)-(PL)", "(PREP)-(SING)"),
    ("(PL)-errant", "(SING)-errant"),
    ("(PL)-(PREP)", "(SING)-(PREP)"),
    ("(PL)-general", "(SING)-general"),
];

const COLLOCATIONS: &[(&str, &str)] = &[
    ("(PREP) them", "(PREP) it"),
    ("(ANY)star generals", "(ANY)star general"),
];

const FUL: &[(&str, &str)] = &[("(PL)ful", "(SING)ful")];

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(ANY\)|\(SING\)|\(PL\)|\(PREP\)").expect("valid marker pattern"));

/// A compiled rule: an anchored, case-insensitive pattern whose named groups
/// fill the `{}` slots of the lemma template in order.
struct Rule {
    pattern: Regex,
    template: String,
}

impl Rule {
    fn compile(inflected: &str, lemma: &str) -> Option<Rule> {
        let mut pattern = inflected.to_string();
        let mut template = lemma.to_string();
        let from: Vec<String> = MARKER.find_iter(inflected).map(|m| m.as_str().to_string()).collect();
        let to: Vec<String> = MARKER.find_iter(lemma).map(|m| m.as_str().to_string()).collect();
        if from.len() != to.len() {
            return None;
        }
        for (i, (f, t)) in from.iter().zip(&to).enumerate() {
            let group = match (f.as_str(), t.as_str()) {
                ("(PL)", "(SING)") => format!("(?P<rec{i}>.+)"),
                ("(PREP)", "(PREP)") => format!("(?P<prep{i}>{})", PREPOSITIONS.join("|")),
                ("(ANY)", "(ANY)") => format!("(?P<any{i}>.+)"),
                _ => return None,
            };
            pattern = MARKER.replacen(&pattern, 1, NoExpand(&group)).into_owned();
            template = MARKER.replacen(&template, 1, NoExpand("{}")).into_owned();
        }
        let pattern = Regex::new(&format!("(?i)^(?:{pattern})$")).ok()?;
        Some(Rule { pattern, template })
    }

    fn compile_all<'a>(rules: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<Rule> {
        rules
            .into_iter()
            .map(|(inflected, lemma)| {
                Rule::compile(inflected, lemma).expect("well-formed morphy rule")
            })
            .collect()
    }

    fn fill(&self, parts: &[String]) -> String {
        let mut out = String::new();
        let mut pieces = self.template.split("{}");
        if let Some(first) = pieces.next() {
            out.push_str(first);
        }
        for (piece, part) in pieces.zip(parts) {
            out.push_str(part);
            out.push_str(piece);
        }
        out
    }
}

static HYPHENATED_RULES: LazyLock<Vec<Rule>> =
    LazyLock::new(|| Rule::compile_all(HYPHENATED.iter().copied()));

static COLLOCATION_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let spaced: Vec<(String, String)> = HYPHENATED
        .iter()
        .map(|(i, l)| (i.replace('-', " "), l.replace('-', " ")))
        .collect();
    Rule::compile_all(
        COLLOCATIONS
            .iter()
            .copied()
            .chain(spaced.iter().map(|(i, l)| (i.as_str(), l.as_str()))),
    )
});

static FUL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| Rule::compile_all(FUL.iter().copied()));

fn detachment_rules(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => NOUN_RULES,
        Pos::Verb => VERB_RULES,
        Pos::Adjective | Pos::AdjectiveSatellite => ADJ_RULES,
        _ => &[],
    }
}

/// Every combination taking one value from each option list; the first
/// list varies fastest.
fn product(options: &[Vec<String>]) -> Vec<Vec<String>> {
    let Some((heads, rest)) = options.split_first() else {
        return vec![Vec::new()];
    };
    let mut out = Vec::new();
    for tail in product(rest) {
        for head in heads {
            let mut combo = Vec::with_capacity(tail.len() + 1);
            combo.push(head.clone());
            combo.extend(tail.iter().cloned());
            out.push(combo);
        }
    }
    out
}

// ── Lemmatizer ────────────────────────────────────────────────

/// English lemmatizer implementing [`Lemmatize`].
#[derive(Debug, Clone, Default)]
pub struct Morphy {
    attested: Option<HashMap<Pos, HashSet<String>>>,
}

impl Morphy {
    /// An unbound lemmatizer: every candidate is accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only `(pos, lemma)` pairs from `lemmas`.
    pub fn from_lemmas<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = (Pos, S)>,
        S: Into<String>,
    {
        let mut attested: HashMap<Pos, HashSet<String>> = HashMap::new();
        for (pos, lemma) in lemmas {
            attested
                .entry(pos.taxonomy_class())
                .or_default()
                .insert(lemma.into());
        }
        Self {
            attested: Some(attested),
        }
    }

    /// Accept only forms of words in `wordnet`.
    pub fn for_wordnet(wordnet: &Wordnet) -> Result<Self> {
        let mut lemmas = Vec::new();
        for word in wordnet.find_words(None, None)? {
            let pos = word.pos();
            lemmas.extend(word.forms()?.into_iter().map(|f| (pos, f.value)));
        }
        debug!(forms = lemmas.len(), "bound morphy to wordnet");
        Ok(Self::from_lemmas(lemmas))
    }

    pub fn is_bound(&self) -> bool {
        self.attested.is_some()
    }

    fn in_wordnet(&self, lemma: &str, pos: Pos) -> bool {
        match &self.attested {
            None => true,
            Some(attested) => attested
                .get(&pos.taxonomy_class())
                .is_some_and(|forms| forms.contains(lemma)),
        }
    }

    fn accept(&self, lemma: String, pos: Pos, out: &mut Vec<String>) {
        if !lemma.is_empty() && !out.contains(&lemma) && self.in_wordnet(&lemma, pos) {
            out.push(lemma);
        }
    }

    fn try_rules(&self, word: &str, rules: &[Rule], pos: Pos) -> Vec<String> {
        for rule in rules {
            let Some(caps) = rule.pattern.captures(word) else {
                continue;
            };
            let options: Vec<Vec<String>> = rule
                .pattern
                .capture_names()
                .flatten()
                .map(|name| {
                    let part = caps.name(name).map(|m| m.as_str()).unwrap_or_default();
                    if name.starts_with("rec") {
                        self.candidates(part, pos)
                    } else {
                        vec![part.to_string()]
                    }
                })
                .collect();
            // Only the first matching rule applies.
            return product(&options).iter().map(|parts| rule.fill(parts)).collect();
        }
        Vec::new()
    }

    /// Candidate lemmas of `form` for one part of speech, in rule order.
    pub fn candidates(&self, form: &str, pos: Pos) -> Vec<String> {
        let word = form.trim();
        let mut out: Vec<String> = Vec::new();

        if word.contains('-') {
            for lemma in self.try_rules(word, &HYPHENATED_RULES, pos) {
                self.accept(lemma, pos, &mut out);
            }
        }

        if word.contains(' ') {
            for lemma in self.try_rules(word, &COLLOCATION_RULES, pos) {
                self.accept(lemma, pos, &mut out);
            }
            if out.is_empty() {
                let options: Vec<Vec<String>> = word
                    .split_whitespace()
                    .map(|sub| self.candidates(sub, pos))
                    .collect();
                for parts in product(&options) {
                    self.accept(parts.join(" "), pos, &mut out);
                }
            }
        }

        if word.to_lowercase().ends_with("ful") {
            for lemma in self.try_rules(word, &FUL_RULES, pos) {
                self.accept(lemma, pos, &mut out);
            }
        }

        for (suffix, replacement) in detachment_rules(pos) {
            if let Some(stem) = word.strip_suffix(suffix) {
                self.accept(format!("{stem}{replacement}"), pos, &mut out);
            }
        }

        if word.contains('.') && out.is_empty() {
            for lemma in self.candidates(&word.replace('.', ""), pos) {
                if !out.contains(&lemma) {
                    out.push(lemma);
                }
            }
        }

        self.accept(word.to_string(), pos, &mut out);
        out
    }
}

impl Lemmatize for Morphy {
    fn lemmatize(&self, form: &str, pos: Option<Pos>) -> LemmatizeResult {
        let targets = match pos {
            Some(p) => vec![p],
            None => vec![Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb],
        };
        let mut result = LemmatizeResult::new();
        for p in targets {
            let candidates = self.candidates(form, p);
            if !candidates.is_empty() {
                result.entry(Some(p)).or_default().extend(candidates);
            }
        }
        result.entry(pos).or_default().insert(form.to_string());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn bound() -> Morphy {
        Morphy::from_lemmas([
            (Pos::Noun, "dog"),
            (Pos::Noun, "box"),
            (Pos::Noun, "mother-in-law"),
            (Pos::Noun, "mother"),
            (Pos::Noun, "attorney general"),
            (Pos::Noun, "attorney"),
            (Pos::Noun, "boatful"),
            (Pos::Noun, "boat"),
            (Pos::Noun, "us"),
            (Pos::Noun, "son-of-a-gun"),
            (Pos::Noun, "gun"),
            (Pos::Verb, "run"),
            (Pos::Verb, "bake"),
            (Pos::Adjective, "big"),
            (Pos::Adjective, "nice"),
        ])
    }

    #[test]
    fn test_detachment_rules() {
        let m = bound();
        assert_eq!(m.candidates("dogs", Pos::Noun), vec!["dog"]);
        assert_eq!(m.candidates("boxes", Pos::Noun), vec!["box"]);
        assert_eq!(m.candidates("baked", Pos::Verb), vec!["bake"]);
        assert_eq!(m.candidates("nicest", Pos::Adjective), vec!["nice"]);
        assert_eq!(m.candidates("nicer", Pos::AdjectiveSatellite), vec!["nice"]);
        assert!(m.candidates("quickly", Pos::Adverb).is_empty());
    }

    #[test]
    fn test_unbound_accepts_every_candidate() {
        let m = Morphy::new();
        assert!(!m.is_bound());
        assert_eq!(m.candidates("running", Pos::Verb), vec!["runne", "runn", "running"]);
        assert_eq!(m.candidates("dog", Pos::Noun), vec!["dog"]);
    }

    #[test]
    fn test_hyphenated_compounds() {
        let m = bound();
        assert_eq!(m.candidates("mothers-in-law", Pos::Noun), vec!["mother-in-law"]);
        assert_eq!(m.candidates("sons-of-guns", Pos::Noun), vec!["son-of-a-gun"]);
    }

    #[test]
    fn test_collocations() {
        let m = bound();
        assert_eq!(m.candidates("attorneys general", Pos::Noun), vec!["attorney general"]);
        let unbound = Morphy::new();
        assert_eq!(unbound.candidates("on them", Pos::Noun)[0], "on it");
    }

    #[test]
    fn test_ful_and_periods() {
        let m = bound();
        assert_eq!(m.candidates("boatsful", Pos::Noun), vec!["boatful"]);
        assert_eq!(m.candidates("u.s.", Pos::Noun), vec!["us"]);
    }

    #[test]
    fn test_lemmatize_keeps_original_form() {
        let m = bound();
        let result = m.lemmatize("dogs", Some(Pos::Noun));
        assert_eq!(
            result.get(&Some(Pos::Noun)),
            Some(&BTreeSet::from(["dog".to_string(), "dogs".to_string()]))
        );

        let any = m.lemmatize("runs", None);
        assert_eq!(any.get(&Some(Pos::Verb)), Some(&BTreeSet::from(["run".to_string()])));
        assert_eq!(any.get(&None), Some(&BTreeSet::from(["runs".to_string()])));
        assert!(any.get(&Some(Pos::Noun)).is_none());
    }

    #[test]
    fn test_rule_compile_rejects_mismatched_markers() {
        assert!(Rule::compile("(PL)-x", "(PREP)-x").is_none());
        assert!(Rule::compile("(PL)-x", "x").is_none());
        let rule = Rule::compile("(PL)-(PREP)", "(SING)-(PREP)").unwrap();
        assert!(rule.pattern.is_match("Passers-By"));
        assert_eq!(rule.fill(&["passer".into(), "by".into()]), "passer-by");
    }
}
