//! Lexicon specifier parsing and resolution.
//!
//! A specifier string is a space-separated list of tokens:
//!
//! | token        | matches                                            |
//! |--------------|----------------------------------------------------|
//! | `*`          | every installed lexicon                            |
//! | `id`         | the most recently installed lexicon with that id   |
//! | `id:*`       | every version of `id`                              |
//! | `id:ver`     | exactly that lexicon                               |
//! | `*:ver`      | every lexicon at version `ver`                     |
//! | `omw-*`      | every version of every id matching the glob        |
//! | `omw-*:ver`  | lexicons whose id matches the glob at version `ver`|
//!
//! Globs (`*`, `?`) apply to the id segment only; versions match literally.

use regex::Regex;

use crate::error::{Result, WnError};
use crate::types::LexiconRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPattern {
    Any,
    Exact(String),
    Glob(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Most recently installed version only.
    Latest,
    Any,
    Exact(String),
}

/// One parsed specifier token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconSpecifier {
    pub raw: String,
    pub id: IdPattern,
    pub version: VersionSelector,
}

impl LexiconSpecifier {
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(WnError::Config("empty lexicon specifier".into()));
        }
        let (id_part, version) = match token.split_once(':') {
            Some((id, ver)) => {
                if id.is_empty() || ver.is_empty() || ver.contains(':') {
                    return Err(WnError::Config(format!(
                        "malformed lexicon specifier: {token:?}"
                    )));
                }
                let version = if ver == "*" {
                    VersionSelector::Any
                } else {
                    VersionSelector::Exact(ver.to_string())
                };
                (id, version)
            }
            None if token == "*" || is_glob(token) => (token, VersionSelector::Any),
            None => (token, VersionSelector::Latest),
        };
        let id = if id_part == "*" {
            IdPattern::Any
        } else if is_glob(id_part) {
            IdPattern::Glob(id_part.to_string())
        } else {
            IdPattern::Exact(id_part.to_string())
        };
        Ok(Self {
            raw: token.to_string(),
            id,
            version,
        })
    }

    /// Lexicons matched by this token, in install order.
    pub fn matches<'a>(&self, installed: &'a [LexiconRecord]) -> Result<Vec<&'a LexiconRecord>> {
        let glob = match &self.id {
            IdPattern::Glob(pattern) => Some(glob_regex(pattern)?),
            _ => None,
        };
        let id_matches = |rec: &LexiconRecord| match &self.id {
            IdPattern::Any => true,
            IdPattern::Exact(id) => &rec.id == id,
            IdPattern::Glob(_) => glob.as_ref().is_some_and(|re| re.is_match(&rec.id)),
        };
        let candidates = installed.iter().filter(|rec| id_matches(rec));
        Ok(match &self.version {
            VersionSelector::Any => candidates.collect(),
            VersionSelector::Exact(ver) => candidates.filter(|rec| &rec.version == ver).collect(),
            VersionSelector::Latest => candidates.last().into_iter().collect(),
        })
    }
}

/// Parse a space-separated specifier list.
pub fn parse_specifiers(spec: &str) -> Result<Vec<LexiconSpecifier>> {
    spec.split_whitespace().map(LexiconSpecifier::parse).collect()
}

/// Resolve a specifier list and optional language filter against the
/// installed lexicons.
///
/// Results follow token order, then install order, without duplicates. A
/// token matching nothing is a configuration error, as is a language filter
/// that leaves nothing, unless `allow_empty` is set. A bare `*` over an empty
/// store resolves to nothing.
pub fn resolve_specifiers(
    spec: &str,
    lang: Option<&str>,
    installed: &[LexiconRecord],
    allow_empty: bool,
) -> Result<Vec<LexiconRecord>> {
    let specifiers = parse_specifiers(spec)?;
    let mut resolved: Vec<&LexiconRecord> = Vec::new();
    for specifier in &specifiers {
        let matched = specifier.matches(installed)?;
        let wildcard = specifier.id == IdPattern::Any && specifier.version == VersionSelector::Any;
        if matched.is_empty() && !allow_empty && !wildcard {
            return Err(WnError::Config(format!(
                "no lexicon found with specifier {:?}",
                specifier.raw
            )));
        }
        for rec in matched {
            if !resolved.iter().any(|r| r.specifier() == rec.specifier()) {
                resolved.push(rec);
            }
        }
    }

    if let Some(lang) = lang.filter(|l| !l.is_empty()) {
        if !allow_empty && !installed.iter().any(|rec| rec.language == lang) {
            return Err(WnError::Config(format!(
                "no lexicon installed for language {lang:?}"
            )));
        }
        resolved.retain(|rec| rec.language == lang);
        if resolved.is_empty() && !allow_empty {
            return Err(WnError::Config(format!(
                "no lexicon matches specifier {spec:?} with language {lang:?}"
            )));
        }
    }

    Ok(resolved.into_iter().cloned().collect())
}

fn is_glob(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

fn glob_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::with_capacity(pattern.len() + 4);
    re.push('^');
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
        .map_err(|e| WnError::Config(format!("invalid lexicon pattern {pattern:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;
    use pretty_assertions::assert_eq;

    fn rec(id: &str, version: &str, language: &str) -> LexiconRecord {
        LexiconRecord {
            id: id.into(),
            version: version.into(),
            label: id.into(),
            language: language.into(),
            email: String::new(),
            license: String::new(),
            url: None,
            citation: None,
            logo: None,
            requires: vec![],
            extends: None,
            metadata: Metadata::new(),
        }
    }

    fn installed() -> Vec<LexiconRecord> {
        vec![
            rec("ewn", "2019", "en"),
            rec("omw-ja", "1.4", "ja"),
            rec("ewn", "2020", "en"),
            rec("omw-fr", "1.4", "fr"),
            rec("test-en", "1", "en"),
        ]
    }

    fn keys(recs: &[LexiconRecord]) -> Vec<String> {
        recs.iter().map(|r| r.specifier()).collect()
    }

    // ── Parsing ──────────────────────────────────────────────────

    #[test]
    fn test_parse_forms() {
        let s = LexiconSpecifier::parse("ewn").unwrap();
        assert_eq!(s.id, IdPattern::Exact("ewn".into()));
        assert_eq!(s.version, VersionSelector::Latest);

        let s = LexiconSpecifier::parse("ewn:*").unwrap();
        assert_eq!(s.version, VersionSelector::Any);

        let s = LexiconSpecifier::parse("*:1.4").unwrap();
        assert_eq!(s.id, IdPattern::Any);
        assert_eq!(s.version, VersionSelector::Exact("1.4".into()));

        let s = LexiconSpecifier::parse("omw-*").unwrap();
        assert_eq!(s.id, IdPattern::Glob("omw-*".into()));
        assert_eq!(s.version, VersionSelector::Any);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(LexiconSpecifier::parse("ewn:").is_err());
        assert!(LexiconSpecifier::parse(":2020").is_err());
        assert!(LexiconSpecifier::parse("a:b:c").is_err());
    }

    // ── Resolution ───────────────────────────────────────────────

    #[test]
    fn test_star_matches_all_in_install_order() {
        let got = resolve_specifiers("*", None, &installed(), false).unwrap();
        assert_eq!(
            keys(&got),
            vec!["ewn:2019", "omw-ja:1.4", "ewn:2020", "omw-fr:1.4", "test-en:1"]
        );
    }

    #[test]
    fn test_bare_id_is_most_recent_install() {
        let got = resolve_specifiers("ewn", None, &installed(), false).unwrap();
        assert_eq!(keys(&got), vec!["ewn:2020"]);
    }

    #[test]
    fn test_id_star_matches_all_versions() {
        let got = resolve_specifiers("ewn:*", None, &installed(), false).unwrap();
        assert_eq!(keys(&got), vec!["ewn:2019", "ewn:2020"]);
    }

    #[test]
    fn test_star_version() {
        let got = resolve_specifiers("*:1.4", None, &installed(), false).unwrap();
        assert_eq!(keys(&got), vec!["omw-ja:1.4", "omw-fr:1.4"]);
    }

    #[test]
    fn test_glob_on_id_only() {
        let got = resolve_specifiers("omw-*", None, &installed(), false).unwrap();
        assert_eq!(keys(&got), vec!["omw-ja:1.4", "omw-fr:1.4"]);
        // The version segment is literal, never a glob.
        assert!(resolve_specifiers("ewn:20*", None, &installed(), false).is_err());
    }

    #[test]
    fn test_token_order_then_dedup() {
        let got = resolve_specifiers("test-en ewn:* ewn", None, &installed(), false).unwrap();
        assert_eq!(keys(&got), vec!["test-en:1", "ewn:2019", "ewn:2020"]);
    }

    #[test]
    fn test_unknown_specifier_errors_unless_allowed() {
        let err = resolve_specifiers("nope", None, &installed(), false).unwrap_err();
        assert!(matches!(err, WnError::Config(ref m) if m.contains("nope")));
        let got = resolve_specifiers("nope ewn:2019", None, &installed(), true).unwrap();
        assert_eq!(keys(&got), vec!["ewn:2019"]);
    }

    #[test]
    fn test_lang_filter() {
        let got = resolve_specifiers("*", Some("en"), &installed(), false).unwrap();
        assert_eq!(keys(&got), vec!["ewn:2019", "ewn:2020", "test-en:1"]);
    }

    #[test]
    fn test_unknown_lang_is_config_error() {
        assert!(resolve_specifiers("*", Some("xx"), &installed(), false).is_err());
    }

    #[test]
    fn test_conflicting_lexicon_and_lang() {
        let err = resolve_specifiers("omw-ja", Some("en"), &installed(), false).unwrap_err();
        assert!(matches!(err, WnError::Config(_)));
    }

    #[test]
    fn test_empty_install_star_is_empty() {
        let got = resolve_specifiers("*", None, &[], false).unwrap();
        assert!(got.is_empty());
    }
}
