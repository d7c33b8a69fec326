//! Core value types for wordnet data.
//! Pure records: no storage, no engine behavior.

// `parse() -> Option<Self>` sits alongside `FromStr` on several enums.
#![allow(clippy::should_implement_trait)]

use serde::{Deserialize, Serialize};

use crate::error::{Result, WnError};

/// Free-form metadata attached to lexicons, entities and relations.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata key carrying a confidence score in `[0, 1]`.
pub const CONFIDENCE_KEY: &str = "confidenceScore";

// ── Parts of speech ───────────────────────────────────────────

/// Part of speech of a word or synset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pos {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "a")]
    Adjective,
    #[serde(rename = "r")]
    Adverb,
    #[serde(rename = "s")]
    AdjectiveSatellite,
    #[serde(rename = "t")]
    Phrase,
    #[serde(rename = "c")]
    Conjunction,
    #[serde(rename = "p")]
    Adposition,
    #[serde(rename = "x")]
    Other,
    #[serde(rename = "u")]
    Unknown,
}

impl Pos {
    pub const ALL: [Pos; 10] = [
        Pos::Noun,
        Pos::Verb,
        Pos::Adjective,
        Pos::Adverb,
        Pos::AdjectiveSatellite,
        Pos::Phrase,
        Pos::Conjunction,
        Pos::Adposition,
        Pos::Other,
        Pos::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::Verb => "v",
            Self::Adjective => "a",
            Self::Adverb => "r",
            Self::AdjectiveSatellite => "s",
            Self::Phrase => "t",
            Self::Conjunction => "c",
            Self::Adposition => "p",
            Self::Other => "x",
            Self::Unknown => "u",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "a" => Some(Self::Adjective),
            "r" => Some(Self::Adverb),
            "s" => Some(Self::AdjectiveSatellite),
            "t" => Some(Self::Phrase),
            "c" => Some(Self::Conjunction),
            "p" => Some(Self::Adposition),
            "x" => Some(Self::Other),
            "u" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Parse an optional caller-supplied token. `None` and `""` mean "any".
    pub fn parse_filter(token: Option<&str>) -> Result<Option<Self>> {
        match token {
            None | Some("") => Ok(None),
            Some(t) => t.parse().map(Some),
        }
    }

    /// Taxonomy class: adjective satellites share the adjective taxonomy.
    pub fn taxonomy_class(self) -> Self {
        match self {
            Self::AdjectiveSatellite => Self::Adjective,
            other => other,
        }
    }

    pub fn is_compatible(self, other: Pos) -> bool {
        self.taxonomy_class() == other.taxonomy_class()
    }
}

impl std::str::FromStr for Pos {
    type Err = WnError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| WnError::InvalidPos(s.to_string()))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ILI status ────────────────────────────────────────────────

/// Status of an interlingual index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IliStatus {
    /// Listed as active in an authoritative ILI file.
    Active,
    /// Listed as provisional in an authoritative ILI file.
    Provisional,
    /// Listed as deprecated in an authoritative ILI file.
    Deprecated,
    /// Referenced by a synset but absent from any loaded ILI file.
    Presupposed,
    /// A synset proposes a new concept; no identifier assigned yet.
    Proposed,
}

impl IliStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Provisional => "provisional",
            Self::Deprecated => "deprecated",
            Self::Presupposed => "presupposed",
            Self::Proposed => "proposed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "provisional" => Some(Self::Provisional),
            "deprecated" => Some(Self::Deprecated),
            "presupposed" => Some(Self::Presupposed),
            "proposed" => Some(Self::Proposed),
            _ => None,
        }
    }
}

impl std::fmt::Display for IliStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Adjective position ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjPosition {
    /// Attributive.
    #[serde(rename = "a")]
    Attributive,
    /// Immediately postnominal.
    #[serde(rename = "ip")]
    Postnominal,
    /// Predicative.
    #[serde(rename = "p")]
    Predicative,
}

impl AdjPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attributive => "a",
            Self::Postnominal => "ip",
            Self::Predicative => "p",
        }
    }
}

// ── Entity kinds ──────────────────────────────────────────────

/// Discriminator for the entity kinds that carry relations and metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Lexicon,
    Word,
    Sense,
    Synset,
    Ili,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexicon => "lexicon",
            Self::Word => "word",
            Self::Sense => "sense",
            Self::Synset => "synset",
            Self::Ili => "ili",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Form annotations ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notation: Option<String>,
    #[serde(default = "default_true")]
    pub phonemic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub tag: String,
    pub category: String,
}

fn default_true() -> bool {
    true
}

// ── Lexicons ──────────────────────────────────────────────────

/// A declared reference from one lexicon to another (`requires` or `extends`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexiconDependency {
    pub id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LexiconDependency {
    pub fn specifier(&self) -> String {
        format!("{}:{}", self.id, self.version)
    }
}

/// An installed lexicon as reported by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconRecord {
    pub id: String,
    pub version: String,
    pub label: String,
    pub language: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub requires: Vec<LexiconDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<LexiconDependency>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl LexiconRecord {
    /// The `id:version` key identifying this lexicon in a store.
    pub fn specifier(&self) -> String {
        format!("{}:{}", self.id, self.version)
    }

    pub fn confidence(&self) -> f64 {
        confidence_from(&self.metadata).unwrap_or(1.0)
    }
}

/// Read a confidence score from metadata, if present and numeric.
pub fn confidence_from(metadata: &Metadata) -> Option<f64> {
    metadata.get(CONFIDENCE_KEY).and_then(|v| v.as_f64())
}
