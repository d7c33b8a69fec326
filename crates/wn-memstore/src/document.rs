//! YAML lexicon document model.
//!
//! One document describes one lexicon: its metadata, optional authoritative
//! ILI entries, lexical entries with their senses, and synsets.
//!
//! ```yaml
//! lexicon:
//!   id: test-en
//!   version: "1"
//!   label: Test English
//!   language: en
//! entries:
//!   - id: w-dog-n
//!     pos: n
//!     lemma: { form: dog }
//!     senses:
//!       - { id: s-dog-n-1, synset: ss-dog }
//! synsets:
//!   - id: ss-dog
//!     pos: n
//!     ili: i100
//!     relations:
//!       - { type: hypernym, target: ss-animal }
//! ```
//!
//! A synset marked `external: true` in an extension lexicon refers to a
//! synset of the same id in a base lexicon; its relations are attached to
//! that base synset and declared by the extension.

use serde::{Deserialize, Serialize};
use wn_core::{AdjPosition, IliStatus, LexiconRecord, Metadata, Pos, Pronunciation, Tag};

/// ILI value marking a synset that proposes a new concept.
pub const PROPOSED_ILI: &str = "in";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconDocument {
    pub lexicon: LexiconRecord,
    #[serde(default)]
    pub ilis: Vec<IliDoc>,
    #[serde(default)]
    pub entries: Vec<EntryDoc>,
    #[serde(default)]
    pub synsets: Vec<SynsetDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IliDoc {
    pub id: String,
    #[serde(default = "default_ili_status")]
    pub status: IliStatus,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_ili_status() -> IliStatus {
    IliStatus::Active
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDoc {
    pub id: String,
    pub pos: Pos,
    pub lemma: FormDoc,
    #[serde(default)]
    pub forms: Vec<FormDoc>,
    #[serde(default)]
    pub senses: Vec<SenseDoc>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDoc {
    pub form: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub pronunciations: Vec<Pronunciation>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenseDoc {
    pub id: String,
    pub synset: String,
    #[serde(default = "default_true")]
    pub lexicalized: bool,
    #[serde(default)]
    pub adjposition: Option<AdjPosition>,
    #[serde(default)]
    pub examples: Vec<TextDoc>,
    #[serde(default)]
    pub counts: Vec<CountDoc>,
    #[serde(default)]
    pub frames: Vec<String>,
    /// Sense-to-sense relations.
    #[serde(default)]
    pub relations: Vec<RelationDoc>,
    /// Sense-to-synset relations.
    #[serde(default)]
    pub synset_relations: Vec<RelationDoc>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynsetDoc {
    pub id: String,
    pub pos: Pos,
    #[serde(default)]
    pub ili: Option<String>,
    /// Definition of a proposed ILI (`ili: in`).
    #[serde(default)]
    pub ili_definition: Option<String>,
    #[serde(default)]
    pub lexfile: Option<String>,
    #[serde(default = "default_true")]
    pub lexicalized: bool,
    /// Member sense ids in synset order; undeclared members follow in entry order.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<DefinitionDoc>,
    #[serde(default)]
    pub examples: Vec<TextDoc>,
    #[serde(default)]
    pub relations: Vec<RelationDoc>,
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDoc {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub target: String,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionDoc {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub source_sense: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextDoc {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountDoc {
    pub value: u64,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_true() -> bool {
    true
}

impl LexiconDocument {
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn specifier(&self) -> String {
        self.lexicon.specifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
lexicon:
  id: mini
  version: "1"
  label: Mini
  language: en
  requires:
    - { id: base, version: "2" }
entries:
  - id: w-cat-n
    pos: n
    lemma: { form: cat }
    forms:
      - { form: cats }
    senses:
      - id: s-cat-n-1
        synset: ss-cat
        examples:
          - text: the cat sat
synsets:
  - id: ss-cat
    pos: n
    ili: i42
    definitions:
      - text: a small feline
    relations:
      - { type: hypernym, target: ss-feline }
"#;

    #[test]
    fn test_parse_minimal_document() {
        let doc = LexiconDocument::from_yaml(DOC).unwrap();
        assert_eq!(doc.specifier(), "mini:1");
        assert_eq!(doc.lexicon.requires[0].specifier(), "base:2");
        assert_eq!(doc.entries[0].forms[0].form, "cats");
        let sense = &doc.entries[0].senses[0];
        assert!(sense.lexicalized);
        assert_eq!(sense.examples[0].text, "the cat sat");
        let synset = &doc.synsets[0];
        assert_eq!(synset.ili.as_deref(), Some("i42"));
        assert_eq!(synset.relations[0].rel_type, "hypernym");
        assert!(!synset.external);
    }

    #[test]
    fn test_ili_status_defaults_active() {
        let doc: IliDoc = serde_yaml::from_str("id: i1").unwrap();
        assert_eq!(doc.status, IliStatus::Active);
    }
}
