//! Relation-type vocabularies and caller-facing relation filters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, WnError};
use crate::types::EntityKind;

/// Relation types valid between two senses.
pub const SENSE_RELATIONS: &[&str] = &[
    "antonym",
    "also",
    "participle",
    "pertainym",
    "derivation",
    "domain_topic",
    "has_domain_topic",
    "domain_region",
    "has_domain_region",
    "exemplifies",
    "is_exemplified_by",
    "similar",
    "other",
];

/// Relation types valid from a sense to a synset.
pub const SENSE_SYNSET_RELATIONS: &[&str] =
    &["domain_topic", "domain_region", "exemplifies", "other"];

/// Relation types valid between two synsets.
pub const SYNSET_RELATIONS: &[&str] = &[
    "agent",
    "also",
    "attribute",
    "be_in_state",
    "causes",
    "classified_by",
    "classifies",
    "co_agent_instrument",
    "co_agent_patient",
    "co_agent_result",
    "co_instrument_agent",
    "co_instrument_patient",
    "co_instrument_result",
    "co_patient_agent",
    "co_patient_instrument",
    "co_result_agent",
    "co_result_instrument",
    "co_role",
    "direction",
    "domain_region",
    "domain_topic",
    "exemplifies",
    "entails",
    "eq_synonym",
    "has_domain_region",
    "has_domain_topic",
    "is_exemplified_by",
    "holo_location",
    "holo_member",
    "holo_part",
    "holo_portion",
    "holo_substance",
    "holonym",
    "hypernym",
    "hyponym",
    "in_manner",
    "instance_hypernym",
    "instance_hyponym",
    "instrument",
    "involved",
    "involved_agent",
    "involved_direction",
    "involved_instrument",
    "involved_location",
    "involved_patient",
    "involved_result",
    "involved_source_direction",
    "involved_target_direction",
    "is_caused_by",
    "is_entailed_by",
    "location",
    "manner_of",
    "mero_location",
    "mero_member",
    "mero_part",
    "mero_portion",
    "mero_substance",
    "meronym",
    "similar",
    "other",
    "patient",
    "restricted_by",
    "restricts",
    "result",
    "role",
    "source_direction",
    "state_of",
    "target_direction",
    "subevent",
    "is_subevent_of",
    "antonym",
];

pub const HYPERNYM_RELATIONS: &[&str] = &["hypernym", "instance_hypernym"];
pub const HYPONYM_RELATIONS: &[&str] = &["hyponym", "instance_hyponym"];
pub const HOLONYM_RELATIONS: &[&str] = &[
    "holonym",
    "holo_location",
    "holo_member",
    "holo_part",
    "holo_portion",
    "holo_substance",
];
pub const MERONYM_RELATIONS: &[&str] = &[
    "meronym",
    "mero_location",
    "mero_member",
    "mero_part",
    "mero_portion",
    "mero_substance",
];

/// Which relation edge families a filter is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    SenseSense,
    SenseSynset,
    SynsetSynset,
}

impl RelationKind {
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Self::SenseSense => SENSE_RELATIONS,
            Self::SenseSynset => SENSE_SYNSET_RELATIONS,
            Self::SynsetSynset => SYNSET_RELATIONS,
        }
    }

    pub fn source_kind(self) -> EntityKind {
        match self {
            Self::SenseSense | Self::SenseSynset => EntityKind::Sense,
            Self::SynsetSynset => EntityKind::Synset,
        }
    }

    pub fn target_kind(self) -> EntityKind {
        match self {
            Self::SenseSense => EntityKind::Sense,
            Self::SenseSynset | Self::SynsetSynset => EntityKind::Synset,
        }
    }
}

/// A validated set of relation types. `All` matches every type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationFilter {
    All,
    Only(SmallVec<[String; 4]>),
}

impl RelationFilter {
    /// Validate caller-supplied relation tokens for `kind`.
    ///
    /// An empty token list or a `*` token selects every relation type.
    /// Unknown tokens fail with [`WnError::InvalidRelation`], carrying the
    /// closest known name when one is reasonably similar.
    pub fn parse<S: AsRef<str>>(kind: RelationKind, tokens: &[S]) -> Result<Self> {
        if tokens.is_empty() || tokens.iter().any(|t| t.as_ref() == "*") {
            return Ok(Self::All);
        }
        let vocabulary = kind.vocabulary();
        let mut names: SmallVec<[String; 4]> = SmallVec::new();
        for token in tokens {
            let token = token.as_ref();
            if !vocabulary.contains(&token) {
                return Err(WnError::InvalidRelation {
                    kind: kind.source_kind(),
                    name: token.to_string(),
                    suggestion: closest_name(token, vocabulary),
                });
            }
            if !names.iter().any(|n| n == token) {
                names.push(token.to_string());
            }
        }
        Ok(Self::Only(names))
    }

    /// Build from a fixed vocabulary subset known to be valid.
    pub fn of(names: &[&str]) -> Self {
        Self::Only(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn matches(&self, rel_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|n| n == rel_type),
        }
    }
}

fn closest_name(token: &str, vocabulary: &[&str]) -> Option<String> {
    vocabulary
        .iter()
        .map(|name| (strsim::jaro_winkler(token, name), *name))
        .filter(|(score, _)| *score >= 0.8)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_star_select_all() {
        let none: [&str; 0] = [];
        assert_eq!(
            RelationFilter::parse(RelationKind::SynsetSynset, &none).unwrap(),
            RelationFilter::All
        );
        assert_eq!(
            RelationFilter::parse(RelationKind::SynsetSynset, &["hypernym", "*"]).unwrap(),
            RelationFilter::All
        );
    }

    #[test]
    fn test_known_tokens_deduplicated() {
        let filter =
            RelationFilter::parse(RelationKind::SynsetSynset, &["hypernym", "hypernym"]).unwrap();
        assert!(filter.matches("hypernym"));
        assert!(!filter.matches("hyponym"));
        assert_eq!(filter, RelationFilter::of(&["hypernym"]));
    }

    #[test]
    fn test_unknown_token_suggests_closest() {
        let err = RelationFilter::parse(RelationKind::SynsetSynset, &["hypernim"]).unwrap_err();
        match err {
            WnError::InvalidRelation {
                kind,
                name,
                suggestion,
            } => {
                assert_eq!(kind, EntityKind::Synset);
                assert_eq!(name, "hypernim");
                assert_eq!(suggestion.as_deref(), Some("hypernym"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sense_vocabulary_rejects_synset_only_types() {
        assert!(RelationFilter::parse(RelationKind::SenseSense, &["hypernym"]).is_err());
        assert!(RelationFilter::parse(RelationKind::SenseSense, &["derivation"]).is_ok());
    }

    #[test]
    fn test_gibberish_has_no_suggestion() {
        let err = RelationFilter::parse(RelationKind::SenseSynset, &["qqqqqq"]).unwrap_err();
        assert!(matches!(
            err,
            WnError::InvalidRelation {
                suggestion: None,
                ..
            }
        ));
    }
}
