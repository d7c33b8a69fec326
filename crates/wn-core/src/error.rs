use thiserror::Error;

use crate::types::EntityKind;

#[derive(Debug, Error)]
pub enum WnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid part of speech: {0:?}")]
    InvalidPos(String),

    #[error("invalid {kind} relation: {name:?}{}", suggestion_suffix(.suggestion))]
    InvalidRelation {
        kind: EntityKind,
        name: String,
        suggestion: Option<String>,
    },

    #[error("invalid argument: {0}")]
    Validation(String),

    #[error("cannot compare: {0}")]
    Comparison(String),

    #[error("no path between {from} and {to}")]
    NoPath { from: String, to: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("data integrity: {0}")]
    Integrity(String),

    #[error("store: {0}")]
    Store(#[from] anyhow::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean {s:?}?)"),
        None => String::new(),
    }
}

impl WnError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Failure class, for callers that map errors onto an outer surface.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::InvalidPos(_) | Self::InvalidRelation { .. } | Self::Validation(_) => {
                "validation"
            }
            Self::Comparison(_) | Self::NoPath { .. } => "comparison",
            Self::NotFound { .. } => "not_found",
            Self::Integrity(_) => "integrity",
            Self::Store(_) => "store",
        }
    }
}

pub type Result<T> = std::result::Result<T, WnError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ── category: variant coverage ───────────────────────────────

    #[test]
    fn category_config() {
        assert_eq!(WnError::Config("x".into()).category(), "configuration");
    }

    #[test]
    fn category_validation_variants() {
        assert_eq!(WnError::InvalidPos("q".into()).category(), "validation");
        let e = WnError::InvalidRelation {
            kind: EntityKind::Synset,
            name: "hypernim".into(),
            suggestion: None,
        };
        assert_eq!(e.category(), "validation");
        assert_eq!(WnError::Validation("x".into()).category(), "validation");
    }

    #[test]
    fn category_comparison_and_path() {
        assert_eq!(WnError::Comparison("x".into()).category(), "comparison");
        let e = WnError::NoPath {
            from: "a".into(),
            to: "b".into(),
        };
        assert_eq!(e.category(), "comparison");
    }

    #[test]
    fn category_store() {
        let e = WnError::Store(anyhow::anyhow!("boom"));
        assert_eq!(e.category(), "store");
    }

    // ── Display ──────────────────────────────────────────────────

    #[test]
    fn display_invalid_relation_with_suggestion() {
        let e = WnError::InvalidRelation {
            kind: EntityKind::Synset,
            name: "hypernim".into(),
            suggestion: Some("hypernym".into()),
        };
        assert_eq!(
            e.to_string(),
            "invalid synset relation: \"hypernim\" (did you mean \"hypernym\"?)"
        );
    }

    #[test]
    fn display_invalid_relation_without_suggestion() {
        let e = WnError::InvalidRelation {
            kind: EntityKind::Sense,
            name: "zzz".into(),
            suggestion: None,
        };
        assert_eq!(e.to_string(), "invalid sense relation: \"zzz\"");
    }

    #[test]
    fn display_not_found() {
        let e = WnError::not_found(EntityKind::Word, "w-dog-n");
        assert_eq!(e.to_string(), "word not found: w-dog-n");
    }

    #[test]
    fn display_store() {
        let e = WnError::Store(anyhow::anyhow!("lock poisoned"));
        assert_eq!(e.to_string(), "store: lock poisoned");
    }
}
