use wn_core::types::confidence_from;
use wn_core::{IliRow, IliStatus, Metadata};

/// An interlingual index entry.
///
/// ILIs are not lexicon-scoped; a proposed ILI (declared by a synset but not
/// yet assigned an identifier) has no `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ili {
    id: Option<String>,
    status: IliStatus,
    definition: Option<String>,
    metadata: Metadata,
}

impl Ili {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn status(&self) -> IliStatus {
        self.status
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Confidence from metadata, else 1.0.
    pub fn confidence(&self) -> f64 {
        confidence_from(&self.metadata).unwrap_or(1.0)
    }
}

impl From<IliRow> for Ili {
    fn from(row: IliRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            definition: row.definition,
            metadata: row.metadata,
        }
    }
}

impl std::fmt::Display for Ili {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => f.write_str(id),
            None => write!(f, "<proposed {}>", self.status),
        }
    }
}
