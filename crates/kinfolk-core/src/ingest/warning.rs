use serde::{Deserialize, Serialize};

use crate::record::PersonRef;

/// Content the extractor kept going past, with a simplified result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A parents sentence named more than two people; the rest were dropped.
    ExtraParent { parent: PersonRef },
    /// The name had a token count other than one, two, or three.
    UnsplitName { name: String },
    /// The county clause did not end in `Co.`.
    MissingCountySuffix { county: String },
    /// A marriage sentence without a cross-referenced spouse.
    MarriageWithoutSpouse { sentence: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtraParent { parent } => {
                write!(f, "dropped extra parent {} ({})", parent.name, parent.identifier)
            }
            Self::UnsplitName { name } => write!(f, "kept only the first token of {name:?}"),
            Self::MissingCountySuffix { county } => {
                write!(f, "county {county:?} has no `Co.` suffix")
            }
            Self::MarriageWithoutSpouse { sentence } => {
                write!(f, "no spouse reference in {sentence:?}")
            }
        }
    }
}

/// A warning tied to the record it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWarning {
    pub record: String,
    #[serde(flatten)]
    pub warning: Warning,
}
