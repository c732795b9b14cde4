use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("<{tag}> tag is missing its `{attribute}` attribute")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },

    #[error("Malformed reference target: {0}")]
    MalformedReference(String),

    #[error("Name tag has no text")]
    EmptyName,

    #[error("Record {name:?} has no identifying anchor")]
    MissingIdentifier { name: String },

    #[error("Date trigger `{trigger}` is not followed by a day, month, or year")]
    MissingDate { trigger: String },

    #[error("Expected `in` before location clause, found `{found}`")]
    MissingLocationClause { found: String },

    #[error("Location `{location}` has {clauses} comma-separated clauses (at most 3)")]
    AmbiguousLocation { location: String, clauses: usize },

    #[error("{page}: {source}")]
    Page {
        page: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Stored row is corrupt: {0}")]
    CorruptRow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True when the page violated the markup or prose conventions the
    /// extractor relies on. These abort a whole batch.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        match self {
            Self::MissingAttribute { .. }
            | Self::MalformedReference(_)
            | Self::EmptyName
            | Self::MissingIdentifier { .. }
            | Self::MissingDate { .. }
            | Self::MissingLocationClause { .. }
            | Self::AmbiguousLocation { .. } => true,
            Self::Page { source, .. } => source.is_structural(),
            Self::RecordNotFound(_)
            | Self::CorruptRow(_)
            | Self::Io(_)
            | Self::Database(_)
            | Self::Serialization(_) => false,
        }
    }

    #[must_use]
    pub fn in_page(self, page: impl Into<String>) -> Self {
        Self::Page {
            page: page.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
