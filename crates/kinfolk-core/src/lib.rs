pub mod error;
pub mod event;
pub mod ingest;
pub mod markup;
pub mod record;
pub mod storage;

pub use error::{Error, Result};
pub use event::{DatedEvent, EventDate, Location};
pub use ingest::{
    BatchOutput, IngestConfig, IngestPipeline, IngestStats, PageOutput, PageSummary,
    RecordWarning, Warning,
};
pub use markup::{HtmlPage, MarkupNode, NodeKind};
pub use record::{Child, Gender, Marriage, NameParts, Occupation, Parent, PersonRef, Record};
pub use storage::{Storage, StoredRecord};
