//! Turns family-history pages into person records.
//!
//! Stages run in order: linearize the page tree into per-person paragraphs,
//! normalize fragments, segment sentences, classify each sentence and apply
//! its extractor, then seal one record per paragraph.

mod assembler;
mod classifier;
mod config;
mod dated_event;
mod extractor;
mod fragment;
mod linearizer;
mod normalizer;
mod pipeline;
mod segmenter;
mod source;
mod warning;

pub use assembler::{assemble, RecordBuilder};
pub use classifier::{classify, classify_text, Topic, KEYWORDS};
pub use config::IngestConfig;
pub use dated_event::{parse_dated_event, parse_location};
pub use extractor::extract;
pub use fragment::{Fragment, Paragraph, Sentence};
pub use linearizer::Linearizer;
pub use normalizer::normalize;
pub use pipeline::{BatchOutput, IngestPipeline, IngestStats, PageOutput, PageSummary};
pub use segmenter::segment;
pub use source::{DirectorySource, PageSource};
pub use warning::{RecordWarning, Warning};
