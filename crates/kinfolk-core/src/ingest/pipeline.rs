use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use super::assembler::assemble;
use super::config::IngestConfig;
use super::linearizer::Linearizer;
use super::normalizer::normalize;
use super::segmenter::segment;
use super::source::{DirectorySource, PageSource};
use super::warning::RecordWarning;
use crate::markup::{HtmlPage, MarkupNode};
use crate::record::Record;
use crate::Result;

/// Records read from one page, in page order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageOutput {
    pub records: Vec<Record>,
    pub warnings: Vec<RecordWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub records: usize,
    pub warnings: usize,
    #[serde(skip)]
    first_record: usize,
    #[serde(skip)]
    first_warning: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IngestStats {
    pub pages: usize,
    pub records: usize,
    pub warnings: usize,
    pub duration_ms: u64,
}

/// Every page of a batch, with records concatenated in page order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutput {
    pub pages: Vec<PageSummary>,
    pub records: Vec<Record>,
    pub warnings: Vec<RecordWarning>,
    pub stats: IngestStats,
}

impl BatchOutput {
    fn push_page(&mut self, name: String, output: PageOutput) {
        self.pages.push(PageSummary {
            name,
            records: output.records.len(),
            warnings: output.warnings.len(),
            first_record: self.records.len(),
            first_warning: self.warnings.len(),
        });
        self.stats.pages += 1;
        self.stats.records += output.records.len();
        self.stats.warnings += output.warnings.len();
        self.records.extend(output.records);
        self.warnings.extend(output.warnings);
    }

    /// The records that came from `page`.
    #[must_use]
    pub fn records_of(&self, page: &PageSummary) -> &[Record] {
        let end = (page.first_record + page.records).min(self.records.len());
        self.records.get(page.first_record..end).unwrap_or_default()
    }

    /// The warnings raised while reading `page`.
    #[must_use]
    pub fn warnings_of(&self, page: &PageSummary) -> &[RecordWarning] {
        let end = (page.first_warning + page.warnings).min(self.warnings.len());
        self.warnings.get(page.first_warning..end).unwrap_or_default()
    }
}

pub struct IngestPipeline {
    config: IngestConfig,
}

impl IngestPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: IngestConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// Run every stage over one page tree. Nothing carries over between calls.
    pub fn extract_page<N: MarkupNode>(&self, root: &N) -> Result<PageOutput> {
        let paragraphs = Linearizer::new(&self.config).run(root)?;
        let mut output = PageOutput::default();

        for mut paragraph in paragraphs {
            paragraph.normalized_fragments = normalize(&paragraph.raw_fragments);
            paragraph.sentences = segment(&paragraph.normalized_fragments);

            let (record, warnings) = assemble(&paragraph)?;
            debug!(
                identifier = %record.identifier,
                sentences = paragraph.sentences.len(),
                "Assembled record"
            );
            output.records.push(record);
            output.warnings.extend(warnings);
        }

        Ok(output)
    }

    pub fn extract_html(&self, source: &str) -> Result<PageOutput> {
        let page = HtmlPage::parse(source);
        self.extract_page(&page.root())
    }

    /// Read every page `source` lists. The first error aborts the batch and
    /// names the page it came from.
    pub async fn ingest(&self, source: &dyn PageSource) -> Result<BatchOutput> {
        let start = std::time::Instant::now();
        let mut batch = BatchOutput::default();

        for name in source.list_pages().await? {
            let html = source
                .read_page(&name)
                .await
                .map_err(|e| e.in_page(name.as_str()))?;
            let output = self
                .extract_html(&html)
                .map_err(|e| e.in_page(name.as_str()))?;

            debug!(page = %name, records = output.records.len(), "Extracted page");
            batch.push_page(name, output);
        }

        batch.stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            pages = batch.stats.pages,
            records = batch.stats.records,
            warnings = batch.stats.warnings,
            "Batch complete"
        );
        Ok(batch)
    }

    pub async fn ingest_directory(&self, dir: &Path) -> Result<BatchOutput> {
        let source = DirectorySource::new(dir, self.config.clone());
        self.ingest(&source).await
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new()
    }
}
