use std::path::Path;

use anyhow::{Context, Result};
use kinfolk_core::{IngestConfig, IngestPipeline};

pub async fn run(page: &Path, config: IngestConfig) -> Result<()> {
    let html = tokio::fs::read(page)
        .await
        .with_context(|| format!("reading {}", page.display()))?;
    let html = String::from_utf8_lossy(&html);

    let output = IngestPipeline::new()
        .with_config(config)
        .extract_html(&html)
        .with_context(|| page.display().to_string())?;

    super::print_warnings(&page.display().to_string(), &output.warnings);
    println!("{}", serde_json::to_string_pretty(&output.records)?);

    Ok(())
}
