use std::path::Path;

use anyhow::{bail, Result};
use console::style;
use kinfolk_core::{IngestConfig, IngestPipeline, Storage};

pub async fn run(dir: &Path, db: &str, config: IngestConfig) -> Result<()> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }

    let batch = IngestPipeline::new()
        .with_config(config)
        .ingest_directory(dir)
        .await?;

    let storage = Storage::open(db).await?;
    storage
        .insert_pages(
            batch
                .pages
                .iter()
                .map(|page| (page.name.as_str(), batch.records_of(page))),
        )
        .await?;

    for page in &batch.pages {
        eprintln!(
            "  {} {} ({} records)",
            style("✓").green(),
            page.name,
            batch.records_of(page).len()
        );
        super::print_warnings(&page.name, batch.warnings_of(page));
    }

    println!(
        "Ingested {} records from {} pages into {db} ({} warnings)",
        style(batch.stats.records).bold(),
        batch.stats.pages,
        batch.stats.warnings,
    );

    Ok(())
}
