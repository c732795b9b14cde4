use async_trait::async_trait;
use std::path::PathBuf;

use super::config::IngestConfig;
use crate::Result;

/// Where pages come from.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Page names in the order they should be read.
    async fn list_pages(&self) -> Result<Vec<String>>;

    async fn read_page(&self, name: &str) -> Result<String>;
}

/// Page files in one directory, read in file-name order.
pub struct DirectorySource {
    root: PathBuf,
    config: IngestConfig,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: IngestConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }
}

#[async_trait]
impl PageSource for DirectorySource {
    async fn list_pages(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.config.is_page_file(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    async fn read_page(&self, name: &str) -> Result<String> {
        let bytes = tokio::fs::read(self.root.join(name)).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
