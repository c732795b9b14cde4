use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Knobs for reading a family of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Link targets ending in one of these point at another page, not a person.
    /// Also selects which files a directory ingest picks up.
    pub page_suffixes: Vec<String>,
    /// Tags whose children are read as though they sat directly in the body.
    pub group_tags: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            page_suffixes: vec![".htm".into(), ".html".into()],
            group_tags: vec!["p".into()],
        }
    }
}

impl IngestConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    #[must_use]
    pub fn is_page_link(&self, href: &str) -> bool {
        let href = href.to_ascii_lowercase();
        self.page_suffixes
            .iter()
            .any(|suffix| href.ends_with(&suffix.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn is_page_file(&self, file_name: &str) -> bool {
        self.is_page_link(file_name)
    }

    #[must_use]
    pub fn is_group_tag(&self, tag: &str) -> bool {
        self.group_tags.iter().any(|g| g.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_links() {
        let config = IngestConfig::default();
        assert!(config.is_page_link("fam02.htm"));
        assert!(config.is_page_link("INDEX.HTML"));
        assert!(!config.is_page_link("fam02.htm#I5"));
        assert!(!config.is_page_link("#I5"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: IngestConfig = serde_json::from_str(r#"{"group_tags": ["p", "div"]}"#).unwrap();
        assert!(config.is_group_tag("div"));
        assert_eq!(config.page_suffixes, IngestConfig::default().page_suffixes);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ingest.json");
        tokio::fs::write(&path, r#"{"page_suffixes": [".shtml"]}"#)
            .await
            .unwrap();

        let config = IngestConfig::load(&path).await.unwrap();
        assert!(config.is_page_link("a.shtml"));
        assert!(!config.is_page_link("a.htm"));
    }
}
