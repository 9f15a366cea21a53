//! # Catalog Sources
//!
//! Where the seed catalog comes from on first run: a JSON file on disk, a
//! URL, or a document held in memory.

use crate::catalog::{Course, Electives};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// The seed document: both keys are optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub electives: Electives,
}

/// Why the seed catalog could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A read-once provider of the seed catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<CatalogDocument, FetchError>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}

/// Seed catalog read from a local JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<CatalogDocument, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Seed catalog fetched over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<CatalogDocument, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A fixed document, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    document: CatalogDocument,
}

impl StaticSource {
    pub fn new(document: CatalogDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self) -> Result<CatalogDocument, FetchError> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "static document".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_reads_partial_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"courses": [{{"courseCode": "CS101", "courseName": "Intro", "credits": 3, "type": "core", "details": {{"description": "Basics"}}}}]}}"#
        )
        .unwrap();

        let document = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(document.courses.len(), 1);
        assert!(document.electives.is_empty());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn test_file_source_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = tokio_test::block_on(FileSource::new(file.path()).fetch()).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
