//! Local filesystem document source

use super::DocumentSource;
use super::encoding::decode;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Reads documents from the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    encoding: String,
}

impl FileSource {
    pub fn new(encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
        }
    }
}

impl DocumentSource for FileSource {
    async fn fetch(&self, uri: &str) -> Result<String> {
        let path = Path::new(uri);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        decode(&bytes, &self.encoding)
    }
}
