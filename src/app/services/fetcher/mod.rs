//! Document acquisition from the filesystem or HTTP
//!
//! - [`file`] - local files read with tokio
//! - [`http`] - remote documents fetched with reqwest
//! - [`encoding`] - charset decoding shared by both sources
//!
//! The parser never performs I/O itself; callers fetch text through a
//! [`Fetcher`] and hand it to [`crate::PxParser`].

pub mod encoding;
pub mod file;
pub mod http;

use crate::Result;
use crate::config::FetchConfig;
use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use tracing::debug;

pub use file::FileSource;
pub use http::HttpSource;

/// http(s)/ftp(s) URL with a domain, localhost or IPv4 host
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
    .expect("valid URL regex")
});

/// Where a document lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriKind {
    Url,
    File,
}

/// Classify a URI as remote URL or local file path
pub fn uri_kind(uri: &str) -> UriKind {
    if URL_REGEX.is_match(uri) {
        UriKind::Url
    } else {
        UriKind::File
    }
}

/// A capability that turns a URI into document text
pub trait DocumentSource {
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Dispatches to the file or HTTP source by URI kind
#[derive(Debug, Clone)]
pub struct Fetcher {
    file: FileSource,
    http: HttpSource,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            file: FileSource::new(config.encoding.clone()),
            http: HttpSource::new(config)?,
        })
    }
}

impl DocumentSource for Fetcher {
    async fn fetch(&self, uri: &str) -> Result<String> {
        let kind = uri_kind(uri);
        debug!("Fetching {} as {:?}", uri, kind);
        match kind {
            UriKind::Url => self.http.fetch(uri).await,
            UriKind::File => self.file.fetch(uri).await,
        }
    }
}
