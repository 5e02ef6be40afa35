//! HTTP(S) document source
//!
//! Transport failures are classified into [`TransportKind`], logged once here
//! and returned to the caller unchanged. There are no retries.

use super::DocumentSource;
use super::encoding::decode;
use crate::config::FetchConfig;
use crate::{Error, Result, TransportKind};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Certificate, Client};
use tracing::{debug, error};

/// Fetches documents over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    encoding: String,
}

impl HttpSource {
    /// Build a client honouring timeout, TLS and header settings
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .default_headers(build_headers(config)?);

        if let Some(path) = &config.ca_certificate {
            let pem = std::fs::read(path).map_err(|e| {
                Error::io(format!("Failed to read CA certificate {}", path.display()), e)
            })?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                Error::configuration(format!("Invalid CA certificate {}: {}", path.display(), e))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            encoding: config.encoding.clone(),
        })
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, uri: &str) -> Result<String> {
        debug!("GET {}", uri);

        let response = self
            .client
            .get(uri)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| transport_error(uri, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(uri, e))?;

        debug!("Received {} bytes from {}", bytes.len(), uri);
        decode(&bytes, &self.encoding)
    }
}

fn build_headers(config: &FetchConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::configuration(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::configuration(format!("Invalid header value '{}': {}", value, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Classify a reqwest failure
pub fn classify(error: &reqwest::Error) -> TransportKind {
    if error.is_timeout() {
        TransportKind::Timeout
    } else if let Some(status) = error.status() {
        TransportKind::HttpStatus(status.as_u16())
    } else if error.is_connect() {
        TransportKind::Connection
    } else if error.is_builder() {
        TransportKind::InvalidUri
    } else {
        TransportKind::Other
    }
}

fn transport_error(uri: &str, e: reqwest::Error) -> Error {
    let kind = classify(&e);
    error!("{} fetching {}: {}", kind, uri, e);
    Error::transport(uri, kind, e.to_string())
}
