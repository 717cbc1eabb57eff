//! HTTP document fetching.
//!
//! Provides a provider for `http://` and `https://` documents with a
//! per-provider cache of parsed documents.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::error::{ResolveError, Result};
use crate::reference::Reference;
use crate::value::Value;

use super::{MemoryProvider, Provider};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches documents over HTTP/HTTPS.
///
/// The first lookup of a document key issues a GET request; the decoded
/// document is cached under the key (everything but the fragment) and
/// reused afterwards.
pub struct HttpProvider {
    client: Client,
    timeout: Option<Duration>,
    cache: MemoryProvider,
}

impl HttpProvider {
    /// Create a provider with the default 5-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a provider with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jsref/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ResolveError::Transport {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout: Some(timeout),
            cache: MemoryProvider::new(),
        })
    }

    /// Create a provider around a preconfigured client.
    ///
    /// The client's own timeout and transport settings apply.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
            cache: MemoryProvider::new(),
        }
    }

    /// Get the configured timeout, if this provider built its own client.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Forget every cached document.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn fetch(&self, url: &str) -> Result<Value> {
        let transport = |message: String| ResolveError::Transport {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(transport(format!("HTTP {}", response.status())));
        }

        let body = response.bytes().map_err(|e| transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|source| ResolveError::Decode {
            origin: url.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("timeout", &self.timeout)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Provider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn get(&self, reference: &Reference) -> Result<Arc<Value>> {
        if !(reference.has_scheme("http") || reference.has_scheme("https")) {
            return Err(ResolveError::UnsupportedScheme {
                provider: "http",
                scheme: reference.scheme().unwrap_or_default().to_string(),
            });
        }

        let url = reference.document_key();

        if let Some(cached) = self.cache.lookup(&url) {
            tracing::trace!("http: cache hit for {}", url);
            return Ok(cached);
        }

        tracing::debug!("http: fetching {}", url);
        let document = Arc::new(self.fetch(&url)?);
        self.cache.set_shared(url, Arc::clone(&document))?;

        Ok(document)
    }
}
