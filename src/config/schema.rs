//! Resolver configuration schema.
//!
//! These structs map to a YAML (or JSON) file describing which providers a
//! resolver consults, in which order, and its default options.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::options::ResolveOptions;
use crate::value::Value;

/// Root resolver configuration.
///
/// ```yaml
/// options:
///   recursive: true
/// providers:
///   - type: memory
///     documents:
///       common: { name: { type: string } }
///   - type: file
///     root: schemas
///   - type: http
///     timeout: 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Default options for `resolve_default`.
    pub options: ResolveOptions,

    /// Providers, in lookup order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<ProviderConfig>,
}

/// A single provider definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// Documents embedded in the configuration.
    Memory {
        /// Documents keyed by their exact lookup key.
        #[serde(default)]
        documents: HashMap<String, Value>,
    },
    /// `file://` documents beneath a root directory.
    File {
        /// Root directory (relative paths are relative to the config file).
        root: PathBuf,
    },
    /// `http://` and `https://` documents.
    Http {
        /// Request timeout in seconds.
        #[serde(default = "default_http_timeout")]
        timeout: u64,
    },
}

fn default_http_timeout() -> u64 {
    crate::provider::http::DEFAULT_TIMEOUT.as_secs()
}
