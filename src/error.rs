//! Error types for reference resolution.
//!
//! This module defines [`ResolveError`], the error type returned by the
//! resolver and every provider, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Resolver-level failures (`MalformedSpec`, `PointerNotFound`,
//!   `MalformedReference`, `ProviderUnavailable`, `ReferenceLoop`) describe
//!   what went wrong while following a `$ref` chain
//! - Provider-local failures (`UnsupportedScheme`, `NotFound`, `NotAFile`,
//!   `Io`, `Decode`, `Transport`) are passed through the resolver unchanged
//! - Use `anyhow::Error` (via `ResolveError::Other`) for errors raised by
//!   custom [`Provider`](crate::provider::Provider) implementations

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for reference resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The reference specification could not be parsed.
    #[error("Malformed reference specification '{spec}': {message}")]
    MalformedSpec { spec: String, message: String },

    /// A JSON pointer did not address a value in the document.
    #[error("JSON pointer '{pointer}' does not address a value")]
    PointerNotFound { pointer: String },

    /// A `$ref` key was present but its value is not a string.
    #[error("'$ref' must be a string (got {kind})")]
    MalformedReference { kind: &'static str },

    /// No registered provider could fetch an externally addressed document,
    /// and the fallback to the current document failed as well.
    #[error("No provider could fetch '{uri}' ({} provider(s) tried)", .failures.len())]
    ProviderUnavailable {
        uri: String,
        failures: Vec<ResolveError>,
    },

    /// A `$ref` chain re-entered a reference it was already following.
    #[error("Reference loop detected at '{reference}'")]
    ReferenceLoop { reference: String },

    /// The provider does not handle the reference's URI scheme.
    #[error("{provider} provider does not support scheme '{scheme}'")]
    UnsupportedScheme {
        provider: &'static str,
        scheme: String,
    },

    /// The provider has no document registered under the key.
    #[error("Document not found: {key}")]
    NotFound { key: String },

    /// The filesystem target exists but is not a regular file.
    #[error("Target is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// The filesystem target would lie outside the provider root.
    #[error("Path escapes provider root: {path}")]
    PathEscapesRoot { path: String },

    /// Reading a document from disk failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fetched document is not valid JSON.
    #[error("Failed to decode JSON from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Fetching a document over the network failed.
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// Resolver configuration could not be loaded.
    #[error("Invalid resolver configuration at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResolveError {
    /// Whether this error reports a `$ref` cycle.
    pub fn is_reference_loop(&self) -> bool {
        matches!(self, Self::ReferenceLoop { .. })
    }

    /// Whether this error means the addressed value or document does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PointerNotFound { .. } | Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::ProviderUnavailable { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
