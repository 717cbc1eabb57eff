//! Document providers.
//!
//! A [`Provider`] fetches a whole document given a [`Reference`], ignoring
//! the reference's fragment. The resolver consults its providers whenever a
//! spec addresses a document other than the current one:
//! - [`MemoryProvider`] - documents registered in memory under exact keys
//! - [`FsProvider`] - `file://` documents confined to a root directory
//! - [`HttpProvider`] - `http://` and `https://` documents
//!
//! # Lookup Order
//!
//! Providers are tried in registration order (first success wins). A
//! provider that cannot handle a reference simply fails; it never prevents
//! later providers from being tried.
//!
//! # Example
//!
//! ```
//! use jsref::provider::{MemoryProvider, Provider};
//! use jsref::Reference;
//! use serde_json::json;
//!
//! let provider = MemoryProvider::new();
//! provider.set("obj2", json!({"sub": "quux"})).unwrap();
//!
//! let doc = provider.get(&Reference::parse("obj2#/ignored").unwrap()).unwrap();
//! assert_eq!(doc["sub"], "quux");
//! ```

pub mod fs;
pub mod http;
pub mod memory;

pub use fs::FsProvider;
pub use http::HttpProvider;
pub use memory::MemoryProvider;

use std::sync::Arc;

use crate::error::Result;
use crate::reference::Reference;
use crate::value::Value;

/// A source of whole documents.
///
/// Implementations must be safe to call concurrently: one resolver may serve
/// many threads at once.
pub trait Provider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the document addressed by `reference`, ignoring its fragment.
    fn get(&self, reference: &Reference) -> Result<Arc<Value>>;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, reference: &Reference) -> Result<Arc<Value>> {
        (**self).get(reference)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, reference: &Reference) -> Result<Arc<Value>> {
        (**self).get(reference)
    }
}
