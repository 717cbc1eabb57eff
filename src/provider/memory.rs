//! In-memory document registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ResolveError, Result};
use crate::reference::Reference;
use crate::value::Value;

use super::Provider;

/// Documents registered under exact string keys.
///
/// Lookups compare the reference's document key (everything but the
/// fragment) against the registered keys verbatim; there is no scheme or
/// path normalisation. Also used as the parsed-document cache of the
/// filesystem and HTTP providers.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    documents: RwLock<HashMap<String, Arc<Value>>>,
}

impl MemoryProvider {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`, replacing any previous document.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Result<()> {
        self.set_shared(key, Arc::new(value))
    }

    /// Register an already shared document under `key`.
    pub fn set_shared(&self, key: impl Into<String>, value: Arc<Value>) -> Result<()> {
        let key = key.into();
        tracing::trace!("memory: registering document '{}'", key);
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
        Ok(())
    }

    /// Look a document up by its exact key.
    pub fn lookup(&self, key: &str) -> Option<Arc<Value>> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Remove the document registered under `key`.
    pub fn remove(&self, key: &str) -> Option<Arc<Value>> {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// Check if a document is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registered document.
    pub fn clear(&self) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, reference: &Reference) -> Result<Arc<Value>> {
        let key = reference.document_key();
        self.lookup(&key).ok_or(ResolveError::NotFound { key })
    }
}
