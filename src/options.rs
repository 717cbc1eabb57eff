//! Per-call resolution options.

use serde::{Deserialize, Serialize};

/// Toggles recognised by [`Resolver::resolve`](crate::Resolver::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Dereference every nested `$ref` in the result, not just the one at
    /// the requested pointer.
    ///
    /// Depending on the size of the result this may be expensive.
    pub recursive: bool,
}

impl ResolveOptions {
    /// Options with every toggle off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable recursive resolution of the result.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// Shorthand for `ResolveOptions::new().recursive(enabled)`.
pub fn with_recursive_resolution(enabled: bool) -> ResolveOptions {
    ResolveOptions::new().recursive(enabled)
}
