//! jsref - JSON Reference (`$ref`) resolution.
//!
//! jsref follows `$ref` indirections inside dynamically typed JSON
//! documents, optionally crossing into other documents held in memory, on
//! disk, or behind HTTP.
//!
//! # Modules
//!
//! - [`config`] - Declarative resolver configuration (YAML/JSON)
//! - [`error`] - Error types and result aliases
//! - [`options`] - Per-call resolution toggles
//! - [`provider`] - Document providers (memory, filesystem, HTTP)
//! - [`reference`] - Reference specification parsing
//! - [`resolver`] - `$ref` chain following and recursive dereferencing
//! - [`value`] - The document model, `$ref` detection and JSON Pointer evaluation
//!
//! # Example
//!
//! ```
//! use jsref::provider::MemoryProvider;
//! use jsref::Resolver;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "foo": ["bar", {"$ref": "#/sub"}, {"$ref": "obj2#/sub"}],
//!     "sub": "baz"
//! });
//!
//! // External reference
//! let external = MemoryProvider::new();
//! external.set("obj2", json!({"sub": "quux"})).unwrap();
//!
//! let mut resolver = Resolver::new();
//! resolver.add_provider(external).unwrap();
//!
//! assert_eq!(resolver.resolve_default(&doc, "#/foo/0").unwrap(), json!("bar"));
//! assert_eq!(resolver.resolve_default(&doc, "#/foo/1").unwrap(), json!("baz"));
//! assert_eq!(resolver.resolve_default(&doc, "#/foo/2").unwrap(), json!("quux"));
//! assert_eq!(
//!     resolver.resolve_default(&doc, "#/foo").unwrap(),
//!     json!(["bar", {"$ref": "#/sub"}, {"$ref": "obj2#/sub"}])
//! );
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod provider;
pub mod reference;
pub mod resolver;
pub mod value;

pub use error::{ResolveError, Result};
pub use options::{with_recursive_resolution, ResolveOptions};
pub use provider::{FsProvider, HttpProvider, MemoryProvider, Provider};
pub use reference::Reference;
pub use resolver::Resolver;
pub use value::Value;
