//! Declarative resolver configuration.
//!
//! This module lets a resolver be described in a YAML (or JSON) file
//! instead of being assembled in code:
//! - Schema definitions in [`schema`]
//! - File loading and resolver construction in [`loader`]
//!
//! # Example
//!
//! ```
//! use jsref::config::load_config_file;
//! use serde_json::json;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("obj2.json"), r#"{"sub": "quux"}"#).unwrap();
//! fs::write(
//!     temp.path().join("jsref.yml"),
//!     "providers:\n  - type: file\n    root: .\n",
//! )
//! .unwrap();
//!
//! let config = load_config_file(&temp.path().join("jsref.yml")).unwrap();
//! let resolver = config.build().unwrap();
//!
//! let doc = json!({"x": {"$ref": "file:///obj2.json#/sub"}});
//! assert_eq!(resolver.resolve_default(&doc, "#/x").unwrap(), json!("quux"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config_file, parse_config};
pub use schema::{ProviderConfig, ResolverConfig};
