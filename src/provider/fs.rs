//! Filesystem document loading.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{ResolveError, Result};
use crate::reference::Reference;
use crate::value::Value;

use super::{MemoryProvider, Provider};

/// Loads `file://` documents from beneath a root directory.
///
/// Only the reference's path is used; host, query and fragment are
/// ignored. The path is interpreted relative to the root, so
/// `file:///schemas/a.json` with root `/srv/docs` reads
/// `/srv/docs/schemas/a.json`. Paths whose `..` segments would climb
/// above the root are rejected.
///
/// Parsed documents are cached by absolute path for the lifetime of the
/// provider.
///
/// # Example
///
/// ```no_run
/// use jsref::provider::FsProvider;
/// use jsref::Resolver;
/// use serde_json::json;
///
/// let resolver = Resolver::new().with_provider(FsProvider::new("/srv/schemas"));
/// let doc = json!({"user": {"$ref": "file:///user.json#/definitions/user"}});
/// let user = resolver.resolve_default(&doc, "#/user").unwrap();
/// ```
#[derive(Debug)]
pub struct FsProvider {
    root: PathBuf,
    cache: MemoryProvider,
}

impl FsProvider {
    /// Create a provider that only reads documents under `root`.
    ///
    /// A relative root is made absolute against the current directory
    /// here, once. If the current directory cannot be determined the root
    /// is kept as given.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            cache: MemoryProvider::new(),
        }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Forget every cached document.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Map a URI path onto a path beneath the root.
    fn confined_path(&self, uri_path: &str) -> Result<PathBuf> {
        let escapes = || ResolveError::PathEscapesRoot {
            path: uri_path.to_string(),
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in uri_path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop().ok_or_else(escapes)?;
                }
                other => {
                    // Reject anything the platform would treat as more than
                    // one plain component (separators, drive prefixes).
                    let mut components = Path::new(other).components();
                    match (components.next(), components.next()) {
                        (Some(Component::Normal(_)), None) => segments.push(other),
                        _ => return Err(escapes()),
                    }
                }
            }
        }

        Ok(segments
            .into_iter()
            .fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    fn load(&self, path: &Path) -> Result<Value> {
        let io_error = |source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(io_error)?;
        if metadata.is_dir() {
            return Err(ResolveError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read(path).map_err(io_error)?;
        serde_json::from_slice(&content).map_err(|source| ResolveError::Decode {
            origin: path.display().to_string(),
            source,
        })
    }
}

impl Provider for FsProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, reference: &Reference) -> Result<Arc<Value>> {
        if !reference.has_scheme("file") {
            return Err(ResolveError::UnsupportedScheme {
                provider: "file",
                scheme: reference.scheme().unwrap_or_default().to_string(),
            });
        }

        let path = self.confined_path(&reference.decoded_path())?;
        let key = path.to_string_lossy().into_owned();

        if let Some(cached) = self.cache.lookup(&key) {
            tracing::trace!("file: cache hit for {}", key);
            return Ok(cached);
        }

        tracing::debug!("file: loading {}", key);
        let document = Arc::new(self.load(&path)?);
        self.cache.set_shared(key, Arc::clone(&document))?;

        Ok(document)
    }
}
