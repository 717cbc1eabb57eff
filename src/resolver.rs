//! JSON Reference resolution.
//!
//! The [`Resolver`] interprets a reference specification against a document,
//! follows `$ref` chains (crossing into documents supplied by its
//! [`Provider`]s), and optionally dereferences every nested `$ref` in the
//! result.
//!
//! # Resolution
//!
//! 1. An empty spec yields the document itself.
//! 2. If the spec names another document, providers are tried in
//!    registration order; the first document found becomes the current
//!    document. If none succeeds, the current document is kept.
//! 3. The spec's fragment is evaluated as a JSON Pointer.
//! 4. If the value found is a `{"$ref": "..."}` marker, its target is
//!    resolved against the current document and the process repeats.
//!
//! With [`ResolveOptions::recursive`] enabled the settled value is then
//! walked, replacing every nested marker with its resolved value. Each
//! nested marker is resolved against the document it appears in.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{ResolveError, Result};
use crate::options::ResolveOptions;
use crate::provider::Provider;
use crate::reference::Reference;
use crate::value::{evaluate_pointer, reference_target, Value};

/// Resolves JSON References against documents and registered providers.
///
/// # Example
///
/// ```
/// use jsref::provider::MemoryProvider;
/// use jsref::{with_recursive_resolution, Resolver};
/// use serde_json::json;
///
/// let doc = json!({
///     "foo": ["bar", {"$ref": "#/sub"}, {"$ref": "obj2#/sub"}],
///     "sub": "baz"
/// });
///
/// let external = MemoryProvider::new();
/// external.set("obj2", json!({"sub": "quux"})).unwrap();
/// let resolver = Resolver::new().with_provider(external);
///
/// assert_eq!(resolver.resolve_default(&doc, "#/foo/1").unwrap(), json!("baz"));
/// assert_eq!(resolver.resolve_default(&doc, "#/foo/2").unwrap(), json!("quux"));
///
/// let all = resolver
///     .resolve(&doc, "#/foo", with_recursive_resolution(true))
///     .unwrap();
/// assert_eq!(all, json!(["bar", "baz", "quux"]));
/// ```
#[derive(Default)]
pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
    defaults: ResolveOptions,
}

/// The document `$ref` strings are currently interpreted against.
#[derive(Clone)]
enum Document<'a> {
    /// The document handed to `resolve` by the caller.
    Caller(&'a Value),
    /// A document supplied by a provider.
    Fetched { key: String, value: Arc<Value> },
}

impl Document<'_> {
    /// Identity used for loop detection. The caller's document has none.
    fn key(&self) -> Option<&str> {
        match self {
            Document::Caller(_) => None,
            Document::Fetched { key, .. } => Some(key),
        }
    }
}

impl Deref for Document<'_> {
    type Target = Value;

    fn deref(&self) -> &Value {
        match self {
            Document::Caller(value) => value,
            Document::Fetched { value, .. } => value,
        }
    }
}

/// A (document, pointer) pair entered while following references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Visit {
    document: Option<String>,
    pointer: String,
}

impl Visit {
    fn describe(&self) -> String {
        format!("{}#{}", self.document.as_deref().unwrap_or_default(), self.pointer)
    }
}

/// The visits currently in progress.
///
/// A chain walk records every pair it enters. In recursive mode the pairs
/// of every enclosing reference stay recorded while its subtree is
/// expanded, and are released afterwards, so only true cycles collide.
#[derive(Debug, Default)]
struct Trail {
    active: HashSet<Visit>,
}

impl Trail {
    fn enter(&mut self, visit: Visit) -> Result<()> {
        if self.active.contains(&visit) {
            let reference = visit.describe();
            tracing::debug!("resolve: reference loop at '{}'", reference);
            return Err(ResolveError::ReferenceLoop { reference });
        }
        self.active.insert(visit);
        Ok(())
    }

    fn release(&mut self, visits: &[Visit]) {
        for visit in visits {
            self.active.remove(visit);
        }
    }
}

/// The end of a `$ref` chain.
struct Settled<'a> {
    value: Value,
    document: Document<'a>,
    visits: Vec<Visit>,
}

impl Resolver {
    /// Create a resolver with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. Providers are consulted in registration order.
    pub fn add_provider<P: Provider + 'static>(&mut self, provider: P) -> Result<()> {
        tracing::debug!("resolver: registered provider '{}'", provider.name());
        self.providers.push(Box::new(provider));
        Ok(())
    }

    /// Builder form of [`add_provider`](Self::add_provider).
    pub fn with_provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        tracing::debug!("resolver: registered provider '{}'", provider.name());
        self.providers.push(Box::new(provider));
        self
    }

    /// Set the options used by [`resolve_default`](Self::resolve_default).
    pub fn with_default_options(mut self, options: ResolveOptions) -> Self {
        self.defaults = options;
        self
    }

    /// The options used by [`resolve_default`](Self::resolve_default).
    pub fn default_options(&self) -> ResolveOptions {
        self.defaults
    }

    /// Number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Resolve `spec` against `document` with this resolver's default
    /// options (non-recursive unless configured otherwise).
    pub fn resolve_default(&self, document: &Value, spec: &str) -> Result<Value> {
        self.resolve(document, spec, self.defaults)
    }

    /// Resolve `spec` against `document`.
    ///
    /// `spec` is `[scheme://[userinfo@]host/path[?query]]#fragment` or
    /// `[scheme:opaque[?query]]#fragment`, where everything except the
    /// fragment is optional. An empty spec returns `document` unchanged
    /// (or, in recursive mode, fully dereferenced).
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MalformedSpec`] if a spec in the chain cannot be parsed
    /// - [`ResolveError::PointerNotFound`] if a fragment addresses nothing
    /// - [`ResolveError::MalformedReference`] if a `$ref` value is not a string
    /// - [`ResolveError::ProviderUnavailable`] if no provider supplied an
    ///   external document and the fallback evaluation failed too
    /// - [`ResolveError::ReferenceLoop`] if a chain or a recursive expansion
    ///   revisits a reference it is still following
    pub fn resolve(&self, document: &Value, spec: &str, options: ResolveOptions) -> Result<Value> {
        tracing::debug!("resolve: start '{}' (recursive: {})", spec, options.recursive);

        if spec.is_empty() && !options.recursive {
            return Ok(document.clone());
        }

        let mut trail = Trail::default();
        let settled = self.follow(Document::Caller(document), spec, &mut trail)?;

        if !options.recursive {
            return Ok(settled.value);
        }

        let mut value = settled.value;
        self.expand(&mut value, &settled.document, &mut trail)?;
        Ok(value)
    }

    /// Follows a `$ref` chain starting at `spec` until a non-marker value.
    fn follow<'a>(
        &self,
        mut document: Document<'a>,
        spec: &str,
        trail: &mut Trail,
    ) -> Result<Settled<'a>> {
        let mut spec = spec.to_string();
        let mut visits = Vec::new();

        loop {
            if spec.is_empty() {
                // Same target as "#": the whole current document.
                let visit = Visit {
                    document: document.key().map(str::to_string),
                    pointer: String::new(),
                };
                trail.enter(visit.clone())?;
                visits.push(visit);

                let value = (*document).clone();
                return Ok(Settled {
                    value,
                    document,
                    visits,
                });
            }

            tracing::trace!("resolve: following '{}'", spec);
            let reference = Reference::parse(&spec)?;

            let mut failures = None;
            if reference.is_external() {
                match self.fetch(&reference) {
                    Ok(fetched) => document = fetched,
                    Err(errors) => failures = Some(errors),
                }
            }

            let visit = Visit {
                document: document.key().map(str::to_string),
                pointer: reference.pointer().to_string(),
            };
            trail.enter(visit.clone())?;
            visits.push(visit);

            let found = match (evaluate_pointer(&document, reference.pointer()), failures) {
                (Ok(found), _) => found,
                (Err(_), Some(failures)) => {
                    return Err(ResolveError::ProviderUnavailable {
                        uri: reference.document_key(),
                        failures,
                    })
                }
                (Err(e), None) => return Err(e),
            };

            match reference_target(found)? {
                Some(target) => spec = target.to_string(),
                None => {
                    let value = found.clone();
                    return Ok(Settled {
                        value,
                        document,
                        visits,
                    });
                }
            }
        }
    }

    /// Asks each provider in turn for the referenced document.
    fn fetch<'a>(
        &self,
        reference: &Reference,
    ) -> std::result::Result<Document<'a>, Vec<ResolveError>> {
        let key = reference.document_key();
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match provider.get(reference) {
                Ok(value) => {
                    tracing::trace!("resolve: '{}' supplied by {}", key, provider.name());
                    return Ok(Document::Fetched { key, value });
                }
                Err(e) => {
                    tracing::trace!(
                        "resolve: {} could not supply '{}': {}",
                        provider.name(),
                        key,
                        e
                    );
                    failures.push(e);
                }
            }
        }

        tracing::debug!(
            "resolve: no provider supplied '{}', using current document",
            key
        );
        Err(failures)
    }

    /// Replaces every marker beneath `value` with its resolved value.
    fn expand(&self, value: &mut Value, document: &Document<'_>, trail: &mut Trail) -> Result<()> {
        match value {
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.expand_node(item, document, trail)?;
                }
            }
            Value::Object(map) => {
                for (_, item) in map.iter_mut() {
                    self.expand_node(item, document, trail)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn expand_node(
        &self,
        node: &mut Value,
        document: &Document<'_>,
        trail: &mut Trail,
    ) -> Result<()> {
        let Some(target) = reference_target(node)?.map(str::to_string) else {
            return self.expand(node, document, trail);
        };

        let settled = self.follow(document.clone(), &target, trail)?;
        let mut resolved = settled.value;
        self.expand(&mut resolved, &settled.document, trail)?;
        trail.release(&settled.visits);

        *node = resolved;
        Ok(())
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("Resolver").field("providers", &names).finish()
    }
}
