//! Configuration loading and resolver construction.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::schema::{ProviderConfig, ResolverConfig};
use crate::error::{ResolveError, Result};
use crate::provider::{FsProvider, HttpProvider, MemoryProvider};
use crate::resolver::Resolver;

/// Load a single config file and parse it into a [`ResolverConfig`].
///
/// Relative `file` provider roots are made relative to the config file's
/// directory.
///
/// # Errors
///
/// Returns `Config` if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ResolverConfig> {
    let content = fs::read_to_string(path).map_err(|e| ResolveError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut config = parse_config(&content, path)?;

    if let Some(base) = path.parent() {
        for provider in &mut config.providers {
            if let ProviderConfig::File { root } = provider {
                if root.is_relative() {
                    *root = base.join(&*root);
                }
            }
        }
    }

    Ok(config)
}

/// Parse YAML (or JSON) content into a [`ResolverConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ResolverConfig> {
    serde_yaml::from_str(content).map_err(|e| ResolveError::Config {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

impl ResolverConfig {
    /// Build a resolver with the configured providers, in declaration order.
    pub fn build(&self) -> Result<Resolver> {
        let mut resolver = Resolver::new().with_default_options(self.options);

        for provider in &self.providers {
            match provider {
                ProviderConfig::Memory { documents } => {
                    let memory = MemoryProvider::new();
                    for (key, document) in documents {
                        memory.set(key.clone(), document.clone())?;
                    }
                    resolver.add_provider(memory)?;
                }
                ProviderConfig::File { root } => {
                    resolver.add_provider(FsProvider::new(root))?;
                }
                ProviderConfig::Http { timeout } => {
                    let http = HttpProvider::with_timeout(Duration::from_secs(*timeout))?;
                    resolver.add_provider(http)?;
                }
            }
        }

        Ok(resolver)
    }
}
