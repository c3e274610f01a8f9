//! Application state shared across handlers.

use std::sync::Arc;

use loam_core::{Catalog, CatalogError, TabError, TabSet};

use crate::config::StorefrontConfig;
use crate::content;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid page content: {0}")]
    Content(#[from] TabError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is read-only;
/// per-visitor state lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    home_tabs: TabSet,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the catalog file when `config.catalog_path` is set, otherwise
    /// uses the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| {
                    StateError::CatalogRead {
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                let catalog = Catalog::from_json(&json)?;
                tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
                catalog
            }
            None => Catalog::default(),
        };

        Self::with_catalog(config, catalog)
    }

    /// Create application state around an already-built catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in page content is invalid.
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        let home_tabs = content::home_tabs()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                home_tabs,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// A fresh copy of the home page tabs in their initial state.
    #[must_use]
    pub fn home_tabs(&self) -> TabSet {
        self.inner.home_tabs.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn test_default_catalog_when_no_path() {
        let state = AppState::new(config()).unwrap();
        assert_eq!(state.catalog().len(), 4);
        assert!(state.home_tabs().group(content::GUIDES_GROUP).is_some());
    }

    #[test]
    fn test_missing_catalog_file() {
        let mut config = config();
        config.catalog_path = Some(PathBuf::from("/nonexistent/loam/catalog.json"));
        assert!(matches!(
            AppState::new(config),
            Err(StateError::CatalogRead { .. })
        ));
    }
}
