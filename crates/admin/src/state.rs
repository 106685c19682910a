//! Application state shared across handlers.

use std::sync::Arc;

use coffee_stand_core::client::{BackendClient, RequestError};

use crate::config::AdminConfig;
use crate::middleware::session::SessionCache;

/// Application state shared across all handlers.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: BackendClient,
    sessions: SessionCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, RequestError> {
        let backend = BackendClient::new(&config.backend)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                sessions: SessionCache::default(),
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get the session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionCache {
        &self.inner.sessions
    }

    /// Whether failed fetches show demo rows.
    #[must_use]
    pub fn demo_fallback(&self) -> bool {
        self.inner.config.demo_fallback
    }
}
