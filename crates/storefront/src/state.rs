//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::realtime::{CartCountCache, ChangeListener};
use crate::services::uploads::UploadStore;
use crate::services::zoho::ZohoClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool,
/// configuration, upload store, the optional Zoho mirror client, and the
/// reactive cart-count cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    uploads: UploadStore,
    zoho: Option<ZohoClient>,
    cart_counts: CartCountCache,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool, listener: &ChangeListener) -> Self {
        let uploads = UploadStore::new(&config.uploads);
        let zoho = config.zoho.clone().map(ZohoClient::new);
        if zoho.is_none() {
            tracing::warn!("Zoho credentials not configured; inventory mirroring disabled");
        }
        let cart_counts = CartCountCache::new(pool.clone(), listener);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploads,
                zoho,
                cart_counts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the upload store.
    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }

    /// Get the Zoho client, if mirroring is configured.
    #[must_use]
    pub fn zoho(&self) -> Option<&ZohoClient> {
        self.inner.zoho.as_ref()
    }

    /// Get the reactive cart-count cache.
    #[must_use]
    pub fn cart_counts(&self) -> &CartCountCache {
        &self.inner.cart_counts
    }
}
