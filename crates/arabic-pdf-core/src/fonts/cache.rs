use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::catalog::{FontCatalog, FontEntry};

/// Invalidatable cache in front of a [`FontCatalog`].
///
/// With a TTL of zero nothing is cached and every call rescans the directory.
pub struct CatalogCache {
    catalog: FontCatalog,
    cache: Option<Cache<(), Arc<[FontEntry]>>>,
}

impl CatalogCache {
    pub fn new(catalog: FontCatalog, ttl_seconds: u64) -> Self {
        let cache = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });

        Self { catalog, cache }
    }

    /// Scanner without caching.
    pub fn uncached(catalog: FontCatalog) -> Self {
        Self::new(catalog, 0)
    }

    pub const fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub const fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Current catalog entries, scanning on the blocking pool when needed.
    pub async fn entries(&self) -> Arc<[FontEntry]> {
        match self.cache {
            Some(ref cache) => cache.get_with((), scan(self.catalog.clone())).await,
            None => scan(self.catalog.clone()).await,
        }
    }

    /// Drop the cached list so the next lookup rescans.
    pub fn invalidate(&self) {
        if let Some(ref cache) = self.cache {
            cache.invalidate_all();
            debug!("Invalidated font catalog cache");
        }
    }
}

async fn scan(catalog: FontCatalog) -> Arc<[FontEntry]> {
    let dir = catalog.dir().to_path_buf();
    match tokio::task::spawn_blocking(move || catalog.list_fonts()).await {
        Ok(fonts) => {
            debug!("Scanned {} Arabic fonts in {}", fonts.len(), dir.display());
            fonts.into()
        }
        Err(e) => {
            error!("Font scan task panicked: {}", e);
            Arc::from(Vec::new())
        }
    }
}
