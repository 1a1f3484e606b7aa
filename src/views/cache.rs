//! Memoization of loaded view modules.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::observability::metrics;
use crate::views::loader::{LoadError, ViewLoader};
use crate::views::ViewModule;

type SharedLoad = Shared<BoxFuture<'static, Result<Arc<ViewModule>, LoadError>>>;

/// A thread-safe cache of view modules keyed by view name.
///
/// Concurrent loads of the same view share one in-flight future, so a loader
/// runs at most once per view until it fails or is invalidated.
pub struct ViewCache {
    inner: DashMap<String, SharedLoad>,
    enabled: bool,
}

impl ViewCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: DashMap::new(),
            enabled,
        }
    }

    /// Load a view through the cache.
    ///
    /// Failed loads are evicted so the next call runs the loader again.
    pub async fn load(&self, loader: &Arc<dyn ViewLoader>) -> Result<Arc<ViewModule>, LoadError> {
        if !self.enabled {
            return start_load(loader).await;
        }

        let key = loader.view().to_string();
        let pending = self
            .inner
            .entry(key.clone())
            .or_insert_with(|| start_load(loader).shared())
            .clone();

        let result = pending.clone().await;
        if result.is_err() {
            self.inner.remove_if(&key, |_, cached| cached.ptr_eq(&pending));
        }
        result
    }

    /// Drop the cached module for one view.
    pub fn invalidate(&self, view: &str) -> bool {
        let removed = self.inner.remove(view).is_some();
        if removed {
            tracing::debug!(view = %view, "View module evicted");
        }
        removed
    }

    /// Drop every cached module.
    pub fn clear(&self) {
        let count = self.inner.len();
        self.inner.clear();
        tracing::info!(evicted = count, "View cache cleared");
    }

    /// True when a load for `view` is cached or in flight.
    pub fn contains(&self, view: &str) -> bool {
        self.inner.contains_key(view)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewCache")
            .field("entries", &self.inner.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn start_load(loader: &Arc<dyn ViewLoader>) -> BoxFuture<'static, Result<Arc<ViewModule>, LoadError>> {
    let view = loader.view().to_string();
    let started = Instant::now();
    tracing::debug!(view = %view, "Loading view module");

    loader
        .load()
        .map(move |result| {
            metrics::record_view_load(&view, result.is_ok(), started);
            match &result {
                Ok(_) => tracing::debug!(view = %view, elapsed = ?started.elapsed(), "View module loaded"),
                Err(e) => tracing::warn!(view = %view, error = %e, "View module failed to load"),
            }
            result.map(Arc::new)
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::loader::FnLoader;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_loader(calls: Arc<AtomicUsize>, fail_first: bool) -> Arc<dyn ViewLoader> {
        Arc::new(FnLoader::new("Counted", move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if fail_first && n == 0 {
                    Err(LoadError::Missing {
                        view: "Counted".into(),
                    })
                } else {
                    Ok(ViewModule::from_source("Counted", "<p>counted</p>"))
                }
            }
        }))
    }

    #[tokio::test]
    async fn test_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), false);
        let cache = ViewCache::new(true);

        let a = cache.load(&loader).await.unwrap();
        let b = cache.load(&loader).await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains("Counted"));
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), false);
        let cache = ViewCache::new(true);

        let (a, b) = tokio::join!(cache.load(&loader), cache.load(&loader));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_evicted_and_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), true);
        let cache = ViewCache::new(true);

        assert!(cache.load(&loader).await.is_err());
        assert!(!cache.contains("Counted"));

        assert!(cache.load(&loader).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), false);
        let cache = ViewCache::new(true);

        cache.load(&loader).await.unwrap();
        assert!(cache.invalidate("Counted"));
        assert!(!cache.invalidate("Counted"));
        cache.load(&loader).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_loads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), false);
        let cache = ViewCache::new(false);

        cache.load(&loader).await.unwrap();
        cache.load(&loader).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }
}
