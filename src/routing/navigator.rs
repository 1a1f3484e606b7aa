//! Ordered navigation with supersession.
//!
//! # Responsibilities
//! - Resolve each navigation and load its view chain
//! - Publish the displayed view to subscribers
//! - Discard results of navigations overtaken by newer ones
//!
//! # Design Decisions
//! - Every navigation takes a generation number when it starts
//! - A result is displayed only if its generation is still the latest
//! - Stale loads run to completion (they warm the cache) but never display
//! - No cancellation tokens: supersession is the only cancellation

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::observability::metrics;
use crate::routing::error::RouteError;
use crate::routing::router::{ResolvedRoute, Resolver};
use crate::store::{self, StateStore};
use crate::views::{ViewCache, ViewModule};

/// What the shell currently shows.
#[derive(Debug)]
pub struct Displayed {
    pub route: ResolvedRoute,
    /// Loaded modules for the route chain, outermost layout first.
    pub views: Vec<Arc<ViewModule>>,
    pub generation: u64,
}

impl Displayed {
    /// The target view (innermost module).
    pub fn view(&self) -> &Arc<ViewModule> {
        &self.views[self.views.len() - 1]
    }
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The navigation is now displayed.
    Displayed(Arc<Displayed>),
    /// A newer navigation started before this one finished loading.
    Superseded { generation: u64, latest: u64 },
}

impl NavigationOutcome {
    pub fn is_displayed(&self) -> bool {
        matches!(self, NavigationOutcome::Displayed(_))
    }
}

/// Load every view module of a resolved route, outermost first.
pub async fn load_chain(
    cache: &ViewCache,
    route: &ResolvedRoute,
) -> Result<Vec<Arc<ViewModule>>, RouteError> {
    let mut views = Vec::with_capacity(route.chain().len());
    for record in route.chain() {
        let module = cache
            .load(&record.loader)
            .await
            .map_err(|source| RouteError::LoaderFailure {
                view: record.view().to_string(),
                source,
            })?;
        views.push(module);
    }
    Ok(views)
}

/// Drives navigation for one rendering root.
#[derive(Debug)]
pub struct Navigator {
    resolver: Arc<Resolver>,
    cache: Arc<ViewCache>,
    store: StateStore,
    generation: AtomicU64,
    current: watch::Sender<Option<Arc<Displayed>>>,
}

impl Navigator {
    pub fn new(resolver: Arc<Resolver>, cache: Arc<ViewCache>, store: StateStore) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            resolver,
            cache,
            store,
            generation: AtomicU64::new(0),
            current,
        }
    }

    /// Navigate to a path.
    pub async fn push(&self, path: &str) -> Result<NavigationOutcome, RouteError> {
        let generation = self.begin();
        let resolved = self.resolver.resolve(path);
        self.finish(generation, resolved).await
    }

    /// Navigate to a named route.
    pub async fn push_named(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<NavigationOutcome, RouteError> {
        let generation = self.begin();
        let resolved = self.resolver.navigate(name, params);
        self.finish(generation, resolved).await
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn finish(
        &self,
        generation: u64,
        resolved: Result<ResolvedRoute, RouteError>,
    ) -> Result<NavigationOutcome, RouteError> {
        let route = match resolved {
            Ok(route) => route,
            Err(e) => {
                metrics::record_navigation("none", e.kind());
                return Err(e);
            }
        };
        let label = route.leaf().label();

        let loaded = load_chain(&self.cache, &route).await;

        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            tracing::debug!(
                route = %label,
                generation,
                latest,
                "Navigation superseded, discarding result"
            );
            metrics::record_navigation(&label, "superseded");
            return Ok(NavigationOutcome::Superseded { generation, latest });
        }

        let views = match loaded {
            Ok(views) => views,
            Err(e) => {
                metrics::record_navigation(&label, e.kind());
                return Err(e);
            }
        };

        let displayed = Arc::new(Displayed {
            route,
            views,
            generation,
        });

        let shown = self.current.send_if_modified(|slot| {
            // Re-check under the channel lock: a newer navigation may have
            // started while this one was being published
            if self.generation.load(Ordering::SeqCst) == generation {
                *slot = Some(displayed.clone());
                true
            } else {
                false
            }
        });

        if !shown {
            metrics::record_navigation(&label, "superseded");
            return Ok(NavigationOutcome::Superseded {
                generation,
                latest: self.generation.load(Ordering::SeqCst),
            });
        }

        if let Some(name) = displayed.route.name() {
            self.store.set(store::CURRENT_ROUTE, name);
        }
        self.store.increment(store::NAVIGATION_COUNT);
        metrics::record_navigation(&label, "displayed");
        tracing::info!(route = %label, path = %displayed.route.path(), "Navigation displayed");

        Ok(NavigationOutcome::Displayed(displayed))
    }

    /// What is displayed right now.
    pub fn current(&self) -> Option<Arc<Displayed>> {
        self.current.borrow().clone()
    }

    /// Receive every change of the displayed view.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Displayed>>> {
        self.current.subscribe()
    }

    /// Generation of the most recently started navigation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
