//! Startup orchestration.
//!
//! # Responsibilities
//! - Construct the application singletons in dependency order
//! - Compile and check the route table
//! - Install the UI widget library and the icon set
//! - Bind the listener last (traffic only when ready)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Singletons are owned by `App` and passed down, never global

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

use crate::config::{load_config, AppConfig, ConfigError};
use crate::http::{AppState, HttpServer};
use crate::registry::components::ui_library;
use crate::registry::{register_icons, ComponentRegistry};
use crate::routing::routes::dashboard_routes;
use crate::routing::{Navigator, Resolver, RouteEntry, TableError};
use crate::store::{self, StateStore};
use crate::views::{ViewCache, ViewSource};

/// Title shown in the layout shell.
pub const APP_TITLE_TEXT: &str = "网络热点事件群体极化预测分析系统";

/// A bootstrap stage, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StateStore,
    Router,
    Components,
    Icons,
    Mount,
}

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid route table: {0}")]
    Routes(#[from] TableError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Builder for [`App`].
#[derive(Debug)]
pub struct Bootstrap {
    config: AppConfig,
    routes: Option<Vec<RouteEntry>>,
}

impl Bootstrap {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            routes: None,
        }
    }

    /// Start from the config file at `path`, or from defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self, BootstrapError> {
        // Runs before logging is initialized
        if !path.exists() {
            return Ok(Self::new(AppConfig::default()));
        }
        Ok(Self::new(load_config(path)?))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Replace the dashboard route table.
    pub fn with_routes(mut self, routes: Vec<RouteEntry>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Construct every singleton except the listener.
    pub fn build(self) -> Result<App, BootstrapError> {
        let mut steps = Vec::with_capacity(5);

        let store = StateStore::new();
        store.set(store::APP_TITLE, APP_TITLE_TEXT);
        steps.push(Step::StateStore);
        tracing::debug!(step = ?Step::StateStore, "State store created");

        let source = ViewSource::from_config(&self.config.views);
        let entries = self.routes.unwrap_or_else(|| dashboard_routes(&source));
        let resolver = Arc::new(Resolver::from_entries(entries)?);
        steps.push(Step::Router);
        tracing::debug!(
            step = ?Step::Router,
            records = resolver.table().len(),
            targets = resolver.manifest().len(),
            "Router compiled"
        );

        let mut components = ComponentRegistry::new();
        let widgets = components.register_all(ui_library());
        steps.push(Step::Components);
        tracing::debug!(step = ?Step::Components, widgets, "UI library installed");

        let icons = register_icons(&mut components);
        steps.push(Step::Icons);
        tracing::debug!(step = ?Step::Icons, icons, "Icons installed");

        let cache = Arc::new(ViewCache::new(self.config.views.cache));
        let navigator = Arc::new(Navigator::new(
            resolver.clone(),
            cache.clone(),
            store.clone(),
        ));

        Ok(App {
            config: Arc::new(ArcSwap::from_pointee(self.config)),
            store,
            resolver,
            components: Arc::new(components),
            cache,
            navigator,
            steps,
        })
    }
}

/// The composed application, ready to mount.
#[derive(Debug)]
pub struct App {
    config: Arc<ArcSwap<AppConfig>>,
    store: StateStore,
    resolver: Arc<Resolver>,
    components: Arc<ComponentRegistry>,
    cache: Arc<ViewCache>,
    navigator: Arc<Navigator>,
    steps: Vec<Step>,
}

impl App {
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.load_full()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn cache(&self) -> &Arc<ViewCache> {
        &self.cache
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    /// Steps executed so far, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Bind the configured address and attach the shell server.
    pub async fn mount(self) -> Result<Mounted, BootstrapError> {
        let address = self.config.load().server.bind_address.clone();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| BootstrapError::Bind { address, source })?;
        Ok(self.mount_on(listener))
    }

    /// Attach the shell server to an already bound listener.
    pub fn mount_on(self, listener: TcpListener) -> Mounted {
        let App {
            config,
            store,
            resolver,
            components,
            cache,
            navigator,
            mut steps,
        } = self;

        let server = HttpServer::new(AppState {
            config,
            store,
            resolver,
            components,
            cache,
            navigator,
        });
        steps.push(Step::Mount);
        tracing::debug!(step = ?Step::Mount, "Shell mounted");

        Mounted {
            server,
            listener,
            steps,
        }
    }
}

/// A mounted application: listener bound, not yet serving.
#[derive(Debug)]
pub struct Mounted {
    server: HttpServer,
    listener: TcpListener,
    steps: Vec<Step>,
}

impl Mounted {
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn server(&self) -> &HttpServer {
        &self.server
    }

    /// The navigator shared with the server state.
    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.server.state().navigator
    }

    /// Serve until `shutdown` fires.
    pub async fn run(
        self,
        config_updates: mpsc::UnboundedReceiver<AppConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        self.server
            .run(self.listener, config_updates, shutdown)
            .await
    }
}
