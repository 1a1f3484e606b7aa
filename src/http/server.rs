//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page and API handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Apply configuration updates while serving
//! - Stop gracefully on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::response;
use crate::registry::ComponentRegistry;
use crate::routing::{Navigator, Resolver, RouteSummary};
use crate::store::StateStore;
use crate::theme;
use crate::views::ViewCache;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<AppConfig>>,
    pub store: StateStore,
    pub resolver: Arc<Resolver>,
    pub components: Arc<ComponentRegistry>,
    pub cache: Arc<ViewCache>,
    /// Ordered navigation over the same resolver and cache.
    pub navigator: Arc<Navigator>,
}

impl AppState {
    /// Swap in a reloaded configuration.
    pub fn apply_config(&self, config: AppConfig) {
        let previous = self.config.load();
        if previous.views.dir != config.views.dir {
            tracing::warn!("views.dir changed; restart to load views from the new location");
        }
        if previous.server.bind_address != config.server.bind_address {
            tracing::warn!("server.bind_address changed; restart to rebind");
        }
        self.config.store(Arc::new(config));
        // View files may have changed along with the config
        self.cache.clear();
        tracing::info!("Configuration reloaded");
    }
}

/// The shell server.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let timeout = Duration::from_secs(state.config.load().server.request_timeout_secs);
        Router::new()
            .route("/api/health", get(health_handler))
            .route("/api/routes", get(routes_handler))
            .route("/theme.css", get(theme_handler))
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(timeout)),
            )
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                state.apply_config(config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn routes_handler(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(state.resolver.manifest())
}

async fn theme_handler(State(state): State<AppState>) -> Response {
    let css = theme::stylesheet(&state.config.load().theme);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        css,
    )
        .into_response()
}

async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    response::render_page(&state, uri.path()).await
}
