//! Page composition for the shell.
//!
//! # Responsibilities
//! - Compose the layout and the matched view into one document
//! - Render the fallback page for unknown paths (404)
//! - Render a retry page when a view fails to load (503)
//!
//! # Design Decisions
//! - Each request resolves and loads independently; no supersession here
//! - Documents are askama templates that escape route metadata
//! - Rendered views and widgets are inserted into their parent as markup

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http::pages::{LoadFailedPage, NotFoundPage, ShellPage};
use crate::http::AppState;
use crate::observability::metrics;
use crate::registry::{ComponentRegistry, Props};
use crate::routing::navigator::load_chain;
use crate::routing::{ResolvedRoute, Resolver, RouteError};
use crate::store;
use crate::theme;
use crate::views::{RenderError, ViewContext, ViewModule};

const NOT_FOUND_TITLE: &str = "页面未找到";
const LOAD_FAILED_TITLE: &str = "页面加载失败";

/// Resolve `path`, load its views and render the full document.
pub async fn render_page(state: &AppState, path: &str) -> Response {
    let config = state.config.load_full();
    let root_class = theme::root_class(&config.theme);
    let app_title = state.store.get_str(store::APP_TITLE).unwrap_or_default();

    let route = match state.resolver.resolve(path) {
        Ok(route) => route,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Rendering fallback page");
            metrics::record_navigation("none", e.kind());
            return match not_found_alert(&state.components, path) {
                Ok(alert) => respond(
                    StatusCode::NOT_FOUND,
                    NotFoundPage {
                        root_class,
                        title: NOT_FOUND_TITLE.to_string(),
                        app_title,
                        path: path.to_string(),
                        alert,
                    },
                ),
                Err(e) => render_failure(path, e),
            };
        }
    };

    let label = route.leaf().label();
    match load_chain(&state.cache, &route).await {
        Ok(views) => match compose(state, &app_title, &route, &views) {
            Ok(body) => {
                metrics::record_navigation(&label, "rendered");
                respond(
                    StatusCode::OK,
                    ShellPage {
                        root_class,
                        title: route.title().unwrap_or(&label).to_string(),
                        app_title,
                        body,
                    },
                )
            }
            Err(e) => render_failure(path, e),
        },
        Err(e) => {
            tracing::warn!(route = %label, path = %path, error = %e, "View failed to load");
            metrics::record_navigation(&label, e.kind());
            let view = match &e {
                RouteError::LoaderFailure { view, .. } => view.clone(),
                _ => label.clone(),
            };
            match retry_alert(&state.components, path, &e) {
                Ok(alert) => respond(
                    StatusCode::SERVICE_UNAVAILABLE,
                    LoadFailedPage {
                        root_class,
                        title: LOAD_FAILED_TITLE.to_string(),
                        app_title,
                        view,
                        alert,
                    },
                ),
                Err(e) => render_failure(path, e),
            }
        }
    }
}

fn respond(status: StatusCode, page: impl IntoResponse) -> Response {
    metrics::record_page(status.as_u16());
    (status, page).into_response()
}

fn render_failure(path: &str, error: RenderError) -> Response {
    tracing::error!(path = %path, error = %error, "Page rendering failed");
    respond(StatusCode::INTERNAL_SERVER_ERROR, "page rendering failed")
}

/// Render the view chain innermost first, each into its parent's outlet.
pub fn compose(
    state: &AppState,
    app_title: &str,
    route: &ResolvedRoute,
    views: &[Arc<ViewModule>],
) -> Result<String, RenderError> {
    let mut ctx = ViewContext {
        app_title: app_title.to_string(),
        title: route.title().unwrap_or_default().to_string(),
        path: route.path().to_string(),
        route: route.name().unwrap_or_default().to_string(),
        params: route.params().clone(),
        nav: nav(&state.components, &state.resolver, route)?,
        breadcrumb: breadcrumb(&state.components, route)?,
        outlet: String::new(),
    };

    for view in views.iter().rev() {
        let html = view.render(&ctx)?;
        ctx.outlet = html;
    }
    Ok(ctx.outlet)
}

fn props(pairs: &[(&str, &str)]) -> Props {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Menu of parameterless targets, the current one marked active.
fn nav(
    components: &ComponentRegistry,
    resolver: &Resolver,
    current: &ResolvedRoute,
) -> Result<String, RenderError> {
    let mut html = String::new();
    for item in resolver.menu() {
        let icon = match item.icon.as_deref() {
            Some(icon) if components.contains(icon) => {
                components.render(icon, &Props::new(), "")?
            }
            _ => String::new(),
        };
        let active = current.name() == Some(item.name.as_str());
        html.push_str(&components.render(
            "ElMenuItem",
            &props(&[
                ("href", item.path.as_str()),
                ("label", item.title.as_deref().unwrap_or(&item.name)),
                ("active", if active { "true" } else { "false" }),
            ]),
            &icon,
        )?);
    }
    Ok(html)
}

fn breadcrumb(
    components: &ComponentRegistry,
    route: &ResolvedRoute,
) -> Result<String, RenderError> {
    let items = route.breadcrumbs().join("\n");
    components.render("ElBreadcrumb", &props(&[("items", items.as_str())]), "")
}

fn not_found_alert(components: &ComponentRegistry, path: &str) -> Result<String, RenderError> {
    let home = components.render(
        "ElButton",
        &props(&[("href", "/"), ("label", "返回仪表盘"), ("type", "primary")]),
        "",
    )?;
    let description = format!("没有与 {} 匹配的页面", path);
    components.render(
        "ElAlert",
        &props(&[
            ("type", "warning"),
            ("title", NOT_FOUND_TITLE),
            ("description", description.as_str()),
        ]),
        &home,
    )
}

fn retry_alert(
    components: &ComponentRegistry,
    path: &str,
    error: &RouteError,
) -> Result<String, RenderError> {
    let retry = components.render(
        "ElButton",
        &props(&[("href", path), ("label", "重试"), ("type", "primary")]),
        "",
    )?;
    let description = error.to_string();
    components.render(
        "ElAlert",
        &props(&[
            ("type", "error"),
            ("title", LOAD_FAILED_TITLE),
            ("description", description.as_str()),
        ]),
        &retry,
    )
}
