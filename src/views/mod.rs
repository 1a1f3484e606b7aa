//! View modules and how they are loaded.
//!
//! # Data Flow
//! ```text
//! Route resolved → entry chain (layout … leaf)
//!     → cache.rs (memoized, shared in-flight loads)
//!     → loader.rs (builtin / file / closure producer)
//!     → ViewModule (builtin askama view or template source)
//!     → render with a ViewContext (params, outlet, nav)
//! ```
//!
//! # Design Decisions
//! - Loading is the only suspension point of a navigation
//! - A loader runs at most once per view unless it fails or is invalidated
//! - Builtin views are askama templates checked at compile time
//! - Views read from disk are minijinja templates, parsed when loaded
//! - Both engines escape HTML; `nav`, `breadcrumb` and `outlet` are trusted markup

use std::collections::BTreeMap;

use minijinja::{context, AutoEscape, Environment, Value};
use serde::Serialize;
use thiserror::Error;

pub mod builtin;
pub mod cache;
pub mod loader;

pub use builtin::BuiltinView;
pub use cache::ViewCache;
pub use loader::{BuiltinLoader, FileLoader, FnLoader, LoadError, ViewLoader, ViewSource};

/// Failure to turn a view or widget into markup.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("view template error: {0}")]
    Source(#[from] minijinja::Error),
}

/// Values available to a view while it renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewContext {
    pub app_title: String,
    pub title: String,
    pub path: String,
    pub route: String,
    pub params: BTreeMap<String, String>,
    /// Rendered navigation menu.
    pub nav: String,
    /// Rendered breadcrumb trail.
    pub breadcrumb: String,
    /// Rendered child view.
    pub outlet: String,
}

impl ViewContext {
    /// A route parameter, empty when absent.
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or("")
    }
}

/// What a view renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Builtin(BuiltinView),
    /// minijinja template source.
    Source(String),
}

/// A loaded view, rendered into its parent's outlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModule {
    name: String,
    body: ViewBody,
}

impl ViewModule {
    pub fn builtin(view: BuiltinView) -> Self {
        Self {
            name: view.name().to_string(),
            body: ViewBody::Builtin(view),
        }
    }

    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: ViewBody::Source(source.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &ViewBody {
        &self.body
    }

    pub fn render(&self, ctx: &ViewContext) -> Result<String, RenderError> {
        match &self.body {
            ViewBody::Builtin(view) => Ok(view.render(ctx)?),
            ViewBody::Source(source) => render_source(source, ctx),
        }
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
}

/// Parse a template source without rendering it.
pub fn check_source(source: &str) -> Result<(), minijinja::Error> {
    environment().template_from_str(source).map(|_| ())
}

fn render_source(source: &str, ctx: &ViewContext) -> Result<String, RenderError> {
    let values = context! {
        app_title => &ctx.app_title,
        title => &ctx.title,
        path => &ctx.path,
        route => &ctx.route,
        params => &ctx.params,
        nav => Value::from_safe_string(ctx.nav.clone()),
        breadcrumb => Value::from_safe_string(ctx.breadcrumb.clone()),
        outlet => Value::from_safe_string(ctx.outlet.clone()),
    };
    Ok(environment().render_str(source, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_view_substitution() {
        let mut ctx = ViewContext {
            title: "Events".into(),
            outlet: "<p>x</p>".into(),
            ..ViewContext::default()
        };
        ctx.params.insert("id".into(), "<script>".into());

        let module = ViewModule::from_source(
            "Custom",
            "<h1>{{ title }}</h1>{{ outlet }}<i>{{ params.id }}</i>{{ missing }}",
        );
        assert_eq!(
            module.render(&ctx).unwrap(),
            "<h1>Events</h1><p>x</p><i>&lt;script&gt;</i>"
        );
    }

    #[test]
    fn test_source_syntax_error() {
        assert!(check_source("{% if %}").is_err());
        assert!(check_source("{{ outlet }}").is_ok());
    }

    #[test]
    fn test_builtin_module() {
        let module = ViewModule::builtin(BuiltinView::Dashboard);
        assert_eq!(module.name(), "Dashboard");
        assert!(module
            .render(&ViewContext::default())
            .unwrap()
            .contains(r#"data-view="Dashboard""#));
    }
}
