//! Deferred view module producers.
//!
//! # Responsibilities
//! - Produce a `ViewModule` on demand, asynchronously
//! - Report failures as a typed, cloneable `LoadError`
//!
//! # Design Decisions
//! - Loaders are restartable: calling `load` again after a failure retries
//! - Loaders never memoize; `ViewCache` does
//! - Futures are `'static` so they can be shared between navigations

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

use crate::config::ViewsConfig;
use crate::views::{check_source, BuiltinView, ViewModule};

/// Why a view module could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The view has no source.
    #[error("no source for view '{view}'")]
    Missing { view: String },

    /// Reading the view source failed.
    #[error("reading {path}: {reason}")]
    Io { path: String, reason: String },

    /// The view source is not a valid template.
    #[error("view '{view}' is not a valid template: {reason}")]
    Template { view: String, reason: String },
}

/// A deferred, restartable producer of a view module.
pub trait ViewLoader: Send + Sync + fmt::Debug {
    /// Name of the view this loader produces. Also the memoization key.
    fn view(&self) -> &str;

    /// Start loading the view.
    fn load(&self) -> BoxFuture<'static, Result<ViewModule, LoadError>>;
}

/// Loads views compiled into the binary.
#[derive(Debug, Clone)]
pub struct BuiltinLoader {
    view: String,
}

impl BuiltinLoader {
    pub fn new(view: impl Into<String>) -> Self {
        Self { view: view.into() }
    }
}

impl ViewLoader for BuiltinLoader {
    fn view(&self) -> &str {
        &self.view
    }

    fn load(&self) -> BoxFuture<'static, Result<ViewModule, LoadError>> {
        let result = match BuiltinView::from_name(&self.view) {
            Some(view) => Ok(ViewModule::builtin(view)),
            None => Err(LoadError::Missing {
                view: self.view.clone(),
            }),
        };
        future::ready(result).boxed()
    }
}

/// Loads `<dir>/<View>.html` from disk and checks its template syntax.
#[derive(Debug, Clone)]
pub struct FileLoader {
    view: String,
    path: PathBuf,
}

impl FileLoader {
    pub fn new(view: impl Into<String>, dir: &Path) -> Self {
        let view = view.into();
        let path = dir.join(format!("{}.html", view));
        Self { view, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ViewLoader for FileLoader {
    fn view(&self) -> &str {
        &self.view
    }

    fn load(&self) -> BoxFuture<'static, Result<ViewModule, LoadError>> {
        let view = self.view.clone();
        let path = self.path.clone();
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(source) => match check_source(&source) {
                    Ok(()) => Ok(ViewModule::from_source(view, source)),
                    Err(e) => Err(LoadError::Template {
                        view,
                        reason: e.to_string(),
                    }),
                },
                Err(e) => Err(LoadError::Io {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }),
            }
        }
        .boxed()
    }
}

/// Loader backed by an async closure.
pub struct FnLoader<F> {
    view: String,
    factory: F,
}

impl<F, Fut> FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ViewModule, LoadError>> + Send + 'static,
{
    pub fn new(view: impl Into<String>, factory: F) -> Self {
        Self {
            view: view.into(),
            factory,
        }
    }
}

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").field("view", &self.view).finish()
    }
}

impl<F, Fut> ViewLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ViewModule, LoadError>> + Send + 'static,
{
    fn view(&self) -> &str {
        &self.view
    }

    fn load(&self) -> BoxFuture<'static, Result<ViewModule, LoadError>> {
        (self.factory)().boxed()
    }
}

/// Chooses the loader kind for every view from configuration.
#[derive(Debug, Clone)]
pub enum ViewSource {
    Builtin,
    Directory(PathBuf),
}

impl ViewSource {
    pub fn from_config(config: &ViewsConfig) -> Self {
        match &config.dir {
            Some(dir) => ViewSource::Directory(dir.clone()),
            None => ViewSource::Builtin,
        }
    }

    /// Loader for the named view.
    pub fn loader(&self, view: &str) -> Arc<dyn ViewLoader> {
        match self {
            ViewSource::Builtin => Arc::new(BuiltinLoader::new(view)),
            ViewSource::Directory(dir) => Arc::new(FileLoader::new(view, dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ViewBody;

    #[tokio::test]
    async fn test_builtin_loader() {
        let module = BuiltinLoader::new("EventDetail").load().await.unwrap();
        assert_eq!(module.name(), "EventDetail");
        assert_eq!(module.body(), &ViewBody::Builtin(BuiltinView::EventDetail));

        let err = BuiltinLoader::new("Nope").load().await.unwrap_err();
        assert_eq!(err, LoadError::Missing { view: "Nope".into() });
    }

    #[tokio::test]
    async fn test_file_loader_is_restartable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileLoader::new("Dashboard", dir.path());

        // Missing file first, then the same loader succeeds once it exists
        assert!(matches!(loader.load().await, Err(LoadError::Io { .. })));

        std::fs::write(loader.path(), "<p>custom</p>").unwrap();
        let module = loader.load().await.unwrap();
        assert_eq!(module.body(), &ViewBody::Source("<p>custom</p>".into()));
    }

    #[tokio::test]
    async fn test_file_loader_rejects_bad_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileLoader::new("Dashboard", dir.path());
        std::fs::write(loader.path(), "{% for %}").unwrap();

        assert!(matches!(
            loader.load().await,
            Err(LoadError::Template { ref view, .. }) if view == "Dashboard"
        ));
    }

    #[test]
    fn test_view_source_from_config() {
        let source = ViewSource::from_config(&ViewsConfig::default());
        assert!(matches!(source, ViewSource::Builtin));
        assert_eq!(source.loader("Dashboard").view(), "Dashboard");

        let config = ViewsConfig {
            dir: Some(PathBuf::from("views")),
            cache: true,
        };
        assert!(matches!(
            ViewSource::from_config(&config),
            ViewSource::Directory(_)
        ));
    }
}
