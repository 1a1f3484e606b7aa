//! Navigation failures, all recoverable by the shell.

use thiserror::Error;

use crate::views::LoadError;

/// Why a navigation did not produce a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matches the path. The shell renders its fallback page.
    #[error("no route matches '{path}'")]
    NotFound { path: String },

    /// Programmatic navigation to a name that is not declared.
    #[error("unknown route name '{name}'")]
    UnknownRouteName { name: String },

    /// A dynamic segment had no value.
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    /// A view module of the matched chain failed to load.
    #[error("view '{view}' failed to load: {source}")]
    LoaderFailure {
        view: String,
        #[source]
        source: LoadError,
    },
}

impl RouteError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::NotFound { .. } => "not_found",
            RouteError::UnknownRouteName { .. } => "unknown_route_name",
            RouteError::MissingParam { .. } => "missing_param",
            RouteError::LoaderFailure { .. } => "loader_failure",
        }
    }
}
