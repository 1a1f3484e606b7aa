//! Bootstrap, routing and rendering shell for the hotspot event polarization
//! dashboard.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod routing;
pub mod store;
pub mod theme;
pub mod views;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{App, Bootstrap, BootstrapError, Shutdown};
pub use routing::{ResolvedRoute, Resolver, RouteError};
