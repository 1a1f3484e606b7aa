//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteEntry tree (routes.rs)
//!     → table.rs (flatten depth-first, check invariants)
//!     → matcher.rs (full path patterns)
//!     → Freeze as immutable Resolver
//!
//! Navigation (path or name):
//!     → router.rs (most specific match, params extracted)
//!     → navigator.rs (load view chain, supersede stale loads)
//!     → Return: displayed view or RouteError
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - Static segments beat dynamic ones, then declaration order

pub mod error;
pub mod matcher;
pub mod navigator;
pub mod router;
pub mod routes;
pub mod table;

pub use error::RouteError;
pub use navigator::{Displayed, NavigationOutcome, Navigator};
pub use router::{ResolvedRoute, Resolver, RouteSummary};
pub use table::{RouteEntry, RouteRecord, RouteTable, TableError};
