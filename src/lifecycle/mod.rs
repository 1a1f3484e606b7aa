//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     State store → Router → Components → Icons → Mount
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: store first, then router, then registries, listener last
//! - Any startup error is fatal
//! - Shutdown is a broadcast every long-running task subscribes to

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{App, Bootstrap, BootstrapError, Mounted, Step, APP_TITLE_TEXT};
