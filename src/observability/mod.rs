//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (human readable or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with typed fields (route, path, view)
//! - Metrics are cheap (atomic increments) and safe to record without an exporter
//! - `RUST_LOG` overrides the configured level

pub mod logging;
pub mod metrics;
