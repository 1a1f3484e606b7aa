//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_navigations_total` (counter): navigations by route, outcome
//! - `dashboard_view_loads_total` (counter): loader runs by view, outcome
//! - `dashboard_view_load_duration_seconds` (histogram): loader latency
//! - `dashboard_pages_total` (counter): shell responses by status
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Labels for route, view, outcome, status code

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_navigation(route: &str, outcome: &'static str) {
    ::metrics::counter!(
        "dashboard_navigations_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_view_load(view: &str, ok: bool, started: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!(
        "dashboard_view_loads_total",
        "view" => view.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "dashboard_view_load_duration_seconds",
        "view" => view.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}

pub fn record_page(status: u16) {
    ::metrics::counter!("dashboard_pages_total", "status" => status.to_string()).increment(1);
}
