//! Views compiled into the binary.
//!
//! Each view renders the frame its widgets mount into; the widgets themselves
//! (charts, tables, live feeds) talk to the analysis backend named in
//! `data-api` / `data-ws`. Every such address must appear in [`BACKEND_API`].

use askama::Template;

use crate::views::ViewContext;

/// Endpoints of the analysis backend the views consume, as `(method, path)`.
/// `{name}` segments stand for any single path component.
pub const BACKEND_API: &[(&str, &str)] = &[
    ("GET", "/api/health"),
    ("GET", "/api/events/"),
    ("POST", "/api/events/"),
    ("GET", "/api/events/{event_id}"),
    ("PUT", "/api/events/{event_id}"),
    ("DELETE", "/api/events/{event_id}"),
    ("GET", "/api/events/categories/all"),
    ("GET", "/api/events/keywords/top"),
    ("GET", "/api/analysis/events/{event_id}"),
    ("GET", "/api/analysis/comments/{event_id}"),
    ("GET", "/api/analysis/related/{event_id}"),
    ("GET", "/api/analysis/polarization/overview"),
    ("POST", "/api/prediction/prediction/polarization-index"),
    ("GET", "/api/prediction/prediction/trends/{event_id}"),
    ("WS", "/api/monitor/monitor/ws"),
    ("GET", "/api/monitor/monitor/settings"),
    ("POST", "/api/monitor/monitor/settings"),
    ("GET", "/api/monitor/monitor/alerts"),
    ("GET", "/api/monitor/monitor/events"),
    ("GET", "/api/monitor/monitor/statistics"),
];

/// True when `path` is one of the backend endpoints.
pub fn is_backend_endpoint(path: &str) -> bool {
    BACKEND_API.iter().any(|(_, pattern)| {
        let want: Vec<&str> = pattern.split('/').collect();
        let got: Vec<&str> = path.split('/').collect();
        want.len() == got.len()
            && want
                .iter()
                .zip(&got)
                .all(|(w, g)| w == g || (w.starts_with('{') && !g.is_empty()))
    })
}

/// A view shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinView {
    MainLayout,
    Dashboard,
    EventsList,
    RealTimeMonitor,
    PredictionTrend,
    EventDetail,
}

impl BuiltinView {
    pub const ALL: [BuiltinView; 6] = [
        BuiltinView::MainLayout,
        BuiltinView::Dashboard,
        BuiltinView::EventsList,
        BuiltinView::RealTimeMonitor,
        BuiltinView::PredictionTrend,
        BuiltinView::EventDetail,
    ];

    /// Look up a builtin view by view name.
    pub fn from_name(view: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == view)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinView::MainLayout => "MainLayout",
            BuiltinView::Dashboard => "Dashboard",
            BuiltinView::EventsList => "EventsList",
            BuiltinView::RealTimeMonitor => "RealTimeMonitor",
            BuiltinView::PredictionTrend => "PredictionTrend",
            BuiltinView::EventDetail => "EventDetail",
        }
    }

    pub fn render(self, ctx: &ViewContext) -> askama::Result<String> {
        match self {
            BuiltinView::MainLayout => MainLayoutView { ctx }.render(),
            BuiltinView::Dashboard => DashboardView { ctx }.render(),
            BuiltinView::EventsList => EventsListView { ctx }.render(),
            BuiltinView::RealTimeMonitor => RealTimeMonitorView { ctx }.render(),
            BuiltinView::PredictionTrend => PredictionTrendView { ctx }.render(),
            BuiltinView::EventDetail => EventDetailView { ctx }.render(),
        }
    }
}

/// Layout shell wrapping every page.
#[derive(Template)]
#[template(path = "views/main_layout.html")]
struct MainLayoutView<'a> {
    ctx: &'a ViewContext,
}

#[derive(Template)]
#[template(path = "views/dashboard.html")]
#[allow(dead_code)]
struct DashboardView<'a> {
    ctx: &'a ViewContext,
}

#[derive(Template)]
#[template(path = "views/events_list.html")]
#[allow(dead_code)]
struct EventsListView<'a> {
    ctx: &'a ViewContext,
}

#[derive(Template)]
#[template(path = "views/real_time_monitor.html")]
#[allow(dead_code)]
struct RealTimeMonitorView<'a> {
    ctx: &'a ViewContext,
}

#[derive(Template)]
#[template(path = "views/prediction_trend.html")]
#[allow(dead_code)]
struct PredictionTrendView<'a> {
    ctx: &'a ViewContext,
}

#[derive(Template)]
#[template(path = "views/event_detail.html")]
struct EventDetailView<'a> {
    ctx: &'a ViewContext,
}
