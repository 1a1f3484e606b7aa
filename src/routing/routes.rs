//! The dashboard's route table.
//!
//! These paths are linked and bookmarked from outside the application; their
//! shapes must not change.

use crate::routing::table::RouteEntry;
use crate::views::ViewSource;

/// Routes of the dashboard: one layout shell with five pages.
pub fn dashboard_routes(source: &ViewSource) -> Vec<RouteEntry> {
    let layout = RouteEntry::new("/", source.loader("MainLayout"))
        .child(
            RouteEntry::new("", source.loader("Dashboard"))
                .named("Dashboard")
                .title("仪表盘")
                .icon("DataAnalysis"),
        )
        .child(
            RouteEntry::new("events", source.loader("EventsList"))
                .named("Events")
                .title("热点事件总览")
                .icon("List"),
        )
        .child(
            RouteEntry::new("monitor", source.loader("RealTimeMonitor"))
                .named("RealTimeMonitor")
                .title("实时监控")
                .icon("Monitor"),
        )
        .child(
            RouteEntry::new("prediction", source.loader("PredictionTrend"))
                .named("PredictionTrend")
                .title("极化趋势预测")
                .icon("TrendCharts"),
        )
        .child(
            RouteEntry::new("events/:id", source.loader("EventDetail"))
                .named("EventDetail")
                .title("事件详情分析")
                .icon("InfoFilled"),
        );

    vec![layout]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Resolver, RouteError};
    use std::collections::BTreeMap;

    fn resolver() -> Resolver {
        Resolver::from_entries(dashboard_routes(&ViewSource::Builtin)).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_table_shape() {
        let resolver = resolver();
        let table = resolver.table();
        assert_eq!(table.records().iter().filter(|r| r.parent.is_none()).count(), 1);
        assert_eq!(table.leaves().count(), 5);
    }

    #[test]
    fn test_known_paths() {
        let resolver = resolver();

        let r = resolver.resolve("/").unwrap();
        assert_eq!(r.name(), Some("Dashboard"));
        assert_eq!(r.title(), Some("仪表盘"));
        assert_eq!(r.icon(), Some("DataAnalysis"));

        assert_eq!(resolver.resolve("/events").unwrap().name(), Some("Events"));
        assert_eq!(
            resolver.resolve("/monitor").unwrap().name(),
            Some("RealTimeMonitor")
        );
        assert_eq!(
            resolver.resolve("/prediction").unwrap().name(),
            Some("PredictionTrend")
        );

        let r = resolver.resolve("/events/42").unwrap();
        assert_eq!(r.name(), Some("EventDetail"));
        assert_eq!(r.params(), &params(&[("id", "42")]));
        assert_eq!(r.leaf().view(), "EventDetail");
        assert_eq!(r.chain()[0].view(), "MainLayout");
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve("/nonexistent").unwrap_err(),
            RouteError::NotFound {
                path: "/nonexistent".into()
            }
        );
        assert!(resolver.resolve("/events/42/extra").is_err());
    }

    #[test]
    fn test_every_name_round_trips() {
        let resolver = resolver();
        let valid = params(&[("id", "42")]);

        for summary in resolver.manifest() {
            let by_name = resolver.navigate(&summary.name, &valid).unwrap();
            let by_path = resolver.resolve(by_name.path()).unwrap();
            assert_eq!(by_path.name(), Some(summary.name.as_str()));
            assert_eq!(by_path.params(), by_name.params());
        }
    }

    #[test]
    fn test_navigate_errors() {
        let resolver = resolver();

        assert_eq!(
            resolver.navigate("EventDetail", &BTreeMap::new()).unwrap_err(),
            RouteError::MissingParam {
                route: "EventDetail".into(),
                param: "id".into()
            }
        );
        assert_eq!(
            resolver.navigate("Nowhere", &BTreeMap::new()).unwrap_err(),
            RouteError::UnknownRouteName {
                name: "Nowhere".into()
            }
        );
    }
}
