//! Route lookup by path and by name.
//!
//! # Responsibilities
//! - Store the compiled route table
//! - Resolve a navigation path to the most specific route
//! - Resolve a route name plus parameters to a route
//! - Return the matched chain or an explicit error
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over leaves (acceptable for a navigation table)
//! - Static segments outrank dynamic ones; ties go to the first declared
//! - Explicit NotFound rather than silent default

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::error::RouteError;
use crate::routing::matcher::{split_path, Specificity};
use crate::routing::table::{RouteEntry, RouteRecord, RouteTable, TableError};

/// A route matched to a concrete path.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    path: String,
    chain: Vec<Arc<RouteRecord>>,
    params: BTreeMap<String, String>,
}

impl ResolvedRoute {
    /// The navigated path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Matched records, outermost layout first, target last.
    pub fn chain(&self) -> &[Arc<RouteRecord>] {
        &self.chain
    }

    /// The matched navigation target.
    pub fn leaf(&self) -> &Arc<RouteRecord> {
        // A chain always ends in the record that matched
        &self.chain[self.chain.len() - 1]
    }

    pub fn name(&self) -> Option<&str> {
        self.leaf().name.as_deref()
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Title of the innermost record that declares one.
    pub fn title(&self) -> Option<&str> {
        self.chain.iter().rev().find_map(|r| r.title())
    }

    /// Icon of the innermost record that declares one.
    pub fn icon(&self) -> Option<&str> {
        self.chain.iter().rev().find_map(|r| r.icon())
    }

    /// Titles along the chain, outermost first.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.chain.iter().filter_map(|r| r.title()).collect()
    }
}

/// Public description of a named route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub param: Option<String>,
}

/// Resolves navigation requests against the route table.
#[derive(Debug)]
pub struct Resolver {
    table: RouteTable,
}

impl Resolver {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Compile declarations and build a resolver.
    pub fn from_entries(entries: Vec<RouteEntry>) -> Result<Self, TableError> {
        Ok(Self::new(RouteTable::new(entries)?))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a navigation path.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let components = split_path(path);

        let mut best: Option<(usize, Specificity, BTreeMap<String, String>)> = None;
        for (index, record) in self.table.leaves() {
            let Some(found) = record.pattern.matches(&components) else {
                continue;
            };
            let better = match &best {
                Some((_, rank, _)) => found.specificity > *rank,
                None => true,
            };
            if better {
                best = Some((index, found.specificity, found.params));
            }
        }

        match best {
            Some((index, _, params)) => {
                let resolved = ResolvedRoute {
                    path: path.to_string(),
                    chain: self.table.chain(index),
                    params,
                };
                tracing::trace!(path = %path, route = ?resolved.name(), "Path resolved");
                Ok(resolved)
            }
            None => {
                tracing::debug!(path = %path, "No route matched");
                Err(RouteError::NotFound {
                    path: path.to_string(),
                })
            }
        }
    }

    /// Resolve a route by name, filling its dynamic segment from `params`.
    pub fn navigate(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<ResolvedRoute, RouteError> {
        let index = self
            .table
            .index_of(name)
            .ok_or_else(|| RouteError::UnknownRouteName {
                name: name.to_string(),
            })?;
        let record = &self.table.records()[index];

        let path = record
            .pattern
            .build(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        // Keep only the parameters the route declares
        let params = record
            .pattern
            .param()
            .and_then(|p| params.get_key_value(p))
            .map(|(k, v)| (k.clone(), v.clone()))
            .into_iter()
            .collect();

        Ok(ResolvedRoute {
            path,
            chain: self.table.chain(index),
            params,
        })
    }

    /// Every named navigation target in declaration order.
    pub fn manifest(&self) -> Vec<RouteSummary> {
        self.table
            .leaves()
            .filter_map(|(_, record)| {
                let name = record.name.clone()?;
                Some(RouteSummary {
                    name,
                    path: record.pattern.to_string(),
                    title: record.title().map(str::to_string),
                    icon: record.icon().map(str::to_string),
                    param: record.pattern.param().map(str::to_string),
                })
            })
            .collect()
    }

    /// Targets reachable without parameters, for the navigation menu.
    pub fn menu(&self) -> Vec<RouteSummary> {
        self.manifest()
            .into_iter()
            .filter(|summary| summary.param.is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::BuiltinLoader;

    fn entry(path: &str, name: &str) -> RouteEntry {
        RouteEntry::new(path, Arc::new(BuiltinLoader::new(name)))
            .named(name)
            .title(name)
    }

    fn resolver() -> Resolver {
        let root = RouteEntry::new("/", Arc::new(BuiltinLoader::new("MainLayout")))
            .child(entry("events/:id", "Detail"))
            .child(entry("events/new", "NewEvent"))
            .child(entry("events", "List"));
        Resolver::from_entries(vec![root]).unwrap()
    }

    #[test]
    fn test_static_beats_dynamic_regardless_of_order() {
        let resolver = resolver();

        let r = resolver.resolve("/events/new").unwrap();
        assert_eq!(r.name(), Some("NewEvent"));
        assert!(r.params().is_empty());

        let r = resolver.resolve("/events/7").unwrap();
        assert_eq!(r.name(), Some("Detail"));
        assert_eq!(r.param("id"), Some("7"));
    }

    #[test]
    fn test_trailing_slash_and_query() {
        let resolver = resolver();
        let r = resolver.resolve("/events/?page=2").unwrap();
        assert_eq!(r.name(), Some("List"));
        assert_eq!(r.path(), "/events/?page=2");
    }

    #[test]
    fn test_layout_is_not_a_target() {
        let resolver = resolver();
        assert!(matches!(
            resolver.resolve("/"),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_navigate_drops_undeclared_params() {
        let resolver = resolver();
        let mut params = BTreeMap::new();
        params.insert("id".to_string(), "9".to_string());
        params.insert("tab".to_string(), "x".to_string());

        let r = resolver.navigate("Detail", &params).unwrap();
        assert_eq!(r.path(), "/events/9");
        assert_eq!(r.params().len(), 1);

        let r = resolver.navigate("List", &params).unwrap();
        assert!(r.params().is_empty());
    }

    #[test]
    fn test_menu_skips_parameterised_routes() {
        let menu: Vec<String> = resolver().menu().into_iter().map(|s| s.name).collect();
        assert_eq!(menu, vec!["NewEvent".to_string(), "List".to_string()]);
    }
}
