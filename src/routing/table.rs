//! Route declarations and their compiled, immutable table.
//!
//! # Responsibilities
//! - Declare routes as a nested tree (layout entries with children)
//! - Flatten the tree depth-first into records with full path patterns
//! - Enforce the table invariants at construction
//!
//! # Design Decisions
//! - Declarations are plain data; compilation happens once in `RouteTable::new`
//! - Records keep declaration order so equal-rank matches resolve first-declared
//! - Only entries without children are navigation targets, and only they carry names
//! - Invariant violations are construction errors, never runtime errors

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use thiserror::Error;

use crate::routing::matcher::{PathPattern, PatternError};
use crate::views::ViewLoader;

/// Route metadata: opaque to the resolver, read by the shell.
pub type Meta = BTreeMap<String, String>;

pub const META_TITLE: &str = "title";
pub const META_ICON: &str = "icon";

/// A broken route declaration, fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("route table is empty")]
    Empty,

    #[error("route name '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("routes '{first}' and '{second}' both match '{path}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("route '{0}' has children; only leaf routes may be named")]
    NamedLayout(String),

    #[error("invalid route path: {0}")]
    InvalidPath(#[from] PatternError),
}

/// A declared route, possibly with children rendered into its outlet.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub path: String,
    pub name: Option<String>,
    pub loader: Arc<dyn ViewLoader>,
    pub meta: Meta,
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, loader: Arc<dyn ViewLoader>) -> Self {
        Self {
            path: path.into(),
            name: None,
            loader,
            meta: Meta::new(),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.meta(META_TITLE, title)
    }

    pub fn icon(self, icon: impl Into<String>) -> Self {
        self.meta(META_ICON, icon)
    }

    pub fn child(mut self, child: RouteEntry) -> Self {
        self.children.push(child);
        self
    }
}

/// A compiled route with its full path pattern.
#[derive(Debug)]
pub struct RouteRecord {
    pub name: Option<String>,
    pub pattern: PathPattern,
    pub loader: Arc<dyn ViewLoader>,
    pub meta: Meta,
    pub parent: Option<usize>,
    pub is_leaf: bool,
}

impl RouteRecord {
    pub fn title(&self) -> Option<&str> {
        self.meta.get(META_TITLE).map(String::as_str)
    }

    pub fn icon(&self) -> Option<&str> {
        self.meta.get(META_ICON).map(String::as_str)
    }

    pub fn view(&self) -> &str {
        self.loader.view()
    }

    /// Name if present, otherwise the path; used in messages.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.pattern.to_string())
    }
}

/// The immutable, validated route table.
#[derive(Debug)]
pub struct RouteTable {
    records: Vec<Arc<RouteRecord>>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Compile and validate route declarations.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }

        let mut records = Vec::new();
        for entry in &entries {
            flatten(entry, None, &PathPattern::default(), &mut records)?;
        }

        let mut by_name = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            if let Some(name) = &record.name {
                if !record.is_leaf {
                    return Err(TableError::NamedLayout(name.clone()));
                }
                if by_name.insert(name.clone(), index).is_some() {
                    return Err(TableError::DuplicateName(name.clone()));
                }
            }
        }

        let mut shapes: HashMap<String, usize> = HashMap::new();
        for (index, record) in records.iter().enumerate().filter(|(_, r)| r.is_leaf) {
            let shape = record.pattern.shape();
            if let Some(first) = shapes.insert(shape, index) {
                return Err(TableError::DuplicatePath {
                    path: record.pattern.to_string(),
                    first: records[first].label(),
                    second: record.label(),
                });
            }
        }

        tracing::debug!(
            records = records.len(),
            named = by_name.len(),
            "Route table compiled"
        );

        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
            by_name,
        })
    }

    /// All records in depth-first declaration order.
    pub fn records(&self) -> &[Arc<RouteRecord>] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Arc<RouteRecord>> {
        self.records.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Navigation targets (entries without children) with their indices.
    pub fn leaves(&self) -> impl Iterator<Item = (usize, &Arc<RouteRecord>)> {
        self.records.iter().enumerate().filter(|(_, r)| r.is_leaf)
    }

    /// Records from the outermost layout down to `index`.
    pub fn chain(&self, index: usize) -> Vec<Arc<RouteRecord>> {
        let mut chain = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let record = &self.records[i];
            chain.push(record.clone());
            cursor = record.parent;
        }
        chain.reverse();
        chain
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn flatten(
    entry: &RouteEntry,
    parent: Option<usize>,
    base: &PathPattern,
    out: &mut Vec<RouteRecord>,
) -> Result<(), TableError> {
    let own = PathPattern::parse(&entry.path)?;
    let pattern = base.join(&own)?;
    let index = out.len();

    out.push(RouteRecord {
        name: entry.name.clone(),
        pattern: pattern.clone(),
        loader: entry.loader.clone(),
        meta: entry.meta.clone(),
        parent,
        is_leaf: entry.children.is_empty(),
    });

    for child in &entry.children {
        flatten(child, Some(index), &pattern, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::BuiltinLoader;

    fn entry(path: &str, view: &str) -> RouteEntry {
        RouteEntry::new(path, Arc::new(BuiltinLoader::new(view)))
    }

    fn layout(children: Vec<RouteEntry>) -> RouteEntry {
        children
            .into_iter()
            .fold(entry("/", "MainLayout"), RouteEntry::child)
    }

    #[test]
    fn test_flatten_and_chain() {
        let table = RouteTable::new(vec![layout(vec![
            entry("", "Dashboard").named("Dashboard"),
            entry("events/:id", "EventDetail").named("EventDetail"),
        ])])
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.leaves().count(), 2);

        let index = table.index_of("EventDetail").unwrap();
        let chain = table.chain(index);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].view(), "MainLayout");
        assert_eq!(chain[1].pattern.to_string(), "/events/:id");
    }

    #[test]
    fn test_duplicate_name_fails() {
        let err = RouteTable::new(vec![layout(vec![
            entry("events", "EventsList").named("Events"),
            entry("archive", "EventsList").named("Events"),
        ])])
        .unwrap_err();

        assert_eq!(err, TableError::DuplicateName("Events".into()));
    }

    #[test]
    fn test_named_layout_fails() {
        let admin = entry("/admin", "AdminLayout")
            .named("Admin")
            .child(entry("users", "Users").named("Users"));

        let err = RouteTable::new(vec![admin]).unwrap_err();
        assert_eq!(err, TableError::NamedLayout("Admin".into()));
    }

    #[test]
    fn test_ambiguous_paths_fail() {
        let err = RouteTable::new(vec![layout(vec![
            entry("events/:id", "EventDetail").named("EventDetail"),
            entry("events/:key", "EventDetail").named("EventByKey"),
        ])])
        .unwrap_err();

        assert!(matches!(err, TableError::DuplicatePath { ref first, ref second, .. }
            if first == "EventDetail" && second == "EventByKey"));
    }

    #[test]
    fn test_invalid_paths_fail() {
        assert!(matches!(
            RouteTable::new(vec![entry("/:a/:b", "X")]),
            Err(TableError::InvalidPath(_))
        ));
        assert_eq!(RouteTable::new(vec![]).unwrap_err(), TableError::Empty);
    }
}
