//! Application state store.
//!
//! One store is constructed at bootstrap, before anything renders, and handed
//! to every consumer. Values are JSON so views and the API can share them
//! without knowing each other's types.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

/// Title shown in the layout shell.
pub const APP_TITLE: &str = "app.title";
/// Name of the route currently displayed.
pub const CURRENT_ROUTE: &str = "navigation.current";
/// Number of navigations displayed since startup.
pub const NAVIGATION_COUNT: &str = "navigation.count";

/// A shared key → JSON value store.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    inner: Arc<DashMap<String, Value>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    /// String value, if the key holds a string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.inner
            .get(key)
            .and_then(|r| r.value().as_str().map(str::to_string))
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.remove(key).map(|(_, v)| v)
    }

    /// Add one to an integer counter, starting from zero. Returns the new value.
    pub fn increment(&self, key: &str) -> u64 {
        let mut entry = self.inner.entry(key.to_string()).or_insert(Value::from(0u64));
        let next = entry.value().as_u64().unwrap_or(0) + 1;
        *entry.value_mut() = Value::from(next);
        next
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Copy of every entry, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_operations() {
        let store = StateStore::new();
        assert!(store.get(APP_TITLE).is_none());

        store.set(APP_TITLE, "Dashboard");
        assert_eq!(store.get_str(APP_TITLE).as_deref(), Some("Dashboard"));

        // Clones share the same state
        let other = store.clone();
        other.set("count", 3);
        assert_eq!(store.get("count"), Some(Value::from(3)));

        assert_eq!(store.remove("count"), Some(Value::from(3)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_increment() {
        let store = StateStore::new();
        assert_eq!(store.increment(NAVIGATION_COUNT), 1);
        assert_eq!(store.increment(NAVIGATION_COUNT), 2);

        store.set("label", "text");
        assert_eq!(store.increment("label"), 1);
        assert_eq!(store.snapshot().len(), 2);
    }
}
