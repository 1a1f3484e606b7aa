//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route paths into static and dynamic (`:name`) segments
//! - Match a split navigation path against a full route pattern
//! - Rank matches so static segments beat dynamic ones
//! - Build a concrete path from a pattern and parameters
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A dynamic segment matches exactly one non-empty component
//! - At most one dynamic segment per full route path
//! - No regex, segment-by-segment comparison only

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A malformed route path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("path '{0}' declares more than one dynamic segment")]
    MultipleDynamicSegments(String),

    #[error("path '{0}' has a dynamic segment without a name")]
    EmptyParamName(String),
}

/// One component of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// How specific a match was: one entry per component, static = 1, dynamic = 0.
/// Compared lexicographically, so the earliest static segment wins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(Vec<u8>);

/// A successful pattern match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub params: BTreeMap<String, String>,
    pub specificity: Specificity,
}

/// A parsed route path such as `/events/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a route path. Leading, trailing and repeated slashes are ignored,
    /// so `""`, `"/"` and `"//"` all denote the empty pattern.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        for component in raw.split('/').filter(|c| !c.is_empty()) {
            match component.strip_prefix(':') {
                Some("") => return Err(PatternError::EmptyParamName(raw.to_string())),
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None => segments.push(Segment::Static(component.to_string())),
            }
        }

        let pattern = Self { segments };
        if pattern.param_count() > 1 {
            return Err(PatternError::MultipleDynamicSegments(raw.to_string()));
        }
        Ok(pattern)
    }

    /// Append a child pattern to this one.
    pub fn join(&self, child: &PathPattern) -> Result<Self, PatternError> {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());

        let joined = Self { segments };
        if joined.param_count() > 1 {
            return Err(PatternError::MultipleDynamicSegments(joined.to_string()));
        }
        Ok(joined)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Name of the dynamic segment, if any.
    pub fn param(&self) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Pattern with parameter names erased; equal shapes match equal paths.
    pub fn shape(&self) -> String {
        let mut out = String::from("/");
        let parts: Vec<&str> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Static(text) => text.as_str(),
                Segment::Param(_) => ":",
            })
            .collect();
        out.push_str(&parts.join("/"));
        out
    }

    /// Match the full pattern against path components.
    pub fn matches(&self, components: &[&str]) -> Option<PatternMatch> {
        if components.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        let mut rank = Vec::with_capacity(components.len());
        for (segment, component) in self.segments.iter().zip(components) {
            match segment {
                Segment::Static(text) => {
                    if text != component {
                        return None;
                    }
                    rank.push(1);
                }
                Segment::Param(name) => {
                    let value = urlencoding::decode(component)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| component.to_string());
                    params.insert(name.clone(), value);
                    rank.push(0);
                }
            }
        }

        Some(PatternMatch {
            params,
            specificity: Specificity(rank),
        })
    }

    /// Build a concrete path. Returns the name of the first missing parameter
    /// on failure. Values are percent-encoded.
    pub fn build(&self, params: &BTreeMap<String, String>) -> Result<String, String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => parts.push(text.clone()),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        parts.push(urlencoding::encode(value).into_owned())
                    }
                    _ => return Err(name.clone()),
                },
            }
        }
        Ok(format!("/{}", parts.join("/")))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Static(text) => text.clone(),
                Segment::Param(name) => format!(":{}", name),
            })
            .collect();
        write!(f, "/{}", parts.join("/"))
    }
}

/// Split a navigation path into non-empty components, dropping any query
/// string or fragment.
pub fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|c| !c.is_empty()).collect()
}
