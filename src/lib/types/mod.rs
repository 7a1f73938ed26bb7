//! Shared data types for the blog.
//! Implemented as newtypes to enforce invariants.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Frontmatter of a page: a string-keyed mapping of arbitrary values.
///
/// Lookups follow the loose truthiness the templates expect, where `null`,
/// `false`, `0`, and `""` all count as unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(Map<String, Value>);

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The value under `key` if it is truthy.
    pub fn truthy(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| is_truthy(v))
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// String values under `key`, whether it holds one string or a list.
    pub fn strings(&self, key: &str) -> Vec<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => vec![s.as_str()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Identifies the collection or classifier a page was generated from,
/// such as `post` or `tag`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CollectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Relative paths to content sources.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelPath(PathBuf);

impl RelPath {
    pub fn new(p: PathBuf) -> Option<Self> {
        if p.is_absolute() { None } else { Some(Self(p)) }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form, independent of the host platform.
    pub fn to_slash(&self) -> String {
        self.0.to_string_lossy().replace('\\', "/")
    }
}

impl Serialize for RelPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_slash())
    }
}

/// One content document as the site sees it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Page {
    /// Route, e.g. `/2021/05/03/my-post/`.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CollectionId>,
    pub frontmatter: Frontmatter,
    /// Markdown body with the frontmatter removed.
    #[serde(skip)]
    pub stripped_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<RelPath>,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(CollectionId::new(id));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.stripped_content = Some(content.into());
        self
    }

    pub fn with_frontmatter(mut self, frontmatter: Frontmatter) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    pub fn is_in(&self, collection: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.as_str() == collection)
    }

    pub fn title(&self) -> Option<&str> {
        self.frontmatter.get_str("title")
    }
}

#[cfg(test)]
mod tests;
