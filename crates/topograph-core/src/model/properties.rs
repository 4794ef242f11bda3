use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque resource property bag
///
/// Holds the `properties` object of a resource exactly as the graph tool
/// emitted it. Keys iterate in sorted order so serialization is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Properties {
    data: Map<String, Value>,
}

impl Properties {
    /// Create an empty property bag
    pub fn new() -> Self {
        Self { data: Map::new() }
    }

    /// Wrap a JSON value; anything other than an object yields an empty bag
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            _ => Self::new(),
        }
    }

    /// Get a top-level value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Set a top-level value, returning the updated bag
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Walk nested objects along `path`
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.data.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Walk nested objects along `path` and return the value if it is a string
    pub fn lookup_str(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
