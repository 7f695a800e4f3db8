//! Untyped view over provider JSON with explicit field-presence checks.
//!
//! Every accessor either yields the requested shape or a `MalformedPayload`
//! naming the exact path that was missing or had the wrong type, so parsers
//! never index into a `serde_json::Value` directly.

use std::fmt;

use serde_json::Value;

/// A required field was missing or did not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {reason}")]
pub struct MalformedPayload {
    pub path: String,
    pub reason: String,
}

/// Borrowed position inside a payload tree
#[derive(Clone)]
pub struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &str {
        if self.path.is_empty() { "<root>" } else { &self.path }
    }

    pub fn malformed(&self, reason: impl Into<String>) -> MalformedPayload {
        MalformedPayload {
            path: self.path().to_string(),
            reason: reason.into(),
        }
    }

    /// Present, non-null field of an object
    pub fn field(&self, name: &str) -> Result<Node<'a>, MalformedPayload> {
        let object = self
            .value
            .as_object()
            .ok_or_else(|| self.malformed(format!("expected object holding '{name}'")))?;

        match object.get(name) {
            Some(Value::Null) | None => Err(self.child(name).malformed("missing")),
            Some(value) => Ok(Node {
                value,
                path: self.child(name).path,
            }),
        }
    }

    pub fn opt_field(&self, name: &str) -> Option<Node<'a>> {
        match self.value.get(name) {
            Some(Value::Null) | None => None,
            Some(value) => Some(Node {
                value,
                path: self.child(name).path,
            }),
        }
    }

    pub fn as_str(&self) -> Result<&'a str, MalformedPayload> {
        self.value
            .as_str()
            .ok_or_else(|| self.malformed("expected string"))
    }

    pub fn str_field(&self, name: &str) -> Result<&'a str, MalformedPayload> {
        self.field(name)?.as_str()
    }

    /// String field that is present and not blank
    pub fn opt_str(&self, name: &str) -> Option<&'a str> {
        self.value
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn items(&self) -> Result<Vec<Node<'a>>, MalformedPayload> {
        let array = self
            .value
            .as_array()
            .ok_or_else(|| self.malformed("expected array"))?;

        Ok(array
            .iter()
            .enumerate()
            .map(|(i, value)| Node {
                value,
                path: format!("{}[{i}]", self.path),
            })
            .collect())
    }

    pub fn non_empty_items(&self) -> Result<Vec<Node<'a>>, MalformedPayload> {
        let items = self.items()?;
        if items.is_empty() {
            return Err(self.malformed("empty"));
        }
        Ok(items)
    }

    /// Elements of an optional array field; absent or non-array yields nothing
    pub fn opt_items(&self, name: &str) -> Vec<Node<'a>> {
        self.opt_field(name)
            .and_then(|node| node.items().ok())
            .unwrap_or_default()
    }

    /// Non-empty array of strings
    pub fn strings(&self) -> Result<Vec<String>, MalformedPayload> {
        self.non_empty_items()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }

    fn child(&self, name: &str) -> Node<'a> {
        let path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.path)
        };
        Node {
            value: self.value,
            path,
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("path", &self.path()).finish()
    }
}
