//! Typed dimension values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete value of a dimension
///
/// Enumeration values are stored as canonical lowercase [`Value::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean dimension value
    Flag(bool),
    /// Text or enumeration dimension value
    Text(String),
}

impl Value {
    /// Text value constructor
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Boolean payload, if this is a flag
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            Value::Text(_) => None,
        }
    }

    /// Text payload, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Flag(_) => None,
        }
    }

    /// Whether this (concrete) value is accepted by `pattern`.
    ///
    /// A text pattern ending in `*` matches any text value starting with the
    /// part before the `*`; everything else is exact equality.
    pub fn matches(&self, pattern: &Value) -> bool {
        match (self, pattern) {
            (Value::Text(value), Value::Text(pat)) => match pat.strip_suffix('*') {
                Some(prefix) => value.starts_with(prefix),
                None => value == pat,
            },
            _ => self == pattern,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Flag(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(Value::Flag(true).matches(&Value::Flag(true)));
        assert!(!Value::Flag(true).matches(&Value::Flag(false)));
        assert!(Value::text("2.0.3").matches(&Value::text("2.0.3")));
        assert!(!Value::text("2.0.3").matches(&Value::text("2.0")));
    }

    #[test]
    fn test_prefix_pattern() {
        let latest_minor = Value::text("2.1.*");
        assert!(Value::text("2.1.4").matches(&latest_minor));
        assert!(Value::text("2.1.300").matches(&latest_minor));
        assert!(!Value::text("2.0.3").matches(&latest_minor));
    }

    #[test]
    fn test_kinds_never_cross_match() {
        assert!(!Value::Flag(true).matches(&Value::text("true")));
        assert!(!Value::text("true").matches(&Value::Flag(true)));
    }
}
