//! Configuration value types
//!
//! Values are scalars (string, int, float, bool, null), plain sequences,
//! or one of the two container shapes that nested key paths can descend
//! into: mappings (unique keys) and pairs (ordered, keys may repeat).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored configuration value
///
/// Environment references are ordinary sequences at this level
/// (`["system", "VAR"]`); see [`crate::indirection`] for how they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[derive(Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Sequence of values (not a container)
    Sequence(Vec<Value>),
    /// Mapping of unique string keys to values
    Mapping(IndexMap<String, Value>),
    /// Ordered key/value pairs; the first entry for a key wins
    ///
    /// Serializes as `[[key, value], ...]`. That shape deserializes back as a
    /// [`Value::Sequence`], since untagged decoding tries `Sequence` first, so
    /// pairs are only ever built in code.
    Pairs(Vec<(String, Value)>),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if lookups can descend into this value
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Mapping(_) | Value::Pairs(_))
    }

    /// Get as boolean if this is a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float
    ///
    /// Unlike a numeric widening, an `Integer` yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as str if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as slice if this is a Sequence
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Get as mapping if this is a Mapping
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Pairs(_) => "pairs",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(seq) => {
                write!(f, "[")?;
                for (i, v) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Pairs(pairs) => {
                write!(f, "[")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "]")
            }
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(m: IndexMap<String, Value>) -> Self {
        Value::Mapping(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_yaml_document() {
        let value: Value = serde_yaml::from_str(
            r#"
database:
  url: [system, DATABASE_URL]
  pool: 10
  ratio: 0.5
  ssl: true
  name: ~
"#,
        )
        .unwrap();

        let db = value.as_mapping().unwrap()["database"].as_mapping().unwrap();
        assert_eq!(
            db["url"],
            Value::Sequence(vec!["system".into(), "DATABASE_URL".into()])
        );
        assert_eq!(db["pool"], Value::Integer(10));
        assert_eq!(db["ratio"], Value::Float(0.5));
        assert_eq!(db["ssl"], Value::Bool(true));
        assert!(db["name"].is_null());
    }

    #[test]
    fn test_yaml_sequence_is_not_pairs() {
        let value: Value = serde_yaml::from_str("[[a, 1], [b, 2]]").unwrap();
        assert!(value.as_sequence().is_some());
        assert!(!value.is_container());
    }

    #[test]
    fn test_serialize_pairs_as_json() {
        let value = Value::Pairs(vec![
            ("a".into(), Value::Integer(1)),
            ("a".into(), Value::Integer(2)),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[["a",1],["a",2]]"#);
    }

    #[test]
    fn test_pairs_read_back_as_sequence() {
        let value = Value::Pairs(vec![("a".into(), Value::Integer(1))]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            back,
            Value::Sequence(vec![Value::Sequence(vec!["a".into(), Value::Integer(1)])])
        );
        assert!(!back.is_container());
    }

    #[test]
    fn test_is_container() {
        assert!(Value::Mapping(IndexMap::new()).is_container());
        assert!(Value::Pairs(vec![]).is_container());
        assert!(!Value::Sequence(vec![]).is_container());
        assert!(!Value::String("a".into()).is_container());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_i64(), Some(42));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Integer(42).as_f64(), None);
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }

    #[test]
    fn test_display() {
        let mut map = IndexMap::new();
        map.insert("host".into(), Value::from("localhost"));
        map.insert("ports".into(), Value::from(vec![80, 443]));
        assert_eq!(Value::Mapping(map).to_string(), "{host: localhost, ports: [80, 443]}");

        let pairs = Value::Pairs(vec![("k".into(), Value::Bool(false))]);
        assert_eq!(pairs.to_string(), "[k: false]");
    }
}
