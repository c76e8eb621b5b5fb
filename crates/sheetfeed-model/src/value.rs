use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered key/value mapping used by [`Value::Struct`].
///
/// Keys are unique within one struct; insertion order is preserved so that
/// debug output and serialization stay deterministic.
pub type StructValue = IndexMap<String, Value>;

/// Versioned, JSON-friendly representation of one parsed cell value.
///
/// The enum uses an explicit `{type, value}` tagged layout for stable IPC.
/// Values are immutable once constructed by the parser; consumers match
/// exhaustively instead of probing kinds at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Plain UTF-8 text, already unquoted/unescaped.
    Text(String),
    /// IEEE-754 double precision number. Integers and floats share this
    /// representation.
    Number(f64),
    /// Ordered sequence of values; element kinds may be heterogeneous.
    Array(Vec<Value>),
    /// Ordered key -> value mapping.
    Struct(StructValue),
    /// An unevaluated, named, parameterized call. Never auto-invoked during
    /// parsing; execution is deferred and explicit.
    Function(FunctionRef),
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

impl Value {
    /// Returns true if the value is the empty string.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields if this is a [`Value::Struct`].
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the call reference if this is a [`Value::Function`].
    pub fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Value::Function(fref) => Some(fref),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<FunctionRef> for Value {
    fn from(value: FunctionRef) -> Self {
        Value::Function(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Struct(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Function(fref) => f.write_str(&fref.original_text),
        }
    }
}

/// A parsed, unevaluated call expression extracted from a cell.
///
/// `original_text` always reflects the literal as first parsed; invoking the
/// reference with overridden arguments produces a new argument slice and
/// never mutates `params`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionRef {
    /// Identifier the host registry is keyed by.
    pub name: String,
    /// Arguments bound at parse time, in call order.
    pub params: Vec<Value>,
    /// The full trimmed field text the reference was parsed from.
    pub original_text: String,
}

impl FunctionRef {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Value>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            original_text: original_text.into(),
        }
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_simple_literals() {
        let v = Value::Array(vec![
            Value::Number(1.0),
            Value::Text("two".into()),
            Value::Struct(StructValue::from_iter([(
                "x".to_string(),
                Value::Number(3.0),
            )])),
        ]);
        assert_eq!(v.to_string(), "[1, two, {x: 3}]");
    }

    #[test]
    fn function_display_uses_original_text() {
        let fref = FunctionRef::new(
            "on_collect",
            vec![Value::Text("banana".into())],
            "on_collect(\"banana\")",
        );
        assert_eq!(
            Value::Function(fref).to_string(),
            "on_collect(\"banana\")"
        );
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Text("x".into()).as_number(), None);
        assert_eq!(Value::Text("x".into()).as_text(), Some("x"));
        assert!(Value::default().is_empty_text());
    }
}
