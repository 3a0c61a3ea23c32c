//! Metadata leaf values
//!
//! Every leaf of an [`MdDict`](super::MdDict) stores a value together with
//! its physical units. Bare strings default to the `"text"` unit, every
//! other bare value has no units. Values that carry units are built
//! explicitly with [`MdValue::new`].

use std::fmt;

/// Units assigned to bare string values
pub const TEXT_UNITS: &str = "text";

/// A metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Free-form text
    Text(String),
    /// Floating-point scalar
    Float(f64),
    /// Integer scalar
    Int(i64),
    /// Boolean flag
    Bool(bool),
    /// Fixed-size numeric tuple or flattened matrix
    Array(Vec<f64>),
}

impl Value {
    /// Return the scalar as `f64` if this is a numeric scalar
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            Value::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Return the text if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Return the elements if this is an array value
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Return the value as a pair if it is a two-element array
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self.as_array()? {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Array(v) => {
                write!(f, "(")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A metadata leaf: a value and its units
#[derive(Debug, Clone, PartialEq)]
pub struct MdValue {
    pub value: Value,
    pub units: Option<String>,
}

impl MdValue {
    /// Create a leaf with explicit units
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterkit_core::{MdValue, Value};
    ///
    /// let dist = MdValue::new(Value::Float(5.0), Some("m"));
    /// assert_eq!(dist.units.as_deref(), Some("m"));
    /// ```
    pub fn new(value: Value, units: Option<&str>) -> Self {
        MdValue {
            value,
            units: units.map(str::to_string),
        }
    }

    /// Create a leaf without units
    pub fn unitless(value: Value) -> Self {
        MdValue { value, units: None }
    }
}

impl fmt::Display for MdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.units {
            Some(units) => write!(f, "{} [{}]", self.value, units),
            None => write!(f, "{}", self.value),
        }
    }
}

impl From<Value> for MdValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(_) => MdValue::new(value, Some(TEXT_UNITS)),
            other => MdValue::unitless(other),
        }
    }
}

impl From<&str> for MdValue {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string()).into()
    }
}

impl From<String> for MdValue {
    fn from(s: String) -> Self {
        Value::Text(s).into()
    }
}

impl From<f64> for MdValue {
    fn from(v: f64) -> Self {
        MdValue::unitless(Value::Float(v))
    }
}

impl From<i64> for MdValue {
    fn from(v: i64) -> Self {
        MdValue::unitless(Value::Int(v))
    }
}

impl From<i32> for MdValue {
    fn from(v: i32) -> Self {
        MdValue::unitless(Value::Int(v as i64))
    }
}

impl From<bool> for MdValue {
    fn from(v: bool) -> Self {
        MdValue::unitless(Value::Bool(v))
    }
}

impl From<Vec<f64>> for MdValue {
    fn from(v: Vec<f64>) -> Self {
        MdValue::unitless(Value::Array(v))
    }
}

impl<const N: usize> From<[f64; N]> for MdValue {
    fn from(v: [f64; N]) -> Self {
        MdValue::unitless(Value::Array(v.to_vec()))
    }
}
