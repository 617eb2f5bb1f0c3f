use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use ordered_float::OrderedFloat;
use strum_macros::IntoStaticStr;

use crate::error;
use crate::function::Function;
use crate::mapping::Mapping;
use crate::sequence::Sequence;

/// A dynamically typed value.
///
/// This is the element type of heterogeneous sequences and mappings. Numbers
/// are stored as [`OrderedFloat`] so that values have total equality; `NaN`
/// equals itself here.
///
/// Functions compare by identity, everything else by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// The missing-value sentinel. Distinct from [`Value::Null`], which is a
    /// value a caller put there on purpose.
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(OrderedFloat<f64>),
    String(Rc<str>),
    Sequence(Sequence),
    Mapping(Mapping),
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    Function(Function),
}

impl Value {
    /// The name of this value's kind, such as `"number"` or `"sequence"`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Truthiness.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are
    /// falsy. Everything else is truthy, empty sequences and mappings
    /// included.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(OrderedFloat(n)) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Function(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(OrderedFloat(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Look up a property by name.
    ///
    /// Mappings look up the entry. Sequences know `length` and numeric
    /// indexes, strings know `length`. Anything that is not found is
    /// [`Value::Undefined`].
    pub fn property(&self, name: &str) -> Value {
        match self {
            Value::Mapping(mapping) => mapping.get(name).cloned().unwrap_or_default(),
            Value::Sequence(sequence) => {
                if name == "length" {
                    return sequence.len().into();
                }
                name.parse::<usize>()
                    .ok()
                    .and_then(|index| sequence.get(index))
                    .cloned()
                    .unwrap_or_default()
            }
            Value::String(s) if name == "length" => s.chars().count().into(),
            _ => Value::Undefined,
        }
    }

    /// Compare two values.
    ///
    /// Numbers compare numerically, strings lexically and booleans with
    /// `false` before `true`. Any other combination has no ordering.
    pub fn compare(&self, other: &Value) -> error::Result<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            _ => Err(error::Error::Incomparable(self.kind(), other.kind())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(OrderedFloat(n)) => {
                if n.is_nan() {
                    f.write_str("NaN")
                } else if n.is_infinite() {
                    if n.is_sign_positive() {
                        f.write_str("Infinity")
                    } else {
                        f.write_str("-Infinity")
                    }
                } else if *n == 0.0 {
                    // no negative zero in the output
                    f.write_str("0")
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => f.write_str(s),
            Value::Sequence(sequence) => f.write_str(&sequence.join(",")),
            Value::Mapping(_) => f.write_str("[object Object]"),
            Value::Function(_) => f.write_str("function"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(OrderedFloat(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(OrderedFloat(n.into()))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::String(s)
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Value::Sequence(sequence)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Sequence(values.into())
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Mapping(mapping)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => value.into(),
            None => Value::Undefined,
        }
    }
}
