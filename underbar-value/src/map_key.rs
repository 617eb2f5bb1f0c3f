use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::error;
use crate::value::Value;

// A map key is a primitive value in a form that can be hashed. Numbers go
// through OrderedFloat so NaN is a single key; negative zero is folded into
// zero.

/// A hashable key derived from a primitive [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Undefined,
    Null,
    Boolean(bool),
    Number(OrderedFloat<f64>),
    String(Rc<str>),
}

impl MapKey {
    /// Create a key from a value.
    ///
    /// Sequences, mappings and functions are not primitives and cannot be
    /// keys.
    pub fn new(value: &Value) -> error::Result<MapKey> {
        match value {
            Value::Undefined => Ok(MapKey::Undefined),
            Value::Null => Ok(MapKey::Null),
            Value::Boolean(b) => Ok(MapKey::Boolean(*b)),
            Value::Number(OrderedFloat(n)) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                Ok(MapKey::Number(OrderedFloat(n)))
            }
            Value::String(s) => Ok(MapKey::String(s.clone())),
            Value::Sequence(_) | Value::Mapping(_) | Value::Function(_) => {
                Err(error::Error::UnhashableKey(value.kind()))
            }
        }
    }
}

impl TryFrom<&Value> for MapKey {
    type Error = error::Error;

    fn try_from(value: &Value) -> error::Result<Self> {
        Self::new(value)
    }
}

impl From<MapKey> for Value {
    fn from(key: MapKey) -> Self {
        match key {
            MapKey::Undefined => Value::Undefined,
            MapKey::Null => Value::Null,
            MapKey::Boolean(b) => Value::Boolean(b),
            MapKey::Number(n) => Value::Number(n),
            MapKey::String(s) => Value::String(s),
        }
    }
}
