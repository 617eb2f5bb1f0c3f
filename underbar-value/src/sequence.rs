use std::rc::Rc;

use crate::value::Value;

/// An ordered, 0-indexed sequence of values.
///
/// Cloning a sequence is cheap; the items are shared until one of the clones
/// is modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sequence(Rc<Vec<Value>>);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        self.0.as_slice()
    }

    /// Append a value. Copies the items first if they are shared.
    pub fn push(&mut self, value: impl Into<Value>) {
        Rc::make_mut(&mut self.0).push(value.into());
    }

    /// Join the display form of each item with `separator`.
    ///
    /// `undefined` and `null` items contribute an empty string.
    pub fn join(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(|value| match value {
                Value::Undefined | Value::Null => String::new(),
                value => value.to_string(),
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self(Rc::new(values))
    }
}

impl From<&[Value]> for Sequence {
    fn from(values: &[Value]) -> Self {
        Self(Rc::new(values.to_vec()))
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Rc::new(iter.into_iter().collect()))
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[Value]> for Sequence {
    fn as_ref(&self) -> &[Value] {
        self.as_slice()
    }
}
