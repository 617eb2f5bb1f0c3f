use std::rc::Rc;

use ahash::{HashMap, HashMapExt};

use crate::value::Value;

/// An unordered collection of string keys to values.
///
/// Iteration order is unspecified, but stable for as long as the mapping is
/// not modified. Like [`crate::Sequence`], clones share their entries until
/// one of them is modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mapping(Rc<HashMap<Rc<str>, Value>>);

impl Mapping {
    pub fn new() -> Self {
        Self(Rc::new(HashMap::new()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert an entry, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<Rc<str>>, value: impl Into<Value>) -> Option<Value> {
        Rc::make_mut(&mut self.0).insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &Rc<str>> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> {
        self.0.iter()
    }

    /// The underlying hash map.
    pub fn as_map(&self) -> &HashMap<Rc<str>, Value> {
        &self.0
    }

    /// The underlying hash map, for modification in place. Copies the
    /// entries first if they are shared with a clone.
    pub fn as_map_mut(&mut self) -> &mut HashMap<Rc<str>, Value> {
        Rc::make_mut(&mut self.0)
    }
}

impl From<HashMap<Rc<str>, Value>> for Mapping {
    fn from(map: HashMap<Rc<str>, Value>) -> Self {
        Self(Rc::new(map))
    }
}

impl<K: Into<Rc<str>>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(Rc::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces() {
        let mut mapping = Mapping::new();
        assert_eq!(mapping.insert("a", 1), None);
        assert_eq!(mapping.insert("a", 2), Some(Value::from(1)));
        assert_eq!(mapping.get("a"), Some(&Value::from(2)));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_modify_does_not_affect_clone() {
        let mut a: Mapping = [("x", Value::from(1))].into_iter().collect();
        let b = a.clone();
        a.as_map_mut().insert("y".into(), Value::from(2));
        assert!(a.contains_key("y"));
        assert!(!b.contains_key("y"));
    }
}
