use std::collections::HashMap;
use std::hash::BuildHasher;

use underbar_value::{Mapping, Sequence, Value};

/// A container that can be visited element by element.
///
/// This is the iteration primitive the rest of the library is built on.
/// Sequences are keyed by index, mappings by key.
pub trait Traverse {
    type Key: ?Sized;
    type Item;

    /// Call `visitor(value, key, container)` once per element, in the
    /// container's natural iteration order.
    fn traverse<F>(&self, visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self);

    /// The elements in the same order as [`Traverse::traverse`] visits them.
    fn values(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<T> Traverse for [T] {
    type Key = usize;
    type Item = T;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, const N: usize> Traverse for [T; N] {
    type Key = usize;
    type Item = T;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Traverse for Vec<T> {
    type Key = usize;
    type Item = T;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<K, V, S: BuildHasher> Traverse for HashMap<K, V, S> {
    type Key = K;
    type Item = V;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        for (key, value) in self.iter() {
            visitor(value, key, self);
        }
    }

    fn values(&self) -> impl Iterator<Item = &V> {
        HashMap::values(self)
    }
}

// An absent container has no elements.
impl<C: Traverse> Traverse for Option<C> {
    type Key = C::Key;
    type Item = C::Item;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        if let Some(container) = self {
            container.traverse(|value, key, _| visitor(value, key, self));
        }
    }

    fn values(&self) -> impl Iterator<Item = &C::Item> {
        self.iter().flat_map(|container| container.values())
    }
}

impl Traverse for Sequence {
    type Key = usize;
    type Item = Value;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }

    fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter()
    }
}

impl Traverse for Mapping {
    type Key = str;
    type Item = Value;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        for (key, value) in self.iter() {
            visitor(value, &**key, self);
        }
    }

    fn values(&self) -> impl Iterator<Item = &Value> {
        Mapping::values(self)
    }
}

// A value is visited as the sequence or mapping it holds, keyed by index
// number or key string. Primitives have no elements.
impl Traverse for Value {
    type Key = Value;
    type Item = Value;

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Self::Item, &Self::Key, &Self),
    {
        match self {
            Value::Sequence(sequence) => {
                for (index, value) in sequence.iter().enumerate() {
                    visitor(value, &index.into(), self);
                }
            }
            Value::Mapping(mapping) => {
                for (key, value) in mapping.iter() {
                    visitor(value, &Value::String(key.clone()), self);
                }
            }
            _ => {}
        }
    }

    fn values(&self) -> impl Iterator<Item = &Value> {
        let values: Box<dyn Iterator<Item = &Value> + '_> = match self {
            Value::Sequence(sequence) => Box::new(sequence.iter()),
            Value::Mapping(mapping) => Box::new(mapping.values()),
            _ => Box::new(std::iter::empty()),
        };
        values
    }
}

#[cfg(test)]
mod tests {
    use ahash::HashMapExt;

    use super::*;

    #[test]
    fn test_traverse_slice_passes_index_and_container() {
        let sequence = [10, 20, 30];
        let mut visited = Vec::new();
        sequence[..].traverse(|value, index, container| {
            assert_eq!(container.len(), 3);
            visited.push((*index, *value));
        });
        assert_eq!(visited, vec![(0, 10), (1, 20), (2, 30)]);
    }

    #[test]
    fn test_traverse_map_passes_keys() {
        let mut map = ahash::HashMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let mut visited = Vec::new();
        map.traverse(|value, key, _| visited.push((*key, *value)));
        visited.sort();
        assert_eq!(visited, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_absent_container_visits_nothing() {
        let absent: Option<Vec<i32>> = None;
        let mut count = 0;
        absent.traverse(|_, _, _| count += 1);
        assert_eq!(count, 0);
        assert_eq!(absent.values().count(), 0);
    }

    #[test]
    fn test_traverse_value_mapping() {
        let mapping: Mapping = [("k", Value::from(true))].into_iter().collect();
        let value = Value::from(mapping);
        let mut visited = Vec::new();
        value.traverse(|value, key, _| visited.push((key.clone(), value.clone())));
        assert_eq!(visited, vec![(Value::from("k"), Value::from(true))]);
    }

    #[test]
    fn test_primitive_value_has_no_elements() {
        assert_eq!(Value::from(3).values().count(), 0);
    }
}
