use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use underbar_value::Value;

/// Copy every entry of each source into `target`, later sources
/// overwriting earlier ones. Returns `target`.
pub fn extend<'a, K, V, S>(
    target: &'a mut HashMap<K, V, S>,
    sources: &[&HashMap<K, V, S>],
) -> &'a mut HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    for source in sources {
        for (key, value) in source.iter() {
            target.insert(key.clone(), value.clone());
        }
    }
    target
}

/// Like [`extend`], but keys already present in `target` keep their value.
/// Among the sources the first one to supply a key wins.
pub fn defaults<'a, K, V, S>(
    target: &'a mut HashMap<K, V, S>,
    sources: &[&HashMap<K, V, S>],
) -> &'a mut HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    for source in sources {
        for (key, value) in source.iter() {
            target
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    target
}

/// All keys of a mapping. An absent mapping has none.
pub fn all_keys<K: Clone, V, S>(mapping: Option<&HashMap<K, V, S>>) -> Vec<K> {
    mapping
        .map(|mapping| mapping.keys().cloned().collect())
        .unwrap_or_default()
}

/// Whether the mapping is present and has `key`.
pub fn has<K, V, S, Q>(mapping: Option<&HashMap<K, V, S>>, key: &Q) -> bool
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    mapping.is_some_and(|mapping| mapping.contains_key(key))
}

/// The keys of a dynamic value.
///
/// A mapping has its keys, a sequence its indexes as strings; every other
/// value has none.
pub fn keys_of(value: &Value) -> Vec<Rc<str>> {
    match value {
        Value::Mapping(mapping) => mapping.keys().cloned().collect(),
        Value::Sequence(sequence) => (0..sequence.len())
            .map(|index| index.to_string().into())
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether a value is an object: a sequence, mapping or function.
pub fn is_object(value: &Value) -> bool {
    matches!(
        value,
        Value::Sequence(_) | Value::Mapping(_) | Value::Function(_)
    )
}

pub fn is_function(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}
