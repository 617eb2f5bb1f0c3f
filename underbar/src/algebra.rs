// Operations over several sequences at once. Sequences are compared by
// element equality; the `_hashed` variants give the same results using hash
// lookups for elements that support them.

use std::hash::Hash;

use ahash::{HashSet, HashSetExt};
use underbar_value::{Sequence, Value};

/// Combine sequences index by index.
///
/// The result has one tuple per index of the longest sequence. Shorter
/// sequences contribute `None` past their end.
pub fn zip<T: Clone>(sequences: &[&[T]]) -> Vec<Vec<Option<T>>> {
    let longest = sequences
        .iter()
        .map(|sequence| sequence.len())
        .max()
        .unwrap_or(0);
    (0..longest)
        .map(|index| {
            sequences
                .iter()
                .map(|sequence| sequence.get(index).cloned())
                .collect()
        })
        .collect()
}

/// Like [`zip`] for dynamic sequences, with [`Value::Undefined`] as the
/// missing value. Each tuple is itself a sequence.
pub fn zip_values(sequences: &[Sequence]) -> Sequence {
    let slices = sequences
        .iter()
        .map(Sequence::as_slice)
        .collect::<Vec<_>>();
    zip(slices.as_slice())
        .into_iter()
        .map(|tuple| {
            let tuple: Sequence = tuple.into_iter().map(Value::from).collect();
            Value::from(tuple)
        })
        .collect()
}

/// The distinct elements of the first sequence that occur in every other
/// sequence, in order of first occurrence.
///
/// A single sequence intersects to its own distinct elements. No sequences
/// at all intersect to nothing.
pub fn intersection<T: PartialEq + Clone>(sequences: &[&[T]]) -> Vec<T> {
    let Some((first, rest)) = sequences.split_first() else {
        return Vec::new();
    };
    let mut shared: Vec<T> = Vec::new();
    for item in first.iter() {
        if shared.contains(item) {
            continue;
        }
        if rest.iter().all(|sequence| sequence.contains(item)) {
            shared.push(item.clone());
        }
    }
    shared
}

/// Like [`intersection`], with hashed lookups.
pub fn intersection_hashed<T: Hash + Eq + Clone>(sequences: &[&[T]]) -> Vec<T> {
    let Some((first, rest)) = sequences.split_first() else {
        return Vec::new();
    };
    let rest = rest
        .iter()
        .map(|sequence| sequence.iter().collect::<HashSet<_>>())
        .collect::<Vec<_>>();
    let mut seen = HashSet::with_capacity(first.len());
    first
        .iter()
        .filter(|item| seen.insert(*item) && rest.iter().all(|set| set.contains(*item)))
        .cloned()
        .collect()
}

/// The elements of `sequence` that occur in none of `others`.
///
/// Order and duplicates of `sequence` are kept.
pub fn difference<T: PartialEq + Clone>(sequence: &[T], others: &[&[T]]) -> Vec<T> {
    sequence
        .iter()
        .filter(|item| !others.iter().any(|other| other.contains(item)))
        .cloned()
        .collect()
}

/// Like [`difference`], with hashed lookups.
pub fn difference_hashed<T: Hash + Eq + Clone>(sequence: &[T], others: &[&[T]]) -> Vec<T> {
    let excluded = others
        .iter()
        .flat_map(|other| other.iter())
        .collect::<HashSet<_>>();
    sequence
        .iter()
        .filter(|item| !excluded.contains(item))
        .cloned()
        .collect()
}
