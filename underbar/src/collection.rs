// Single-pass operations on sequences and mappings. None of these modify
// their input; operations that produce a sequence return a new one.

use std::hash::Hash;

use ahash::{HashSet, HashSetExt};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::traverse::Traverse;
use crate::truthy::Truthy;

/// The first element, if there is one.
pub fn first<T>(sequence: &[T]) -> Option<&T> {
    sequence.first()
}

/// The first `n` elements, or all of them if there are fewer than `n`.
pub fn first_n<T>(sequence: &[T], n: usize) -> &[T] {
    &sequence[..n.min(sequence.len())]
}

/// The last element, if there is one.
pub fn last<T>(sequence: &[T]) -> Option<&T> {
    sequence.last()
}

/// The last `n` elements, or all of them if there are fewer than `n`.
pub fn last_n<T>(sequence: &[T], n: usize) -> &[T] {
    &sequence[sequence.len().saturating_sub(n)..]
}

/// Visit every element of a container with its key or index.
pub fn each<C, F>(container: &C, visitor: F)
where
    C: Traverse + ?Sized,
    F: FnMut(&C::Item, &C::Key, &C),
{
    container.traverse(visitor)
}

/// The index of the first element equal to `target`.
pub fn index_of<T: PartialEq>(sequence: &[T], target: &T) -> Option<usize> {
    sequence.iter().position(|item| item == target)
}

pub fn map<T, U, F>(sequence: &[T], f: F) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    sequence.iter().map(f).collect()
}

/// The elements that pass `predicate`, in order.
pub fn filter<T, P>(sequence: &[T], mut predicate: P) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    sequence
        .iter()
        .filter(|item| predicate(item))
        .cloned()
        .collect()
}

/// The elements that fail `predicate`, in order.
pub fn reject<T, P>(sequence: &[T], mut predicate: P) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    sequence
        .iter()
        .filter(|item| !predicate(item))
        .cloned()
        .collect()
}

/// Remove duplicates, keeping the first occurrence of each element.
///
/// Compares by equality only, which makes this quadratic. Use
/// [`uniq_hashed`] when the elements can be hashed.
pub fn uniq<T: PartialEq + Clone>(sequence: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::new();
    for item in sequence {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

/// Like [`uniq`], with hashed lookups.
pub fn uniq_hashed<T: Hash + Eq + Clone>(sequence: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(sequence.len());
    sequence
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Fold a container into a single value, left to right.
pub fn reduce<C, A, F>(container: &C, initial: A, f: F) -> A
where
    C: Traverse + ?Sized,
    F: FnMut(A, &C::Item) -> A,
{
    container.values().fold(initial, f)
}

/// Fold a container using its first element as the initial value.
///
/// An empty container has nothing to fold and gives `None`.
pub fn reduce_first<C, F>(container: &C, f: F) -> Option<C::Item>
where
    C: Traverse + ?Sized,
    C::Item: Clone,
    F: FnMut(C::Item, &C::Item) -> C::Item,
{
    let mut values = container.values();
    let first = values.next()?.clone();
    Some(values.fold(first, f))
}

/// Whether any element of the container equals `target`.
pub fn contains<C>(container: &C, target: &C::Item) -> bool
where
    C: Traverse + ?Sized,
    C::Item: PartialEq,
{
    container.values().any(|item| item == target)
}

/// Whether every element passes `predicate`. True for an empty container.
pub fn every<C, P>(container: &C, predicate: P) -> bool
where
    C: Traverse + ?Sized,
    P: FnMut(&C::Item) -> bool,
{
    container.values().all(predicate)
}

/// Whether any element passes `predicate`. False for an empty container.
pub fn some<C, P>(container: &C, predicate: P) -> bool
where
    C: Traverse + ?Sized,
    P: FnMut(&C::Item) -> bool,
{
    container.values().any(predicate)
}

/// [`every`] with truthiness as the predicate.
pub fn every_truthy<C>(container: &C) -> bool
where
    C: Traverse + ?Sized,
    C::Item: Truthy,
{
    container.values().all(|item| item.is_truthy())
}

/// [`some`] with truthiness as the predicate.
pub fn some_truthy<C>(container: &C) -> bool
where
    C: Traverse + ?Sized,
    C::Item: Truthy,
{
    container.values().any(|item| item.is_truthy())
}

/// Sort ascending by a key computed once per element.
///
/// The sort is stable. Floating point keys can be sorted with
/// `ordered_float::OrderedFloat` or by wrapping `f64::total_cmp`.
pub fn sort_by<T, K, F>(sequence: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut sorted = sequence.to_vec();
    sorted.sort_by_cached_key(key);
    sorted
}

/// A uniformly random permutation of the sequence.
pub fn shuffle<T, R>(sequence: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut shuffled = sequence.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use ahash::HashMapExt;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use super::*;

    #[test]
    fn test_first_and_last() {
        let sequence = [1, 2, 3];
        assert_eq!(first(&sequence), Some(&1));
        assert_eq!(last(&sequence), Some(&3));
        assert_eq!(first::<i32>(&[]), None);
        assert_eq!(last::<i32>(&[]), None);
    }

    #[test]
    fn test_first_n_and_last_n_clamp() {
        let sequence = [1, 2, 3];
        assert_eq!(first_n(&sequence, 2), &[1, 2]);
        assert_eq!(first_n(&sequence, 5), &[1, 2, 3]);
        assert_eq!(first_n(&sequence, 0), &[] as &[i32]);
        assert_eq!(last_n(&sequence, 2), &[2, 3]);
        assert_eq!(last_n(&sequence, 5), &[1, 2, 3]);
    }

    #[test]
    fn test_first_n_leaves_input_alone() {
        let sequence = vec![1, 2, 3];
        let _ = first_n(&sequence, 2);
        assert_eq!(sequence, vec![1, 2, 3]);
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of(&[10, 20, 30, 20], &20), Some(1));
        assert_eq!(index_of(&[10, 20], &40), None);
    }

    #[test]
    fn test_filter_and_reject() {
        let sequence = [1, 2, 3, 4, 5, 6];
        assert_eq!(filter(&sequence, |n| n % 2 == 0), vec![2, 4, 6]);
        assert_eq!(reject(&sequence, |n| n % 2 == 0), vec![1, 3, 5]);
        assert_eq!(sequence, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_map() {
        assert_eq!(map(&[1, 2, 3], |n| n * 2), vec![2, 4, 6]);
    }

    #[test]
    fn test_uniq() {
        assert_eq!(uniq(&[1, 2, 1, 3, 2, 4]), vec![1, 2, 3, 4]);
        assert_eq!(uniq_hashed(&[1, 2, 1, 3, 2, 4]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_uniq_is_idempotent() {
        let once = uniq(&["b", "a", "b", "c", "a"]);
        assert_eq!(uniq(&once), once);
    }

    #[test]
    fn test_uniq_of_floats_uses_equality() {
        assert_eq!(uniq(&[0.5, 1.5, 0.5]), vec![0.5, 1.5]);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(&[1, 2, 3], 10, |sum, n| sum + n), 16);
        assert_eq!(
            reduce(&["a", "b", "c"], String::new(), |mut s, item| {
                s.push_str(item);
                s
            }),
            "abc"
        );
    }

    #[test]
    fn test_reduce_first() {
        assert_eq!(reduce_first(&[1, 2, 3], |sum, n| sum + n), Some(6));
        assert_eq!(reduce_first(&Vec::<i32>::new(), |sum, n| sum + n), None);
    }

    #[test]
    fn test_reduce_over_map() {
        let mut map = ahash::HashMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(reduce(&map, 0, |sum, n| sum + n), 3);
    }

    #[test]
    fn test_contains() {
        assert!(contains(&[1, 2, 3], &2));
        assert!(!contains(&[1, 2, 3], &4));
        let absent: Option<Vec<i32>> = None;
        assert!(!contains(&absent, &1));
    }

    #[test]
    fn test_every_and_some() {
        assert!(every(&[2, 4, 6], |n| n % 2 == 0));
        assert!(!every(&[2, 3, 6], |n| n % 2 == 0));
        assert!(every(&Vec::<i32>::new(), |_| false));
        assert!(some(&[1, 3, 4], |n| n % 2 == 0));
        assert!(!some(&[1, 3, 5], |n| n % 2 == 0));
        assert!(!some(&Vec::<i32>::new(), |_| true));
    }

    #[test]
    fn test_truthy_defaults() {
        assert!(every_truthy(&[1, 2, 3]));
        assert!(!every_truthy(&[1, 0, 3]));
        assert!(some_truthy(&["", "x"]));
        assert!(!some_truthy(&[None, Some(0)]));
        assert!(every_truthy(&Vec::<bool>::new()));
    }

    #[test]
    fn test_sort_by_is_stable() {
        let people = [("curly", 60), ("moe", 40), ("larry", 50), ("shemp", 40)];
        let sorted = sort_by(&people, |(_, age)| *age);
        assert_eq!(
            sorted,
            vec![("moe", 40), ("shemp", 40), ("larry", 50), ("curly", 60)]
        );
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let sequence = (0..20).collect::<Vec<_>>();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut shuffled = shuffle(&sequence, &mut rng);
        assert_eq!(shuffled.len(), sequence.len());
        shuffled.sort();
        assert_eq!(shuffled, sequence);
    }

    #[test]
    fn test_shuffle_is_deterministic_for_a_seed() {
        let sequence = (0..20).collect::<Vec<_>>();
        let a = shuffle(&sequence, &mut Xoshiro256PlusPlus::seed_from_u64(42));
        let b = shuffle(&sequence, &mut Xoshiro256PlusPlus::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
