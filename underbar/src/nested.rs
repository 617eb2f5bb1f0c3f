use underbar_value::Value;

/// A sequence that may contain further sequences, to any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Leaf(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn leaf(value: T) -> Self {
        Nested::Leaf(value)
    }

    pub fn list(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(items.into_iter().collect())
    }
}

/// Flatten nested sequences into one, depth first, left to right.
pub fn flatten<T: Clone>(nested: &[Nested<T>]) -> Vec<T> {
    let mut result = Vec::new();
    flatten_into(nested, &mut result);
    result
}

/// Like [`flatten`], appending to `result` instead of creating a new
/// sequence, so that repeated calls can build into one target.
pub fn flatten_into<T: Clone>(nested: &[Nested<T>], result: &mut Vec<T>) {
    // a work list of partially visited levels instead of recursion, so
    // the nesting depth is limited by memory rather than by the stack
    let mut levels = vec![nested.iter()];
    loop {
        let next = match levels.last_mut() {
            Some(level) => level.next(),
            None => break,
        };
        match next {
            Some(Nested::Leaf(value)) => result.push(value.clone()),
            Some(Nested::List(items)) => levels.push(items.iter()),
            None => {
                levels.pop();
            }
        }
    }
}

/// Flatten a sequence of values, descending into every value that is
/// itself a sequence.
///
/// A sequence that contains itself cannot be built from values, as
/// sequences are immutable once shared.
pub fn flatten_values(values: &[Value]) -> Vec<Value> {
    let mut result = Vec::new();
    flatten_values_into(values, &mut result);
    result
}

/// Like [`flatten_values`], appending to `result`.
pub fn flatten_values_into(values: &[Value], result: &mut Vec<Value>) {
    let mut levels = vec![values.iter()];
    loop {
        let next = match levels.last_mut() {
            Some(level) => level.next(),
            None => break,
        };
        match next {
            Some(Value::Sequence(sequence)) => levels.push(sequence.iter()),
            Some(value) => result.push(value.clone()),
            None => {
                levels.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::Nested::Leaf;

    #[test]
    fn test_flatten() {
        // [[1, [2]], [3]]
        let nested = [
            Nested::list([Leaf(1), Nested::list([Leaf(2)])]),
            Nested::list([Leaf(3)]),
        ];
        assert_eq!(flatten(&nested), vec![1, 2, 3]);
    }

    #[test]
    fn test_flatten_flat_is_unchanged() {
        let flat = [Leaf('a'), Leaf('b'), Leaf('c')];
        assert_eq!(flatten(&flat), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_flatten_empty_lists() {
        let nested = [
            Nested::list([]),
            Nested::list([Nested::list([]), Leaf(1)]),
            Nested::list([]),
        ];
        assert_eq!(flatten(&nested), vec![1]);
    }

    #[test]
    fn test_flatten_deep() {
        let mut nested = Leaf(0);
        for _ in 0..100_000 {
            nested = Nested::list([nested]);
        }
        assert_eq!(flatten(std::slice::from_ref(&nested)), vec![0]);
        // dropping a deeply nested value recurses; leak it instead
        std::mem::forget(nested);
    }

    #[test]
    fn test_flatten_into_accumulates() {
        let mut result = vec![0];
        flatten_into(&[Leaf(1), Nested::list([Leaf(2)])], &mut result);
        flatten_into(&[Nested::list([Leaf(3)])], &mut result);
        assert_eq!(result, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_flatten_values() {
        let values = [
            Value::from(vec![Value::from(1), Value::from(vec![Value::from("two")])]),
            Value::from(3),
            Value::from(Vec::<Value>::new()),
        ];
        assert_eq!(
            flatten_values(&values),
            vec![Value::from(1), Value::from("two"), Value::from(3)]
        );
    }
}
