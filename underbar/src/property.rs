use std::cmp::Ordering;

use underbar_value::{Error, Function, Result, Sequence, Value};

/// What [`invoke`] calls on each element.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// Look the method up on the element by name.
    Name(String),
    /// Call this function with the element as the first argument.
    Function(Function),
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        Method::Name(name.to_string())
    }
}

impl From<String> for Method {
    fn from(name: String) -> Self {
        Method::Name(name)
    }
}

impl From<Function> for Method {
    fn from(function: Function) -> Self {
        Method::Function(function)
    }
}

/// The value of the property `name` of each element.
///
/// Elements without the property contribute [`Value::Undefined`].
pub fn pluck(sequence: &[Value], name: &str) -> Vec<Value> {
    sequence.iter().map(|value| value.property(name)).collect()
}

/// Call a method on each element and collect the results.
///
/// A named method is looked up as a property of the element; if the property
/// holds a function it is called with the element followed by `arguments`.
/// Strings and sequences also have a few built-in methods. An element that
/// has no such method gives [`Value::Undefined`]. A property that exists but
/// is not a function is an error.
pub fn invoke(sequence: &[Value], method: &Method, arguments: &[Value]) -> Result<Vec<Value>> {
    sequence
        .iter()
        .map(|value| invoke_one(value, method, arguments))
        .collect()
}

fn invoke_one(receiver: &Value, method: &Method, arguments: &[Value]) -> Result<Value> {
    match method {
        Method::Function(function) => call_with_receiver(function, receiver, arguments),
        Method::Name(name) => match receiver.property(name) {
            Value::Function(function) => call_with_receiver(&function, receiver, arguments),
            Value::Undefined => Ok(builtin(receiver, name, arguments)?.unwrap_or_default()),
            _ => Err(Error::NotCallable(name.clone())),
        },
    }
}

fn call_with_receiver(function: &Function, receiver: &Value, arguments: &[Value]) -> Result<Value> {
    let mut all = Vec::with_capacity(arguments.len() + 1);
    all.push(receiver.clone());
    all.extend_from_slice(arguments);
    function.call(&all)
}

// Methods every string and sequence has without carrying them as
// properties.
fn builtin(receiver: &Value, name: &str, arguments: &[Value]) -> Result<Option<Value>> {
    let value: Value = match (receiver, name) {
        (Value::String(s), "toUpperCase") => s.to_uppercase().into(),
        (Value::String(s), "toLowerCase") => s.to_lowercase().into(),
        (Value::String(s), "trim") => s.trim().into(),
        (Value::Sequence(sequence), "sort") => sort_values(sequence.as_slice())?.into(),
        (Value::Sequence(sequence), "reverse") => {
            sequence.iter().rev().cloned().collect::<Sequence>().into()
        }
        (Value::Sequence(sequence), "join") => {
            let separator = match arguments.first() {
                Some(Value::Undefined) | None => ",".to_string(),
                Some(separator) => separator.to_string(),
            };
            sequence.join(&separator).into()
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn sort_values(values: &[Value]) -> Result<Vec<Value>> {
    let keyed = values.iter().map(|value| (value.clone(), value.clone()));
    sort_keyed(keyed.collect())
}

/// Sort ascending by the property `name` of each element.
///
/// The sort is stable. Elements whose property is missing or `null` go last,
/// in their original order. Property values that cannot be compared with each other
/// (a number and a string, say) are an error.
pub fn sort_by_property(sequence: &[Value], name: &str) -> Result<Vec<Value>> {
    let keyed = sequence
        .iter()
        .map(|value| (value.property(name), value.clone()))
        .collect();
    sort_keyed(keyed)
}

/// Sort ascending by a key computed by `key` for each element.
///
/// Follows the same rules as [`sort_by_property`].
pub fn sort_by_value<F>(sequence: &[Value], mut key: F) -> Result<Vec<Value>>
where
    F: FnMut(&Value) -> Result<Value>,
{
    let keyed = sequence
        .iter()
        .map(|value| Ok((key(value)?, value.clone())))
        .collect::<Result<Vec<_>>>()?;
    sort_keyed(keyed)
}

fn sort_keyed(keyed: Vec<(Value, Value)>) -> Result<Vec<Value>> {
    let (mut present, missing): (Vec<_>, Vec<_>) = keyed
        .into_iter()
        .partition(|(key, _)| !matches!(key, Value::Undefined | Value::Null));
    // all keys must be comparable with the first before sorting starts
    if let Some((first, _)) = present.first() {
        for (key, _) in present.iter().skip(1) {
            first.compare(key)?;
        }
    }
    present.sort_by(|(a, _), (b, _)| a.compare(b).unwrap_or(Ordering::Equal));
    Ok(present
        .into_iter()
        .chain(missing)
        .map(|(_, value)| value)
        .collect())
}
