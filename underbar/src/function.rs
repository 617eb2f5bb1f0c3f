// Wrappers that return a new callable owning some state across calls.
//
// Each combinator comes in two forms: a typed one producing a Rust closure,
// and a dynamic one producing a [`Function`] that can be stored in values.

use std::cell::{Cell, RefCell};
use std::hash::Hash;
use std::mem;
use std::time::Duration;

use ahash::{HashMap, HashMapExt};
use tracing::trace;
use underbar_value::{Function, MapKey, Result, Value};

use crate::schedule::Scheduler;

enum Latch<F, R> {
    Unfired(F),
    // the first call panicked
    Poisoned,
    Fired(R),
}

/// Wrap `f` so that it runs at most once.
///
/// The first call runs `f` with its argument and records the result. Every
/// later call returns that result again, whatever its argument.
///
/// # Panics
///
/// If `f` panics, the wrapper has no result to give and panics on every
/// later call.
pub fn once<A, R, F>(f: F) -> impl FnMut(A) -> R
where
    R: Clone,
    F: FnOnce(A) -> R,
{
    let mut latch: Latch<F, R> = Latch::Unfired(f);
    move |argument: A| {
        if let Latch::Fired(result) = &latch {
            return result.clone();
        }
        match mem::replace(&mut latch, Latch::Poisoned) {
            Latch::Unfired(f) => {
                let result = f(argument);
                latch = Latch::Fired(result.clone());
                result
            }
            Latch::Poisoned => panic!("once-wrapped function panicked on its first call"),
            Latch::Fired(_) => unreachable!("fired latch returns early"),
        }
    }
}

/// A function with a cache of its results, one per distinct argument.
///
/// The cache is never evicted, so it grows with the number of distinct
/// arguments seen.
pub struct Memoized<A, R, F> {
    function: F,
    cache: HashMap<A, R>,
}

impl<A, R, F> Memoized<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(A) -> R,
{
    pub fn new(function: F) -> Self {
        Self {
            function,
            cache: HashMap::new(),
        }
    }

    /// The cached result for `argument`, computing it on first sight.
    pub fn call(&mut self, argument: A) -> R {
        if let Some(result) = self.cache.get(&argument) {
            return result.clone();
        }
        trace!(cached = self.cache.len(), "memoize cache miss");
        let result = (self.function)(argument.clone());
        self.cache.insert(argument, result.clone());
        result
    }

    /// The number of distinct arguments cached so far.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Wrap `f` so that it runs once per distinct argument.
///
/// See [`Memoized`] for a form that exposes its cache size.
pub fn memoize<A, R, F>(f: F) -> impl FnMut(A) -> R
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(A) -> R,
{
    let mut memoized = Memoized::new(f);
    move |argument: A| memoized.call(argument)
}

/// Like [`once`] for dynamic functions.
///
/// The first call's outcome is kept whether it is a value or an error, and
/// returned by every later call. The wrapper counts as fired as soon as the
/// first call starts, so a call made from inside `function` while it runs
/// gives [`Value::Undefined`].
pub fn once_function(function: Function) -> Function {
    let fired = Cell::new(false);
    let outcome: RefCell<Option<Result<Value>>> = RefCell::new(None);
    Function::new(move |arguments| {
        if fired.replace(true) {
            return outcome.borrow().clone().unwrap_or(Ok(Value::Undefined));
        }
        let result = function.call(arguments);
        *outcome.borrow_mut() = Some(result.clone());
        result
    })
}

/// Like [`memoize`] for dynamic functions, keyed on the first argument.
///
/// The first argument must be a primitive; a sequence, mapping or function
/// gives [`underbar_value::Error::UnhashableKey`]. A call without arguments
/// is keyed on [`Value::Undefined`]. Errors from `function` are returned
/// but not cached.
pub fn memoize_function(function: Function) -> Function {
    let cache: RefCell<HashMap<MapKey, Value>> = RefCell::new(HashMap::new());
    Function::new(move |arguments| {
        let key = match arguments.first() {
            Some(argument) => MapKey::new(argument)?,
            None => MapKey::Undefined,
        };
        let cached = cache.borrow().get(&key).cloned();
        if let Some(value) = cached {
            return Ok(value);
        }
        trace!(?key, "memoize cache miss");
        let value = function.call(arguments)?;
        cache.borrow_mut().insert(key, value.clone());
        Ok(value)
    })
}

/// Run `f(arguments)` once, no earlier than `wait` from now, on `scheduler`.
///
/// Returns immediately; `f` never runs within this call, even when `wait`
/// is zero.
pub fn delay<S, A, F>(scheduler: &S, f: F, wait: Duration, arguments: A)
where
    S: Scheduler + ?Sized,
    A: Send + 'static,
    F: FnOnce(A) + Send + 'static,
{
    scheduler.schedule(wait, Box::new(move || f(arguments)));
}
