//! Functional helpers for sequences and mappings.
//!
//! Most operations are generic: sequences are slices, mappings are
//! `HashMap`s, and a missing value is `None`. Operations that have to look
//! inside elements at run time (plucking a property, invoking a method by
//! name, flattening arbitrarily nested data) work on the dynamic
//! [`Value`] model instead, where a missing value is [`Value::Undefined`].
//!
//! Every operation is eager and leaves its input untouched, except
//! [`extend`] and [`defaults`], which fill in their target.
//!
//! ```
//! use underbar::{difference, intersection, memoize, zip};
//!
//! let evens = [2, 4, 6];
//! let small = [1, 2, 3, 4];
//! assert_eq!(intersection(&[&evens[..], &small[..]]), vec![2, 4]);
//! assert_eq!(difference(&small, &[&evens[..]]), vec![1, 3]);
//! assert_eq!(
//!     zip(&[&evens[..], &small[..2]]),
//!     vec![
//!         vec![Some(2), Some(1)],
//!         vec![Some(4), Some(2)],
//!         vec![Some(6), None],
//!     ]
//! );
//!
//! let mut square = memoize(|n: u32| n * n);
//! assert_eq!(square(12), 144);
//! ```
//!
//! [`delay`] hands its call to a [`Scheduler`]: [`TimerThread`] runs it on a
//! background thread, [`ManualScheduler`] when its clock is advanced.

mod algebra;
mod collection;
mod function;
mod nested;
mod object;
mod property;
mod schedule;
mod traverse;
mod truthy;

pub use crate::algebra::{
    difference, difference_hashed, intersection, intersection_hashed, zip, zip_values,
};
pub use crate::collection::{
    contains, each, every, every_truthy, filter, first, first_n, index_of, last, last_n, map,
    reduce, reduce_first, reject, shuffle, some, some_truthy, sort_by, uniq, uniq_hashed,
};
pub use crate::function::{delay, memoize, memoize_function, once, once_function, Memoized};
pub use crate::nested::{flatten, flatten_into, flatten_values, flatten_values_into, Nested};
pub use crate::object::{all_keys, defaults, extend, has, is_function, is_object, keys_of};
pub use crate::property::{invoke, pluck, sort_by_property, sort_by_value, Method};
pub use crate::schedule::{ManualScheduler, Scheduler, Task, TimerThread, TimerThreadBuilder};
pub use crate::traverse::Traverse;
pub use crate::truthy::Truthy;

pub use underbar_value::{Error, Function, MapKey, Mapping, Result, Sequence, Value};
