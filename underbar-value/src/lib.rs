//! The dynamic value model used by `underbar`.
//!
//! A [`Value`] is a primitive, a [`Sequence`], a [`Mapping`] or a
//! [`Function`]. Operations that need to look inside elements at run time
//! (property lookup, truthiness, method invocation, nested flattening) work
//! on values; everything else in `underbar` is generic.

mod error;
mod function;
mod map_key;
mod mapping;
mod sequence;
mod value;

pub use error::{Error, Result};
pub use function::Function;
pub use map_key::MapKey;
pub use mapping::Mapping;
pub use sequence::Sequence;
pub use value::Value;
