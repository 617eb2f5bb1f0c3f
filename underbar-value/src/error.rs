use thiserror::Error;

/// Errors raised by operations on dynamic values.
///
/// Operations on typed containers are total and never produce these; they
/// surface only where a value's run-time kind decides whether an operation
/// makes sense.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two values of kinds that have no ordering between them were compared.
    #[error("cannot compare {0} with {1}")]
    Incomparable(&'static str, &'static str),
    /// A value that is not a primitive was used as a lookup key.
    #[error("{0} cannot be used as a key")]
    UnhashableKey(&'static str),
    /// The named property exists but does not hold a function.
    #[error("property {0} is not callable")]
    NotCallable(String),
    /// An error raised by a caller-supplied function.
    #[error("{0}")]
    Raised(String),
}

pub type Result<T> = std::result::Result<T, Error>;
