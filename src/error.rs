//! Error types for ordtree

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the containers in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Keyed access to a key that is not stored.
    #[error("key is not present in the map")]
    OutOfRange,

    /// A structural invariant of the tree does not hold. Only produced by
    /// [`Tree::validate`](crate::Tree::validate).
    #[error("tree invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Error::Invariant(msg.into())
    }
}
