//! Errors reported by maps, views and cursors.

use thiserror::Error;

/// A failed map, view or cursor operation.
///
/// Looking up or removing an absent key is not an error; those operations return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The map or view is empty.
    #[error("no such element")]
    NoSuchElement,

    /// A key or bound lies outside the range of a view, a range is empty or inverted, or bulk
    /// input is unsorted or of the wrong length.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The map was structurally modified after the cursor last synchronized with it.
    #[error("concurrent modification: expected generation {expected}, found {found}")]
    ConcurrentModification {
        /// The generation the cursor last observed.
        expected: u64,
        /// The map's current generation.
        found: u64,
    },

    /// A cursor removal without a preceding `next`, or a second removal in a row.
    #[error("illegal state: no entry to remove")]
    IllegalState,
}

/// A `Result` whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
