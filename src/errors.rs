use std::fmt::Debug;

use thiserror::Error;

/// Error returned when a record cannot be turned into an `Operation`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperationError {
    #[error("Invalid operation: the record has no type")]
    MissingType,

    #[error("Invalid operation: unknown type `{0}`, expected one of `NOP`, `insert`, `delete`")]
    UnknownType(String),

    #[error("Invalid operation: inserts and deletes require a position")]
    MissingPosition,

    #[error("Invalid operation: position must be non-negative but got {0}")]
    NegativePosition(i128),

    #[error("Invalid operation: position {0} does not fit in a `usize`")]
    PositionOutOfRange(i128),

    #[error("Invalid operation: inserts and deletes require a value")]
    MissingValue,
}

/// Error returned when an operation cannot be applied to a sequence.
///
/// Both variants mean that the sequence is not in the state the operation
/// was created against.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError<T>
where
    T: Debug,
{
    /// The operation addresses a slot past the end of the sequence
    #[error(
        "Cannot apply operation at position {position} to a sequence of length {length}"
    )]
    OutOfBounds {
        /// The position of the operation
        position: usize,
        /// The length of the sequence at the time of applying
        length: usize,
    },

    /// The element to be deleted is not the one the operation expects
    #[error(
        "Unexpected value at position {position}: expected {expected:?}, found {found:?}"
    )]
    PreconditionMismatch {
        /// The position of the delete
        position: usize,
        /// The value carried by the delete
        expected: T,
        /// The value found in the sequence
        found: T,
    },
}
