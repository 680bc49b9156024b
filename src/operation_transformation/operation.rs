use core::fmt::{Debug, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use super::transport::OperationRecord;
use crate::{errors::ApplyError, utils::sequence::Sequence};

/// A single change to an ordered sequence.
///
/// Deletes carry the value they expect to remove so that applying them to a
/// sequence which has diverged from the assumed state fails instead of
/// silently removing the wrong element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "OperationRecord<T>",
        into = "OperationRecord<T>",
        bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
    )
)]
#[derive(Clone, PartialEq, Eq)]
pub enum Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    Noop,

    Insert { position: usize, value: T },

    Delete { position: usize, value: T },
}

impl<T> Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    #[must_use]
    pub fn noop() -> Self { Operation::Noop }

    /// Creates an operation inserting `value` so that it ends up at
    /// `position`.
    #[must_use]
    pub fn insert(position: usize, value: T) -> Self { Operation::Insert { position, value } }

    /// Creates an operation removing the element at `position`, which is
    /// expected to equal `value`.
    #[must_use]
    pub fn delete(position: usize, value: T) -> Self { Operation::Delete { position, value } }

    pub fn is_noop(&self) -> bool { matches!(self, Operation::Noop) }

    pub fn is_insert(&self) -> bool { matches!(self, Operation::Insert { .. }) }

    pub fn is_delete(&self) -> bool { matches!(self, Operation::Delete { .. }) }

    /// Returns the position the operation targets, `None` for a no-op.
    pub fn position(&self) -> Option<usize> {
        match self {
            Operation::Noop => None,
            Operation::Insert { position, .. } | Operation::Delete { position, .. } => {
                Some(*position)
            }
        }
    }

    /// Returns the inserted or the expected deleted value, `None` for a
    /// no-op.
    pub fn value(&self) -> Option<&T> {
        match self {
            Operation::Noop => None,
            Operation::Insert { value, .. } | Operation::Delete { value, .. } => Some(value),
        }
    }

    /// Applies the operation to `sequence` in place and returns it to allow
    /// chaining.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::OutOfBounds`] if an insert targets a position past the
    ///   end of the sequence or a delete targets a missing element.
    /// - [`ApplyError::PreconditionMismatch`] if the element at a delete's
    ///   position is not equal to the delete's value.
    ///
    /// The sequence is left untouched when an error is returned.
    pub fn apply<'a, S>(&self, sequence: &'a mut S) -> Result<&'a mut S, ApplyError<T>>
    where
        S: Sequence<Item = T> + ?Sized,
    {
        match self {
            Operation::Noop => {}
            Operation::Insert { position, value } => {
                if *position > sequence.len() {
                    log::debug!("Cannot apply {self} to a sequence of length {}", sequence.len());
                    return Err(ApplyError::OutOfBounds {
                        position: *position,
                        length: sequence.len(),
                    });
                }

                sequence.insert(*position, value.clone());
            }
            Operation::Delete { position, value } => {
                let Some(found) = sequence.get(*position) else {
                    log::debug!("Cannot apply {self} to a sequence of length {}", sequence.len());
                    return Err(ApplyError::OutOfBounds {
                        position: *position,
                        length: sequence.len(),
                    });
                };

                if found != value {
                    log::debug!("Cannot apply {self} because {found:?} is in its place");
                    return Err(ApplyError::PreconditionMismatch {
                        position: *position,
                        expected: value.clone(),
                        found: found.clone(),
                    });
                }

                sequence.remove(*position);
            }
        }

        Ok(sequence)
    }

    /// Returns the operation undoing `self`. Applying the result right after
    /// `self` restores the original sequence.
    #[must_use]
    pub fn invert(&self) -> Self {
        match self {
            Operation::Noop => Operation::Noop,
            Operation::Insert { position, value } => Operation::delete(*position, value.clone()),
            Operation::Delete { position, value } => Operation::insert(*position, value.clone()),
        }
    }

    /// Returns true iff both operations are inserts at the same position,
    /// which is the only pairing with an ambiguous outcome.
    pub fn has_conflict(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Operation::Insert { position, .. },
                Operation::Insert {
                    position: other_position,
                    ..
                },
            ) => position == other_position,
            _ => false,
        }
    }

    /// Creates a new operation with the same type and value but with the
    /// given position. A no-op stays a no-op.
    #[must_use]
    pub fn with_position(self, position: usize) -> Self {
        match self {
            Operation::Noop => Operation::Noop,
            Operation::Insert { value, .. } => Operation::Insert { position, value },
            Operation::Delete { value, .. } => Operation::Delete { position, value },
        }
    }

    /// Creates a new operation with the position shifted by the given offset.
    /// The offset can be negative but the resulting position must be
    /// non-negative and fit in a `usize`.
    ///
    /// # Panics
    ///
    /// Panics if the resulting position is negative or overflows.
    #[must_use]
    pub fn with_shifted_position(self, offset: isize) -> Self {
        let Some(position) = self.position() else {
            return self;
        };

        let Some(shifted) = position.checked_add_signed(offset) else {
            panic!("Shifting position {position} by {offset} is out of range");
        };

        self.with_position(shifted)
    }

    /// Shifts the position in place, see [`Operation::with_shifted_position`].
    pub(crate) fn shift_position(&mut self, offset: isize) {
        let operation = std::mem::replace(self, Operation::Noop);
        *self = operation.with_shifted_position(offset);
    }
}

impl<T> Display for Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operation::Noop => write!(f, "<noop>"),
            Operation::Insert { position, value } => {
                write!(f, "<insert {value:?} at {position}>")
            }
            Operation::Delete { position, value } => {
                write!(f, "<delete {value:?} at {position}>")
            }
        }
    }
}

impl<T> Debug for Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result { write!(f, "{self}") }
}
