use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{errors::InvalidOperationError, operation_transformation::Operation};

pub const NOOP_TYPE: &str = "NOP";
pub const INSERT_TYPE: &str = "insert";
pub const DELETE_TYPE: &str = "delete";

/// The plain record form of an `Operation`, used for construction from
/// untrusted input and for persisting or shipping operations.
///
/// ```
/// use sequence_ot::{Operation, OperationRecord};
///
/// let record = OperationRecord::new("insert", Some(1), Some('x'));
/// let operation = Operation::try_from(record).unwrap();
/// assert_eq!(operation, Operation::insert(1, 'x'));
///
/// assert!(Operation::try_from(OperationRecord::new("insert", Some(-1), Some('x'))).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord<T> {
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: String,

    /// Wide enough to hold every `usize` as well as the negative values
    /// that construction has to reject.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub position: Option<i128>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<T>,
}

impl<T> OperationRecord<T> {
    pub fn new(kind: impl Into<String>, position: Option<i128>, value: Option<T>) -> Self {
        OperationRecord {
            kind: kind.into(),
            position,
            value,
        }
    }
}

impl<T> TryFrom<OperationRecord<T>> for Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    type Error = InvalidOperationError;

    fn try_from(record: OperationRecord<T>) -> Result<Self, Self::Error> {
        let OperationRecord {
            kind,
            position,
            value,
        } = record;

        let is_insert = match kind.as_str() {
            NOOP_TYPE => return Ok(Operation::Noop),
            INSERT_TYPE => true,
            DELETE_TYPE => false,
            "" => return Err(InvalidOperationError::MissingType),
            _ => return Err(InvalidOperationError::UnknownType(kind)),
        };

        let position = position.ok_or(InvalidOperationError::MissingPosition)?;
        let position = usize::try_from(position).map_err(|_| {
            if position < 0 {
                InvalidOperationError::NegativePosition(position)
            } else {
                InvalidOperationError::PositionOutOfRange(position)
            }
        })?;
        let value = value.ok_or(InvalidOperationError::MissingValue)?;

        Ok(if is_insert {
            Operation::insert(position, value)
        } else {
            Operation::delete(position, value)
        })
    }
}

impl<T> From<Operation<T>> for OperationRecord<T>
where
    T: PartialEq + Clone + Debug,
{
    fn from(operation: Operation<T>) -> Self {
        match operation {
            Operation::Noop => OperationRecord::new(NOOP_TYPE, None, None),
            Operation::Insert { position, value } => {
                OperationRecord::new(INSERT_TYPE, Some(widen(position)), Some(value))
            }
            Operation::Delete { position, value } => {
                OperationRecord::new(DELETE_TYPE, Some(widen(position)), Some(value))
            }
        }
    }
}

// `usize` is at most 64 bits wide on every supported target, so this never
// truncates or wraps.
#[allow(clippy::cast_lossless)]
fn widen(position: usize) -> i128 { position as i128 }

impl<T> Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    /// Validates `record` and builds the operation it describes.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidOperationError`] if the type is missing or
    /// unknown, or if an insert or delete lacks a non-negative position or
    /// a value.
    pub fn from_record(record: OperationRecord<T>) -> Result<Self, InvalidOperationError> {
        Operation::try_from(record)
    }

    /// Returns the record form of the operation, cloning its value.
    #[must_use]
    pub fn to_record(&self) -> OperationRecord<T> { OperationRecord::from(self.clone()) }
}
