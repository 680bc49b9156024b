use std::fmt::Debug;

use thiserror::Error;

use super::Operation;

/// Returned by a strict transform when both operations insert at the same
/// position. Holds the two operations as they were before transforming so
/// that the caller can present them or fall back to a resolution policy.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Conflicting operations: {a} and {b} both insert at position {position}")]
pub struct Conflict<T>
where
    T: PartialEq + Clone + Debug,
{
    a: Operation<T>,
    b: Operation<T>,
    position: usize,
}

impl<T> Conflict<T>
where
    T: PartialEq + Clone + Debug,
{
    pub(crate) fn new(a: Operation<T>, b: Operation<T>, position: usize) -> Self {
        Conflict { a, b, position }
    }

    /// The first operand of the failed transform.
    pub fn a(&self) -> &Operation<T> { &self.a }

    /// The second operand of the failed transform.
    pub fn b(&self) -> &Operation<T> { &self.b }

    /// The position both inserts target.
    pub fn position(&self) -> usize { self.position }

    /// Gives back ownership of both operands.
    pub fn into_operations(self) -> (Operation<T>, Operation<T>) { (self.a, self.b) }
}
