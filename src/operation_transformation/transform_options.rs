#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options accepted by [`transform_with_options`](crate::transform_with_options)
/// and [`transform_in_place`](crate::transform_in_place).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// When set, two inserts at the same position produce a
    /// [`Conflict`](crate::Conflict) instead of being ordered by the
    /// tie-break rule.
    pub strict: bool,
}

impl TransformOptions {
    /// Options that resolve every pairing deterministically.
    #[must_use]
    pub fn lenient() -> Self { TransformOptions { strict: false } }

    /// Options that report same-position inserts as a conflict.
    #[must_use]
    pub fn strict() -> Self { TransformOptions { strict: true } }
}
