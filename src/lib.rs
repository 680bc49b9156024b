//! Pairwise operational transformation for ordered sequences.
//!
//! Two collaborators that edit the same sequence (a list of document nodes,
//! a run of characters, ...) concurrently each produce an [`Operation`].
//! [`transform`] adjusts both operations against each other so that each
//! side can apply the other's change on top of its own and end up with the
//! same sequence.
//!
//! ```
//! use sequence_ot::{Operation, TransformOptions, transform, transform_with_options};
//!
//! let mut left = vec!['a'];
//! let mut right = left.clone();
//!
//! let local = Operation::insert(0, 'x');
//! let remote = Operation::insert(0, 'y');
//!
//! let (local_transformed, remote_transformed) = transform(&local, &remote);
//! local.apply(&mut left)?;
//! remote_transformed.apply(&mut left)?;
//! remote.apply(&mut right)?;
//! local_transformed.apply(&mut right)?;
//! assert_eq!(left, right);
//!
//! // Strict mode surfaces the ambiguous case instead of resolving it
//! assert!(transform_with_options(&local, &remote, TransformOptions::strict()).is_err());
//! # Ok::<(), sequence_ot::ApplyError<char>>(())
//! ```

mod errors;
mod operation_transformation;
mod utils;

pub use errors::{ApplyError, InvalidOperationError};
pub use operation_transformation::{
    Conflict, Operation, OperationRecord, TransformOptions, has_conflict, transform,
    transform_in_place, transform_with_options,
};
pub use utils::sequence::Sequence;
