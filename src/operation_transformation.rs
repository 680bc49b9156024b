mod conflict;
mod operation;
mod transform_options;
mod transport;

use std::fmt::Debug;

pub use conflict::Conflict;
pub use operation::Operation;
pub use transform_options::TransformOptions;
pub use transport::OperationRecord;

/// Given two operations created concurrently against the same sequence,
/// return `(a', b')` such that applying `a` then `b'` yields the same
/// sequence as applying `b` then `a'`.
///
/// When both operations insert at the same position, `a` keeps its position
/// and `b` is moved after it. Use [`transform_with_options`] with
/// [`TransformOptions::strict`] to be notified about these cases instead.
///
/// # Panics
///
/// Panics if a position would have to be shifted past `usize::MAX`. Such
/// an operation can never be applied to a sequence.
///
/// ```
/// use sequence_ot::{Operation, transform};
///
/// let base = vec!['a', 'b', 'c'];
/// let insert = Operation::insert(1, 'x');
/// let delete = Operation::delete(2, 'c');
///
/// let (transformed_insert, transformed_delete) = transform(&insert, &delete);
///
/// let mut left = base.clone();
/// insert.apply(&mut left)?;
/// transformed_delete.apply(&mut left)?;
///
/// let mut right = base.clone();
/// delete.apply(&mut right)?;
/// transformed_insert.apply(&mut right)?;
///
/// assert_eq!(left, vec!['a', 'x', 'b']);
/// assert_eq!(left, right);
/// # Ok::<(), sequence_ot::ApplyError<char>>(())
/// ```
#[must_use]
pub fn transform<T>(a: &Operation<T>, b: &Operation<T>) -> (Operation<T>, Operation<T>)
where
    T: PartialEq + Clone + Debug,
{
    let mut a = a.clone();
    let mut b = b.clone();
    transform_operations(&mut a, &mut b);

    (a, b)
}

/// Same as [`transform`] but leaves the tie-break for same-position inserts
/// up to `options`. The inputs are never modified.
///
/// # Errors
///
/// Returns a [`Conflict`] holding copies of the untransformed operands if
/// `options.strict` is set and both operations insert at the same position.
///
/// # Panics
///
/// Under the same condition as [`transform`].
pub fn transform_with_options<T>(
    a: &Operation<T>,
    b: &Operation<T>,
    options: TransformOptions,
) -> Result<(Operation<T>, Operation<T>), Conflict<T>>
where
    T: PartialEq + Clone + Debug,
{
    check_conflict(a, b, options)?;

    Ok(transform(a, b))
}

/// Transforms `a` and `b` against each other by updating them in place,
/// avoiding the copies made by [`transform_with_options`]. Useful when
/// rebasing an operation over a long history of owned operations.
///
/// # Errors
///
/// Returns a [`Conflict`] under the same condition as
/// [`transform_with_options`]. In that case neither operand is modified.
///
/// # Panics
///
/// Under the same condition as [`transform`].
pub fn transform_in_place<T>(
    a: &mut Operation<T>,
    b: &mut Operation<T>,
    options: TransformOptions,
) -> Result<(), Conflict<T>>
where
    T: PartialEq + Clone + Debug,
{
    check_conflict(a, b, options)?;
    transform_operations(a, b);

    Ok(())
}

/// Returns true iff `a` and `b` are inserts at the same position.
pub fn has_conflict<T>(a: &Operation<T>, b: &Operation<T>) -> bool
where
    T: PartialEq + Clone + Debug,
{
    a.has_conflict(b)
}

impl<T> Operation<T>
where
    T: PartialEq + Clone + Debug,
{
    /// See [`transform_with_options`].
    ///
    /// # Errors
    ///
    /// Returns a [`Conflict`] in strict mode for same-position inserts.
    pub fn transform(
        a: &Self,
        b: &Self,
        options: TransformOptions,
    ) -> Result<(Self, Self), Conflict<T>> {
        transform_with_options(a, b, options)
    }
}

fn check_conflict<T>(
    a: &Operation<T>,
    b: &Operation<T>,
    options: TransformOptions,
) -> Result<(), Conflict<T>>
where
    T: PartialEq + Clone + Debug,
{
    match (a, b) {
        (Operation::Insert { position, .. }, _) if options.strict && a.has_conflict(b) => {
            log::debug!("Conflict between {a} and {b}");
            Err(Conflict::new(a.clone(), b.clone(), *position))
        }
        _ => Ok(()),
    }
}

fn transform_operations<T>(a: &mut Operation<T>, b: &mut Operation<T>)
where
    T: PartialEq + Clone + Debug,
{
    log::trace!("Transforming {a} against {b}");

    match (&*a, &*b) {
        (Operation::Noop, _) | (_, Operation::Noop) => {}

        (
            Operation::Insert { position: a_position, .. },
            Operation::Insert { position: b_position, .. },
        ) => {
            // `b` goes after `a` when both insert at the same position
            if a_position <= b_position {
                b.shift_position(1);
            } else {
                a.shift_position(1);
            }
        }

        (
            Operation::Delete { position: a_position, .. },
            Operation::Delete { position: b_position, .. },
        ) => {
            if a_position == b_position {
                // Both removed the same element
                *a = Operation::Noop;
                *b = Operation::Noop;
            } else if a_position < b_position {
                b.shift_position(-1);
            } else {
                a.shift_position(-1);
            }
        }

        (
            Operation::Insert {
                position: insert_position,
                ..
            },
            Operation::Delete {
                position: delete_position,
                ..
            },
        ) => {
            if insert_position <= delete_position {
                b.shift_position(1);
            } else {
                a.shift_position(-1);
            }
        }

        (
            Operation::Delete {
                position: delete_position,
                ..
            },
            Operation::Insert {
                position: insert_position,
                ..
            },
        ) => {
            if insert_position <= delete_position {
                a.shift_position(1);
            } else {
                b.shift_position(-1);
            }
        }
    }

    log::trace!("Transformed into {a} and {b}");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn apply_all(base: &[char], operations: &[&Operation<char>]) -> Vec<char> {
        let mut sequence = base.to_vec();
        for operation in operations {
            operation.apply(&mut sequence).unwrap();
        }
        sequence
    }

    fn assert_converges(base: &[char], a: &Operation<char>, b: &Operation<char>) -> Vec<char> {
        let (transformed_a, transformed_b) = transform(a, b);

        let left = apply_all(base, &[a, &transformed_b]);
        let right = apply_all(base, &[b, &transformed_a]);
        assert_eq!(left, right, "{a} and {b} diverged");

        left
    }

    #[test]
    fn test_insert_before_delete() {
        let base = ['a', 'b', 'c'];
        let insert = Operation::insert(1, 'x');
        let delete = Operation::delete(2, 'c');

        let (transformed_insert, transformed_delete) = transform(&insert, &delete);

        assert_eq!(transformed_insert, Operation::insert(1, 'x'));
        assert_eq!(transformed_delete, Operation::delete(3, 'c'));
        assert_eq!(
            assert_converges(&base, &insert, &delete),
            vec!['a', 'x', 'b']
        );
    }

    #[test]
    fn test_insert_after_delete() {
        let base = ['a', 'b', 'c'];
        let insert = Operation::insert(2, 'x');
        let delete = Operation::delete(0, 'a');

        let (transformed_delete, transformed_insert) = transform(&delete, &insert);

        assert_eq!(transformed_delete, Operation::delete(0, 'a'));
        assert_eq!(transformed_insert, Operation::insert(1, 'x'));
        assert_eq!(
            assert_converges(&base, &delete, &insert),
            vec!['b', 'x', 'c']
        );
    }

    #[test]
    fn test_insert_at_deleted_position() {
        let base = ['a', 'b'];
        let insert = Operation::insert(1, 'x');
        let delete = Operation::delete(1, 'b');

        let (transformed_insert, transformed_delete) = transform(&insert, &delete);

        assert_eq!(transformed_insert, Operation::insert(1, 'x'));
        assert_eq!(transformed_delete, Operation::delete(2, 'b'));
        assert_eq!(assert_converges(&base, &insert, &delete), vec!['a', 'x']);
    }

    #[test]
    fn test_same_position_inserts_prefer_first_operand() {
        let base = ['a'];
        let first = Operation::insert(0, 'x');
        let second = Operation::insert(0, 'y');

        let (transformed_first, transformed_second) = transform(&first, &second);
        assert_eq!(transformed_first, Operation::insert(0, 'x'));
        assert_eq!(transformed_second, Operation::insert(1, 'y'));
        assert_eq!(
            assert_converges(&base, &first, &second),
            vec!['x', 'y', 'a']
        );

        let (transformed_second, transformed_first) = transform(&second, &first);
        assert_eq!(transformed_second, Operation::insert(0, 'y'));
        assert_eq!(transformed_first, Operation::insert(1, 'x'));
        assert_eq!(
            assert_converges(&base, &second, &first),
            vec!['y', 'x', 'a']
        );
    }

    #[test_case(0, 2, (Operation::insert(0, 'x'), Operation::insert(3, 'y')); "a before b")]
    #[test_case(2, 0, (Operation::insert(3, 'x'), Operation::insert(0, 'y')); "a after b")]
    fn test_insert_insert(a: usize, b: usize, expected: (Operation<char>, Operation<char>)) {
        let a = Operation::insert(a, 'x');
        let b = Operation::insert(b, 'y');
        assert_converges(&['a', 'b', 'c'], &a, &b);

        assert_eq!(transform(&a, &b), expected);
    }

    #[test_case(0, 2, (Operation::delete(0, 'a'), Operation::delete(1, 'c')); "a before b")]
    #[test_case(2, 0, (Operation::delete(1, 'c'), Operation::delete(0, 'a')); "a after b")]
    fn test_delete_delete(a: usize, b: usize, expected: (Operation<char>, Operation<char>)) {
        let base = ['a', 'b', 'c'];
        let a = Operation::delete(a, base[a]);
        let b = Operation::delete(b, base[b]);
        assert_converges(&base, &a, &b);

        assert_eq!(transform(&a, &b), expected);
    }

    #[test_case(Operation::insert(3, 'x'), Operation::delete(1, 'b'), (Operation::insert(2, 'x'), Operation::delete(1, 'b')); "insert after delete")]
    #[test_case(Operation::insert(1, 'x'), Operation::delete(1, 'b'), (Operation::insert(1, 'x'), Operation::delete(2, 'b')); "insert at delete")]
    #[test_case(Operation::delete(1, 'b'), Operation::insert(3, 'x'), (Operation::delete(1, 'b'), Operation::insert(2, 'x')); "delete before insert")]
    #[test_case(Operation::delete(2, 'c'), Operation::insert(0, 'x'), (Operation::delete(3, 'c'), Operation::insert(0, 'x')); "delete after insert")]
    fn test_insert_delete_in_either_order(
        a: Operation<char>,
        b: Operation<char>,
        expected: (Operation<char>, Operation<char>),
    ) {
        assert_converges(&['a', 'b', 'c'], &a, &b);
        assert_eq!(transform(&a, &b), expected);
    }

    #[test]
    #[should_panic(expected = "is out of range")]
    fn test_inserts_past_usize_max() {
        let _ = transform(
            &Operation::insert(usize::MAX, 'x'),
            &Operation::insert(usize::MAX, 'y'),
        );
    }

    #[test]
    fn test_insert_after_delete_at_usize_max() {
        let insert = Operation::insert(usize::MAX, 'x');
        let delete = Operation::delete(0, 'a');

        assert_eq!(
            transform(&insert, &delete),
            (Operation::insert(usize::MAX - 1, 'x'), delete.clone())
        );
    }

    #[test]
    fn test_same_position_deletes_become_noops() {
        let base = ['a', 'b'];
        let a = Operation::delete(1, 'b');
        let b = Operation::delete(1, 'b');

        assert_eq!(transform(&a, &b), (Operation::noop(), Operation::noop()));
        assert_eq!(assert_converges(&base, &a, &b), vec!['a']);
        assert!(!a.has_conflict(&b));
    }

    #[test_case(Operation::insert(1, 'x'))]
    #[test_case(Operation::delete(0, 'a'))]
    #[test_case(Operation::noop())]
    fn test_noop_is_absorbing(operation: Operation<char>) {
        assert_eq!(
            transform(&Operation::noop(), &operation),
            (Operation::noop(), operation.clone())
        );
        assert_eq!(
            transform(&operation, &Operation::noop()),
            (operation.clone(), Operation::noop())
        );
    }

    #[test]
    fn test_strict_mode_reports_conflicts() {
        let a = Operation::insert(0, 'x');
        let b = Operation::insert(0, 'y');

        let conflict = transform_with_options(&a, &b, TransformOptions::strict()).unwrap_err();

        assert_eq!(conflict.a(), &a);
        assert_eq!(conflict.b(), &b);
        assert_eq!(conflict.position(), 0);
        insta::assert_snapshot!(
            conflict,
            @"Conflicting operations: <insert 'x' at 0> and <insert 'y' at 0> both insert at position 0"
        );

        assert_eq!(
            transform_with_options(&a, &b, TransformOptions::default()),
            Ok(transform(&a, &b))
        );
    }

    #[test_case(Operation::insert(0, 'x'), Operation::insert(1, 'y'))]
    #[test_case(Operation::delete(0, 'a'), Operation::delete(0, 'a'))]
    #[test_case(Operation::insert(0, 'x'), Operation::delete(0, 'a'))]
    #[test_case(Operation::noop(), Operation::insert(0, 'x'))]
    fn test_strict_mode_without_conflict(a: Operation<char>, b: Operation<char>) {
        assert_eq!(
            Operation::transform(&a, &b, TransformOptions::strict()),
            Ok(transform(&a, &b))
        );
    }

    #[test]
    fn test_transform_does_not_modify_inputs() {
        let a = Operation::delete(1, 'b');
        let b = Operation::delete(1, 'b');

        let _ = transform(&a, &b);

        assert_eq!(a, Operation::delete(1, 'b'));
        assert_eq!(b, Operation::delete(1, 'b'));
    }

    #[test]
    fn test_transform_in_place() {
        let mut a = Operation::insert(1, 'x');
        let mut b = Operation::delete(2, 'c');

        transform_in_place(&mut a, &mut b, TransformOptions::default()).unwrap();

        assert_eq!(a, Operation::insert(1, 'x'));
        assert_eq!(b, Operation::delete(3, 'c'));
    }

    #[test]
    fn test_transform_in_place_leaves_operands_on_conflict() {
        let mut a = Operation::insert(1, 'x');
        let mut b = Operation::insert(1, 'y');

        let conflict = transform_in_place(&mut a, &mut b, TransformOptions::strict()).unwrap_err();

        assert_eq!(conflict.into_operations(), (a.clone(), b.clone()));
        assert_eq!(a, Operation::insert(1, 'x'));
        assert_eq!(b, Operation::insert(1, 'y'));
    }

    #[test]
    fn test_rebase_over_history() {
        // A local insert created against `base` is rebased over two remote
        // operations that were applied in the meantime.
        let base = vec!['a', 'b', 'c', 'd'];
        let remote = [Operation::delete(0, 'a'), Operation::insert(2, 'y')];
        let mut local = Operation::insert(3, 'x');

        let mut remote_sequence = base.clone();
        for operation in &remote {
            let mut operation = operation.clone();
            operation.apply(&mut remote_sequence).unwrap();
            transform_in_place(&mut operation, &mut local, TransformOptions::default()).unwrap();
        }

        local.apply(&mut remote_sequence).unwrap();
        assert_eq!(remote_sequence, vec!['b', 'c', 'y', 'x', 'd']);
    }
}
