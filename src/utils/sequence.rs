use std::collections::VecDeque;

/// A positionally addressed collection that operations can be applied to.
///
/// Positions are zero-based. `Operation::apply` checks bounds before calling
/// `insert` or `remove`, so implementations may treat an out-of-range index
/// as a bug and panic, like the standard collections do.
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Inserts `item` at `index`, shifting all later items one slot right.
    ///
    /// # Panics
    ///
    /// May panic if `index > len()`.
    fn insert(&mut self, index: usize, item: Self::Item);

    /// Removes and returns the item at `index`, shifting all later items one
    /// slot left.
    ///
    /// # Panics
    ///
    /// May panic if `index >= len()`.
    fn remove(&mut self, index: usize) -> Self::Item;
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    fn len(&self) -> usize { Vec::len(self) }

    fn get(&self, index: usize) -> Option<&T> { <[T]>::get(self, index) }

    fn insert(&mut self, index: usize, item: T) { Vec::insert(self, index, item); }

    fn remove(&mut self, index: usize) -> T { Vec::remove(self, index) }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize { VecDeque::len(self) }

    fn get(&self, index: usize) -> Option<&T> { VecDeque::get(self, index) }

    fn insert(&mut self, index: usize, item: T) { VecDeque::insert(self, index, item); }

    fn remove(&mut self, index: usize) -> T {
        let len = VecDeque::len(self);
        VecDeque::remove(self, index)
            .unwrap_or_else(|| panic!("removal index (is {index}) should be < len (is {len})"))
    }
}
