//! Provides testing utility functions for use throughout the vector crates.

use std::{cell::Cell, rc::Rc};

#[doc(hidden)]
pub use pretty_assertions::assert_eq as _pretty_assert_eq;

/// Asserts that a vector's elements, copied out in order, equal the given list.
///
/// ```ignore
/// assert_contents!(numbers, [10, 15, 20, 30]);
/// ```
#[macro_export]
macro_rules! assert_contents {
    ($vector:expr, [$($element:expr),* $(,)?]) => {
        $crate::_pretty_assert_eq!($vector.to_vec(), vec![$($element),*])
    };
}

/// The three-way integer comparator the C-style tests are written against:
/// negative when `a < b`, zero when equal, positive when `a > b`.
pub fn compare_ints(a: &i32, b: &i32) -> i32 {
    if a < b {
        -1
    } else if a > b {
        1
    } else {
        0
    }
}

/// A value that counts how many times it (or any clone of it) has been dropped.
///
/// Used to check that every element a vector owns is dropped exactly once.
#[derive(Debug, Clone)]
pub struct DropCounter {
    pub id: u32,
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    /// Returns the shared counter and a factory for values that report to it.
    pub fn tracker() -> (Rc<Cell<usize>>, impl Fn(u32) -> DropCounter) {
        let drops = Rc::new(Cell::new(0));
        let shared = Rc::clone(&drops);

        (drops, move |id| DropCounter {
            id,
            drops: Rc::clone(&shared),
        })
    }
}

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
