//! Adapters that turn other comparison styles into the `FnMut(&T, &T) -> Ordering`
//! closures taken by [`Vector::contains`](crate::Vector::contains) and
//! [`Vector::sort`](crate::Vector::sort).

use core::cmp::Ordering;

/// Adapts a three-way comparator, which returns a negative number when `a < b`, zero when
/// they are equal and a positive number when `a > b`.
///
/// ```
/// use vector::{compare, Vector};
///
/// fn by_magnitude(a: &i64, b: &i64) -> i32 {
///     (a.abs() - b.abs()).signum() as i32
/// }
///
/// let mut numbers = Vector::from_slice(&[-3, 1, -2]).unwrap();
/// numbers.sort(compare::three_way(by_magnitude));
///
/// assert_eq!(numbers.to_vec(), vec![1, -2, -3]);
/// ```
pub fn three_way<T, F>(mut compare: F) -> impl FnMut(&T, &T) -> Ordering
where
    F: FnMut(&T, &T) -> i32,
{
    move |a: &T, b: &T| compare(a, b).cmp(&0)
}

/// The element type's own total order.
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}
