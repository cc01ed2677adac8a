//! A growable vector for any element type.
//!
//! [`Vector`] owns one contiguous buffer and tracks its capacity exactly: appending to a
//! full vector doubles the capacity (an unallocated vector grows to one slot), and only
//! [`Vector::resize`] can shrink it. Every operation that takes an index is checked and
//! reports a [`VectorError`] instead of touching memory outside the live elements, and
//! allocation failure comes back as [`VectorError::OutOfMemory`] rather than aborting.
//!
//! Values go in and come out by move or by clone; no reference into the buffer is ever
//! handed out, so reallocation can't invalidate anything a caller holds.
//!
//! ```
//! use vector::{compare, Vector};
//!
//! let mut scores = Vector::with_capacity(2)?;
//! scores.push(20)?;
//! scores.push(5)?;
//! scores.push(25)?;
//!
//! assert_eq!(scores.capacity(), 4);
//!
//! scores.insert(1, 10)?;
//! scores.sort(compare::natural);
//!
//! assert_eq!(scores.to_vec(), vec![5, 10, 20, 25]);
//! assert!(scores.contains(&25, compare::natural));
//! # Ok::<(), vector::VectorError>(())
//! ```

pub mod compare;
mod error;
mod storage;
mod vector;

pub use crate::error::{VectorError, VectorResult};
pub use crate::vector::Vector;
