use core::{
    cmp::Ordering,
    fmt::{self, Debug},
    mem, ptr, slice,
};

use snafu::{ensure, OptionExt};
use vector_debug_flags::dbg_do;
use vector_tracing::debug;

use crate::{
    error::{
        CapacityOverflowSnafu, EmptyContainerSnafu, IndexOutOfRangeSnafu, InvalidArgumentSnafu,
        VectorResult,
    },
    storage::RawBuffer,
};

/// A contiguous, growable sequence of `T` with exact capacity bookkeeping.
///
/// Capacity only changes when the vector is full (it doubles, and an empty
/// allocation grows to a single slot) or when [`resize`](Vector::resize) asks for
/// an exact size. Every index is checked, and values only ever leave the vector by
/// clone or by move, so growing never invalidates anything a caller holds.
pub struct Vector<T> {
    buffer: RawBuffer<T>,
    length: usize,
}

// The buffer is uniquely owned, so thread-safety is exactly that of `T`.
unsafe impl<T: Send> Send for Vector<T> {}
unsafe impl<T: Sync> Sync for Vector<T> {}

/// The capacity to grow to when a vector of `capacity` slots is full.
fn grown_capacity(capacity: usize) -> VectorResult<usize> {
    if capacity == 0 {
        Ok(1)
    } else {
        capacity.checked_mul(2).context(CapacityOverflowSnafu {
            requested: capacity.saturating_mul(2),
        })
    }
}

impl<T> Vector<T> {
    /// An empty vector that has not allocated.
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::empty(),
            length: 0,
        }
    }

    /// An empty vector with room for exactly `capacity` elements.
    /// A capacity of 0 does not allocate.
    pub fn with_capacity(capacity: usize) -> VectorResult<Self> {
        Ok(Self {
            buffer: RawBuffer::with_capacity(capacity)?,
            length: 0,
        })
    }

    /// Re-initializes this vector in place as if by [`with_capacity`](Vector::with_capacity),
    /// dropping whatever it held. If the new allocation fails, the vector is unchanged.
    pub fn init(&mut self, capacity: usize) -> VectorResult<()> {
        let buffer = RawBuffer::with_capacity(capacity)?;

        self.release();
        self.buffer = buffer;
        self.debug_check();

        Ok(())
    }

    /// Builds a vector holding clones of `elements`, with capacity equal to their count.
    pub fn from_slice(elements: &[T]) -> VectorResult<Self>
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity(elements.len())?;
        vector.extend_from_slice(elements)?;

        Ok(vector)
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The size in bytes of one element slot.
    pub fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.length) }
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buffer.as_ptr(), self.length) }
    }

    fn check_index(&self, index: usize) -> VectorResult<()> {
        ensure!(
            index < self.length,
            IndexOutOfRangeSnafu {
                index,
                len: self.length
            }
        );

        Ok(())
    }

    fn reallocate(&mut self, new_capacity: usize) -> VectorResult<()> {
        debug!(
            capacity = self.buffer.capacity(),
            new_capacity,
            element_size = self.element_size(),
            "reallocating vector storage"
        );

        self.buffer.reallocate(new_capacity)
    }

    fn grow_if_full(&mut self) -> VectorResult<()> {
        if self.length == self.buffer.capacity() {
            self.reallocate(grown_capacity(self.buffer.capacity())?)?;
        }

        Ok(())
    }

    /// Appends `value`, doubling the capacity first if the vector is full.
    pub fn push(&mut self, value: T) -> VectorResult<()> {
        self.grow_if_full()?;

        unsafe {
            self.buffer.as_ptr().add(self.length).write(value);
        }
        self.length += 1;
        self.debug_check();

        Ok(())
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> VectorResult<T>
    where
        T: Clone,
    {
        let element = self.as_slice().get(index).context(IndexOutOfRangeSnafu {
            index,
            len: self.length,
        })?;

        Ok(element.clone())
    }

    /// Overwrites the element at `index`, dropping the previous one.
    pub fn set(&mut self, index: usize, value: T) -> VectorResult<()> {
        let len = self.length;
        let slot = self
            .as_mut_slice()
            .get_mut(index)
            .context(IndexOutOfRangeSnafu { index, len })?;

        *slot = value;

        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> VectorResult<T> {
        ensure!(self.length > 0, EmptyContainerSnafu);

        self.length -= 1;
        let value = unsafe { self.buffer.as_ptr().add(self.length).read() };
        self.debug_check();

        Ok(value)
    }

    /// Removes and returns the element at `index`, shifting everything after it one slot
    /// to the left. The order of the remaining elements is preserved.
    pub fn remove(&mut self, index: usize) -> VectorResult<T> {
        self.check_index(index)?;

        let moved = self.length - index - 1;
        let value = unsafe {
            let hole = self.buffer.as_ptr().add(index);
            let value = hole.read();

            ptr::copy(hole.add(1), hole, moved);

            value
        };
        self.length -= 1;

        dbg_do!(
            vector_debug_flags::VECTOR_TRACE_SHIFTS,
            debug!(index, moved, "shifted elements left")
        );
        self.debug_check();

        Ok(value)
    }

    /// Removes and returns the element at `index`, moving the last element into its place.
    /// O(1), but does not preserve order.
    pub fn swap_remove(&mut self, index: usize) -> VectorResult<T> {
        self.check_index(index)?;

        let last = self.length - 1;
        let value = unsafe {
            let base = self.buffer.as_ptr();
            let value = base.add(index).read();

            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }

            value
        };
        self.length = last;
        self.debug_check();

        Ok(value)
    }

    /// Inserts `value` at `index`, shifting the elements at `index..len` one slot to the
    /// right. Inserting at `len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> VectorResult<()> {
        ensure!(
            index <= self.length,
            IndexOutOfRangeSnafu {
                index,
                len: self.length
            }
        );

        self.grow_if_full()?;

        let moved = self.length - index;
        unsafe {
            let slot = self.buffer.as_ptr().add(index);

            ptr::copy(slot, slot.add(1), moved);
            slot.write(value);
        }
        self.length += 1;

        dbg_do!(
            vector_debug_flags::VECTOR_TRACE_SHIFTS,
            debug!(index, moved, "shifted elements right")
        );
        self.debug_check();

        Ok(())
    }

    /// Reallocates to exactly `new_capacity` slots. Shrinking below the current length is
    /// rejected, and a capacity of 0 (on an empty vector) gives the buffer back.
    pub fn resize(&mut self, new_capacity: usize) -> VectorResult<()> {
        ensure!(
            new_capacity >= self.length,
            InvalidArgumentSnafu {
                requested: new_capacity,
                len: self.length
            }
        );

        self.reallocate(new_capacity)?;
        self.debug_check();

        Ok(())
    }

    /// Makes sure `additional` more elements fit, doubling the capacity as many times
    /// as that takes.
    pub fn reserve(&mut self, additional: usize) -> VectorResult<()> {
        let required = self
            .length
            .checked_add(additional)
            .context(CapacityOverflowSnafu {
                requested: usize::MAX,
            })?;

        let mut capacity = self.buffer.capacity();

        if required <= capacity {
            return Ok(());
        }

        while capacity < required {
            capacity = grown_capacity(capacity)?;
        }

        self.reallocate(capacity)?;
        self.debug_check();

        Ok(())
    }

    pub fn shrink_to_fit(&mut self) -> VectorResult<()> {
        self.resize(self.length)
    }

    /// Appends clones of `elements`, reserving room for all of them up front.
    pub fn extend_from_slice(&mut self, elements: &[T]) -> VectorResult<()>
    where
        T: Clone,
    {
        self.reserve(elements.len())?;

        for element in elements {
            unsafe {
                self.buffer.as_ptr().add(self.length).write(element.clone());
            }

            // Bumped one at a time, so a panicking `clone` never leaves
            // uninitialized slots inside the live range.
            self.length += 1;
        }
        self.debug_check();

        Ok(())
    }

    /// Drops every element. The capacity, and the allocation, are kept for reuse.
    pub fn clear(&mut self) {
        // Zero the length first so a panicking destructor can't cause a double drop.
        let len = mem::replace(&mut self.length, 0);

        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buffer.as_ptr(), len));
        }
    }

    /// Drops every element and gives the allocation back, leaving a vector with
    /// length and capacity 0. Calling it again is a no-op, and the vector can be
    /// re-initialized with [`init`](Vector::init) or simply pushed to.
    pub fn release(&mut self) {
        self.clear();

        if self.buffer.is_allocated() {
            debug!(
                capacity = self.buffer.capacity(),
                element_size = self.element_size(),
                "releasing vector storage"
            );

            self.buffer.deallocate();
        }
    }

    /// Whether any element is `Equal` to `value` under `compare`.
    /// Elements are passed as the first argument.
    pub fn contains<F>(&self, value: &T, mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_slice()
            .iter()
            .any(|element| compare(element, value) == Ordering::Equal)
    }

    /// Exchanges the elements at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> VectorResult<()> {
        self.check_index(a)?;
        self.check_index(b)?;

        self.as_mut_slice().swap(a, b);

        Ok(())
    }

    /// Sorts the elements in place into non-decreasing order under `compare`.
    /// The sort is not stable.
    pub fn sort<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(compare);
    }

    /// A deep copy whose capacity equals this vector's length.
    pub fn try_clone(&self) -> VectorResult<Self>
    where
        T: Clone,
    {
        Self::from_slice(self.as_slice())
    }

    /// Copies the elements out into a `std` vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Panics if the length, capacity and allocation disagree with each other.
    pub fn assert_invariants(&self) {
        let capacity = self.buffer.capacity();

        assert!(
            self.length <= capacity,
            "Vector length {} exceeds its capacity {}",
            self.length,
            capacity
        );
        assert_eq!(
            self.buffer.is_allocated(),
            capacity > 0,
            "Vector with capacity {} has allocation state {}",
            capacity,
            self.buffer.is_allocated()
        );
    }

    #[inline(always)]
    fn debug_check(&self) {
        dbg_do!(
            vector_debug_flags::VECTOR_CHECK_INVARIANTS,
            self.assert_invariants()
        );
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // The buffer deallocates itself once the elements are gone.
        self.clear();
    }
}

impl<T, U> PartialEq<Vector<U>> for Vector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vector<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}
