use core::{
    alloc::Layout,
    marker::PhantomData,
    mem::{align_of, size_of},
    ptr::NonNull,
};
use std::alloc;

use snafu::OptionExt;
use vector_tracing::debug;

use crate::error::{CapacityOverflowSnafu, OutOfMemorySnafu, VectorResult};

/// An allocation of exactly `capacity` uninitialized slots of `T`.
///
/// The buffer does not know which slots hold live values, so it never drops elements;
/// that is the owner's job. Dropping a `RawBuffer` only gives the memory back.
///
/// Zero-sized types never reach the allocator. Their capacity is still tracked so
/// the owner's growth policy behaves the same for every `T`.
pub(crate) struct RawBuffer<T> {
    /// `None` exactly when `capacity` is 0.
    elements: Option<NonNull<T>>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    pub const fn empty() -> Self {
        Self {
            elements: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> VectorResult<Self> {
        let mut buffer = Self::empty();
        buffer.reallocate(capacity)?;

        Ok(buffer)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_allocated(&self) -> bool {
        self.elements.is_some()
    }

    /// Pointer to the first slot. Dangling (but aligned and non-null) when nothing is
    /// allocated, which is still valid for building empty slices.
    pub fn as_ptr(&self) -> *mut T {
        self.elements.unwrap_or(NonNull::dangling()).as_ptr()
    }

    fn layout(capacity: usize) -> VectorResult<Layout> {
        Layout::array::<T>(capacity)
            .ok()
            .context(CapacityOverflowSnafu {
                requested: capacity,
            })
    }

    /// Moves the buffer to an allocation of exactly `new_capacity` slots, keeping the
    /// contents of the first `min(capacity, new_capacity)` slots.
    ///
    /// On failure the buffer is left exactly as it was.
    pub fn reallocate(&mut self, new_capacity: usize) -> VectorResult<()> {
        if new_capacity == self.capacity {
            return Ok(());
        }

        if new_capacity == 0 {
            self.deallocate();
            return Ok(());
        }

        let new_layout = Self::layout(new_capacity)?;

        let new_elements = if new_layout.size() == 0 {
            NonNull::dangling()
        } else {
            let new_ptr = match self.elements {
                None => unsafe { alloc::alloc(new_layout) },
                Some(elements) => unsafe {
                    // This layout was valid when the current allocation was made.
                    let old_layout = Layout::from_size_align_unchecked(
                        size_of::<T>() * self.capacity,
                        align_of::<T>(),
                    );

                    alloc::realloc(elements.as_ptr().cast(), old_layout, new_layout.size())
                },
            };

            NonNull::new(new_ptr.cast::<T>())
                .context(OutOfMemorySnafu {
                    bytes: new_layout.size(),
                })
                .map_err(|err| {
                    debug!(
                        capacity = self.capacity,
                        new_capacity,
                        bytes = new_layout.size(),
                        "allocation failed"
                    );
                    err
                })?
        };

        self.elements = Some(new_elements);
        self.capacity = new_capacity;

        Ok(())
    }

    /// Gives the memory back and resets to the unallocated state. Safe to call repeatedly.
    pub fn deallocate(&mut self) {
        if let Some(elements) = self.elements.take() {
            let size = size_of::<T>() * self.capacity;

            if size > 0 {
                unsafe {
                    let layout = Layout::from_size_align_unchecked(size, align_of::<T>());

                    alloc::dealloc(elements.as_ptr().cast(), layout);
                }
            }
        }

        self.capacity = 0;
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.deallocate();
    }
}

#[cfg(test)]
mod tests {
    use super::RawBuffer;
    use crate::VectorError;

    #[test]
    fn zero_capacity_is_unallocated() {
        let buffer = RawBuffer::<u64>::with_capacity(0).unwrap();

        assert_eq!(buffer.capacity(), 0);
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn reallocate_keeps_leading_slots() {
        let mut buffer = RawBuffer::<u32>::with_capacity(2).unwrap();

        unsafe {
            buffer.as_ptr().write(7);
            buffer.as_ptr().add(1).write(8);
        }

        buffer.reallocate(64).unwrap();

        assert_eq!(buffer.capacity(), 64);
        assert_eq!(unsafe { buffer.as_ptr().read() }, 7);
        assert_eq!(unsafe { buffer.as_ptr().add(1).read() }, 8);

        buffer.reallocate(1).unwrap();

        assert_eq!(buffer.capacity(), 1);
        assert_eq!(unsafe { buffer.as_ptr().read() }, 7);
    }

    #[test]
    fn reallocate_to_zero_deallocates() {
        let mut buffer = RawBuffer::<u8>::with_capacity(16).unwrap();

        buffer.reallocate(0).unwrap();

        assert_eq!(buffer.capacity(), 0);
        assert!(!buffer.is_allocated());

        buffer.deallocate();
        buffer.deallocate();

        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn zero_sized_elements_track_capacity() {
        let mut buffer = RawBuffer::<()>::with_capacity(3).unwrap();

        assert_eq!(buffer.capacity(), 3);
        assert!(buffer.is_allocated());

        buffer.reallocate(usize::MAX).unwrap();

        assert_eq!(buffer.capacity(), usize::MAX);
    }

    #[test]
    fn oversized_layout_is_capacity_overflow() {
        let result = RawBuffer::<u64>::with_capacity(usize::MAX);

        assert_eq!(
            result.err(),
            Some(VectorError::CapacityOverflow {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn failed_reallocation_leaves_buffer_untouched() {
        let mut buffer = RawBuffer::<u8>::with_capacity(4).unwrap();

        unsafe { buffer.as_ptr().write(42) };

        let result = buffer.reallocate(isize::MAX as usize);

        assert!(matches!(result, Err(VectorError::OutOfMemory { .. })));
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(unsafe { buffer.as_ptr().read() }, 42);
    }
}
