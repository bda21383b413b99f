use crate::DynArrayError;
use std::{
    alloc::{self, Layout},
    mem::size_of,
    ptr::{self, NonNull},
    slice,
};

/// A low-level utility providing the fundamental operations needed by
/// [`DynArray`].
///
/// It holds a single pointer to an allocation of `T` slots. The allocation
/// size, the number of initialized slots, and which of them are initialized
/// are all tracked by the owner.
///
/// # Safety
///
/// Use of this type is inherently unsafe and should be restricted to the
/// implementation of `DynArray` and its iterators. This type will **neither**
/// deallocate its memory **nor** drop its contents when it is dropped.
///
/// In the method documentation, it is established that `PREV_CAP` is
///
/// - 0 if no previous calls to [`RawBuf::alloc`] or [`RawBuf::realloc_grow`]
///   have been made, or
/// - the capacity used in the most recent successful call to one of them.
///
/// [`DynArray`]: crate::DynArray
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
}

// Derive would impose unnecessary Copy restrictions on T
impl<T> Copy for RawBuf<T> {}
impl<T> Clone for RawBuf<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// Creates a [`RawBuf`] with a dangling pointer and without allocating
    /// memory.
    #[inline]
    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
        }
    }

    #[inline]
    pub(crate) const fn as_ptr(self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn layout(capacity: usize) -> Result<Layout, DynArrayError> {
        Layout::array::<T>(capacity).map_err(|_| DynArrayError::AllocationFailure { capacity })
    }

    /// Allocates room for `capacity` elements.
    ///
    /// No memory is allocated when `capacity` is zero or `T` is zero-sized.
    /// The returned buffer then holds a dangling pointer that must never be
    /// read through.
    pub(crate) fn alloc(capacity: usize) -> Result<Self, DynArrayError> {
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(Self::dangling());
        }
        // SAFETY: layout has a nonzero size
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast())
            .map(|ptr| Self { ptr })
            .ok_or(DynArrayError::AllocationFailure { capacity })
    }

    /// Grows the allocation with room for `old_capacity` elements to fit
    /// `new_capacity` elements. The first `old_capacity` slots keep their
    /// contents at the same indices of the new allocation.
    ///
    /// On failure the old allocation is untouched and remains valid.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `old_capacity == PREV_CAP`
    /// - `new_capacity > old_capacity`
    pub(crate) unsafe fn realloc_grow(
        self,
        old_capacity: usize,
        new_capacity: usize,
    ) -> Result<Self, DynArrayError> {
        debug_assert!(new_capacity > old_capacity);
        if Self::IS_ZST || old_capacity == 0 {
            return Self::alloc(new_capacity);
        }

        let new_layout = Self::layout(new_capacity)?;
        // SAFETY: We already constructed this layout for a previous allocation
        let old_layout = unsafe { Layout::array::<T>(old_capacity).unwrap_unchecked() };

        // SAFETY:
        // The caller ensures that
        // - ptr has been previously allocated with old_layout
        // - the new size is nonzero because it is larger than the old one
        // Layout::array checked that the new size does not overflow isize.
        let ptr = unsafe { alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) };
        NonNull::new(ptr.cast())
            .map(|ptr| Self { ptr })
            .ok_or(DynArrayError::AllocationFailure {
                capacity: new_capacity,
            })
    }

    /// Deallocates the allocation with room for `capacity` elements. The
    /// buffer is no longer valid after this call.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `capacity == PREV_CAP`
    /// - no initialized elements remain that still need dropping
    pub(crate) unsafe fn dealloc(self, capacity: usize) {
        if Self::IS_ZST || capacity == 0 {
            return;
        }
        // SAFETY: We already constructed this layout for a previous allocation
        let layout = unsafe { Layout::array::<T>(capacity).unwrap_unchecked() };
        // SAFETY: The caller ensures the pointer came from an allocation with
        // this layout
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
    }

    /// Moves `count` elements starting at `src` so that they start at `dst`.
    ///
    /// The ranges may overlap. Afterwards the slots of the source range that
    /// are not part of the destination range hold stale bitwise copies and
    /// must be treated as uninitialized.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `src + count <= PREV_CAP`
    /// - `dst + count <= PREV_CAP`
    /// - the source range is initialized
    #[inline]
    pub(crate) unsafe fn shift(self, src: usize, dst: usize, count: usize) {
        // SAFETY: Caller ensures both ranges are in bounds of the allocation
        unsafe {
            let base = self.ptr.as_ptr();
            ptr::copy(base.add(src), base.add(dst), count);
        }
    }

    /// Writes `element` to the slot at `index` without dropping the slot's
    /// previous contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `index < PREV_CAP`
    #[inline]
    pub(crate) unsafe fn write(self, index: usize, element: T) {
        // SAFETY: Caller ensures index is in bounds
        unsafe { self.ptr.as_ptr().add(index).write(element) }
    }

    /// Reads the element at `index`.
    ///
    /// # Safety
    ///
    /// After calling this method, the element at `index` should be treated as
    /// having been moved out of the buffer and into the caller. The caller
    /// must ensure that
    ///
    /// - `index < PREV_CAP`
    /// - the slot at `index` is initialized
    #[inline]
    pub(crate) unsafe fn read(self, index: usize) -> T {
        // SAFETY: Caller ensures index is in bounds and initialized
        unsafe { self.ptr.as_ptr().add(index).read() }
    }

    /// Gets a reference to the element at `index`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `index < PREV_CAP`
    /// - the slot at `index` is initialized
    /// - the returned lifetime does not outlive the allocation or overlap a
    ///   mutable access to the same slot
    #[inline]
    pub(crate) unsafe fn get_ref<'a>(self, index: usize) -> &'a T {
        // SAFETY: Caller upholds the requirements above
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Gets a mutable reference to the element at `index`.
    ///
    /// # Safety
    ///
    /// Same requirements as [`RawBuf::get_ref`], and the returned reference
    /// must be the only live reference to the slot.
    #[inline]
    pub(crate) unsafe fn get_mut<'a>(self, index: usize) -> &'a mut T {
        // SAFETY: Caller upholds the requirements above
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Views the slots `start..end` as a slice.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `start <= end <= PREV_CAP`
    /// - every slot in `start..end` is initialized
    /// - the returned lifetime respects the aliasing rules
    #[inline]
    pub(crate) unsafe fn slice<'a>(self, start: usize, end: usize) -> &'a [T] {
        // SAFETY: Caller upholds the requirements above
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().add(start), end - start) }
    }

    /// Views the slots `start..end` as a mutable slice.
    ///
    /// # Safety
    ///
    /// Same requirements as [`RawBuf::slice`], and the returned slice must be
    /// the only live reference to those slots.
    #[inline]
    pub(crate) unsafe fn slice_mut<'a>(self, start: usize, end: usize) -> &'a mut [T] {
        // SAFETY: Caller upholds the requirements above
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().add(start), end - start) }
    }

    /// Drops the elements in `start..end` in place.
    ///
    /// # Safety
    ///
    /// The caller must ensure that every slot in `start..end` is initialized
    /// and treats them as uninitialized afterwards.
    #[inline]
    pub(crate) unsafe fn drop_range(self, start: usize, end: usize) {
        // SAFETY: Caller upholds the requirements above
        unsafe { ptr::drop_in_place(self.slice_mut(start, end)) }
    }
}

/// Resolves a growth failure in a context that has no error channel, such as
/// [`Extend`] or [`Clone`], the same way the standard collections do.
pub(crate) fn infallible<T, R>(result: Result<R, DynArrayError>) -> R {
    match result {
        Ok(out) => out,
        Err(DynArrayError::AllocationFailure { capacity }) => match Layout::array::<T>(capacity) {
            // Zero-sized requests never reach the allocator, so the only way
            // they fail is by running out of representable capacity
            Ok(layout) if layout.size() != 0 => alloc::handle_alloc_error(layout),
            _ => panic!("capacity overflow"),
        },
        Err(err @ DynArrayError::IndexOutOfBounds { .. }) => {
            unreachable!("growth reported {err}")
        }
    }
}
