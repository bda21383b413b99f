use crate::{
    DynArrayError, IntoIter,
    growth::{capacity_for, next_capacity},
    raw_buf::{RawBuf, infallible},
};
use std::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::ManuallyDrop,
    ops::{Index, IndexMut, Range},
    slice::{self, SliceIndex},
};
use tracing::{debug, trace, warn};

/// A growable, contiguous array.
///
/// Elements live in a single owned buffer of [`capacity`] slots, of which the
/// first [`len`] are initialized. When an insertion finds the buffer full,
/// the capacity doubles, so a sequence of tail pushes costs amortized `O(1)`
/// each.
///
/// Checked operations report invalid indices with
/// [`DynArrayError::IndexOutOfBounds`] and leave the array unchanged. Growth
/// reports [`DynArrayError::AllocationFailure`] instead of aborting.
///
/// [`capacity`]: DynArray::capacity
/// [`len`]: DynArray::len
pub struct DynArray<T> {
    raw: RawBuf<T>,
    len: usize,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T> Send for DynArray<T> where T: Send {}
unsafe impl<T> Sync for DynArray<T> where T: Sync {}

impl<T> DynArray<T> {
    /// Constructs a new, empty `DynArray<T>`.
    ///
    /// The array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::DynArray;
    /// let array = DynArray::<i32>::new();
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            raw: RawBuf::dangling(),
            len: 0,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Constructs a new, empty `DynArray<T>` with room for exactly `capacity`
    /// elements.
    ///
    /// A capacity of zero does not allocate.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::DynArray;
    /// let mut array = DynArray::with_capacity(10)?;
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.capacity(), 10);
    ///
    /// for i in 0..10 {
    ///     array.push(i)?;
    /// }
    /// assert_eq!(array.capacity(), 10);
    ///
    /// array.push(10)?;
    /// assert_eq!(array.capacity(), 20);
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, DynArrayError> {
        let raw = RawBuf::alloc(capacity).inspect_err(|_| {
            warn!(requested = capacity, "failed to allocate dyn array buffer");
        })?;
        Ok(Self {
            raw,
            len: 0,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Returns the number of elements in the array, also referred to as its
    /// length.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let array = dyn_array![1, 2, 3];
    /// assert_eq!(array.len(), 3);
    /// ```
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements the array can hold without
    /// reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the array contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::DynArray;
    /// let mut array = DynArray::new();
    /// assert!(array.is_empty());
    /// array.push(1)?;
    /// assert!(!array.is_empty());
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Grows the buffer to exactly `new_capacity` slots.
    ///
    /// Does nothing if the capacity is already at least `new_capacity`.
    /// Otherwise the elements are moved, in order, into a new buffer and the
    /// old one is released. Unlike [`Vec::reserve`], the argument is the
    /// total capacity rather than the additional room.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the new buffer cannot
    /// be allocated. The array is left unchanged.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![1];
    /// array.reserve(10)?;
    /// assert_eq!(array.capacity(), 10);
    /// array.reserve(5)?;
    /// assert_eq!(array.capacity(), 10);
    /// assert_eq!(array, [1]);
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), DynArrayError> {
        if new_capacity <= self.capacity {
            return Ok(());
        }
        // SAFETY: self.capacity is the capacity of the current allocation and
        // new_capacity is larger
        let grown = unsafe { self.raw.realloc_grow(self.capacity, new_capacity) };
        match grown {
            Ok(raw) => {
                trace!(
                    old_capacity = self.capacity,
                    new_capacity,
                    len = self.len,
                    "grew dyn array buffer"
                );
                self.raw = raw;
                self.capacity = new_capacity;
                Ok(())
            }
            Err(err) => {
                warn!(requested = new_capacity, "failed to grow dyn array buffer");
                Err(err)
            }
        }
    }

    /// Ensures there is room for one more element, doubling when full.
    fn grow_if_full(&mut self) -> Result<(), DynArrayError> {
        if self.len < self.capacity {
            return Ok(());
        }
        let new_capacity = next_capacity(self.capacity).ok_or(DynArrayError::AllocationFailure {
            capacity: usize::MAX,
        })?;
        self.reserve(new_capacity)
    }

    /// Ensures there is room for `additional` more elements in one
    /// reallocation.
    fn grow_for(&mut self, additional: usize) -> Result<(), DynArrayError> {
        let new_capacity = self
            .len
            .checked_add(additional)
            .and_then(|required| capacity_for(self.capacity, required))
            .ok_or(DynArrayError::AllocationFailure {
                capacity: usize::MAX,
            })?;
        self.reserve(new_capacity)
    }

    fn check_index(&self, op: &'static str, index: usize, in_bounds: bool) -> Result<(), DynArrayError> {
        if in_bounds {
            Ok(())
        } else {
            debug!(op, index, len = self.len, "rejected out of bounds index");
            Err(DynArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfBounds`] unless `index < len`.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::{dyn_array, DynArrayError};
    /// let array = dyn_array![10, 20, 30];
    /// assert_eq!(array.get(1), Ok(&20));
    /// assert_eq!(
    ///     array.get(3),
    ///     Err(DynArrayError::IndexOutOfBounds { index: 3, len: 3 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, DynArrayError> {
        self.check_index("get", index, index < self.len)?;
        // SAFETY: index < len
        Ok(unsafe { self.raw.get_ref(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfBounds`] unless `index < len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        self.check_index("get_mut", index, index < self.len)?;
        // SAFETY: index < len and self is borrowed mutably
        Ok(unsafe { self.raw.get_mut(index) })
    }

    /// Returns a reference to the element at `index` without bounds
    /// checking.
    ///
    /// Meant for hot loops that validated their index range once up front.
    /// For a checked alternative see [`get`].
    ///
    /// # Safety
    ///
    /// Calling this method with `index >= len` is *[undefined behavior]* even
    /// if the resulting reference is not used. There is no error path.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let array = dyn_array![1, 2, 4];
    /// let mut sum = 0;
    /// for i in 0..array.len() {
    ///     // SAFETY: i < len
    ///     sum += unsafe { array.get_unchecked(i) };
    /// }
    /// assert_eq!(sum, 7);
    /// ```
    ///
    /// [`get`]: DynArray::get
    /// [undefined behavior]: https://doc.rust-lang.org/reference/behavior-considered-undefined.html
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: Caller ensures index < len
        unsafe { self.raw.get_ref(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// Calling this method with `index >= len` is *[undefined behavior]*.
    ///
    /// [undefined behavior]: https://doc.rust-lang.org/reference/behavior-considered-undefined.html
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: Caller ensures index < len
        unsafe { self.raw.get_mut(index) }
    }

    /// Replaces the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfBounds`] unless `index < len`. The
    /// array is unchanged and `value` is dropped.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![10, 20, 30];
    /// array.set(2, 999)?;
    /// assert_eq!(array, [10, 20, 999]);
    /// assert!(array.set(3, 0).is_err());
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Appends an element to the back of the array.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the array was full and
    /// could not grow.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![1, 2];
    /// array.push(3)?;
    /// assert_eq!(array, [1, 2, 3]);
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), DynArrayError> {
        self.grow_if_full()?;
        // SAFETY: len < capacity after growing
        unsafe { self.raw.write(self.len, value) };
        self.len += 1;
        Ok(())
    }

    /// Inserts an element at position `index`, shifting all elements after
    /// it one slot toward the back.
    ///
    /// Inserting at `len` is the same as [`push`]. The buffer grows before
    /// anything is shifted.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfBounds`] if `index > len` and
    /// [`DynArrayError::AllocationFailure`] if the array could not grow. In
    /// both cases the array is unchanged and `value` is dropped.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![10, 20, 30];
    /// array.insert(1, 888)?;
    /// assert_eq!(array, [10, 888, 20, 30]);
    /// array.insert(4, 40)?;
    /// assert_eq!(array, [10, 888, 20, 30, 40]);
    /// assert!(array.insert(6, 0).is_err());
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    ///
    /// [`push`]: DynArray::push
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        self.check_index("insert", index, index <= self.len)?;
        self.grow_if_full()?;
        // SAFETY:
        // - index <= len < capacity, so the shifted range ends at or before
        //   capacity
        // - the slot at index is overwritten without being dropped because
        //   its contents were moved one slot back
        unsafe {
            self.raw.shift(index, index + 1, self.len - index);
            self.raw.write(index, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at position `index`, shifting all
    /// elements after it one slot toward the front.
    ///
    /// The capacity is not reduced.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::IndexOutOfBounds`] unless `index < len`. The
    /// array is unchanged.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![10, 888, 20];
    /// assert_eq!(array.erase(0), Ok(10));
    /// assert_eq!(array, [888, 20]);
    /// assert!(array.erase(2).is_err());
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn erase(&mut self, index: usize) -> Result<T, DynArrayError> {
        self.check_index("erase", index, index < self.len)?;
        self.len -= 1;
        // SAFETY: index was < len, so the element is initialized and the
        // elements after it are in bounds of the old length
        unsafe {
            let out = self.raw.read(index);
            self.raw.shift(index + 1, index, self.len - index);
            Ok(out)
        }
    }

    /// Removes the last element and returns it, or [`None`] if the array is
    /// empty.
    ///
    /// Popping an empty array is not an error.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![1, 2];
    /// assert_eq!(array.pop_back(), Some(2));
    /// assert_eq!(array.pop_back(), Some(1));
    /// assert_eq!(array.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: The slot at the old last index is initialized
            Some(unsafe { self.raw.read(self.len) })
        }
    }

    /// Removes all elements, keeping the allocated capacity.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![1, 2, 3];
    /// let capacity = array.capacity();
    /// array.clear();
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        let len = self.len;
        // Set len first so a panicking destructor cannot cause a double drop
        self.len = 0;
        // SAFETY: 0..len was initialized
        unsafe { self.raw.drop_range(0, len) };
    }

    /// Drops every element and releases the buffer, leaving an empty array
    /// with zero capacity.
    ///
    /// The array stays usable and calling this again does nothing. Dropping
    /// the array performs the same release.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![1, 2, 3];
    /// array.destroy();
    /// assert_eq!((array.len(), array.capacity()), (0, 0));
    /// array.destroy();
    /// array.push(4)?;
    /// assert_eq!(array, [4]);
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn destroy(&mut self) {
        self.clear();
        let capacity = std::mem::replace(&mut self.capacity, 0);
        let raw = std::mem::replace(&mut self.raw, RawBuf::dangling());
        // SAFETY: capacity is the capacity of raw's allocation and the
        // elements were dropped by clear
        unsafe { raw.dealloc(capacity) };
    }

    /// Returns the index of the first element equal to `value`, or [`None`]
    /// if there is none.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let array = dyn_array![5, 7, 5];
    /// assert_eq!(array.find(&5), Some(0));
    /// assert_eq!(array.find(&7), Some(1));
    /// assert_eq!(array.find(&15), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == value)
    }

    /// Returns true if the array contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Clones and appends all elements of `values`, in order.
    ///
    /// The required capacity is computed up front by doubling the current
    /// capacity until the batch fits, so the whole append performs at most
    /// one reallocation.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::AllocationFailure`] if the array could not
    /// grow. The array is then unchanged.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![888, 20, 30, 40];
    /// array.append_slice(&[100, 200, 300])?;
    /// assert_eq!(array, [888, 20, 30, 40, 100, 200, 300]);
    /// assert_eq!(array.capacity(), 8);
    /// # Ok::<(), dyn_array::DynArrayError>(())
    /// ```
    pub fn append_slice(&mut self, values: &[T]) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        if values.is_empty() {
            return Ok(());
        }
        self.grow_for(values.len())?;
        for value in values {
            // SAFETY: grow_for made room for all of values
            unsafe { self.raw.write(self.len, value.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Returns an iterator over the elements, front to back.
    ///
    /// The iterator is [`Clone`], so the same view can be walked again. It
    /// borrows the array, which rules out structural mutation while it is
    /// alive.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let array = dyn_array![1, 2, 4];
    /// let iter = array.iter();
    /// assert_eq!(iter.clone().sum::<i32>(), 7);
    /// assert_eq!(iter.max(), Some(&4));
    /// ```
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator that allows modifying each element.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let mut array = dyn_array![1, 2, 4];
    /// for element in array.iter_mut() {
    ///     *element *= 2;
    /// }
    /// assert_eq!(array, [2, 4, 8]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Extracts a slice containing the valid elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: 0..len is initialized and the lifetime is bound to self
        unsafe { self.raw.slice(0, self.len) }
    }

    /// Extracts a mutable slice containing the valid elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: 0..len is initialized and self is borrowed mutably
        unsafe { self.raw.slice_mut(0, self.len) }
    }

    /// Returns a raw pointer to the buffer.
    ///
    /// The pointer is dangling while the capacity is zero.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.raw.as_ptr()
    }

    /// Returns a raw mutable pointer to the buffer.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_ptr()
    }

    /// Returns the two raw pointers spanning the valid elements, the first
    /// pointing at the front element and the second one past the back.
    ///
    /// The pointers are only valid until the next structural mutation:
    /// growth, [`insert`], [`erase`], [`pop_back`], [`clear`], or
    /// [`destroy`]. Reading through them afterwards is *undefined behavior*
    /// and cannot be detected. Prefer [`iter`] or [`as_slice`], which the
    /// borrow checker keeps valid.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let array = dyn_array![1, 2, 3];
    /// let range = array.as_ptr_range();
    /// // SAFETY: Both pointers come from the same live buffer
    /// assert_eq!(unsafe { range.end.offset_from(range.start) }, 3);
    /// ```
    ///
    /// [`insert`]: DynArray::insert
    /// [`erase`]: DynArray::erase
    /// [`pop_back`]: DynArray::pop_back
    /// [`clear`]: DynArray::clear
    /// [`destroy`]: DynArray::destroy
    /// [`iter`]: DynArray::iter
    /// [`as_slice`]: DynArray::as_slice
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.as_slice().as_ptr_range()
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DynArray<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut out = infallible::<T, _>(Self::with_capacity(self.len));
        infallible::<T, _>(out.append_slice(self.as_slice()));
        out
    }
}

impl<T> Debug for DynArray<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Hash for DynArray<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, I> Index<I> for DynArray<T>
where
    I: SliceIndex<[T]>,
{
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I> IndexMut<I> for DynArray<T>
where
    I: SliceIndex<[T]>,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        infallible::<T, _>(self.grow_for(lower));
        for element in iter {
            infallible::<T, _>(self.push(element));
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<&[T]> for DynArray<T>
where
    T: Clone,
{
    fn from(value: &[T]) -> Self {
        let mut out = Self::new();
        infallible::<T, _>(out.append_slice(value));
        out
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        // Ownership of the buffer moves to the iterator
        let me = ManuallyDrop::new(self);
        IntoIter {
            raw: me.raw,
            cap: me.capacity,
            start: 0,
            end: me.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An array of zero-sized values whose length has reached `usize::MAX`.
    fn saturated() -> DynArray<()> {
        let mut array = DynArray::with_capacity(usize::MAX).unwrap();
        // Zero-sized values need no initialization
        array.len = usize::MAX;
        array
    }

    #[test]
    pub fn push_fails_when_capacity_cannot_double() {
        let mut array = saturated();
        assert_eq!(
            array.push(()),
            Err(DynArrayError::AllocationFailure {
                capacity: usize::MAX
            })
        );
        assert_eq!(array.len(), usize::MAX);
        assert_eq!(array.capacity(), usize::MAX);
    }

    #[test]
    pub fn insert_fails_when_capacity_cannot_double() {
        let mut array = saturated();
        assert_eq!(
            array.insert(0, ()),
            Err(DynArrayError::AllocationFailure {
                capacity: usize::MAX
            })
        );
        assert_eq!(array.len(), usize::MAX);
        assert_eq!(array.capacity(), usize::MAX);
    }
}
