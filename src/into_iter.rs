use crate::raw_buf::RawBuf;
use std::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
};

/// An iterator that moves out of a [`DynArray`].
///
/// This struct is created by the [`into_iter`] method, provided by the
/// [`IntoIterator`] trait. The buffer is released when the iterator is
/// dropped, together with any elements that were not yielded.
///
/// [`DynArray`]: crate::DynArray
/// [`into_iter`]: crate::DynArray::into_iter
pub struct IntoIter<T> {
    pub(crate) raw: RawBuf<T>,
    pub(crate) cap: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

unsafe impl<T> Send for IntoIter<T> where T: Send {}
unsafe impl<T> Sync for IntoIter<T> where T: Sync {}

impl<T> IntoIter<T> {
    /// Returns the remaining elements as a slice.
    ///
    /// # Examples
    /// ```
    /// # use dyn_array::dyn_array;
    /// let array = dyn_array![1, 2, 3];
    /// let mut iter = array.into_iter();
    /// iter.next();
    /// assert_eq!(iter.as_slice(), &[2, 3]);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: start..end is initialized and the lifetime is bound to self
        unsafe { self.raw.slice(self.start, self.end) }
    }

    /// Returns the remaining elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: start..end is initialized and self is borrowed mutably
        unsafe { self.raw.slice_mut(self.start, self.end) }
    }
}

impl<T> Debug for IntoIter<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            // SAFETY: start < end so the slot is initialized, and advancing
            // start marks it as moved out
            let out = unsafe { self.raw.read(self.start) };
            self.start += 1;
            Some(out)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.len()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: The old last slot is initialized and is no longer in
            // start..end
            Some(unsafe { self.raw.read(self.end) })
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (start, end) = (self.start, self.end);
        self.start = end;
        // SAFETY:
        // - start..end holds the elements that were not yielded
        // - cap is the capacity the buffer was allocated with
        unsafe {
            self.raw.drop_range(start, end);
            self.raw.dealloc(self.cap);
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}
impl<T> ExactSizeIterator for IntoIter<T> {}
