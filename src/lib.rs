//! A growable, contiguous, index-addressable array.
//!
//! [`DynArray`] owns a single buffer and doubles its capacity whenever an
//! insertion finds it full. Positional insertion and removal shift the
//! elements behind the affected index. Every index-taking operation comes in
//! a checked form that reports [`DynArrayError::IndexOutOfBounds`] and leaves
//! the array untouched; element access additionally has an `unsafe`
//! unchecked form for callers that validated their indices already.
//!
//! ```
//! use dyn_array::DynArray;
//!
//! let mut array = DynArray::new();
//! for value in [10, 20, 30, 40, 50] {
//!     array.push(value)?;
//! }
//! assert_eq!(array.get(2), Ok(&30));
//!
//! array.insert(1, 888)?;
//! array.erase(0)?;
//! array.pop_back();
//! array.append_slice(&[100, 200, 300])?;
//! assert_eq!(array, [888, 20, 30, 40, 100, 200, 300]);
//! assert_eq!(array.find(&40), Some(3));
//! # Ok::<(), dyn_array::DynArrayError>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for [`DynArray`] as a sequence.
//!
//! # Logging
//!
//! Reallocations are reported as `trace` events, rejected indices as `debug`
//! events, and allocation failures as `warn` events through [`tracing`]. No
//! subscriber is installed by this crate.

mod array;
pub use array::DynArray;

mod error;
pub use error::DynArrayError;

mod into_iter;
pub use into_iter::IntoIter;

pub mod growth;

mod raw_buf;

mod eq_impl;

mod macros;

#[cfg(feature = "serde")]
mod serde;


#[cfg(test)]
mod tests {
    use crate::{DynArray, DynArrayError, dyn_array};
    use std::{cell::Cell, iter, ptr::NonNull, rc::Rc, slice};

    const ELEMENTS: [i32; 5] = [10, 20, 30, 40, 50];
    const ALL_A: [i32; 3] = [1, 1, 1];
    const B: i32 = 2;

    fn pushed<const N: usize>(elements: [i32; N]) -> DynArray<i32> {
        let mut array = DynArray::new();
        for element in elements {
            array.push(element).unwrap();
        }
        array
    }

    #[test]
    pub fn push_and_pop() {
        let mut array = pushed(ELEMENTS);
        for element in ELEMENTS.into_iter().rev() {
            assert_eq!(Some(element), array.pop_back());
        }
        assert_eq!(None, array.pop_back());
        assert_eq!(array.len(), 0);
    }

    #[test]
    pub fn insert() {
        test_insert(0, [B, 1, 1, 1]);
        test_insert(1, [1, B, 1, 1]);
        test_insert(2, [1, 1, B, 1]);
        test_insert(3, [1, 1, 1, B]);
    }

    fn test_insert(index: usize, expected: [i32; 4]) {
        let mut array = pushed(ALL_A);
        array.insert(index, B).unwrap();
        assert_eq!(array.get(index), Ok(&B));
        for element in expected.into_iter().rev() {
            assert_eq!(Some(element), array.pop_back());
        }
    }

    #[test]
    pub fn erase() {
        test_erase(0, 10, [20, 30, 40, 50]);
        test_erase(1, 20, [10, 30, 40, 50]);
        test_erase(2, 30, [10, 20, 40, 50]);
        test_erase(3, 40, [10, 20, 30, 50]);
        test_erase(4, 50, [10, 20, 30, 40]);
    }

    fn test_erase(index: usize, expected_return: i32, expected_contents: [i32; 4]) {
        let mut array = pushed(ELEMENTS);
        let capacity = array.capacity();
        assert_eq!(Ok(expected_return), array.erase(index));
        assert_eq!(array, expected_contents);
        assert_eq!(array.capacity(), capacity);
    }

    #[test]
    pub fn insert_then_erase_is_identity() {
        for index in 0..=ELEMENTS.len() {
            let mut array = pushed(ELEMENTS);
            array.insert(index, 777).unwrap();
            assert_eq!(array.erase(index), Ok(777));
            assert_eq!(array, ELEMENTS);
        }
    }

    #[test]
    pub fn growth_doubles_from_one() {
        let mut array = DynArray::new();
        let mut capacities = vec![];
        for i in 0..9 {
            array.push(i).unwrap();
            capacities.push(array.capacity());
        }
        assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    pub fn insert_grows_before_shifting() {
        let mut array = DynArray::with_capacity(4).unwrap();
        array.append_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(array.capacity(), 4);
        array.insert(0, 0).unwrap();
        assert_eq!(array.capacity(), 8);
        assert_eq!(array, [0, 1, 2, 3, 4]);
    }

    #[test]
    pub fn out_of_bounds_is_a_no_op() {
        let mut array = pushed(ELEMENTS);
        let capacity = array.capacity();
        let err = DynArrayError::IndexOutOfBounds { index: 5, len: 5 };
        assert_eq!(array.get(5), Err(err));
        assert_eq!(array.get_mut(5).map(|el| *el), Err(err));
        assert_eq!(array.set(5, 0), Err(err));
        assert_eq!(array.erase(5), Err(err));
        assert_eq!(
            array.insert(6, 0),
            Err(DynArrayError::IndexOutOfBounds { index: 6, len: 5 })
        );
        assert_eq!(array, ELEMENTS);
        assert_eq!(array.capacity(), capacity);
    }

    #[test]
    pub fn empty_array_rejects_every_index() {
        let mut array = DynArray::<i32>::new();
        let err = DynArrayError::IndexOutOfBounds { index: 0, len: 0 };
        assert_eq!(array.get(0), Err(err));
        assert_eq!(array.set(0, 1), Err(err));
        assert_eq!(array.erase(0), Err(err));
        assert_eq!(array.find(&0), None);
        assert_eq!(array.insert(0, 1), Ok(()));
    }

    #[test]
    pub fn clear_keeps_capacity() {
        let mut array = pushed(ELEMENTS);
        let capacity = array.capacity();
        let ptr = array.as_ptr();
        array.clear();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), capacity);
        for element in ELEMENTS {
            array.push(element).unwrap();
        }
        assert_eq!(array.capacity(), capacity);
        assert_eq!(array.as_ptr(), ptr);
    }

    #[test]
    pub fn with_capacity_zero_does_not_allocate() {
        let mut array = DynArray::<u64>::with_capacity(0).unwrap();
        assert_eq!(array.capacity(), 0);
        assert!(array.as_slice().is_empty());
        array.destroy();
        array.push(1).unwrap();
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    pub fn reserve_is_exact() {
        let mut array = pushed([1, 2, 3]);
        array.reserve(13).unwrap();
        assert_eq!(array.capacity(), 13);
        assert_eq!(array, [1, 2, 3]);
        array.reserve(2).unwrap();
        assert_eq!(array.capacity(), 13);
    }

    #[test]
    pub fn reserve_overflow_fails_without_change() {
        let mut array = pushed([1, 2, 3]);
        let result = array.reserve(usize::MAX);
        assert_eq!(
            result,
            Err(DynArrayError::AllocationFailure {
                capacity: usize::MAX
            })
        );
        assert_eq!(array, [1, 2, 3]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    pub fn with_capacity_overflow_fails() {
        let result = DynArray::<u64>::with_capacity(usize::MAX);
        assert_eq!(
            result.err(),
            Some(DynArrayError::AllocationFailure {
                capacity: usize::MAX
            })
        );
    }

    #[test]
    pub fn append_slice_overflow_fails_without_change() {
        let mut array = DynArray::new();
        array.push(()).unwrap();
        // SAFETY: Any aligned pointer is valid for a slice of zero-sized values
        let huge = unsafe { slice::from_raw_parts(NonNull::<()>::dangling().as_ptr(), usize::MAX) };
        assert_eq!(
            array.append_slice(huge),
            Err(DynArrayError::AllocationFailure {
                capacity: usize::MAX
            })
        );
        assert_eq!(array.len(), 1);
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    pub fn collect_overflow_panics() {
        let _: DynArray<()> = iter::repeat_n((), usize::MAX).collect();
    }

    #[test]
    pub fn append_slice_reallocates_once() {
        let mut array = pushed([1, 2, 3]);
        assert_eq!(array.capacity(), 4);
        array.append_slice(&[4, 5, 6, 7, 8, 9, 10, 11, 12, 13]).unwrap();
        assert_eq!(array.capacity(), 16);
        assert_eq!(array.len(), 13);
        assert_eq!(array[..3], [1, 2, 3]);
        assert_eq!(array[12], 13);

        let capacity = array.capacity();
        array.append_slice(&[]).unwrap();
        assert_eq!(array.capacity(), capacity);
    }

    #[test]
    pub fn find_returns_first_match() {
        let array = dyn_array![3, 1, 4, 1, 5];
        assert_eq!(array.find(&1), Some(1));
        assert_eq!(array.find(&5), Some(4));
        assert_eq!(array.find(&9), None);
        assert!(array.contains(&4));
        assert!(!array.contains(&2));
    }

    #[test]
    pub fn unchecked_access() {
        let mut array = pushed(ELEMENTS);
        for i in 0..array.len() {
            // SAFETY: i < len
            unsafe { *array.get_unchecked_mut(i) += 1 };
        }
        // SAFETY: 4 < len
        assert_eq!(unsafe { *array.get_unchecked(4) }, 51);
    }

    #[test]
    pub fn scenario() {
        let mut array = DynArray::new();
        assert!(array.is_empty());
        for element in ELEMENTS {
            array.push(element).unwrap();
        }
        assert_eq!(array.len(), 5);
        assert_eq!(array.get(2), Ok(&30));
        array.insert(1, 888).unwrap();
        assert_eq!(array, [10, 888, 20, 30, 40, 50]);
        array.erase(0).unwrap();
        assert_eq!(array, [888, 20, 30, 40, 50]);
        array.pop_back();
        assert_eq!(array, [888, 20, 30, 40]);
        array.append_slice(&[100, 200, 300]).unwrap();
        assert_eq!(array, [888, 20, 30, 40, 100, 200, 300]);
        let capacity = array.capacity();
        array.clear();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), capacity);
    }

    #[test]
    pub fn owned_elements() {
        let mut array = DynArray::new();
        for word in ["b", "d"] {
            array.push(word.to_string()).unwrap();
        }
        array.insert(0, "a".to_string()).unwrap();
        array.insert(2, "c".to_string()).unwrap();
        assert_eq!(array, ["a", "b", "c", "d"].map(String::from));
        assert_eq!(array.erase(1).as_deref(), Ok("b"));
        array.set(0, "z".to_string()).unwrap();
        assert_eq!(array.find(&"c".to_string()), Some(1));
        let cloned = array.clone();
        assert_eq!(cloned, ["z", "c", "d"].map(String::from));
        assert_eq!(format!("{cloned:?}"), r#"["z", "c", "d"]"#);
    }

    #[derive(Clone)]
    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    pub fn destroy_drops_each_element_once() {
        let drops = Rc::new(Cell::new(0));
        let mut array = DynArray::new();
        for _ in 0..5 {
            array.push(Counted(drops.clone())).unwrap();
        }
        drop(array.erase(0).unwrap());
        assert_eq!(drops.get(), 1);
        array.destroy();
        assert_eq!(drops.get(), 5);
        assert_eq!((array.len(), array.capacity()), (0, 0));
        array.destroy();
        drop(array);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    pub fn rejected_insert_drops_value() {
        let drops = Rc::new(Cell::new(0));
        let mut array = DynArray::new();
        assert!(array.insert(1, Counted(drops.clone())).is_err());
        assert_eq!(drops.get(), 1);
        assert!(array.is_empty());
    }

    #[test]
    pub fn into_iter_releases_remaining() {
        let drops = Rc::new(Cell::new(0));
        let array: DynArray<_> = (0..6).map(|_| Counted(drops.clone())).collect();
        let mut iter = array.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(drops.get(), 2);
        assert_eq!(iter.len(), 4);
        drop(iter);
        assert_eq!(drops.get(), 6);
    }

    #[test]
    pub fn into_iter_order() {
        let array = pushed(ELEMENTS);
        assert!(array.into_iter().eq(ELEMENTS));
        let array = pushed(ELEMENTS);
        assert!(array.into_iter().rev().eq(ELEMENTS.into_iter().rev()));
    }

    #[test]
    pub fn zero_sized_elements() {
        let mut array = DynArray::new();
        for _ in 0..5 {
            array.push(()).unwrap();
        }
        assert_eq!(array.capacity(), 8);
        array.insert(2, ()).unwrap();
        assert_eq!(array.erase(0), Ok(()));
        assert_eq!(array.len(), 5);
        assert_eq!(array.find(&()), Some(0));
        array.destroy();
        assert_eq!(array.pop_back(), None);
    }

    #[test]
    pub fn equality_with_std_containers() {
        let array = dyn_array![1, 2, 3];
        assert_eq!(array, vec![1, 2, 3]);
        assert_eq!(vec![1, 2, 3], array);
        assert_eq!(array, [1, 2, 3]);
        assert_eq!([1, 2, 3], array);
        assert_eq!(array, &[1, 2, 3][..]);
        assert_eq!(array, dyn_array![1, 2, 3]);
        assert_ne!(array, dyn_array![1, 2]);
    }
}
