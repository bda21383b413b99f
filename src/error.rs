use core::fmt::{self, Formatter};

/// The ways a [`DynArray`] operation can fail.
///
/// A failed operation leaves the array exactly as it was before the call.
///
/// [`DynArray`]: crate::DynArray
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DynArrayError {
    /// The index was outside the range accepted by the operation.
    ///
    /// For access, `set`, and `erase` the valid range is `0..len`. For
    /// `insert` it is `0..=len`.
    IndexOutOfBounds { index: usize, len: usize },
    /// The allocator could not provide room for `capacity` elements, or the
    /// byte size of such a buffer would overflow `isize::MAX`.
    AllocationFailure { capacity: usize },
}

impl fmt::Display for DynArrayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} was out of bounds of len {len}")
            }
            Self::AllocationFailure { capacity } => {
                write!(f, "allocation failed with new capacity {capacity}")
            }
        }
    }
}

impl core::error::Error for DynArrayError {}

#[cfg(test)]
mod tests {
    use super::DynArrayError;

    #[test]
    pub fn display() {
        let err = DynArrayError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 was out of bounds of len 3");
        let err = DynArrayError::AllocationFailure { capacity: 64 };
        assert_eq!(err.to_string(), "allocation failed with new capacity 64");
    }
}
