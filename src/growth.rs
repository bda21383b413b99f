//! The capacity policy used when a [`DynArray`] runs out of room.
//!
//! Capacity doubles whenever it is exhausted, starting from a single slot.
//! Doubling keeps the total number of element moves across `n` tail pushes
//! below `2n` and the number of reallocations at `O(log n)`.
//!
//! [`DynArray`]: crate::DynArray

/// The capacity to grow to when a buffer with `capacity` slots is full.
///
/// Returns `None` if doubling would overflow `usize`.
///
/// # Examples
///
/// ```
/// # use dyn_array::growth::next_capacity;
/// assert_eq!(next_capacity(0), Some(1));
/// assert_eq!(next_capacity(1), Some(2));
/// assert_eq!(next_capacity(24), Some(48));
/// assert_eq!(next_capacity(usize::MAX), None);
/// ```
#[inline]
pub const fn next_capacity(capacity: usize) -> Option<usize> {
    match capacity {
        0 => Some(1),
        cap => cap.checked_mul(2),
    }
}

/// The smallest capacity reachable from `capacity` by repeated doubling that
/// holds at least `required` elements.
///
/// Returns `capacity` itself if it already suffices and `None` on overflow.
/// Bulk operations use this to reserve once for a whole batch.
///
/// # Examples
///
/// ```
/// # use dyn_array::growth::capacity_for;
/// assert_eq!(capacity_for(8, 7), Some(8));
/// assert_eq!(capacity_for(8, 9), Some(16));
/// assert_eq!(capacity_for(3, 13), Some(24));
/// assert_eq!(capacity_for(0, 5), Some(8));
/// ```
pub const fn capacity_for(capacity: usize, required: usize) -> Option<usize> {
    let mut cap = capacity;
    while cap < required {
        cap = match next_capacity(cap) {
            Some(cap) => cap,
            None => return None,
        };
    }
    Some(cap)
}
