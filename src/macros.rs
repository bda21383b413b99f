/// Creates a [`DynArray`] containing the arguments.
///
/// Like [`vec!`], it takes either a list of elements or an element and a
/// count.
///
/// # Examples
/// ```
/// # use dyn_array::{dyn_array, DynArray};
/// let empty: DynArray<u8> = dyn_array![];
/// assert!(empty.is_empty());
///
/// let listed = dyn_array![10, 20, 30];
/// assert_eq!(listed, [10, 20, 30]);
///
/// let repeated = dyn_array![7; 3];
/// assert_eq!(repeated, [7, 7, 7]);
/// ```
///
/// [`DynArray`]: crate::DynArray
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };

    ($elem:expr; $n:expr) => {
        ::core::iter::repeat_n($elem, $n).collect::<$crate::DynArray<_>>()
    };

    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
