macro_rules! uni {
    ($t:ty, $u:ty $(, $($b:tt)+)?) => {
        impl<T, U $(,$($b)+)?> PartialEq<$u> for $t
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$u) -> bool {
                self[..] == other[..]
            }
        }
    };
}

macro_rules! bi {
    ($t:ty, $u:ty $(, $($b:tt)+)?) => {
        $crate::eq_impl::uni!($t, $u $(, $($b)+)?);

        impl<T, U $(,$($b)+)?> PartialEq<$t> for $u
        where
            U: PartialEq<T>,
        {
            #[inline]
            fn eq(&self, other: &$t) -> bool {
                self[..] == other[..]
            }
        }
    };
}

macro_rules! impl_for {
    ($t:ty) => {
        $crate::eq_impl::uni!($t, $crate::DynArray<U>);
        $crate::eq_impl::bi!($t, Vec<U>);
        $crate::eq_impl::bi!($t, [U]);
        $crate::eq_impl::bi!($t, &[U]);
        $crate::eq_impl::bi!($t, &mut [U]);
        $crate::eq_impl::bi!($t, [U; N], const N: usize);
        $crate::eq_impl::bi!($t, &[U; N], const N: usize);
        impl<T> Eq for $t where T: Eq {}
    };
}

pub(crate) use bi;
pub(crate) use uni;

impl_for!(crate::DynArray<T>);
