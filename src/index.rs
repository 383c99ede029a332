use std::borrow::Cow;

use crate::DataQuery;

mod private {
    use crate::DataQuery;

    pub trait Sealed {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for DataQuery {}
    impl Sealed for [&str] {}
    impl<const N: usize> Sealed for [&str; N] {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// Anything that can address an entry of a view.
///
/// Strings are split on `'.'`; slices and arrays are taken segment by segment.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn to_query(&self) -> Cow<'_, DataQuery>;
}

impl Index for str {
    #[inline]
    fn to_query(&self) -> Cow<'_, DataQuery> {
        Cow::Owned(DataQuery::of(self))
    }
}

impl Index for String {
    #[inline]
    fn to_query(&self) -> Cow<'_, DataQuery> {
        Cow::Owned(DataQuery::of(self))
    }
}

impl Index for DataQuery {
    #[inline]
    fn to_query(&self) -> Cow<'_, DataQuery> {
        Cow::Borrowed(self)
    }
}

impl Index for [&str] {
    #[inline]
    fn to_query(&self) -> Cow<'_, DataQuery> {
        Cow::Owned(DataQuery::from_parts(self.iter().copied()))
    }
}

impl<const N: usize> Index for [&str; N] {
    #[inline]
    fn to_query(&self) -> Cow<'_, DataQuery> {
        Cow::Owned(DataQuery::from_parts(self.iter().copied()))
    }
}

impl<T: ?Sized + Index> Index for &T {
    #[inline]
    fn to_query(&self) -> Cow<'_, DataQuery> {
        (**self).to_query()
    }
}
