use std::{
    any::Any,
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use crate::{DataContainer, DataView, FromDataValue, ResourceKey};

/// The kind of a [`DataValue`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ValueKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    List,
    View,
    Object,
}

impl ValueKind {
    /// Returns `true` for the fixed-width numeric kinds and booleans.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    /// Returns `true` for kinds whose payload is shared between clones.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::View | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Byte => "byte",
            ValueKind::Short => "short",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::View => "view",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A value stored in a data view.
///
/// Cloning a `DataValue` is shallow: lists, views and objects are shared
/// handles. Use [`DataValue::deep_clone`] for an independent copy.
#[derive(Clone)]
pub enum DataValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    List(DataList),
    View(DataView),
    Object(Opaque),
}

impl DataValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            DataValue::Boolean(_) => ValueKind::Boolean,
            DataValue::Byte(_) => ValueKind::Byte,
            DataValue::Short(_) => ValueKind::Short,
            DataValue::Int(_) => ValueKind::Int,
            DataValue::Long(_) => ValueKind::Long,
            DataValue::Float(_) => ValueKind::Float,
            DataValue::Double(_) => ValueKind::Double,
            DataValue::String(_) => ValueKind::String,
            DataValue::List(_) => ValueKind::List,
            DataValue::View(_) => ValueKind::View,
            DataValue::Object(_) => ValueKind::Object,
        }
    }

    /// Reads this value as `T` through the coercion rules of [`FromDataValue`].
    #[inline]
    pub fn as_<T: FromDataValue>(&self) -> Option<T> {
        T::from_value(self)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&DataList> {
        match self {
            DataValue::List(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_view(&self) -> Option<&DataView> {
        match self {
            DataValue::View(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&Opaque> {
        match self {
            DataValue::Object(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, DataValue::List(_))
    }

    #[inline]
    pub fn is_view(&self) -> bool {
        matches!(self, DataValue::View(_))
    }

    /// Clones every list and view reachable from this value.
    ///
    /// A view is copied into a new standalone container keeping its safety mode.
    /// Opaque objects stay shared.
    pub fn deep_clone(&self) -> DataValue {
        match self {
            DataValue::List(list) => DataValue::List(list.deep_clone()),
            DataValue::View(view) => DataValue::View(view.copy().into_view()),
            other => other.clone(),
        }
    }
}

impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DataValue::Boolean(a), DataValue::Boolean(b)) => a == b,
            (DataValue::Byte(a), DataValue::Byte(b)) => a == b,
            (DataValue::Short(a), DataValue::Short(b)) => a == b,
            (DataValue::Int(a), DataValue::Int(b)) => a == b,
            (DataValue::Long(a), DataValue::Long(b)) => a == b,
            (DataValue::Float(a), DataValue::Float(b)) => a == b,
            (DataValue::Double(a), DataValue::Double(b)) => a == b,
            (DataValue::String(a), DataValue::String(b)) => a == b,
            (DataValue::List(a), DataValue::List(b)) => a == b,
            (DataValue::View(a), DataValue::View(b)) => a == b,
            (DataValue::Object(a), DataValue::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Boolean(v) => write!(f, "Boolean({v})"),
            DataValue::Byte(v) => write!(f, "Byte({v})"),
            DataValue::Short(v) => write!(f, "Short({v})"),
            DataValue::Int(v) => write!(f, "Int({v})"),
            DataValue::Long(v) => write!(f, "Long({v})"),
            DataValue::Float(v) => write!(f, "Float({v})"),
            DataValue::Double(v) => write!(f, "Double({v})"),
            DataValue::String(v) => write!(f, "String({v:?})"),
            DataValue::List(v) => v.fmt(f),
            DataValue::View(v) => v.fmt(f),
            DataValue::Object(v) => v.fmt(f),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for DataValue {
                #[inline]
                fn from(value: $t) -> Self {
                    DataValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    DataList => List,
    DataView => View,
    Opaque => Object,
);

impl From<&str> for DataValue {
    #[inline]
    fn from(value: &str) -> Self {
        DataValue::String(value.to_owned())
    }
}

impl From<char> for DataValue {
    #[inline]
    fn from(value: char) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<DataContainer> for DataValue {
    #[inline]
    fn from(value: DataContainer) -> Self {
        DataValue::View(value.into_view())
    }
}

impl From<&DataView> for DataValue {
    #[inline]
    fn from(value: &DataView) -> Self {
        DataValue::View(value.clone())
    }
}

impl From<ResourceKey> for DataValue {
    #[inline]
    fn from(value: ResourceKey) -> Self {
        DataValue::String(value.to_string())
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        DataValue::List(value.into_iter().collect())
    }
}

/// A shared, growable list of values.
///
/// Clones share the same storage; mutation through any clone is visible
/// through all of them. Whether a list read out of a view is such a shared
/// handle depends on the container's [`SafetyMode`](crate::SafetyMode).
///
/// Views pushed into a list are expected to be standalone containers.
#[derive(Clone, Default)]
pub struct DataList {
    inner: Rc<RefCell<Vec<DataValue>>>,
}

impl DataList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    #[inline]
    pub fn push(&self, value: impl Into<DataValue>) {
        self.inner.borrow_mut().push(value.into());
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<DataValue> {
        self.inner.borrow().get(index).cloned()
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&self, index: usize, value: impl Into<DataValue>) -> Option<DataValue> {
        let mut inner = self.inner.borrow_mut();
        let slot = inner.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    pub fn remove(&self, index: usize) -> Option<DataValue> {
        let mut inner = self.inner.borrow_mut();
        if index < inner.len() {
            Some(inner.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Shallow snapshot of the elements.
    #[inline]
    pub fn to_vec(&self) -> Vec<DataValue> {
        self.inner.borrow().clone()
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Vec<DataValue>> {
        self.inner.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<DataValue>> {
        self.inner.borrow_mut()
    }

    /// Returns `true` if both handles share the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &DataList) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn deep_clone(&self) -> DataList {
        self.inner
            .borrow()
            .iter()
            .map(DataValue::deep_clone)
            .collect()
    }
}

impl PartialEq for DataList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.inner.borrow() == *other.inner.borrow()
    }
}

impl fmt::Debug for DataList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.borrow().iter()).finish()
    }
}

impl<V: Into<DataValue>> FromIterator<V> for DataList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            inner: Rc::new(RefCell::new(iter.into_iter().map(Into::into).collect())),
        }
    }
}

impl<V: Into<DataValue>> From<Vec<V>> for DataList {
    #[inline]
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

/// A type-erased object stored as-is.
///
/// Objects are never cloned by a container, whatever its safety mode, and
/// have no persisted form. They are read back with
/// [`DataView::get_object`](crate::DataView::get_object).
#[derive(Clone)]
pub struct Opaque {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl Opaque {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(DataValue::from(true).kind(), ValueKind::Boolean);
        assert_eq!(DataValue::from(1i8).kind(), ValueKind::Byte);
        assert_eq!(DataValue::from(1i16).kind(), ValueKind::Short);
        assert_eq!(DataValue::from(1i32).kind(), ValueKind::Int);
        assert_eq!(DataValue::from(1i64).kind(), ValueKind::Long);
        assert_eq!(DataValue::from(1f32).kind(), ValueKind::Float);
        assert_eq!(DataValue::from(1f64).kind(), ValueKind::Double);
        assert_eq!(DataValue::from("x").kind(), ValueKind::String);
        assert_eq!(DataValue::from(vec![1i32]).kind(), ValueKind::List);
        assert_eq!(DataValue::from(Opaque::new(3u8)).kind(), ValueKind::Object);
    }

    #[test]
    fn clone_shares_list_storage() {
        let list: DataList = vec![1i32, 2].into();
        let value = DataValue::List(list.clone());
        let shallow = value.clone();
        let deep = value.deep_clone();

        list.push(3i32);

        assert_eq!(shallow.as_list().map(DataList::len), Some(3));
        assert_eq!(deep.as_list().map(DataList::len), Some(2));
    }

    #[test]
    fn list_edits() {
        let list = DataList::new();
        assert!(list.is_empty());
        list.push("a");
        list.push("b");
        assert_eq!(list.set(1, "c"), Some(DataValue::from("b")));
        assert_eq!(list.set(5, "d"), None);
        assert_eq!(list.remove(0), Some(DataValue::from("a")));
        assert_eq!(list.remove(3), None);
        assert_eq!(list.to_vec(), vec![DataValue::from("c")]);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn opaque_compares_by_identity() {
        let a = Opaque::new(String::from("x"));
        let b = Opaque::new(String::from("x"));
        assert_eq!(DataValue::Object(a.clone()), DataValue::Object(a.clone()));
        assert_ne!(DataValue::Object(a.clone()), DataValue::Object(b));
        assert_eq!(a.downcast_ref::<String>().map(String::as_str), Some("x"));
        assert!(a.downcast_ref::<i32>().is_none());
        assert!(a.type_name().contains("String"));
    }

    #[test]
    fn kind_predicates() {
        assert!(ValueKind::Boolean.is_primitive());
        assert!(!ValueKind::String.is_primitive());
        assert!(ValueKind::Long.is_integer());
        assert!(!ValueKind::Float.is_integer());
        assert!(ValueKind::View.is_composite());
        assert_eq!(ValueKind::Double.to_string(), "double");
    }
}
