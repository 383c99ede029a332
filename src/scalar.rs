//! Coercion from stored values to requested Rust types.
//!
//! Every typed accessor of [`DataView`](crate::DataView) funnels through
//! [`FromDataValue`]. A value that is missing or cannot be converted without
//! loss reads as `None`; a conversion never produces a different number than
//! the one stored.
//!
//! | requested | accepted stored kinds |
//! |-----------|-----------------------|
//! | `bool` | boolean; any integer kind holding exactly 0 or 1 |
//! | `i8`, `i16`, `i32`, `i64` | any integer kind whose value fits the target |
//! | `f32` | float; double exactly representable as `f32` (NaN and infinities included); integers exactly representable |
//! | `f64` | float, double; integers exactly representable |
//! | `String` | string |
//! | `char` | string holding exactly one `char` |
//!
//! Floating point values are never read back as integers, and numbers are
//! never rendered as strings.

use crate::{DataValue, ValueKind};

/// A type that can be read out of a [`DataValue`].
pub trait FromDataValue: Sized {
    /// The kind this type is natively stored as.
    const KIND: ValueKind;

    fn from_value(value: &DataValue) -> Option<Self>;
}

#[inline]
fn integer(value: &DataValue) -> Option<i64> {
    match value {
        DataValue::Byte(v) => Some(i64::from(*v)),
        DataValue::Short(v) => Some(i64::from(*v)),
        DataValue::Int(v) => Some(i64::from(*v)),
        DataValue::Long(v) => Some(*v),
        _ => None,
    }
}

macro_rules! integer_from_value {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl FromDataValue for $t {
                const KIND: ValueKind = ValueKind::$kind;

                #[inline]
                fn from_value(value: &DataValue) -> Option<Self> {
                    integer(value).and_then(|v| <$t>::try_from(v).ok())
                }
            }
        )*
    };
}

integer_from_value!(i8 => Byte, i16 => Short, i32 => Int, i64 => Long);

impl FromDataValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    #[inline]
    fn from_value(value: &DataValue) -> Option<Self> {
        match value {
            DataValue::Boolean(v) => Some(*v),
            other => match integer(other)? {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
        }
    }
}

impl FromDataValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &DataValue) -> Option<Self> {
        match value {
            DataValue::Float(v) => Some(*v),
            DataValue::Double(v) => {
                let narrowed = *v as f32;
                (v.is_nan() || f64::from(narrowed) == *v).then_some(narrowed)
            }
            other => {
                let v = integer(other)?;
                let converted = v as f32;
                (converted as i128 == i128::from(v)).then_some(converted)
            }
        }
    }
}

impl FromDataValue for f64 {
    const KIND: ValueKind = ValueKind::Double;

    fn from_value(value: &DataValue) -> Option<Self> {
        match value {
            DataValue::Float(v) => Some(f64::from(*v)),
            DataValue::Double(v) => Some(*v),
            other => {
                let v = integer(other)?;
                let converted = v as f64;
                (converted as i128 == i128::from(v)).then_some(converted)
            }
        }
    }
}

impl FromDataValue for String {
    const KIND: ValueKind = ValueKind::String;

    #[inline]
    fn from_value(value: &DataValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromDataValue for char {
    const KIND: ValueKind = ValueKind::String;

    fn from_value(value: &DataValue) -> Option<Self> {
        let mut chars = value.as_str()?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read<T: FromDataValue>(value: impl Into<DataValue>) -> Option<T> {
        T::from_value(&value.into())
    }

    fn native_kind<T: FromDataValue + Into<DataValue>>(value: T) -> bool {
        value.into().kind() == T::KIND
    }

    #[test]
    fn kind_matches_stored_form() {
        assert!(native_kind(true));
        assert!(native_kind(1i8));
        assert!(native_kind(1i16));
        assert!(native_kind(1i32));
        assert!(native_kind(1i64));
        assert!(native_kind(1f32));
        assert!(native_kind(1f64));
        assert!(native_kind(String::from("s")));
        assert!(native_kind('c'));
    }

    #[test]
    fn integers_widen() {
        assert_eq!(read::<i64>(5i8), Some(5));
        assert_eq!(read::<i32>(-7i16), Some(-7));
        assert_eq!(read::<i16>(100i8), Some(100));
    }

    #[test]
    fn integers_narrow_only_in_range() {
        assert_eq!(read::<i32>(42i64), Some(42));
        assert_eq!(read::<i32>(i64::from(i32::MAX) + 1), None);
        assert_eq!(read::<i8>(127i32), Some(127));
        assert_eq!(read::<i8>(128i32), None);
        assert_eq!(read::<i8>(-129i16), None);
        assert_eq!(read::<i16>(i64::MIN), None);
    }

    #[test]
    fn floats_never_read_as_integers() {
        assert_eq!(read::<i32>(5.0f64), None);
        assert_eq!(read::<i64>(1.0f32), None);
    }

    #[test]
    fn booleans() {
        assert_eq!(read::<bool>(true), Some(true));
        assert_eq!(read::<bool>(0i8), Some(false));
        assert_eq!(read::<bool>(1i64), Some(true));
        assert_eq!(read::<bool>(2i32), None);
        assert_eq!(read::<bool>("true"), None);
        assert_eq!(read::<bool>(1.0f32), None);
        assert_eq!(read::<i32>(true), None);
    }

    #[test]
    fn float_narrowing_is_exact() {
        assert_eq!(read::<f32>(0.5f64), Some(0.5));
        assert_eq!(read::<f32>(0.1f64), None);
        assert_eq!(read::<f32>(f64::INFINITY), Some(f32::INFINITY));
        assert!(read::<f32>(f64::NAN).is_some_and(f32::is_nan));
        assert_eq!(read::<f64>(0.1f32), Some(f64::from(0.1f32)));
    }

    #[test]
    fn integers_as_floats_when_exact() {
        assert_eq!(read::<f64>(1i64 << 53), Some(9007199254740992.0));
        assert_eq!(read::<f64>((1i64 << 53) + 1), None);
        assert_eq!(read::<f64>(1i64 << 60), Some((1i64 << 60) as f64));
        assert_eq!(read::<f64>(i64::MAX), None);
        assert_eq!(read::<f32>(16_777_216i32), Some(16_777_216.0));
        assert_eq!(read::<f32>(16_777_217i32), None);
        assert_eq!(read::<f32>(-3i8), Some(-3.0));
    }

    #[test]
    fn strings_and_chars() {
        assert_eq!(read::<String>("abc"), Some("abc".to_owned()));
        assert_eq!(read::<String>(5i32), None);
        assert_eq!(read::<char>("x"), Some('x'));
        assert_eq!(read::<char>("é"), Some('é'));
        assert_eq!(read::<char>("xy"), None);
        assert_eq!(read::<char>(""), None);
    }
}
