//! Conversions between Rust types and [`Value`]
//!
//! `IntoValue` and `FromValue` are the typed edge of the registry: member
//! closures are written against ordinary Rust types and the builders convert
//! at the boundary. Both share `ValueType`, which names the declared type
//! used for signature matching.
//!
//! `Option<T>` is the nullable form of `T`: it declares the same type as `T`
//! and maps `None` to the null value.

use std::any::Any;

use crate::error::{ReflectError, ReflectResult};
use crate::value::{Object, TypeTag, Value};

/// A Rust type that can appear in a member signature.
pub trait ValueType {
    /// Declared type used for overload matching
    fn declared_type() -> TypeTag;
}

/// Convert from Rust type to `Value`.
pub trait IntoValue: ValueType {
    /// Convert to a `Value`
    fn into_value(self) -> Value;
}

/// Convert from `Value` to Rust type.
pub trait FromValue: ValueType + Sized {
    /// Convert from a `Value`, returning an error if the type doesn't match
    fn from_value(value: &Value) -> ReflectResult<Self>;
}

macro_rules! impl_plain_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ValueType for $ty {
                fn declared_type() -> TypeTag {
                    TypeTag::of::<$ty>()
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::new(self)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> ReflectResult<Self> {
                    value
                        .downcast_ref::<$ty>()
                        .cloned()
                        .ok_or_else(|| ReflectError::mismatch(TypeTag::of::<$ty>(), value.type_tag()))
                }
            }
        )*
    };
}

impl_plain_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl ValueType for &str {
    fn declared_type() -> TypeTag {
        TypeTag::of::<String>()
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::new(self.to_string())
    }
}

// Unit type (for members that return void)
impl ValueType for () {
    fn declared_type() -> TypeTag {
        TypeTag::of::<()>()
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::null()
    }
}

impl ValueType for Value {
    fn declared_type() -> TypeTag {
        TypeTag::any()
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> ReflectResult<Self> {
        Ok(value.clone())
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn declared_type() -> TypeTag {
        T::declared_type()
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::null(),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> ReflectResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<T: Any + Send + Sync> ValueType for Object<T> {
    fn declared_type() -> TypeTag {
        TypeTag::of::<T>()
    }
}

impl<T: Any + Send + Sync> IntoValue for Object<T> {
    fn into_value(self) -> Value {
        self.to_value()
    }
}

impl<T: Any + Send + Sync> FromValue for Object<T> {
    fn from_value(value: &Value) -> ReflectResult<Self> {
        value
            .as_object::<T>()
            .ok_or_else(|| ReflectError::mismatch(TypeTag::of::<T>(), value.type_tag()))
    }
}

/// Build an inferred argument list from plain Rust values.
///
/// ```ignore
/// reflector.invoke_static("StaticSum", args![10, 20])?;
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::IntoValue::into_value($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_primitive_round_trip() {
        assert_eq!(i32::from_value(&42i32.into_value()).unwrap(), 42);
        assert!(bool::from_value(&true.into_value()).unwrap());
        assert_eq!(
            String::from_value(&"hoge".into_value()).unwrap(),
            "hoge".to_string()
        );
    }

    #[test]
    fn test_primitive_mismatch() {
        let err = i32::from_value(&"aaaaa".into_value()).unwrap_err();
        assert!(matches!(err, ReflectError::TypeMismatch { .. }));

        let err = i32::from_value(&Value::null()).unwrap_err();
        assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    }

    #[test]
    fn test_option_is_nullable() {
        assert_eq!(Option::<String>::declared_type(), TypeTag::of::<String>());
        assert_eq!(Option::<String>::from_value(&Value::null()).unwrap(), None);
        assert!(None::<String>.into_value().is_null());
        assert_eq!(
            Option::<i32>::from_value(&Value::new(3i32)).unwrap(),
            Some(3)
        );
    }

    #[test]
    fn test_unit_is_null() {
        assert!(().into_value().is_null());
    }

    #[test]
    fn test_object_conversion() {
        let value = Value::object(Point { x: 5 });
        let obj = Object::<Point>::from_value(&value).unwrap();
        assert_eq!(obj.read().x, 5);
        assert_eq!(Object::<Point>::declared_type(), TypeTag::of::<Point>());

        let err = Object::<Point>::from_value(&Value::new(5i32)).unwrap_err();
        assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    }

    #[test]
    fn test_args_macro() {
        let empty = args![];
        assert!(empty.is_empty());

        let list = args![10, "three", None::<String>];
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].type_tag(), TypeTag::of::<i32>());
        assert_eq!(list[1].type_tag(), TypeTag::of::<String>());
        assert!(list[2].is_null());
    }
}
