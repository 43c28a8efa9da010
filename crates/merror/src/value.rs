//! Dynamically-typed values and type tags
//!
//! A [`Value`] carries its runtime [`TypeTag`] next to a shared, type-erased
//! payload. Two payload shapes exist:
//!
//! ```text
//! plain:  Arc<T>              created with Value::new     (scalars, strings, ...)
//! object: Arc<RwLock<T>>      created with Value::object  (registered types)
//! ```
//!
//! Object payloads are shared: cloning the value clones the handle, so a write
//! through the reflector is observed by every holder of the same instance.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::convert::FromValue;
use crate::error::ReflectResult;

// ============================================================================
// TypeTag
// ============================================================================

/// Marker behind [`TypeTag::any`]
struct AnyType;

/// Identity of a declared or runtime type.
///
/// Equality ignores the display name and compares the Rust `TypeId` plus the
/// by-reference bit, so `i32` and `i32&` are distinct signatures.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
    by_ref: bool,
}

impl TypeTag {
    /// Tag for the Rust type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            by_ref: false,
        }
    }

    /// The generic type used for absent values
    pub fn any() -> Self {
        Self {
            id: TypeId::of::<AnyType>(),
            name: "any",
            by_ref: false,
        }
    }

    /// By-reference variant of this tag (idempotent)
    pub fn make_by_ref(self) -> Self {
        Self {
            by_ref: true,
            ..self
        }
    }

    /// The referenced type with the by-reference bit cleared
    pub fn element(self) -> Self {
        Self {
            by_ref: false,
            ..self
        }
    }

    /// Whether this tag describes an out/ref slot
    pub fn is_by_ref(&self) -> bool {
        self.by_ref
    }

    /// Whether this is the generic "any" type
    pub fn is_any(&self) -> bool {
        self.id == TypeId::of::<AnyType>()
    }

    /// Rust type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Underlying Rust type id
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.by_ref == other.by_ref
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.by_ref.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.by_ref {
            write!(f, "{}&", self.name)
        } else {
            f.write_str(self.name)
        }
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self)
    }
}

/// Formats a parameter list as `name(a, b&)`
pub(crate) fn display_signature(name: &str, params: &[TypeTag]) -> String {
    let list = params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", name, list)
}

// ============================================================================
// Object
// ============================================================================

/// Shared, lock-guarded instance of a registered type.
pub struct Object<T>(Arc<RwLock<T>>);

impl<T: Any + Send + Sync> Object<T> {
    /// Wrap a freshly built instance
    pub fn new(value: T) -> Self {
        Object(Arc::new(RwLock::new(value)))
    }

    /// Shared access to the instance
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Exclusive access to the instance
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Type-erased handle pointing at the same instance
    pub fn to_value(&self) -> Value {
        let data: Arc<dyn Any + Send + Sync> = self.0.clone();
        Value {
            ty: TypeTag::of::<T>(),
            data: Some(data),
        }
    }
}

impl<T> Clone for Object<T> {
    fn clone(&self) -> Self {
        Object(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Object<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&*self.0.read()).finish()
    }
}

// ============================================================================
// Value
// ============================================================================

/// Dynamically-typed value passed to and returned from reflected members.
#[derive(Clone)]
pub struct Value {
    ty: TypeTag,
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl Value {
    /// The absent value; its runtime type is `any`
    pub fn null() -> Self {
        Self {
            ty: TypeTag::any(),
            data: None,
        }
    }

    /// Wrap plain data, tagged with exactly `T`.
    ///
    /// No conversion happens here: `Value::new("abc")` is tagged `&str` and
    /// neither matches a `String` parameter nor casts to `String`. Use
    /// [`IntoValue`](crate::IntoValue) (`"abc".into_value()` or `args!`) to get
    /// the declared representation.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            ty: TypeTag::of::<T>(),
            data: Some(Arc::new(value)),
        }
    }

    /// Wrap an instance of a registered type as a shared object
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Object::new(value).to_value()
    }

    /// Check if this is the absent value
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Runtime type of the value (`any` for null)
    pub fn type_tag(&self) -> TypeTag {
        self.ty
    }

    /// Borrow plain data as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref::<T>()
    }

    /// Convert to `T`, failing with a type mismatch
    pub fn cast<T: FromValue>(&self) -> ReflectResult<T> {
        T::from_value(self)
    }

    /// Object handle if this value is an instance of `T`
    pub fn as_object<T: Any + Send + Sync>(&self) -> Option<Object<T>> {
        let data = self.data.clone()?;
        data.downcast::<RwLock<T>>().ok().map(Object)
    }

    /// Whether both values share the same payload
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (&self.data, &other.data) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Value::Null")
        } else {
            write!(f, "Value({})", self.ty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Counter {
        count: i32,
    }

    #[test]
    fn test_type_tag_equality() {
        assert_eq!(TypeTag::of::<i32>(), TypeTag::of::<i32>());
        assert_ne!(TypeTag::of::<i32>(), TypeTag::of::<i64>());
        assert_ne!(TypeTag::of::<i32>(), TypeTag::of::<i32>().make_by_ref());
        assert_eq!(
            TypeTag::of::<i32>().make_by_ref().make_by_ref(),
            TypeTag::of::<i32>().make_by_ref()
        );
        assert_eq!(TypeTag::of::<i32>().make_by_ref().element(), TypeTag::of::<i32>());
    }

    #[test]
    fn test_type_tag_display() {
        assert_eq!(TypeTag::of::<i32>().to_string(), "i32");
        assert_eq!(TypeTag::of::<i32>().make_by_ref().to_string(), "i32&");
        assert_eq!(TypeTag::any().to_string(), "any");
        assert_eq!(
            display_signature("Sum", &[TypeTag::of::<i32>(), TypeTag::of::<i32>().make_by_ref()]),
            "Sum(i32, i32&)"
        );
    }

    #[test]
    fn test_null_value() {
        let v = Value::null();
        assert!(v.is_null());
        assert!(v.type_tag().is_any());
        assert!(v.downcast_ref::<i32>().is_none());
    }

    #[test]
    fn test_plain_value() {
        let v = Value::new(42i32);
        assert_eq!(v.type_tag(), TypeTag::of::<i32>());
        assert_eq!(v.downcast_ref::<i32>(), Some(&42));
        assert!(v.as_object::<i32>().is_none());
    }

    #[test]
    fn test_new_keeps_exact_type() {
        use crate::convert::IntoValue;

        let raw = Value::new("abc");
        assert_eq!(raw.type_tag(), TypeTag::of::<&str>());
        assert!(matches!(
            raw.cast::<String>(),
            Err(crate::error::ReflectError::TypeMismatch { .. })
        ));

        let converted = "abc".into_value();
        assert_eq!(converted.type_tag(), TypeTag::of::<String>());
        assert_eq!(converted.cast::<String>().unwrap(), "abc");
    }

    #[test]
    fn test_object_is_shared() {
        let v = Value::object(Counter { count: 1 });
        assert_eq!(v.type_tag(), TypeTag::of::<Counter>());

        let copy = v.clone();
        copy.as_object::<Counter>().unwrap().write().count = 7;

        assert_eq!(v.as_object::<Counter>().unwrap().read().count, 7);
        assert!(v.ptr_eq(&copy));
        assert!(v.downcast_ref::<Counter>().is_none());
    }
}
