//! Parameter descriptors for exact overload lookups

use crate::convert::IntoValue;
use crate::value::{TypeTag, Value};

/// A parameter value paired with the type used to find the target member.
///
/// After an exact call, descriptors whose declared type is by-reference hold
/// the value the callee left in that slot.
#[derive(Debug, Clone)]
pub struct ReflectorParam {
    ty: TypeTag,
    value: Value,
}

impl ReflectorParam {
    /// Create a descriptor with an explicit declared type.
    ///
    /// `is_ref` marks an out/ref parameter. It is ignored when `ty` is
    /// already by-reference.
    pub fn new(ty: TypeTag, value: Value, is_ref: bool) -> Self {
        let ty = if is_ref && !ty.is_by_ref() {
            ty.make_by_ref()
        } else {
            ty
        };
        Self { ty, value }
    }

    /// Create a descriptor typed by `T`.
    ///
    /// `ReflectorParam::of(None::<String>, false)` declares `String` with a
    /// null value.
    pub fn of<T: IntoValue>(value: T, is_ref: bool) -> Self {
        Self::new(T::declared_type(), value.into_value(), is_ref)
    }

    /// Declared type of the parameter
    pub fn type_tag(&self) -> TypeTag {
        self.ty
    }

    /// Current value of the parameter
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the descriptor, keeping the value
    pub fn into_value(self) -> Value {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}

/// Infers the declared type from the value's runtime type (`any` for null).
impl From<Value> for ReflectorParam {
    fn from(value: Value) -> Self {
        Self {
            ty: value.type_tag(),
            value,
        }
    }
}
