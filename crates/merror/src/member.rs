//! Member metadata for registered types
//!
//! Each info record pairs the lookup keys of a member (name, scope,
//! visibility, parameter types) with the type-erased closures that perform
//! the access. Static members receive `None` as their target.

use std::fmt;
use std::sync::Arc;

use crate::convert::{FromValue, IntoValue};
use crate::error::{ReflectError, ReflectResult};
use crate::flags::Visibility;
use crate::value::{TypeTag, Value};

/// Conventional name of the indexer property
pub const INDEXER_NAME: &str = "Item";

pub(crate) type GetterFn = Arc<dyn Fn(Option<&Value>) -> ReflectResult<Value> + Send + Sync>;
pub(crate) type SetterFn = Arc<dyn Fn(Option<&Value>, &Value) -> ReflectResult<()> + Send + Sync>;
pub(crate) type MethodFn =
    Arc<dyn Fn(Option<&Value>, &mut Args<'_>) -> ReflectResult<Value> + Send + Sync>;
pub(crate) type ConstructorFn = Arc<dyn Fn(&mut Args<'_>) -> ReflectResult<Value> + Send + Sync>;
pub(crate) type IndexGetFn = Arc<dyn Fn(&Value, &Args<'_>) -> ReflectResult<Value> + Send + Sync>;
pub(crate) type IndexSetFn =
    Arc<dyn Fn(&Value, &Args<'_>, &Value) -> ReflectResult<()> + Send + Sync>;

// ============================================================================
// Args
// ============================================================================

/// Positional argument slots handed to a registered callable.
///
/// Slots declared by-reference may be overwritten with [`Args::set`]; the
/// reflector copies them back to the caller's descriptors after the call.
pub struct Args<'a> {
    values: &'a mut [Value],
}

impl<'a> Args<'a> {
    /// Wrap a slice of argument slots
    pub fn new(values: &'a mut [Value]) -> Self {
        Self { values }
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`
    pub fn value(&self, index: usize) -> ReflectResult<&Value> {
        self.values.get(index).ok_or_else(|| {
            ReflectError::InvalidArgument(format!(
                "argument {} out of range ({} given)",
                index,
                self.values.len()
            ))
        })
    }

    /// Argument at `index` converted to `T`
    pub fn get<T: FromValue>(&self, index: usize) -> ReflectResult<T> {
        T::from_value(self.value(index)?)
    }

    /// Overwrite the slot at `index` (out/ref parameters)
    pub fn set<T: IntoValue>(&mut self, index: usize, value: T) -> ReflectResult<()> {
        let len = self.values.len();
        let slot = self.values.get_mut(index).ok_or_else(|| {
            ReflectError::InvalidArgument(format!("argument {} out of range ({} given)", index, len))
        })?;
        *slot = value.into_value();
        Ok(())
    }
}

// ============================================================================
// Fields & properties
// ============================================================================

/// Field information for reflection
#[derive(Clone)]
pub struct FieldInfo {
    pub(crate) name: String,
    pub(crate) declaring_type: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) value_type: TypeTag,
    pub(crate) get: GetterFn,
    pub(crate) set: SetterFn,
}

impl FieldInfo {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the field is static
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Declared field type
    pub fn value_type(&self) -> TypeTag {
        self.value_type
    }

    /// Read the field; `target` is `None` for static fields
    pub fn get_value(&self, target: Option<&Value>) -> ReflectResult<Value> {
        (self.get)(target)
    }

    /// Write the field; `target` is `None` for static fields
    pub fn set_value(&self, target: Option<&Value>, value: &Value) -> ReflectResult<()> {
        (self.set)(target, value)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("declaring_type", &self.declaring_type)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

/// Property information for reflection
#[derive(Clone)]
pub struct PropertyInfo {
    pub(crate) name: String,
    pub(crate) declaring_type: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) value_type: TypeTag,
    pub(crate) get: GetterFn,
    pub(crate) set: Option<SetterFn>,
}

impl PropertyInfo {
    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the property is static
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Declared property type
    pub fn value_type(&self) -> TypeTag {
        self.value_type
    }

    /// Whether the property has a setter
    pub fn can_write(&self) -> bool {
        self.set.is_some()
    }

    /// Read the property
    pub fn get_value(&self, target: Option<&Value>) -> ReflectResult<Value> {
        (self.get)(target)
    }

    /// Write the property, failing if it is read-only
    pub fn set_value(&self, target: Option<&Value>, value: &Value) -> ReflectResult<()> {
        match &self.set {
            Some(set) => set(target, value),
            None => Err(ReflectError::ReadOnly {
                name: self.name.clone(),
                ty: self.declaring_type.clone(),
            }),
        }
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("declaring_type", &self.declaring_type)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("value_type", &self.value_type)
            .field("can_write", &self.can_write())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Callables
// ============================================================================

/// Method information for reflection
#[derive(Clone)]
pub struct MethodInfo {
    pub(crate) name: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) parameters: Vec<TypeTag>,
    pub(crate) return_type: TypeTag,
    pub(crate) call: MethodFn,
}

impl MethodInfo {
    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the method is static
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Formal parameter types in order
    pub fn parameters(&self) -> &[TypeTag] {
        &self.parameters
    }

    /// Declared return type (`()` for void)
    pub fn return_type(&self) -> TypeTag {
        self.return_type
    }

    /// Call the method; by-reference slots in `args` are updated in place
    pub fn invoke(&self, target: Option<&Value>, args: &mut [Value]) -> ReflectResult<Value> {
        (self.call)(target, &mut Args::new(args))
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

/// Constructor information for reflection
#[derive(Clone)]
pub struct ConstructorInfo {
    pub(crate) visibility: Visibility,
    pub(crate) parameters: Vec<TypeTag>,
    pub(crate) call: ConstructorFn,
}

impl ConstructorInfo {
    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Formal parameter types in order
    pub fn parameters(&self) -> &[TypeTag] {
        &self.parameters
    }

    /// Build a new instance; by-reference slots in `args` are updated in place
    pub fn invoke(&self, args: &mut [Value]) -> ReflectResult<Value> {
        (self.call)(&mut Args::new(args))
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("visibility", &self.visibility)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Indexer information for reflection.
///
/// Indexers have no name of their own; they are found by index signature.
#[derive(Clone)]
pub struct IndexerInfo {
    pub(crate) declaring_type: String,
    pub(crate) visibility: Visibility,
    pub(crate) parameters: Vec<TypeTag>,
    pub(crate) value_type: TypeTag,
    pub(crate) get: IndexGetFn,
    pub(crate) set: Option<IndexSetFn>,
}

impl IndexerInfo {
    /// Conventional indexer name
    pub fn name(&self) -> &str {
        INDEXER_NAME
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Index parameter types in order
    pub fn parameters(&self) -> &[TypeTag] {
        &self.parameters
    }

    /// Declared element type
    pub fn value_type(&self) -> TypeTag {
        self.value_type
    }

    /// Read the element at `indexes`
    pub fn get_value(&self, target: &Value, indexes: &mut [Value]) -> ReflectResult<Value> {
        (self.get)(target, &Args::new(indexes))
    }

    /// Write the element at `indexes`
    pub fn set_value(&self, target: &Value, value: &Value, indexes: &mut [Value]) -> ReflectResult<()> {
        match &self.set {
            Some(set) => set(target, &Args::new(indexes), value),
            None => Err(ReflectError::ReadOnly {
                name: INDEXER_NAME.to_string(),
                ty: self.declaring_type.clone(),
            }),
        }
    }
}

impl fmt::Debug for IndexerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexerInfo")
            .field("declaring_type", &self.declaring_type)
            .field("visibility", &self.visibility)
            .field("parameters", &self.parameters)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}
