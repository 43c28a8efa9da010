//! Reflector: access to public and non-public members of a registered type
//!
//! Every operation resolves a member on the bound type, delegates to the
//! registered accessor, and for callables copies by-reference slots back
//! into the caller's [`ReflectorParam`]s.
//!
//! | Operation            | Lookup                                        |
//! |----------------------|-----------------------------------------------|
//! | `*_static_field`     | field by name, static scope                   |
//! | `*_static_property`  | property by name, static scope                |
//! | `invoke_static*`     | method by name + parameter types, static      |
//! | `*_field`            | field by name, instance scope                 |
//! | `*_property`         | property by name, instance scope              |
//! | `invoke*`            | method by name + parameter types, instance    |
//! | `*_indexer*`         | indexer by index types                        |
//! | `new_instance*`      | constructor by parameter types                |
//!
//! Instance operations given a null instance fall back to the static scope.

use std::any::Any;

use tracing::{debug, trace};

use crate::assembly::Assembly;
use crate::descriptor::TypeHandle;
use crate::error::{MemberKind, ReflectError, ReflectResult};
use crate::flags::BindingFlags;
use crate::member::{FieldInfo, IndexerInfo, MethodInfo, PropertyInfo, INDEXER_NAME};
use crate::param::ReflectorParam;
use crate::value::{display_signature, TypeTag, Value};

/// Accessor bound to one registered type.
#[derive(Debug, Clone)]
pub struct Reflector {
    ty: TypeHandle,
}

impl Reflector {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Bind to a type handle.
    ///
    /// Fails with an argument error when the handle is absent, e.g. when
    /// `Assembly::type_of` found nothing.
    pub fn new(target: impl Into<Option<TypeHandle>>) -> ReflectResult<Self> {
        match target.into() {
            Some(ty) => Ok(Self { ty }),
            None => Err(ReflectError::InvalidArgument(
                "target type is required".to_string(),
            )),
        }
    }

    /// Bind to the Rust type `T` through the loaded assemblies
    pub fn of<T: Any>() -> ReflectResult<Self> {
        let ty = Assembly::find_type_of::<T>().ok_or_else(|| ReflectError::TypeNotFound {
            name: std::any::type_name::<T>().to_string(),
            assembly: "<loaded assemblies>".to_string(),
        })?;
        Ok(Self { ty })
    }

    /// Bind by full name, in the assembly that registers `A`.
    ///
    /// This reaches types that cannot be named from the calling crate.
    pub fn in_assembly_of<A: Any>(full_name: &str) -> ReflectResult<Self> {
        let assembly = Assembly::containing::<A>().ok_or_else(|| ReflectError::TypeNotFound {
            name: full_name.to_string(),
            assembly: format!("<assembly of {}>", std::any::type_name::<A>()),
        })?;
        Self::from_assembly(full_name, &assembly)
    }

    /// Bind by full name in an explicit assembly
    pub fn from_assembly(full_name: &str, assembly: &Assembly) -> ReflectResult<Self> {
        match assembly.get_type(full_name) {
            Some(ty) => Ok(Self { ty }),
            None => {
                debug!(name = full_name, assembly = assembly.name(), "type not found");
                Err(ReflectError::TypeNotFound {
                    name: full_name.to_string(),
                    assembly: assembly.name().to_string(),
                })
            }
        }
    }

    /// The bound type
    pub fn type_handle(&self) -> &TypeHandle {
        &self.ty
    }

    // ========================================================================
    // Create instance
    // ========================================================================

    /// Create an instance with the constructor matching the argument values
    pub fn new_instance<I>(&self, args: I) -> ReflectResult<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut params = infer(args);
        self.new_instance_exact(&mut params)
    }

    /// Create an instance with the constructor matching the declared types
    pub fn new_instance_exact(&self, args: &mut [ReflectorParam]) -> ReflectResult<Value> {
        let signature = signature_of(args);
        let ctor = self
            .ty
            .find_constructor(BindingFlags::INSTANCE_MEMBERS, &signature)
            .ok_or_else(|| self.not_found(MemberKind::Constructor, &display_signature(".ctor", &signature)))?;

        let mut values = values_of(args);
        let instance = ctor.invoke(&mut values)?;
        write_back(args, values);

        trace!(ty = self.ty.full_name(), signature = ?signature, "constructed instance");
        Ok(instance)
    }

    // ========================================================================
    // Static members
    // ========================================================================

    /// Set a static field
    pub fn set_static_field(&self, name: &str, value: Value) -> ReflectResult<()> {
        self.field(name, true)?.set_value(None, &value)
    }

    /// Get a static field
    pub fn get_static_field(&self, name: &str) -> ReflectResult<Value> {
        self.field(name, true)?.get_value(None)
    }

    /// Set a static property
    pub fn set_static_property(&self, name: &str, value: Value) -> ReflectResult<()> {
        self.property(name, true)?.set_value(None, &value)
    }

    /// Get a static property
    pub fn get_static_property(&self, name: &str) -> ReflectResult<Value> {
        self.property(name, true)?.get_value(None)
    }

    /// Call a static method, matching overloads by the argument values
    pub fn invoke_static<I>(&self, name: &str, args: I) -> ReflectResult<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut params = infer(args);
        self.invoke_static_exact(name, &mut params)
    }

    /// Call a static method, matching overloads by the declared types
    pub fn invoke_static_exact(&self, name: &str, args: &mut [ReflectorParam]) -> ReflectResult<Value> {
        self.call(None, name, args)
    }

    // ========================================================================
    // Instance members
    // ========================================================================

    /// Set a field on `instance`
    pub fn set_field(&self, instance: &Value, name: &str, value: Value) -> ReflectResult<()> {
        self.field(name, instance.is_null())?
            .set_value(target(instance), &value)
    }

    /// Get a field from `instance`
    pub fn get_field(&self, instance: &Value, name: &str) -> ReflectResult<Value> {
        self.field(name, instance.is_null())?
            .get_value(target(instance))
    }

    /// Set a property on `instance`
    pub fn set_property(&self, instance: &Value, name: &str, value: Value) -> ReflectResult<()> {
        self.property(name, instance.is_null())?
            .set_value(target(instance), &value)
    }

    /// Get a property from `instance`
    pub fn get_property(&self, instance: &Value, name: &str) -> ReflectResult<Value> {
        self.property(name, instance.is_null())?
            .get_value(target(instance))
    }

    /// Call a method on `instance`, matching overloads by the argument values
    pub fn invoke<I>(&self, instance: &Value, name: &str, args: I) -> ReflectResult<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut params = infer(args);
        self.invoke_exact(instance, name, &mut params)
    }

    /// Call a method on `instance`, matching overloads by the declared types
    pub fn invoke_exact(
        &self,
        instance: &Value,
        name: &str,
        args: &mut [ReflectorParam],
    ) -> ReflectResult<Value> {
        self.call(target(instance), name, args)
    }

    /// Set the element of an indexer at `indexes`
    pub fn set_indexer<I>(&self, instance: &Value, value: Value, indexes: I) -> ReflectResult<()>
    where
        I: IntoIterator<Item = Value>,
    {
        let params = infer(indexes);
        self.set_indexer_exact(instance, value, &params)
    }

    /// Set the element of an indexer, matching by the declared index types
    pub fn set_indexer_exact(
        &self,
        instance: &Value,
        value: Value,
        indexes: &[ReflectorParam],
    ) -> ReflectResult<()> {
        let indexer = self.indexer(indexes)?;
        let mut values = values_of(indexes);
        indexer.set_value(instance, &value, &mut values)
    }

    /// Get the element of an indexer at `indexes`
    pub fn get_indexer<I>(&self, instance: &Value, indexes: I) -> ReflectResult<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        let params = infer(indexes);
        self.get_indexer_exact(instance, &params)
    }

    /// Get the element of an indexer, matching by the declared index types
    pub fn get_indexer_exact(&self, instance: &Value, indexes: &[ReflectorParam]) -> ReflectResult<Value> {
        let indexer = self.indexer(indexes)?;
        let mut values = values_of(indexes);
        indexer.get_value(instance, &mut values)
    }

    // ========================================================================
    // Lookup helpers
    // ========================================================================

    fn call(
        &self,
        target: Option<&Value>,
        name: &str,
        args: &mut [ReflectorParam],
    ) -> ReflectResult<Value> {
        let signature = signature_of(args);
        let method = self.method(name, &signature, target.is_none())?;

        let mut values = values_of(args);
        let result = method.invoke(target, &mut values)?;
        write_back(args, values);

        trace!(
            ty = self.ty.full_name(),
            method = name,
            is_static = method.is_static(),
            "invoked method"
        );
        Ok(result)
    }

    fn field(&self, name: &str, is_static: bool) -> ReflectResult<&FieldInfo> {
        self.ty
            .find_field(name, BindingFlags::scope(is_static))
            .ok_or_else(|| self.not_found(MemberKind::Field, name))
    }

    fn property(&self, name: &str, is_static: bool) -> ReflectResult<&PropertyInfo> {
        self.ty
            .find_property(name, BindingFlags::scope(is_static))
            .ok_or_else(|| self.not_found(MemberKind::Property, name))
    }

    fn method(&self, name: &str, signature: &[TypeTag], is_static: bool) -> ReflectResult<&MethodInfo> {
        self.ty
            .find_method(name, BindingFlags::scope(is_static), signature)
            .ok_or_else(|| self.not_found(MemberKind::Method, &display_signature(name, signature)))
    }

    fn indexer(&self, indexes: &[ReflectorParam]) -> ReflectResult<&IndexerInfo> {
        let signature = signature_of(indexes);
        self.ty
            .find_indexer(BindingFlags::INSTANCE_MEMBERS, &signature)
            .ok_or_else(|| {
                self.not_found(MemberKind::Indexer, &display_signature(INDEXER_NAME, &signature))
            })
    }

    fn not_found(&self, kind: MemberKind, name: &str) -> ReflectError {
        debug!(ty = self.ty.full_name(), %kind, name, "member not found");
        ReflectError::MemberNotFound {
            kind,
            name: name.to_string(),
            ty: self.ty.full_name().to_string(),
        }
    }
}

fn target(instance: &Value) -> Option<&Value> {
    if instance.is_null() {
        None
    } else {
        Some(instance)
    }
}

fn infer<I: IntoIterator<Item = Value>>(args: I) -> Vec<ReflectorParam> {
    args.into_iter().map(ReflectorParam::from).collect()
}

fn signature_of(args: &[ReflectorParam]) -> Vec<TypeTag> {
    args.iter().map(ReflectorParam::type_tag).collect()
}

fn values_of(args: &[ReflectorParam]) -> Vec<Value> {
    args.iter().map(|a| a.value().clone()).collect()
}

/// Copy post-call slots back into by-reference descriptors
fn write_back(args: &mut [ReflectorParam], values: Vec<Value>) {
    for (param, value) in args.iter_mut().zip(values) {
        if param.type_tag().is_by_ref() {
            param.set_value(value);
        }
    }
}
