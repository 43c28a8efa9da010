//! Type descriptors and their builder
//!
//! A [`TypeDescriptor`] is the capability table for one registered type: the
//! members a reflector can reach, keyed by name, scope and signature.
//! Descriptors are built once through [`TypeBuilder`] while an assembly is
//! assembled and are immutable afterwards.
//!
//! Lookups return the first registered member that matches; registering two
//! members with the same key leaves the later one unreachable.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::convert::{FromValue, IntoValue};
use crate::error::{ReflectError, ReflectResult};
use crate::flags::{BindingFlags, Visibility};
use crate::member::{
    Args, ConstructorInfo, FieldInfo, GetterFn, IndexerInfo, MethodInfo, PropertyInfo, SetterFn,
};
use crate::value::{Object, TypeTag, Value};

/// Shared handle to a registered type
pub type TypeHandle = Arc<TypeDescriptor>;

/// Reflection metadata for a single registered type
#[derive(Debug)]
pub struct TypeDescriptor {
    full_name: String,
    assembly: String,
    visibility: Visibility,
    ty: TypeTag,
    fields: Vec<FieldInfo>,
    properties: Vec<PropertyInfo>,
    methods: Vec<MethodInfo>,
    constructors: Vec<ConstructorInfo>,
    indexers: Vec<IndexerInfo>,
}

impl TypeDescriptor {
    /// Namespace-qualified name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Simple name (last segment of the full name)
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    /// Namespace part of the full name, if any
    pub fn namespace(&self) -> Option<&str> {
        self.full_name.rsplit_once('.').map(|(ns, _)| ns)
    }

    /// Name of the declaring assembly
    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    /// Declared visibility of the type
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Rust type tag of instances
    pub fn type_tag(&self) -> TypeTag {
        self.ty
    }

    /// All registered fields
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// All registered properties
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// All registered methods
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// All registered constructors
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// All registered indexers
    pub fn indexers(&self) -> &[IndexerInfo] {
        &self.indexers
    }

    /// Find a field by name
    pub fn find_field(&self, name: &str, flags: BindingFlags) -> Option<&FieldInfo> {
        self.fields
            .iter()
            .find(|f| f.name == name && flags.admits(f.is_static, f.visibility))
    }

    /// Find a property by name
    pub fn find_property(&self, name: &str, flags: BindingFlags) -> Option<&PropertyInfo> {
        self.properties
            .iter()
            .find(|p| p.name == name && flags.admits(p.is_static, p.visibility))
    }

    /// Find a method by name and exact parameter types
    pub fn find_method(
        &self,
        name: &str,
        flags: BindingFlags,
        signature: &[TypeTag],
    ) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| {
            m.name == name
                && flags.admits(m.is_static, m.visibility)
                && m.parameters.as_slice() == signature
        })
    }

    /// Find a constructor by exact parameter types
    pub fn find_constructor(
        &self,
        flags: BindingFlags,
        signature: &[TypeTag],
    ) -> Option<&ConstructorInfo> {
        self.constructors
            .iter()
            .find(|c| flags.admits(false, c.visibility) && c.parameters.as_slice() == signature)
    }

    /// Find an indexer by exact index types
    pub fn find_indexer(&self, flags: BindingFlags, signature: &[TypeTag]) -> Option<&IndexerInfo> {
        self.indexers
            .iter()
            .find(|i| flags.admits(false, i.visibility) && i.parameters.as_slice() == signature)
    }
}

// ============================================================================
// TypeBuilder
// ============================================================================

/// Typed registration of the members of `T`.
///
/// Closures are written against `T` and plain Rust values; the builder wraps
/// them so the registry can call them with type-erased [`Value`]s.
pub struct TypeBuilder<T> {
    desc: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

fn instance_of<T: Any + Send + Sync>(target: Option<&Value>) -> ReflectResult<Object<T>> {
    let target = target.ok_or_else(|| {
        ReflectError::InvalidArgument(format!(
            "instance of {} required",
            std::any::type_name::<T>()
        ))
    })?;
    Object::<T>::from_value(target)
}

fn static_accessors<F, G, S>(get: G, set: S) -> (GetterFn, SetterFn)
where
    F: FromValue + IntoValue,
    G: Fn() -> F + Send + Sync + 'static,
    S: Fn(F) + Send + Sync + 'static,
{
    let getter: GetterFn = Arc::new(move |_: Option<&Value>| Ok(get().into_value()));
    let setter: SetterFn = Arc::new(move |_: Option<&Value>, value: &Value| {
        let value = F::from_value(value)?;
        set(value);
        Ok(())
    });
    (getter, setter)
}

fn instance_getter<T, F, G>(get: G) -> GetterFn
where
    T: Any + Send + Sync,
    F: IntoValue,
    G: Fn(&T) -> F + Send + Sync + 'static,
{
    Arc::new(move |target: Option<&Value>| {
        let obj = instance_of::<T>(target)?;
        let value = get(&obj.read());
        Ok(value.into_value())
    })
}

fn instance_setter<T, F, S>(set: S) -> SetterFn
where
    T: Any + Send + Sync,
    F: FromValue,
    S: Fn(&mut T, F) + Send + Sync + 'static,
{
    Arc::new(move |target: Option<&Value>, value: &Value| {
        let obj = instance_of::<T>(target)?;
        // Convert before locking so a mismatch leaves the target untouched
        let value = F::from_value(value)?;
        set(&mut obj.write(), value);
        Ok(())
    })
}

impl<T: Any + Send + Sync> TypeBuilder<T> {
    pub(crate) fn new(full_name: &str, assembly: &str, visibility: Visibility) -> Self {
        Self {
            desc: TypeDescriptor {
                full_name: full_name.to_string(),
                assembly: assembly.to_string(),
                visibility,
                ty: TypeTag::of::<T>(),
                fields: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
                indexers: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    pub(crate) fn build(self) -> TypeDescriptor {
        self.desc
    }

    /// Add a static field backed by `get`/`set`
    pub fn static_field<F, G, S>(&mut self, name: &str, visibility: Visibility, get: G, set: S) -> &mut Self
    where
        F: FromValue + IntoValue,
        G: Fn() -> F + Send + Sync + 'static,
        S: Fn(F) + Send + Sync + 'static,
    {
        let (get, set) = static_accessors(get, set);
        self.desc.fields.push(FieldInfo {
            name: name.to_string(),
            declaring_type: self.desc.full_name.clone(),
            visibility,
            is_static: true,
            value_type: F::declared_type(),
            get,
            set,
        });
        self
    }

    /// Add an instance field
    pub fn field<F, G, S>(&mut self, name: &str, visibility: Visibility, get: G, set: S) -> &mut Self
    where
        F: FromValue + IntoValue,
        G: Fn(&T) -> F + Send + Sync + 'static,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        self.desc.fields.push(FieldInfo {
            name: name.to_string(),
            declaring_type: self.desc.full_name.clone(),
            visibility,
            is_static: false,
            value_type: F::declared_type(),
            get: instance_getter(get),
            set: instance_setter(set),
        });
        self
    }

    /// Add a static read/write property
    pub fn static_property<F, G, S>(
        &mut self,
        name: &str,
        visibility: Visibility,
        get: G,
        set: S,
    ) -> &mut Self
    where
        F: FromValue + IntoValue,
        G: Fn() -> F + Send + Sync + 'static,
        S: Fn(F) + Send + Sync + 'static,
    {
        let (get, set) = static_accessors(get, set);
        self.push_property(name, visibility, true, F::declared_type(), get, Some(set))
    }

    /// Add a static property without a setter
    pub fn static_property_readonly<F, G>(&mut self, name: &str, visibility: Visibility, get: G) -> &mut Self
    where
        F: IntoValue,
        G: Fn() -> F + Send + Sync + 'static,
    {
        let get: GetterFn = Arc::new(move |_: Option<&Value>| Ok(get().into_value()));
        self.push_property(name, visibility, true, F::declared_type(), get, None)
    }

    /// Add an instance read/write property
    pub fn property<F, G, S>(&mut self, name: &str, visibility: Visibility, get: G, set: S) -> &mut Self
    where
        F: FromValue + IntoValue,
        G: Fn(&T) -> F + Send + Sync + 'static,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        let get = instance_getter(get);
        let set = instance_setter(set);
        self.push_property(name, visibility, false, F::declared_type(), get, Some(set))
    }

    /// Add an instance property without a setter
    pub fn property_readonly<F, G>(&mut self, name: &str, visibility: Visibility, get: G) -> &mut Self
    where
        F: IntoValue,
        G: Fn(&T) -> F + Send + Sync + 'static,
    {
        let get = instance_getter(get);
        self.push_property(name, visibility, false, F::declared_type(), get, None)
    }

    fn push_property(
        &mut self,
        name: &str,
        visibility: Visibility,
        is_static: bool,
        value_type: TypeTag,
        get: GetterFn,
        set: Option<SetterFn>,
    ) -> &mut Self {
        self.desc.properties.push(PropertyInfo {
            name: name.to_string(),
            declaring_type: self.desc.full_name.clone(),
            visibility,
            is_static,
            value_type,
            get,
            set,
        });
        self
    }

    /// Add a static method with the given formal parameter types
    pub fn static_method<R, M>(
        &mut self,
        name: &str,
        visibility: Visibility,
        parameters: &[TypeTag],
        call: M,
    ) -> &mut Self
    where
        R: IntoValue,
        M: Fn(&mut Args<'_>) -> ReflectResult<R> + Send + Sync + 'static,
    {
        self.desc.methods.push(MethodInfo {
            name: name.to_string(),
            visibility,
            is_static: true,
            parameters: parameters.to_vec(),
            return_type: R::declared_type(),
            call: Arc::new(move |_: Option<&Value>, args: &mut Args<'_>| {
                call(args).map(IntoValue::into_value)
            }),
        });
        self
    }

    /// Add an instance method with the given formal parameter types.
    ///
    /// `call` receives the instance handle unlocked and takes the lock it
    /// needs itself, so an argument may be the instance the method runs on.
    pub fn method<R, M>(
        &mut self,
        name: &str,
        visibility: Visibility,
        parameters: &[TypeTag],
        call: M,
    ) -> &mut Self
    where
        R: IntoValue,
        M: Fn(&Object<T>, &mut Args<'_>) -> ReflectResult<R> + Send + Sync + 'static,
    {
        self.desc.methods.push(MethodInfo {
            name: name.to_string(),
            visibility,
            is_static: false,
            parameters: parameters.to_vec(),
            return_type: R::declared_type(),
            call: Arc::new(move |target: Option<&Value>, args: &mut Args<'_>| {
                let obj = instance_of::<T>(target)?;
                let result = call(&obj, args)?;
                Ok(result.into_value())
            }),
        });
        self
    }

    /// Add a constructor with the given formal parameter types
    pub fn constructor<M>(&mut self, visibility: Visibility, parameters: &[TypeTag], call: M) -> &mut Self
    where
        M: Fn(&mut Args<'_>) -> ReflectResult<T> + Send + Sync + 'static,
    {
        self.desc.constructors.push(ConstructorInfo {
            visibility,
            parameters: parameters.to_vec(),
            call: Arc::new(move |args: &mut Args<'_>| call(args).map(Value::object)),
        });
        self
    }

    /// Add a read/write indexer with the given index types
    pub fn indexer<V, G, S>(
        &mut self,
        visibility: Visibility,
        parameters: &[TypeTag],
        get: G,
        set: S,
    ) -> &mut Self
    where
        V: FromValue + IntoValue,
        G: Fn(&T, &Args<'_>) -> ReflectResult<V> + Send + Sync + 'static,
        S: Fn(&mut T, &Args<'_>, V) -> ReflectResult<()> + Send + Sync + 'static,
    {
        self.desc.indexers.push(IndexerInfo {
            declaring_type: self.desc.full_name.clone(),
            visibility,
            parameters: parameters.to_vec(),
            value_type: V::declared_type(),
            get: Arc::new(move |target: &Value, indexes: &Args<'_>| {
                let obj = instance_of::<T>(Some(target))?;
                let value = get(&obj.read(), indexes)?;
                Ok(value.into_value())
            }),
            set: Some(Arc::new(move |target: &Value, indexes: &Args<'_>, value: &Value| {
                let obj = instance_of::<T>(Some(target))?;
                let value = V::from_value(value)?;
                let mut guard = obj.write();
                set(&mut guard, indexes, value)
            })),
        });
        self
    }

    /// Add an indexer without a setter
    pub fn indexer_readonly<V, G>(&mut self, visibility: Visibility, parameters: &[TypeTag], get: G) -> &mut Self
    where
        V: IntoValue,
        G: Fn(&T, &Args<'_>) -> ReflectResult<V> + Send + Sync + 'static,
    {
        self.desc.indexers.push(IndexerInfo {
            declaring_type: self.desc.full_name.clone(),
            visibility,
            parameters: parameters.to_vec(),
            value_type: V::declared_type(),
            get: Arc::new(move |target: &Value, indexes: &Args<'_>| {
                let obj = instance_of::<T>(Some(target))?;
                let value = get(&obj.read(), indexes)?;
                Ok(value.into_value())
            }),
            set: None,
        });
        self
    }
}
