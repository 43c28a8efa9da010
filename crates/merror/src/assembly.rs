//! Assemblies: named sets of registered types
//!
//! An [`Assembly`] is built once with [`AssemblyBuilder`] and is immutable
//! afterwards. Loading an assembly publishes it in a process-wide registry so
//! types can be found from a Rust type (`Reflector::of::<T>()`) or by name next
//! to another type of the same assembly.
//!
//! ## Usage
//!
//! ```ignore
//! let mut asm = AssemblyBuilder::new("Meters");
//! asm.register::<Gauge, _>("Acme.Meters.Gauge", Visibility::Internal, |t| {
//!     t.field("level", Visibility::Private, |g: &Gauge| g.level, |g: &mut Gauge, v| g.level = v);
//! });
//! let asm = asm.load()?;
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::descriptor::{TypeBuilder, TypeDescriptor, TypeHandle};
use crate::error::{ReflectError, ReflectResult};
use crate::flags::Visibility;

/// Assemblies published with [`AssemblyBuilder::load`]
static LOADED: Lazy<RwLock<Vec<Arc<Assembly>>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// A named, immutable set of type descriptors
#[derive(Debug)]
pub struct Assembly {
    name: String,
    types: Vec<TypeHandle>,
    by_name: FxHashMap<String, TypeHandle>,
    by_id: FxHashMap<TypeId, TypeHandle>,
}

impl Assembly {
    /// Assembly name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Types in registration order
    pub fn types(&self) -> &[TypeHandle] {
        &self.types
    }

    /// Find a type by full name (case-sensitive)
    pub fn get_type(&self, full_name: &str) -> Option<TypeHandle> {
        self.by_name.get(full_name).cloned()
    }

    /// Descriptor registered for the Rust type `T`
    pub fn type_of<T: Any>(&self) -> Option<TypeHandle> {
        self.by_id.get(&TypeId::of::<T>()).cloned()
    }

    /// Check whether `T` is registered here
    pub fn contains<T: Any>(&self) -> bool {
        self.by_id.contains_key(&TypeId::of::<T>())
    }

    /// Loaded assembly with the given name
    pub fn loaded(name: &str) -> Option<Arc<Assembly>> {
        LOADED.read().iter().find(|a| a.name == name).cloned()
    }

    /// Loaded assembly that registers `T`
    pub fn containing<T: Any>() -> Option<Arc<Assembly>> {
        LOADED.read().iter().find(|a| a.contains::<T>()).cloned()
    }

    /// Descriptor for `T` from any loaded assembly
    pub fn find_type_of<T: Any>() -> Option<TypeHandle> {
        LOADED.read().iter().find_map(|a| a.type_of::<T>())
    }
}

/// Builder for an [`Assembly`]
#[derive(Debug)]
pub struct AssemblyBuilder {
    name: String,
    types: Vec<TypeDescriptor>,
}

impl AssemblyBuilder {
    /// Start an empty assembly
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Register `T` under `full_name`, declaring its members in `define`
    pub fn register<T, F>(&mut self, full_name: &str, visibility: Visibility, define: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: FnOnce(&mut TypeBuilder<T>),
    {
        let mut builder = TypeBuilder::<T>::new(full_name, &self.name, visibility);
        define(&mut builder);
        self.types.push(builder.build());
        self
    }

    /// Finish without publishing
    pub fn build(self) -> Assembly {
        let mut types = Vec::with_capacity(self.types.len());
        let mut by_name = FxHashMap::default();
        let mut by_id = FxHashMap::default();

        for desc in self.types {
            let handle: TypeHandle = Arc::new(desc);
            by_name
                .entry(handle.full_name().to_string())
                .or_insert_with(|| handle.clone());
            by_id
                .entry(handle.type_tag().type_id())
                .or_insert_with(|| handle.clone());
            types.push(handle);
        }

        Assembly {
            name: self.name,
            types,
            by_name,
            by_id,
        }
    }

    /// Finish and publish in the loaded-assembly registry.
    ///
    /// Fails if an assembly with the same name is already loaded.
    pub fn load(self) -> ReflectResult<Arc<Assembly>> {
        let mut loaded = LOADED.write();
        if loaded.iter().any(|a| a.name == self.name) {
            return Err(ReflectError::InvalidArgument(format!(
                "assembly {} is already loaded",
                self.name
            )));
        }

        let assembly = Arc::new(self.build());
        debug!(
            assembly = %assembly.name,
            types = assembly.types.len(),
            "loaded assembly"
        );
        loaded.push(assembly.clone());
        Ok(assembly)
    }
}
