//! Merror - access to non-public members for unit tests
//!
//! Rust has no runtime metadata reflection, so target types publish what
//! tests may reach: each type registers its fields, properties, methods,
//! constructors and indexers (public or not) in an [`Assembly`]. A
//! [`Reflector`] bound to one of those types then reads and writes members by
//! name and calls overloads by exact parameter-type lists, including
//! out/ref parameters.
//!
//! # Example
//!
//! ```ignore
//! use merror::{args, Reflector, ReflectorParam};
//!
//! let reflector = Reflector::of::<MethodTestTarget>()?;
//! let sum = reflector.invoke_static("StaticSum", args![10, 20])?;
//! assert_eq!(sum.cast::<i32>()?, 30);
//!
//! let target = Value::object(MethodTestTarget::new(-3));
//! let mut params = [ReflectorParam::of(4, false), ReflectorParam::of(0, true)];
//! reflector.invoke_exact(&target, "Sum", &mut params)?;
//! assert_eq!(params[1].value().cast::<i32>()?, 1);
//! ```
//!
//! # Values
//!
//! Build arguments with [`IntoValue`] or `args!` rather than [`Value::new`]:
//! `"abc".into_value()` is a `String`, while `Value::new("abc")` keeps the
//! `&str` type and matches no `String` parameter.
//!
//! # Registration
//!
//! ```ignore
//! let mut asm = AssemblyBuilder::new("MerrorTestsTarget");
//! asm.register::<MethodTestTarget, _>("Acme.MethodTestTarget", Visibility::Public, |t| {
//!     t.static_method("StaticSum", Visibility::Private, &[int, int], |args| {
//!         Ok(args.get::<i32>(0)? + args.get::<i32>(1)?)
//!     });
//! });
//! asm.load()?;
//! ```

#![warn(missing_docs)]

mod assembly;
mod convert;
mod descriptor;
mod error;
mod flags;
mod member;
mod param;
mod reflector;
mod value;

pub use assembly::{Assembly, AssemblyBuilder};
pub use convert::{FromValue, IntoValue, ValueType};
pub use descriptor::{TypeBuilder, TypeDescriptor, TypeHandle};
pub use error::{MemberKind, ReflectError, ReflectResult};
pub use flags::{BindingFlags, Visibility};
pub use member::{
    Args, ConstructorInfo, FieldInfo, IndexerInfo, MethodInfo, PropertyInfo, INDEXER_NAME,
};
pub use param::ReflectorParam;
pub use reflector::Reflector;
pub use value::{Object, TypeTag, Value};
