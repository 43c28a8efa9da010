//! Fixture assembly for the Merror tests
//!
//! Every type here keeps its interesting state private. `IndexerItem` and
//! `NewInstanceTarget` are crate-private as well, so other crates can only
//! reach them by name through a `Reflector`.

use std::sync::Arc;

use merror::{Assembly, AssemblyBuilder, ReflectResult};
use once_cell::sync::OnceCell;

mod field_target;
mod indexer_target;
mod method_target;
mod new_instance_target;
mod property_target;

pub use field_target::FieldTestTarget;
pub use indexer_target::IndexerTestTarget;
pub use method_target::MethodTestTarget;
pub use property_target::PropertyTestTarget;

/// Assembly name of the fixture types
pub const ASSEMBLY_NAME: &str = "MerrorTestsTarget";

/// Namespace shared by the fixture types
pub const NAMESPACE: &str = "FooCompany.BarTeam.MerrorTestsTarget";

static ASSEMBLY: OnceCell<Arc<Assembly>> = OnceCell::new();

/// Full name of a fixture type
pub(crate) fn full_name(name: &str) -> String {
    format!("{}.{}", NAMESPACE, name)
}

/// The fixture assembly, loaded on first use
pub fn assembly() -> ReflectResult<Arc<Assembly>> {
    ASSEMBLY
        .get_or_try_init(|| {
            let mut asm = AssemblyBuilder::new(ASSEMBLY_NAME);
            field_target::register(&mut asm);
            property_target::register(&mut asm);
            method_target::register(&mut asm);
            indexer_target::register(&mut asm);
            new_instance_target::register(&mut asm);
            asm.load()
        })
        .cloned()
}
