use merror::{AssemblyBuilder, Visibility};
use parking_lot::RwLock;

static TEXT: RwLock<Option<String>> = parking_lot::const_rwlock(None);
static DUMMY_TEXT: RwLock<Option<String>> = parking_lot::const_rwlock(None);
static PUBLIC_TEXT: RwLock<Option<String>> = parking_lot::const_rwlock(None);

/// Fields of every scope and visibility
#[derive(Debug)]
pub struct FieldTestTarget {
    dummy_num: i32,
    num: i32,
    pub public_num: i32,
}

impl FieldTestTarget {
    pub fn new(num: i32) -> Self {
        Self {
            dummy_num: 0,
            num,
            public_num: 0,
        }
    }

    /// Reset the private static text
    pub fn set_static_text(text: Option<&str>) {
        *TEXT.write() = text.map(str::to_string);
    }
}

pub(crate) fn register(asm: &mut AssemblyBuilder) {
    asm.register::<FieldTestTarget, _>(&crate::full_name("FieldTestTarget"), Visibility::Public, |t| {
        t.static_field(
            "dummy_text",
            Visibility::Private,
            || DUMMY_TEXT.read().clone(),
            |v| *DUMMY_TEXT.write() = v,
        )
        .static_field(
            "text",
            Visibility::Private,
            || TEXT.read().clone(),
            |v| *TEXT.write() = v,
        )
        .static_field(
            "public_text",
            Visibility::Public,
            || PUBLIC_TEXT.read().clone(),
            |v| *PUBLIC_TEXT.write() = v,
        )
        .field(
            "dummy_num",
            Visibility::Private,
            |o: &FieldTestTarget| o.dummy_num,
            |o: &mut FieldTestTarget, v| o.dummy_num = v,
        )
        .field(
            "num",
            Visibility::Private,
            |o: &FieldTestTarget| o.num,
            |o: &mut FieldTestTarget, v| o.num = v,
        )
        .field(
            "public_num",
            Visibility::Public,
            |o: &FieldTestTarget| o.public_num,
            |o: &mut FieldTestTarget, v| o.public_num = v,
        );
    });
}
