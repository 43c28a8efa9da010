use merror::{AssemblyBuilder, Visibility};
use parking_lot::RwLock;

static TEXT: RwLock<Option<String>> = parking_lot::const_rwlock(None);
static DUMMY_TEXT1: RwLock<Option<String>> = parking_lot::const_rwlock(None);
static DUMMY_TEXT2: RwLock<Option<String>> = parking_lot::const_rwlock(None);
static DUMMY_NUM3: RwLock<i32> = parking_lot::const_rwlock(0);

/// Properties of every scope, one of them without a setter.
///
/// The dummies share types with `Text` and `Num` but differ in scope or
/// visibility, so a lookup that ignores either would pick the wrong one.
#[derive(Debug)]
pub struct PropertyTestTarget {
    dummy_text3: Option<String>,
    dummy_num1: i32,
    num: i32,
    dummy_num2: i32,
    created_num: i32,
}

impl PropertyTestTarget {
    pub fn new(num: i32) -> Self {
        Self {
            dummy_text3: None,
            dummy_num1: 0,
            num,
            dummy_num2: 0,
            created_num: num,
        }
    }

    /// Reset the private static text
    pub fn set_static_text(text: Option<&str>) {
        *TEXT.write() = text.map(str::to_string);
    }
}

pub(crate) fn register(asm: &mut AssemblyBuilder) {
    asm.register::<PropertyTestTarget, _>(
        &crate::full_name("PropertyTestTarget"),
        Visibility::Public,
        |t| {
            t.static_property(
                "DummyText1",
                Visibility::Private,
                || DUMMY_TEXT1.read().clone(),
                |v| *DUMMY_TEXT1.write() = v,
            )
            .static_property(
                "Text",
                Visibility::Private,
                || TEXT.read().clone(),
                |v| *TEXT.write() = v,
            )
            .static_property(
                "DummyText2",
                Visibility::Public,
                || DUMMY_TEXT2.read().clone(),
                |v| *DUMMY_TEXT2.write() = v,
            )
            .property(
                "DummyText3",
                Visibility::Private,
                |o: &PropertyTestTarget| o.dummy_text3.clone(),
                |o: &mut PropertyTestTarget, v| o.dummy_text3 = v,
            )
            .property(
                "DummyNum1",
                Visibility::Private,
                |o: &PropertyTestTarget| o.dummy_num1,
                |o: &mut PropertyTestTarget, v| o.dummy_num1 = v,
            )
            .property(
                "Num",
                Visibility::Private,
                |o: &PropertyTestTarget| o.num,
                |o: &mut PropertyTestTarget, v| o.num = v,
            )
            .property(
                "DummyNum2",
                Visibility::Public,
                |o: &PropertyTestTarget| o.dummy_num2,
                |o: &mut PropertyTestTarget, v| o.dummy_num2 = v,
            )
            .static_property(
                "DummyNum3",
                Visibility::Private,
                || *DUMMY_NUM3.read(),
                |v| *DUMMY_NUM3.write() = v,
            )
            .property_readonly("CreatedNum", Visibility::Internal, |o: &PropertyTestTarget| {
                o.created_num
            });
        },
    );
}
