//! Integration tests for Reflector against the fixture assembly

use merror::{
    args, IntoValue, MemberKind, ReflectError, Reflector, ReflectorParam, TypeHandle, TypeTag,
    Value, Visibility,
};
use merror_test_target::{FieldTestTarget, IndexerTestTarget, MethodTestTarget, PropertyTestTarget};
use merror_tests::{setup, type_name};

fn reflector_of<T: std::any::Any>() -> Reflector {
    setup();
    Reflector::of::<T>().unwrap()
}

/// Reflector for a crate-private fixture type, found next to `IndexerTestTarget`
fn hidden(name: &str) -> Reflector {
    setup();
    Reflector::in_assembly_of::<IndexerTestTarget>(&type_name(name)).unwrap()
}

fn text(s: &str) -> Value {
    s.into_value()
}

#[test]
fn test_new_without_type_fails() {
    let err = Reflector::new(None::<TypeHandle>).unwrap_err();
    assert!(matches!(err, ReflectError::InvalidArgument(_)));
}

#[test]
fn test_unknown_type_name() {
    setup();
    let err = Reflector::in_assembly_of::<IndexerTestTarget>(&type_name("Nope")).unwrap_err();
    assert!(matches!(err, ReflectError::TypeNotFound { .. }));

    // Lookup is case-sensitive
    let err = Reflector::in_assembly_of::<IndexerTestTarget>(&type_name("newinstancetarget"))
        .unwrap_err();
    assert!(matches!(err, ReflectError::TypeNotFound { .. }));
}

// ============================================================================
// Constructors
// ============================================================================

#[test]
fn test_private_constructor() {
    let reflector = hidden("NewInstanceTarget");
    let obj = reflector.new_instance(args![]).unwrap();

    let called = reflector.get_field(&obj, "is_default_constructor_called").unwrap();
    assert!(called.cast::<bool>().unwrap());
}

#[test]
fn test_exact_constructor() {
    let reflector = hidden("NewInstanceTarget");
    let obj = reflector
        .new_instance_exact(&mut [ReflectorParam::of(None::<String>, false)])
        .unwrap();

    let received = reflector.get_field(&obj, "is_null_text_received").unwrap();
    assert!(received.cast::<bool>().unwrap());
}

#[test]
fn test_constructor_handler_error() {
    let reflector = hidden("NewInstanceTarget");
    let err = reflector
        .new_instance_exact(&mut [ReflectorParam::of("not null", false)])
        .unwrap_err();
    assert!(matches!(err, ReflectError::Invocation(_)));
}

#[test]
fn test_constructor_with_ref_param() {
    let reflector = hidden("NewInstanceTarget");
    let mut params = [ReflectorParam::of(0, true)];
    reflector.new_instance_exact(&mut params).unwrap();

    assert_eq!(params[0].value().cast::<i32>().unwrap(), 123);
}

#[test]
fn test_constructor_not_found() {
    let reflector = hidden("NewInstanceTarget");
    // An inferred i32 does not match the by-ref (i32&) overload
    let err = reflector.new_instance(args![0]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_static_field() {
    let reflector = reflector_of::<FieldTestTarget>();
    FieldTestTarget::set_static_text(Some("hoge"));

    assert_eq!(reflector.get_static_field("text").unwrap().cast::<String>().unwrap(), "hoge");

    reflector.set_static_field("text", text("あああ")).unwrap();
    assert_eq!(reflector.get_static_field("text").unwrap().cast::<String>().unwrap(), "あああ");

    reflector.set_static_field("text", Value::null()).unwrap();
    assert!(reflector.get_static_field("text").unwrap().is_null());

    FieldTestTarget::set_static_text(None);
}

#[test]
fn test_instance_field() {
    let reflector = reflector_of::<FieldTestTarget>();
    let obj = Value::object(FieldTestTarget::new(3333));

    assert_eq!(reflector.get_field(&obj, "num").unwrap().cast::<i32>().unwrap(), 3333);

    reflector.set_field(&obj, "num", Value::new(-1)).unwrap();
    assert_eq!(reflector.get_field(&obj, "num").unwrap().cast::<i32>().unwrap(), -1);
}

#[test]
fn test_field_type_mismatch() {
    let reflector = reflector_of::<FieldTestTarget>();
    let obj = Value::object(FieldTestTarget::new(123));

    let err = reflector.set_field(&obj, "num", text("aaaaa")).unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    assert_eq!(reflector.get_field(&obj, "num").unwrap().cast::<i32>().unwrap(), 123);
}

#[test]
fn test_static_field_type_mismatch() {
    let reflector = reflector_of::<FieldTestTarget>();
    reflector.set_static_field("public_text", text("kept")).unwrap();

    let err = reflector.set_static_field("public_text", Value::new(1)).unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));

    let value = reflector.get_static_field("public_text").unwrap();
    assert_eq!(value.cast::<String>().unwrap(), "kept");
}

#[test]
fn test_field_not_found() {
    let reflector = reflector_of::<FieldTestTarget>();
    let obj = Value::object(FieldTestTarget::new(123));

    let err = reflector.set_field(&obj, "none", Value::null()).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));

    let err = reflector.get_field(&obj, "none").unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

#[test]
fn test_instance_field_is_not_static() {
    let reflector = reflector_of::<FieldTestTarget>();
    let err = reflector.get_static_field("num").unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

#[test]
fn test_null_instance_reaches_static_field() {
    let reflector = reflector_of::<FieldTestTarget>();

    reflector.set_field(&Value::null(), "dummy_text", text("via null")).unwrap();
    let value = reflector.get_static_field("dummy_text").unwrap();
    assert_eq!(value.cast::<String>().unwrap(), "via null");

    let value = reflector.get_field(&Value::null(), "dummy_text").unwrap();
    assert_eq!(value.cast::<String>().unwrap(), "via null");
}

#[test]
fn test_public_field() {
    let reflector = reflector_of::<FieldTestTarget>();
    let obj = Value::object(FieldTestTarget::new(0));

    reflector.set_field(&obj, "public_num", Value::new(7)).unwrap();
    assert_eq!(reflector.get_field(&obj, "public_num").unwrap().cast::<i32>().unwrap(), 7);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_static_property() {
    let reflector = reflector_of::<PropertyTestTarget>();
    PropertyTestTarget::set_static_text(Some("hoge"));

    assert_eq!(reflector.get_static_property("Text").unwrap().cast::<String>().unwrap(), "hoge");

    reflector.set_static_property("Text", text("あああ")).unwrap();
    assert_eq!(reflector.get_static_property("Text").unwrap().cast::<String>().unwrap(), "あああ");

    PropertyTestTarget::set_static_text(None);
}

#[test]
fn test_instance_property() {
    let reflector = reflector_of::<PropertyTestTarget>();
    let obj = Value::object(PropertyTestTarget::new(3333));

    assert_eq!(reflector.get_property(&obj, "Num").unwrap().cast::<i32>().unwrap(), 3333);

    reflector.set_property(&obj, "Num", Value::new(-1)).unwrap();
    assert_eq!(reflector.get_property(&obj, "Num").unwrap().cast::<i32>().unwrap(), -1);
}

#[test]
fn test_property_type_mismatch() {
    let reflector = reflector_of::<PropertyTestTarget>();
    let obj = Value::object(PropertyTestTarget::new(123));

    let err = reflector.set_property(&obj, "Num", text("aaaaa")).unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    assert_eq!(reflector.get_property(&obj, "Num").unwrap().cast::<i32>().unwrap(), 123);
}

#[test]
fn test_static_property_type_mismatch() {
    let reflector = reflector_of::<PropertyTestTarget>();
    reflector.set_static_property("DummyText1", text("kept")).unwrap();

    let err = reflector.set_static_property("DummyText1", Value::new(1)).unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));

    let value = reflector.get_static_property("DummyText1").unwrap();
    assert_eq!(value.cast::<String>().unwrap(), "kept");
}

#[test]
fn test_property_scope_and_visibility_stay_separate() {
    let reflector = reflector_of::<PropertyTestTarget>();
    let obj = Value::object(PropertyTestTarget::new(1));

    // Public static
    reflector.set_static_property("DummyText2", text("public")).unwrap();
    let value = reflector.get_static_property("DummyText2").unwrap();
    assert_eq!(value.cast::<String>().unwrap(), "public");
    assert!(matches!(
        reflector.get_property(&obj, "DummyText2"),
        Err(ReflectError::MemberNotFound { kind: MemberKind::Property, .. })
    ));

    // Private instance
    reflector.set_property(&obj, "DummyText3", text("mine")).unwrap();
    assert_eq!(
        reflector.get_property(&obj, "DummyText3").unwrap().cast::<String>().unwrap(),
        "mine"
    );
    assert!(matches!(
        reflector.get_static_property("DummyText3"),
        Err(ReflectError::MemberNotFound { .. })
    ));

    // Public instance
    reflector.set_property(&obj, "DummyNum2", Value::new(22)).unwrap();
    assert_eq!(reflector.get_property(&obj, "DummyNum2").unwrap().cast::<i32>().unwrap(), 22);
    assert!(matches!(
        reflector.get_static_property("DummyNum2"),
        Err(ReflectError::MemberNotFound { .. })
    ));

    // Private static
    reflector.set_static_property("DummyNum3", Value::new(33)).unwrap();
    assert_eq!(reflector.get_static_property("DummyNum3").unwrap().cast::<i32>().unwrap(), 33);
    assert!(matches!(
        reflector.get_property(&obj, "DummyNum3"),
        Err(ReflectError::MemberNotFound { .. })
    ));

    // Setting the dummies left Num alone
    assert_eq!(reflector.get_property(&obj, "Num").unwrap().cast::<i32>().unwrap(), 1);
}

#[test]
fn test_property_not_found() {
    let reflector = reflector_of::<PropertyTestTarget>();
    let obj = Value::object(PropertyTestTarget::new(123));

    let err = reflector.set_property(&obj, "none", Value::null()).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));

    let err = reflector.get_property(&obj, "none").unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

#[test]
fn test_read_only_property() {
    let reflector = reflector_of::<PropertyTestTarget>();
    let obj = Value::object(PropertyTestTarget::new(5));

    assert_eq!(reflector.get_property(&obj, "CreatedNum").unwrap().cast::<i32>().unwrap(), 5);

    let err = reflector.set_property(&obj, "CreatedNum", Value::new(6)).unwrap_err();
    assert!(matches!(err, ReflectError::ReadOnly { .. }));
}

// ============================================================================
// Indexers
// ============================================================================

#[test]
fn test_indexer_with_one_param() {
    let reflector = reflector_of::<IndexerTestTarget>();
    let item_reflector = hidden("IndexerItem");
    let obj = Value::object(IndexerTestTarget::new());

    let item = reflector.get_indexer(&obj, args![2]).unwrap();
    assert_eq!(item_reflector.get_field(&item, "num").unwrap().cast::<i32>().unwrap(), 20);

    let item = item_reflector.new_instance(args![1234]).unwrap();
    reflector.set_indexer(&obj, item, args![11]).unwrap();

    let res = reflector.get_indexer(&obj, args![11]).unwrap();
    assert_eq!(item_reflector.get_field(&res, "num").unwrap().cast::<i32>().unwrap(), 1234);
}

#[test]
fn test_indexer_with_two_params() {
    let reflector = reflector_of::<IndexerTestTarget>();
    let item_reflector = hidden("IndexerItem");
    let obj = Value::object(IndexerTestTarget::new());

    let item = reflector.get_indexer(&obj, args![4, "three"]).unwrap();
    assert_eq!(item_reflector.get_field(&item, "num").unwrap().cast::<i32>().unwrap(), 3);

    let item = item_reflector.new_instance(args![i32::MAX]).unwrap();
    reflector.set_indexer(&obj, item, args![12, "hoge"]).unwrap();

    let res = reflector.get_indexer(&obj, args![12, "hoge"]).unwrap();
    assert_eq!(
        item_reflector.get_field(&res, "num").unwrap().cast::<i32>().unwrap(),
        i32::MAX
    );
}

#[test]
fn test_indexer_exact() {
    let reflector = reflector_of::<IndexerTestTarget>();
    let item_reflector = hidden("IndexerItem");
    let obj = Value::object(IndexerTestTarget::new());

    let indexes = [ReflectorParam::of(2, false), ReflectorParam::of("one", false)];
    let item = reflector.get_indexer_exact(&obj, &indexes).unwrap();
    assert_eq!(item_reflector.get_field(&item, "num").unwrap().cast::<i32>().unwrap(), 1);

    let item = item_reflector.new_instance(args![9]).unwrap();
    reflector.set_indexer_exact(&obj, item, &indexes).unwrap();

    let res = reflector.get_indexer(&obj, args![2, "one"]).unwrap();
    assert_eq!(item_reflector.get_field(&res, "num").unwrap().cast::<i32>().unwrap(), 9);
}

#[test]
fn test_indexer_missing_key() {
    let reflector = reflector_of::<IndexerTestTarget>();
    let obj = Value::object(IndexerTestTarget::new());

    let err = reflector.get_indexer(&obj, args![99]).unwrap_err();
    assert!(matches!(err, ReflectError::Invocation(_)));
}

#[test]
fn test_indexer_not_found() {
    let reflector = reflector_of::<IndexerTestTarget>();
    let obj = Value::object(IndexerTestTarget::new());

    let err = reflector.get_indexer(&obj, args!["three"]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

#[test]
fn test_indexer_value_type_mismatch() {
    let reflector = reflector_of::<IndexerTestTarget>();
    let obj = Value::object(IndexerTestTarget::new());

    let err = reflector.set_indexer(&obj, Value::new(5), args![2]).unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
}

// ============================================================================
// Methods
// ============================================================================

#[test]
fn test_static_method() {
    let reflector = reflector_of::<MethodTestTarget>();
    let res = reflector.invoke_static("StaticSum", args![10, 20]).unwrap();

    assert_eq!(res.cast::<i32>().unwrap(), 30);
}

#[test]
fn test_instance_method() {
    let reflector = reflector_of::<MethodTestTarget>();
    let obj = Value::object(MethodTestTarget::new(4));

    let res = reflector.invoke(&obj, "Sum", args![5]).unwrap();

    assert_eq!(res.cast::<i32>().unwrap(), 9);
}

#[test]
fn test_method_with_out_param() {
    let reflector = reflector_of::<MethodTestTarget>();
    let obj = Value::object(MethodTestTarget::new(-3));

    let mut params = [ReflectorParam::of(4, false), ReflectorParam::of(0, true)];
    let res = reflector.invoke_exact(&obj, "Sum", &mut params).unwrap();

    assert!(res.is_null());
    assert_eq!(params[0].value().cast::<i32>().unwrap(), 4);
    assert_eq!(params[1].value().cast::<i32>().unwrap(), 1);
}

#[test]
fn test_method_signature_mismatch() {
    let reflector = reflector_of::<MethodTestTarget>();
    let obj = Value::object(MethodTestTarget::new(0));

    let err = reflector.invoke(&obj, "Sum", args![5i64]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));

    // The two-argument overload takes an out parameter
    let err = reflector.invoke(&obj, "Sum", args![4, 0]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

#[test]
fn test_method_name_not_found() {
    let reflector = reflector_of::<MethodTestTarget>();
    let obj = Value::object(MethodTestTarget::new(0));

    let err = reflector.invoke_static("Nope", args![]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { kind: MemberKind::Method, .. }));

    let err = reflector.invoke(&obj, "Nope", args![]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { kind: MemberKind::Method, .. }));
}

#[test]
fn test_method_with_own_instance_argument() {
    let reflector = reflector_of::<MethodTestTarget>();
    let obj = Value::object(MethodTestTarget::new(7));

    let res = reflector.invoke(&obj, "SumWith", args![obj.clone()]).unwrap();
    assert_eq!(res.cast::<i32>().unwrap(), 14);

    let other = Value::object(MethodTestTarget::new(5));
    let res = reflector.invoke(&obj, "SumWith", args![other]).unwrap();
    assert_eq!(res.cast::<i32>().unwrap(), 12);
}

#[test]
fn test_null_instance_reaches_static_method() {
    let reflector = reflector_of::<MethodTestTarget>();

    let res = reflector.invoke(&Value::null(), "StaticSum", args![1, 2]).unwrap();
    assert_eq!(res.cast::<i32>().unwrap(), 3);

    let err = reflector.invoke(&Value::null(), "Sum", args![1]).unwrap_err();
    assert!(matches!(err, ReflectError::MemberNotFound { .. }));
}

#[test]
fn test_method_metadata() {
    let reflector = reflector_of::<MethodTestTarget>();
    let ty = reflector.type_handle();

    assert_eq!(ty.name(), "MethodTestTarget");
    assert_eq!(ty.namespace(), Some(merror_tests::NS));

    let int = TypeTag::of::<i32>();
    let sums: Vec<_> = ty.methods().iter().filter(|m| m.name() == "Sum").collect();
    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].visibility(), Visibility::Protected);
    assert_eq!(sums[1].visibility(), Visibility::Internal);
    assert_eq!(sums[1].parameters(), &[int, int.make_by_ref()]);
}
