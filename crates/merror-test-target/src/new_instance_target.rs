use merror::{AssemblyBuilder, ReflectError, TypeTag, Visibility};

/// Constructors only; the type itself is crate-private
#[derive(Debug, Default)]
pub(crate) struct NewInstanceTarget {
    is_default_constructor_called: bool,
    is_null_text_received: bool,
}

pub(crate) fn register(asm: &mut AssemblyBuilder) {
    asm.register::<NewInstanceTarget, _>(
        &crate::full_name("NewInstanceTarget"),
        Visibility::Internal,
        |t| {
            t.field(
                "is_default_constructor_called",
                Visibility::Private,
                |o: &NewInstanceTarget| o.is_default_constructor_called,
                |o: &mut NewInstanceTarget, v| o.is_default_constructor_called = v,
            )
            .field(
                "is_null_text_received",
                Visibility::Private,
                |o: &NewInstanceTarget| o.is_null_text_received,
                |o: &mut NewInstanceTarget, v| o.is_null_text_received = v,
            )
            .constructor(Visibility::Private, &[], |_| {
                Ok(NewInstanceTarget {
                    is_default_constructor_called: true,
                    ..Default::default()
                })
            })
            // Accepts only a null string
            .constructor(Visibility::Public, &[TypeTag::of::<String>()], |args| {
                let text: Option<String> = args.get(0)?;
                if text.is_some() {
                    return Err(ReflectError::invocation("text must be null"));
                }
                Ok(NewInstanceTarget {
                    is_null_text_received: true,
                    ..Default::default()
                })
            })
            .constructor(
                Visibility::Internal,
                &[TypeTag::of::<i32>().make_by_ref()],
                |args| {
                    args.set(0, 123)?;
                    Ok(NewInstanceTarget::default())
                },
            );
        },
    );
}
