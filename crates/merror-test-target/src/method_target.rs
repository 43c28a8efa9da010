use merror::{AssemblyBuilder, Object, TypeTag, Visibility};

/// Overloaded methods, one of them with an out parameter
#[derive(Debug)]
pub struct MethodTestTarget {
    base_num: i32,
}

impl MethodTestTarget {
    pub fn new(base_num: i32) -> Self {
        Self { base_num }
    }

    fn static_sum(a: i32, b: i32) -> i32 {
        a + b
    }

    fn sum(&self, num: i32) -> i32 {
        self.base_num + num
    }
}

pub(crate) fn register(asm: &mut AssemblyBuilder) {
    let int = TypeTag::of::<i32>();
    let this = TypeTag::of::<MethodTestTarget>();

    asm.register::<MethodTestTarget, _>(
        &crate::full_name("MethodTestTarget"),
        Visibility::Public,
        |t| {
            t.static_method("StaticSum", Visibility::Private, &[int, int], |args| {
                Ok(MethodTestTarget::static_sum(args.get(0)?, args.get(1)?))
            })
            .method("Sum", Visibility::Protected, &[int], |o: &Object<MethodTestTarget>, args| {
                let num = args.get(0)?;
                let sum = o.read().sum(num);
                Ok(sum)
            })
            // Sum(int num, out int result)
            .method(
                "Sum",
                Visibility::Internal,
                &[int, int.make_by_ref()],
                |o: &Object<MethodTestTarget>, args| {
                    let num = args.get(0)?;
                    let result = o.read().sum(num);
                    args.set(1, result)
                },
            )
            // SumWith(MethodTestTarget other): base of this plus base of other
            .method("SumWith", Visibility::Private, &[this], |o: &Object<MethodTestTarget>, args| {
                let other = args.get::<Object<MethodTestTarget>>(0)?;
                let other_base = other.read().base_num;
                let sum = o.read().sum(other_base);
                Ok(sum)
            });
        },
    );
}
