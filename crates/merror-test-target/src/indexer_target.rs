use merror::{AssemblyBuilder, Object, ReflectError, ReflectResult, TypeTag, Visibility};
use rustc_hash::FxHashMap;

/// Item stored behind the indexers; only reachable by name
#[derive(Debug)]
pub(crate) struct IndexerItem {
    num: i32,
}

impl IndexerItem {
    fn new(num: i32) -> Object<Self> {
        Object::new(Self { num })
    }
}

/// One- and two-index indexers over private maps
#[derive(Debug)]
pub struct IndexerTestTarget {
    items: FxHashMap<i32, Object<IndexerItem>>,
    grid: FxHashMap<i32, FxHashMap<String, Object<IndexerItem>>>,
}

impl IndexerTestTarget {
    pub fn new() -> Self {
        let items = [(3, IndexerItem::new(30)), (2, IndexerItem::new(20))]
            .into_iter()
            .collect();

        let row = |cells: [(&str, i32); 2]| -> FxHashMap<String, Object<IndexerItem>> {
            cells
                .into_iter()
                .map(|(key, num)| (key.to_string(), IndexerItem::new(num)))
                .collect()
        };
        let grid = [
            (2, row([("one", 1), ("two", 2)])),
            (4, row([("three", 3), ("four", 4)])),
        ]
        .into_iter()
        .collect();

        Self { items, grid }
    }

    fn item(&self, index: i32) -> ReflectResult<Object<IndexerItem>> {
        self.items
            .get(&index)
            .cloned()
            .ok_or_else(|| ReflectError::invocation(format!("key not found: {}", index)))
    }

    fn cell(&self, row: i32, column: &str) -> ReflectResult<Object<IndexerItem>> {
        self.grid
            .get(&row)
            .and_then(|cells| cells.get(column))
            .cloned()
            .ok_or_else(|| ReflectError::invocation(format!("key not found: [{}, {}]", row, column)))
    }
}

impl Default for IndexerTestTarget {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn register(asm: &mut AssemblyBuilder) {
    let int = TypeTag::of::<i32>();
    let string = TypeTag::of::<String>();

    asm.register::<IndexerTestTarget, _>(
        &crate::full_name("IndexerTestTarget"),
        Visibility::Public,
        |t| {
            t.indexer(
                Visibility::Private,
                &[int],
                |o: &IndexerTestTarget, indexes| o.item(indexes.get(0)?),
                |o: &mut IndexerTestTarget, indexes, item| {
                    o.items.insert(indexes.get(0)?, item);
                    Ok(())
                },
            )
            .indexer(
                Visibility::Internal,
                &[int, string],
                |o: &IndexerTestTarget, indexes| {
                    let column: String = indexes.get(1)?;
                    o.cell(indexes.get(0)?, &column)
                },
                |o: &mut IndexerTestTarget, indexes, item| {
                    o.grid
                        .entry(indexes.get(0)?)
                        .or_default()
                        .insert(indexes.get(1)?, item);
                    Ok(())
                },
            );
        },
    );

    asm.register::<IndexerItem, _>(&crate::full_name("IndexerItem"), Visibility::Internal, |t| {
        t.field(
            "num",
            Visibility::Private,
            |o: &IndexerItem| o.num,
            |o: &mut IndexerItem, v| o.num = v,
        )
        .constructor(Visibility::Internal, &[int], |args| {
            Ok(IndexerItem { num: args.get(0)? })
        });
    });
}
