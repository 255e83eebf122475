//! First-occurrence-wins deduplication by entity id.

use std::collections::HashSet;

use shopview_core::Entity;

/// Drop every item whose id was already seen, preserving order.
pub fn dedup_by_id<T, I>(items: I) -> Vec<T>
where
    T: Entity,
    I: IntoIterator<Item = T>,
{
    let mut seen: HashSet<T::Id> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect()
}

/// Same as [`dedup_by_id`], for bare id lists.
pub fn dedup_ids<Id, I>(ids: I) -> Vec<Id>
where
    Id: Clone + Eq + core::hash::Hash,
    I: IntoIterator<Item = Id>,
{
    let mut seen: HashSet<Id> = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;
    use shopview_core::ProductId;

    fn product(id: &str, name: &str) -> Product {
        Product::new(ProductId::new(id).unwrap(), name)
    }

    #[test]
    fn first_occurrence_wins() {
        let deduped = dedup_by_id(vec![
            product("a", "first a"),
            product("b", "b"),
            product("a", "second a"),
            product("c", "c"),
            product("b", "second b"),
        ]);

        let names: Vec<&str> = deduped.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["first a", "b", "c"]);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(dedup_by_id(Vec::<Product>::new()).is_empty());
        assert!(dedup_ids(Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn dedups_plain_ids() {
        assert_eq!(dedup_ids(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: output has no repeats and keeps first-seen order.
            #[test]
            fn dedup_keeps_first_seen_order(ids in prop::collection::vec(0u8..16, 0..64)) {
                let products: Vec<Product> = ids
                    .iter()
                    .map(|n| product(&n.to_string(), "p"))
                    .collect();

                let deduped = dedup_by_id(products);
                let got: Vec<String> = deduped.iter().map(|p| p.id().to_string()).collect();

                let mut expected: Vec<String> = Vec::new();
                for n in &ids {
                    let s = n.to_string();
                    if !expected.contains(&s) {
                        expected.push(s);
                    }
                }
                prop_assert_eq!(got, expected);
            }
        }
    }
}
