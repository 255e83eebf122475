//! The full grouping pipeline:
//! dedup → filter → categorize → allocate/score → rank.
//!
//! A run is a pure function of `(products, filters, config)`; nothing is kept
//! between runs.

use shopview_catalog::{ActiveFilterSet, Product, dedup_by_id};
use shopview_core::DomainResult;

use crate::allocator::allocate;
use crate::categorizer::categorize;
use crate::config::RankingConfig;
use crate::index::ProductIndex;
use crate::overview::{Overview, OverviewStatus};
use crate::ranker::rank;

#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    config: RankingConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            config: RankingConfig::default(),
        }
    }
}

impl Pipeline {
    /// Build a pipeline, rejecting out-of-range tunables.
    pub fn new(config: RankingConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn run(&self, products: &[Product], filters: &ActiveFilterSet) -> Overview {
        let unique = dedup_by_id(products.iter().cloned());
        let duplicates = products.len() - unique.len();
        let filtered = filters.apply(unique);
        let index = ProductIndex::new(filtered);

        if index.is_empty() {
            tracing::info!(received = products.len(), "no products after filtering");
            return Overview::empty(OverviewStatus::NoProducts, index);
        }

        let categories = categorize(index.products(), self.config.grouping);
        if categories.is_empty() {
            tracing::info!(products = index.len(), "no product declares a category");
            return Overview::empty(OverviewStatus::NoCategories, index);
        }

        let ranked = rank(allocate(&categories, &index, &self.config));

        tracing::info!(
            received = products.len(),
            duplicates,
            products = index.len(),
            categories = ranked.len(),
            top = ranked.first().map(|c| c.name.as_str()).unwrap_or_default(),
            "category overview rebuilt"
        );

        Overview::assemble(&self.config.all_results_label, ranked, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AllocationOrder, GroupingPolicy};
    use crate::overview::GroupKind;
    use shopview_core::{DomainError, ProductId};

    fn pid(raw: &str) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn good(id: &str) -> Product {
        Product::new(pid(id), id)
            .with_availability(true)
            .with_image(format!("https://img.example/{id}.jpg"))
    }

    fn names(overview: &Overview) -> Vec<&str> {
        overview.groups().iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn rejects_invalid_config() {
        let err = Pipeline::new(RankingConfig::default().with_preview_cap(0)).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn all_results_is_pinned_first_with_every_product() {
        let products = vec![
            good("a").with_category("Bags", "/bags"),
            good("b"),
            good("a").with_category("Shoes", "/shoes"),
        ];
        let overview = Pipeline::default().run(&products, &ActiveFilterSet::new());

        let first = &overview.groups()[0];
        assert_eq!(first.kind, GroupKind::AllResults);
        assert_eq!(first.name, "All results");
        assert_eq!(first.members, vec![pid("a"), pid("b")]);
        assert!(first.preview.is_empty());
        assert_eq!(overview.product_count(), 2);
        // The duplicate "a" (declaring Shoes) was dropped before grouping.
        assert_eq!(names(&overview), vec!["All results", "Bags"]);
    }

    #[test]
    fn custom_label_is_used() {
        let pipeline =
            Pipeline::new(RankingConfig::default().with_all_results_label("Alle Ergebnisse")).unwrap();
        let overview = pipeline.run(&[good("a").with_category("Bags", "/bags")], &ActiveFilterSet::new());
        assert_eq!(names(&overview), vec!["Alle Ergebnisse", "Bags"]);
    }

    #[test]
    fn empty_list_is_no_products() {
        let overview = Pipeline::default().run(&[], &ActiveFilterSet::new());
        assert_eq!(overview.status(), OverviewStatus::NoProducts);
        assert!(overview.is_empty());
        assert!(!overview.show_category_panel());
        assert!(overview.groups().is_empty());
    }

    #[test]
    fn uncategorized_products_are_no_categories() {
        let overview = Pipeline::default().run(&[good("a"), good("b")], &ActiveFilterSet::new());
        assert_eq!(overview.status(), OverviewStatus::NoCategories);
        assert!(!overview.show_category_panel());
        assert_eq!(overview.product_count(), 2);
    }

    #[test]
    fn filters_run_before_grouping() {
        let products = vec![
            good("a").with_category("Bags", "/bags").with_parameter("color", "red"),
            good("b").with_category("Shoes", "/shoes").with_parameter("color", "blue"),
        ];
        let filters: ActiveFilterSet = [("color", "blue")].into_iter().collect();
        let overview = Pipeline::default().run(&products, &filters);
        assert_eq!(names(&overview), vec!["All results", "Shoes"]);
    }

    #[test]
    fn filters_that_match_nothing_are_no_products() {
        let products = vec![good("a").with_category("Bags", "/bags")];
        let filters: ActiveFilterSet = [("color", "green")].into_iter().collect();
        let overview = Pipeline::default().run(&products, &filters);
        assert_eq!(overview.status(), OverviewStatus::NoProducts);
    }

    #[test]
    fn least_populous_grouping_is_honoured() {
        let products = vec![
            good("a").with_category("Sale", "/sale").with_category("Bags", "/bags"),
            good("b").with_category("Sale", "/sale"),
        ];
        let pipeline =
            Pipeline::new(RankingConfig::default().with_grouping(GroupingPolicy::LeastPopulous)).unwrap();
        let overview = pipeline.run(&products, &ActiveFilterSet::new());
        assert_eq!(overview.category("Bags").unwrap().members, vec![pid("a")]);
        assert_eq!(overview.category("Sale").unwrap().members, vec![pid("b")]);
    }

    #[test]
    fn both_allocation_orders_are_deterministic() {
        let products = vec![
            Product::new(pid("w"), "w").with_category("Weak", "/weak"),
            good("s").with_category("Weak", "/weak").with_category("Strong", "/strong"),
        ];
        for order in [AllocationOrder::ProvisionalScore, AllocationOrder::Discovery] {
            let pipeline =
                Pipeline::new(RankingConfig::default().with_allocation_order(order)).unwrap();
            let first = pipeline.run(&products, &ActiveFilterSet::new());
            let second = pipeline.run(&products, &ActiveFilterSet::new());
            assert_eq!(first, second);
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec(
                (
                    0u8..20,
                    any::<bool>(),
                    any::<bool>(),
                    prop::collection::vec(0u8..5, 0..3),
                    prop::option::of(0u8..3),
                ),
                0..40,
            )
            .prop_map(|rows| {
                rows
                    .into_iter()
                    .map(|(id, available, photo, cats, color)| {
                        let mut p = Product::new(pid(&id.to_string()), "p").with_availability(available);
                        if photo {
                            p = p.with_image(format!("https://img.example/{id}.jpg"));
                        }
                        for c in cats {
                            p = p.with_category(format!("cat-{c}"), format!("/cat-{c}"));
                        }
                        if let Some(c) = color {
                            p = p.with_parameter("color", c.to_string());
                        }
                        p
                    })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: same input, same overview.
            #[test]
            fn pipeline_is_idempotent(products in arb_products(), color in prop::option::of(0u8..3)) {
                let filters: ActiveFilterSet = color
                    .map(|c| ("color", c.to_string()))
                    .into_iter()
                    .collect();
                let pipeline = Pipeline::default();
                prop_assert_eq!(pipeline.run(&products, &filters), pipeline.run(&products, &filters));
            }

            /// Property: no repeats in members, previews disjoint, ranking sorted.
            #[test]
            fn overview_invariants_hold(products in arb_products()) {
                let overview = Pipeline::default().run(&products, &ActiveFilterSet::new());
                if overview.is_empty() {
                    prop_assert!(overview.groups().is_empty());
                    return Ok(());
                }

                prop_assert!(overview.groups()[0].is_all_results());
                prop_assert_eq!(overview.groups().iter().filter(|g| g.is_all_results()).count(), 1);

                let mut previewed: HashSet<&ProductId> = HashSet::new();
                let mut previous_score = f64::INFINITY;
                for group in overview.categories() {
                    let unique: HashSet<&ProductId> = group.members.iter().collect();
                    prop_assert_eq!(unique.len(), group.members.len());
                    for id in &group.preview {
                        prop_assert!(previewed.insert(id));
                    }
                    prop_assert!(group.score <= previous_score);
                    previous_score = group.score;
                }
            }
        }
    }
}
