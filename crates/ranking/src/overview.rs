//! The ranked output handed to the rendering layer.

use serde::Serialize;

use shopview_catalog::Product;
use shopview_core::ProductId;

use crate::allocator::ScoredCategory;
use crate::index::ProductIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    /// The synthetic entry pinned first; never scored or allocated.
    AllResults,
    Category,
}

/// One entry of the ordered category list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub kind: GroupKind,
    #[serde(rename = "categoryName")]
    pub name: String,
    #[serde(rename = "categoryUrl")]
    pub url: Option<String>,
    /// Exclusive, capped preview (aggregate view). Empty for "All results".
    #[serde(rename = "previewItems")]
    pub preview: Vec<ProductId>,
    /// Every member, availability-first (detail view). For "All results",
    /// every product of the run in arrival order.
    #[serde(rename = "fullItems")]
    pub members: Vec<ProductId>,
    pub score: f64,
}

impl CategoryGroup {
    pub fn is_all_results(&self) -> bool {
        self.kind == GroupKind::AllResults
    }
}

impl From<ScoredCategory> for CategoryGroup {
    fn from(scored: ScoredCategory) -> Self {
        Self {
            kind: GroupKind::Category,
            name: scored.name,
            url: scored.url,
            preview: scored.preview,
            members: scored.members,
            score: scored.score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverviewStatus {
    /// Nothing survived decoding, dedup and filtering.
    NoProducts,
    /// Products exist but none declares a category.
    NoCategories,
    Ready,
}

/// Result of one pipeline run. Rebuilt from scratch on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    status: OverviewStatus,
    groups: Vec<CategoryGroup>,
    #[serde(skip)]
    index: ProductIndex,
}

impl Overview {
    pub(crate) fn empty(status: OverviewStatus, index: ProductIndex) -> Self {
        Self {
            status,
            groups: Vec::new(),
            index,
        }
    }

    /// Pin "All results" in front of the ranked categories.
    pub(crate) fn assemble(
        all_results_label: &str,
        ranked: Vec<ScoredCategory>,
        index: ProductIndex,
    ) -> Self {
        let all_results = CategoryGroup {
            kind: GroupKind::AllResults,
            name: all_results_label.to_string(),
            url: None,
            preview: Vec::new(),
            members: index.ids().cloned().collect(),
            score: 0.0,
        };

        let mut groups = Vec::with_capacity(ranked.len() + 1);
        groups.push(all_results);
        groups.extend(ranked.into_iter().map(CategoryGroup::from));

        Self {
            status: OverviewStatus::Ready,
            groups,
            index,
        }
    }

    pub fn status(&self) -> OverviewStatus {
        self.status
    }

    /// Whether the "no products found" message should be shown.
    pub fn is_empty(&self) -> bool {
        self.status != OverviewStatus::Ready
    }

    /// The category panel is hidden in both terminal states.
    pub fn show_category_panel(&self) -> bool {
        self.status == OverviewStatus::Ready
    }

    /// All entries, "All results" first.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn all_results(&self) -> Option<&CategoryGroup> {
        self.groups.first().filter(|g| g.is_all_results())
    }

    /// Real categories in rank order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter().filter(|g| !g.is_all_results())
    }

    pub fn category(&self, name: &str) -> Option<&CategoryGroup> {
        self.categories().find(|g| g.name == name)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id)
    }

    /// Products of the run in arrival order.
    pub fn products(&self) -> &[Product] {
        self.index.products()
    }

    pub(crate) fn resolve<'a>(&'a self, ids: &[ProductId]) -> Vec<&'a Product> {
        ids.iter().filter_map(|id| self.index.get(id)).collect()
    }

    /// Number of products of the run (the "All results" count).
    pub fn product_count(&self) -> usize {
        self.index.len()
    }
}
