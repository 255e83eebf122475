//! Aggregate/detail disclosure and block rendering.
//!
//! - **Aggregate**: every category contributes its exclusive, capped preview.
//! - **Detail**: one category shows all of its members; exclusivity is lifted.
//!
//! Collapsing back to aggregate reports [`Transition::Collapsed`] so the owner
//! reruns the pipeline instead of reusing an overview computed under older
//! filters or an older product list.

use serde::Serialize;

use shopview_catalog::Product;
use shopview_core::{DomainError, DomainResult};

use crate::overview::{CategoryGroup, Overview};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "category", rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Aggregate,
    Detail(String),
}

/// What a disclosure request changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Expanded,
    /// Back to aggregate; derived state must be recomputed.
    Collapsed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disclosure {
    mode: ViewMode,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Switch to the detail view of `name`.
    ///
    /// Expanding the "All results" entry collapses. Expanding the category that
    /// is already expanded is a no-op. Unknown categories are `NotFound` and
    /// leave the mode untouched.
    pub fn expand(&mut self, overview: &Overview, name: &str) -> DomainResult<Transition> {
        if overview.all_results().is_some_and(|g| g.name == name) {
            return Ok(self.collapse());
        }
        if overview.category(name).is_none() {
            return Err(DomainError::not_found(format!("category {name:?}")));
        }
        if matches!(&self.mode, ViewMode::Detail(current) if current == name) {
            return Ok(Transition::Unchanged);
        }
        self.mode = ViewMode::Detail(name.to_string());
        Ok(Transition::Expanded)
    }

    pub fn collapse(&mut self) -> Transition {
        match self.mode {
            ViewMode::Aggregate => Transition::Unchanged,
            ViewMode::Detail(_) => {
                self.mode = ViewMode::Aggregate;
                Transition::Collapsed
            }
        }
    }

    /// Fall back to aggregate if the expanded category no longer exists.
    pub fn reconcile(&mut self, overview: &Overview) {
        if let ViewMode::Detail(name) = &self.mode {
            if overview.category(name).is_none() {
                tracing::debug!(category = %name, "expanded category vanished; back to aggregate view");
                self.mode = ViewMode::Aggregate;
            }
        }
    }
}

/// One category block as the renderer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock<'a> {
    pub group: &'a CategoryGroup,
    /// Products in presentation order.
    pub items: Vec<&'a Product>,
    /// Members left out of this block (the "More N" link). Zero in detail view.
    pub hidden_count: usize,
}

/// Presentation band: in-stock with photo, in-stock without, out-of-stock with
/// photo, out-of-stock without.
pub fn presentation_band(product: &Product, placeholder: &str) -> u8 {
    let stock = if product.is_available() { 0 } else { 2 };
    let photo = if product.has_real_image(placeholder) { 0 } else { 1 };
    stock + photo
}

/// Stable sort of `items` into presentation bands.
pub fn presentation_order<'a>(mut items: Vec<&'a Product>, placeholder: &str) -> Vec<&'a Product> {
    items.sort_by_key(|p| presentation_band(p, placeholder));
    items
}

impl Overview {
    /// Blocks to draw for `mode`.
    ///
    /// In aggregate mode, categories with an empty preview are skipped. In detail
    /// mode a single block with every member is returned.
    pub fn render(&self, mode: &ViewMode, placeholder: &str) -> DomainResult<Vec<RenderedBlock<'_>>> {
        match mode {
            ViewMode::Aggregate => Ok(self
                .categories()
                .filter(|group| !group.preview.is_empty())
                .map(|group| RenderedBlock {
                    group,
                    items: presentation_order(self.resolve(&group.preview), placeholder),
                    hidden_count: group.members.len().saturating_sub(group.preview.len()),
                })
                .collect()),
            ViewMode::Detail(name) => {
                let group = self
                    .category(name)
                    .ok_or_else(|| DomainError::not_found(format!("category {name:?}")))?;
                Ok(vec![RenderedBlock {
                    group,
                    items: presentation_order(self.resolve(&group.members), placeholder),
                    hidden_count: 0,
                }])
            }
        }
    }
}
