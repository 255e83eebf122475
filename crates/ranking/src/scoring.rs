//! Per-product and per-preview scoring.
//!
//! A product contributes +1 when in stock and -1 otherwise, plus the configured
//! image penalty when it has no real photo. The penalty is below -1, so an
//! in-stock product without a photo scores under an out-of-stock one with a photo.

use shopview_catalog::Product;
use shopview_core::ProductId;

use crate::config::RankingConfig;
use crate::index::ProductIndex;

pub fn product_score(product: &Product, config: &RankingConfig) -> f64 {
    let availability = if product.is_available() { 1.0 } else { -1.0 };
    let image = if product.has_real_image(&config.placeholder_image) {
        0.0
    } else {
        config.image_penalty
    };
    availability + image
}

/// Sum of the product scores of a preview.
///
/// Computed from counts so the result does not depend on item order; equal
/// previews always tie exactly.
pub fn preview_score<'a>(
    preview: impl IntoIterator<Item = &'a Product>,
    config: &RankingConfig,
) -> f64 {
    let (availability, missing_photos) = preview.into_iter().fold((0i64, 0u32), |(net, missing), p| {
        let stock = if p.is_available() { 1 } else { -1 };
        let photo = u32::from(!p.has_real_image(&config.placeholder_image));
        (net + stock, missing + photo)
    });
    availability as f64 + f64::from(missing_photos) * config.image_penalty
}

/// Score of a preview given by ids. Ids missing from `index` contribute nothing.
pub fn preview_score_of(ids: &[ProductId], index: &ProductIndex, config: &RankingConfig) -> f64 {
    preview_score(ids.iter().filter_map(|id| index.get(id)), config)
}

/// Stable partition: in-stock members first, then out-of-stock, each in arrival order.
pub fn availability_first(members: &[ProductId], index: &ProductIndex) -> Vec<ProductId> {
    let (in_stock, out_of_stock): (Vec<&ProductId>, Vec<&ProductId>) = members
        .iter()
        .filter(|id| index.get(id).is_some())
        .partition(|id| index.get(id).is_some_and(Product::is_available));

    in_stock.into_iter().chain(out_of_stock).cloned().collect()
}
