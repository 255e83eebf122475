//! JSON document printed by the binary.

use serde::Serialize;

use shopview_catalog::FacetIndex;
use shopview_core::{DomainResult, Entity, ProductId};
use shopview_ranking::{CategoryGroup, OverviewStatus, ViewMode};
use shopview_session::SearchSession;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub status: OverviewStatus,
    pub view: &'a ViewMode,
    pub show_category_panel: bool,
    pub show_filter_panel: bool,
    pub facets: &'a FacetIndex,
    pub groups: &'a [CategoryGroup],
    /// Blocks for the current view, in presentation order.
    pub blocks: Vec<BlockReport<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockReport<'a> {
    pub category_name: &'a str,
    pub category_url: Option<&'a str>,
    pub items: Vec<&'a ProductId>,
    pub more: usize,
}

impl<'a> Report<'a> {
    pub fn from_session(session: &'a SearchSession) -> DomainResult<Self> {
        let overview = session.overview();
        let blocks = session
            .render()?
            .into_iter()
            .map(|block| BlockReport {
                category_name: &block.group.name,
                category_url: block.group.url.as_deref(),
                items: block.items.iter().map(|p| p.id()).collect(),
                more: block.hidden_count,
            })
            .collect();

        Ok(Self {
            status: overview.status(),
            view: session.mode(),
            show_category_panel: overview.show_category_panel(),
            show_filter_panel: session.show_filter_panel(),
            facets: session.facets(),
            groups: overview.groups(),
            blocks,
        })
    }
}
