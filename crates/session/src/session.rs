//! A search session: the single live owner of derived state.
//!
//! The session keeps the inputs (latest accepted product list, active filters,
//! disclosure mode) and one [`Overview`] derived from them. Every input change
//! discards the overview and reruns the pipeline; nothing is patched in place.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use shopview_catalog::{ActiveFilterSet, FacetIndex, Product, decode_products};
use shopview_core::{DomainResult, SessionId};
use shopview_ranking::{Disclosure, Overview, Pipeline, RankingConfig, RenderedBlock, Transition, ViewMode};

use crate::request::{RequestToken, RequestTracker};

/// Outcome of handing a response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The response belonged to the latest request and replaced the product list.
    Applied,
    /// A newer request was issued meanwhile; the response was discarded.
    Stale {
        token: RequestToken,
        current: Option<RequestToken>,
    },
}

#[derive(Debug)]
pub struct SearchSession {
    id: SessionId,
    pipeline: Pipeline,
    requests: Arc<RequestTracker>,
    query: Option<String>,
    products: Vec<Product>,
    facets: FacetIndex,
    filters: ActiveFilterSet,
    disclosure: Disclosure,
    overview: Overview,
    runs: u64,
}

impl SearchSession {
    pub fn new(pipeline: Pipeline) -> Self {
        let overview = pipeline.run(&[], &ActiveFilterSet::new());
        Self {
            id: SessionId::new(),
            pipeline,
            requests: Arc::new(RequestTracker::new()),
            query: None,
            products: Vec::new(),
            facets: FacetIndex::default(),
            filters: ActiveFilterSet::new(),
            disclosure: Disclosure::new(),
            overview,
            runs: 0,
        }
    }

    pub fn with_config(config: RankingConfig) -> DomainResult<Self> {
        Ok(Self::new(Pipeline::new(config)?))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Tracker to share with the fetch layer.
    pub fn requests(&self) -> Arc<RequestTracker> {
        Arc::clone(&self.requests)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Record a new query and issue the token its response must carry.
    pub fn begin_query(&mut self, query: impl Into<String>) -> RequestToken {
        let token = self.requests.issue();
        let query = query.into();
        tracing::debug!(session_id = %self.id, %token, query = %query, "query issued");
        self.query = Some(query);
        token
    }

    /// Accept a raw JSON response for `token`.
    ///
    /// Malformed payloads degrade to an empty product list.
    pub fn receive(&mut self, token: RequestToken, payload: &JsonValue) -> Delivery {
        if let Some(stale) = self.check_stale(token) {
            return stale;
        }
        let products = decode_products(payload);
        self.replace_products(products);
        Delivery::Applied
    }

    /// Accept an already decoded response for `token`.
    pub fn receive_products(&mut self, token: RequestToken, products: Vec<Product>) -> Delivery {
        if let Some(stale) = self.check_stale(token) {
            return stale;
        }
        self.replace_products(products);
        Delivery::Applied
    }

    fn check_stale(&self, token: RequestToken) -> Option<Delivery> {
        if self.requests.is_current(token) {
            return None;
        }
        let current = self.requests.current();
        tracing::debug!(
            session_id = %self.id,
            %token,
            current = ?current.map(RequestToken::value),
            "discarding stale response"
        );
        Some(Delivery::Stale { token, current })
    }

    fn replace_products(&mut self, products: Vec<Product>) {
        self.facets = FacetIndex::build(&products);
        self.products = products;
        // A new result list always opens on the aggregate view.
        self.disclosure = Disclosure::new();
        self.recompute();
    }

    /// Checkbox change in the filter menu. Returns whether the filter set changed.
    pub fn toggle_filter(&mut self, name: &str, value: &str, checked: bool) -> bool {
        let changed = self.filters.toggle(name, value, checked);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.recompute();
        }
    }

    /// Show every member of `name`.
    pub fn expand(&mut self, name: &str) -> DomainResult<Transition> {
        let transition = self.disclosure.expand(&self.overview, name)?;
        if transition == Transition::Collapsed {
            self.recompute();
        }
        Ok(transition)
    }

    /// Back to the aggregate view; always rebuilds the overview.
    pub fn collapse(&mut self) -> Transition {
        let transition = self.disclosure.collapse();
        if transition == Transition::Collapsed {
            self.recompute();
        }
        transition
    }

    fn recompute(&mut self) {
        self.overview = self.pipeline.run(&self.products, &self.filters);
        self.disclosure.reconcile(&self.overview);
        self.runs += 1;
        tracing::debug!(
            session_id = %self.id,
            run = self.runs,
            status = ?self.overview.status(),
            mode = ?self.disclosure.mode(),
            "session state rebuilt"
        );
    }

    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn filters(&self) -> &ActiveFilterSet {
        &self.filters
    }

    pub fn mode(&self) -> &ViewMode {
        self.disclosure.mode()
    }

    /// The filter panel is shown whenever the unfiltered list has parameters,
    /// even if the current filters match nothing.
    pub fn show_filter_panel(&self) -> bool {
        !self.facets.is_empty()
    }

    /// Blocks for the current view mode.
    pub fn render(&self) -> DomainResult<Vec<RenderedBlock<'_>>> {
        self.overview
            .render(self.disclosure.mode(), &self.pipeline.config().placeholder_image)
    }

    /// Number of pipeline runs so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}
