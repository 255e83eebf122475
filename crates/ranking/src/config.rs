//! Tunable constants for grouping, scoring and allocation.

use serde::{Deserialize, Serialize};

use shopview_core::{DomainError, DomainResult};

/// Stand-in image the backend sends for products without a photo.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://i.pinimg.com/564x/0c/bb/aa/0cbbaab0deff7f188a7762d9569bf1b3.jpg";

pub const DEFAULT_PREVIEW_CAP: usize = 4;
pub const DEFAULT_IMAGE_PENALTY: f64 = -1.5;
pub const DEFAULT_ALL_RESULTS_LABEL: &str = "All results";

/// Order in which categories claim preview items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationOrder {
    /// Score every category without exclusion first, then let the best claim first.
    #[default]
    ProvisionalScore,
    /// Claim in first-discovery order.
    Discovery,
}

/// How products are assigned to categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingPolicy {
    /// Every declared membership gets the product.
    #[default]
    FanOut,
    /// Only the membership with the fewest fan-out members gets the product.
    LeastPopulous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingConfig {
    /// Preview items per category in the aggregate view.
    pub preview_cap: usize,
    /// Added to a product's score when it has no real photo. Must be below -1.
    pub image_penalty: f64,
    pub placeholder_image: String,
    pub all_results_label: String,
    pub allocation_order: AllocationOrder,
    pub grouping: GroupingPolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            preview_cap: DEFAULT_PREVIEW_CAP,
            image_penalty: DEFAULT_IMAGE_PENALTY,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            all_results_label: DEFAULT_ALL_RESULTS_LABEL.to_string(),
            allocation_order: AllocationOrder::default(),
            grouping: GroupingPolicy::default(),
        }
    }
}

impl RankingConfig {
    pub fn with_preview_cap(mut self, cap: usize) -> Self {
        self.preview_cap = cap;
        self
    }

    pub fn with_image_penalty(mut self, penalty: f64) -> Self {
        self.image_penalty = penalty;
        self
    }

    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }

    pub fn with_all_results_label(mut self, label: impl Into<String>) -> Self {
        self.all_results_label = label.into();
        self
    }

    pub fn with_allocation_order(mut self, order: AllocationOrder) -> Self {
        self.allocation_order = order;
        self
    }

    pub fn with_grouping(mut self, grouping: GroupingPolicy) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.preview_cap == 0 {
            return Err(DomainError::config("preview_cap must be at least 1"));
        }
        // The photo penalty has to outweigh the +1/-1 availability term.
        if !(self.image_penalty.is_finite() && self.image_penalty < -1.0) {
            return Err(DomainError::config(format!(
                "image_penalty must be a finite number below -1 (got {})",
                self.image_penalty
            )));
        }
        if self.all_results_label.trim().is_empty() {
            return Err(DomainError::config("all_results_label cannot be blank"));
        }
        Ok(())
    }

    /// Load from `SHOPVIEW_*` environment variables.
    ///
    /// Unset variables keep their default; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("SHOPVIEW_PREVIEW_CAP") {
            match raw.trim().parse::<usize>() {
                Ok(cap) if cap > 0 => config.preview_cap = cap,
                _ => tracing::warn!(value = %raw, "ignoring invalid SHOPVIEW_PREVIEW_CAP"),
            }
        }

        if let Some(raw) = lookup("SHOPVIEW_IMAGE_PENALTY") {
            match raw.trim().parse::<f64>() {
                Ok(penalty) if penalty.is_finite() && penalty < -1.0 => {
                    config.image_penalty = penalty
                }
                _ => tracing::warn!(value = %raw, "ignoring invalid SHOPVIEW_IMAGE_PENALTY"),
            }
        }

        if let Some(raw) = lookup("SHOPVIEW_PLACEHOLDER_IMAGE") {
            config.placeholder_image = raw.trim().to_string();
        }

        if let Some(raw) = lookup("SHOPVIEW_ALL_RESULTS_LABEL") {
            if raw.trim().is_empty() {
                tracing::warn!("ignoring blank SHOPVIEW_ALL_RESULTS_LABEL");
            } else {
                config.all_results_label = raw;
            }
        }

        if let Some(raw) = lookup("SHOPVIEW_ALLOCATION_ORDER") {
            match raw.trim().to_lowercase().as_str() {
                "provisional" | "provisional-score" => {
                    config.allocation_order = AllocationOrder::ProvisionalScore
                }
                "discovery" => config.allocation_order = AllocationOrder::Discovery,
                _ => tracing::warn!(value = %raw, "ignoring invalid SHOPVIEW_ALLOCATION_ORDER"),
            }
        }

        if let Some(raw) = lookup("SHOPVIEW_GROUPING") {
            match raw.trim().to_lowercase().as_str() {
                "fan-out" | "fanout" => config.grouping = GroupingPolicy::FanOut,
                "least-populous" => config.grouping = GroupingPolicy::LeastPopulous,
                _ => tracing::warn!(value = %raw, "ignoring invalid SHOPVIEW_GROUPING"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = RankingConfig::default();
        assert_eq!(config.preview_cap, 4);
        assert_eq!(config.image_penalty, -1.5);
        assert_eq!(config.allocation_order, AllocationOrder::ProvisionalScore);
        assert_eq!(config.grouping, GroupingPolicy::FanOut);
        config.validate().unwrap();
    }

    #[test]
    fn penalty_must_outweigh_availability() {
        for bad in [-1.0, -0.5, 0.0, 2.0, f64::NAN, f64::NEG_INFINITY] {
            let err = RankingConfig::default().with_image_penalty(bad).validate();
            assert!(matches!(err, Err(DomainError::Config(_))), "penalty {bad} accepted");
        }
        RankingConfig::default().with_image_penalty(-1.01).validate().unwrap();
    }

    #[test]
    fn zero_cap_and_blank_label_are_rejected() {
        assert!(RankingConfig::default().with_preview_cap(0).validate().is_err());
        assert!(RankingConfig::default().with_all_results_label("  ").validate().is_err());
    }

    #[test]
    fn reads_every_variable() {
        let config = RankingConfig::from_lookup(lookup_from(&[
            ("SHOPVIEW_PREVIEW_CAP", "6"),
            ("SHOPVIEW_IMAGE_PENALTY", "-2"),
            ("SHOPVIEW_PLACEHOLDER_IMAGE", "https://img.example/none.png"),
            ("SHOPVIEW_ALL_RESULTS_LABEL", "Everything"),
            ("SHOPVIEW_ALLOCATION_ORDER", "discovery"),
            ("SHOPVIEW_GROUPING", "least-populous"),
        ]));

        assert_eq!(config.preview_cap, 6);
        assert_eq!(config.image_penalty, -2.0);
        assert_eq!(config.placeholder_image, "https://img.example/none.png");
        assert_eq!(config.all_results_label, "Everything");
        assert_eq!(config.allocation_order, AllocationOrder::Discovery);
        assert_eq!(config.grouping, GroupingPolicy::LeastPopulous);
    }

    #[test]
    fn invalid_variables_keep_defaults() {
        let config = RankingConfig::from_lookup(lookup_from(&[
            ("SHOPVIEW_PREVIEW_CAP", "0"),
            ("SHOPVIEW_IMAGE_PENALTY", "-1"),
            ("SHOPVIEW_ALL_RESULTS_LABEL", ""),
            ("SHOPVIEW_ALLOCATION_ORDER", "random"),
            ("SHOPVIEW_GROUPING", "primary"),
        ]));
        assert_eq!(config, RankingConfig::default());
    }

    #[test]
    fn deserializes_partial_json_over_defaults() {
        let config: RankingConfig =
            serde_json::from_str(r#"{ "previewCap": 2, "allocationOrder": "discovery" }"#).unwrap();
        assert_eq!(config.preview_cap, 2);
        assert_eq!(config.allocation_order, AllocationOrder::Discovery);
        assert_eq!(config.image_penalty, DEFAULT_IMAGE_PENALTY);
    }
}
