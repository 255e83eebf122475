use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopview_core::{Entity, ProductId, ValueObject};

use crate::wire;

/// A category the product declares membership in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(deserialize_with = "wire::scalar_to_string")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::lenient_optional_string")]
    pub url: Option<String>,
}

impl CategoryRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }
}

impl ValueObject for CategoryRef {}

/// A filterable `{name, value}` pair (e.g. `color = red`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(deserialize_with = "wire::scalar_to_string")]
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl ValueObject for Parameter {}

/// Current and previous price of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub currency: Option<String>,
}

impl ValueObject for Price {}

/// A matched product as delivered by the upstream search backend.
///
/// Field names follow the backend's camelCase wire format; the aliases accept
/// the older widget payload (`newPrice`, `oldPrice`, `currencyId`, `params`,
/// `url`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    #[serde(default, deserialize_with = "wire::lenient_string")]
    name: String,
    #[serde(default, alias = "newPrice", deserialize_with = "wire::lenient_price")]
    price: Option<f64>,
    #[serde(default, alias = "oldPrice", deserialize_with = "wire::lenient_price")]
    previous_price: Option<f64>,
    #[serde(default, alias = "currencyId", deserialize_with = "wire::lenient_optional_string")]
    currency: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_flag")]
    availability: bool,
    #[serde(default, deserialize_with = "wire::lenient_optional_string")]
    image: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_optional_string")]
    label: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_list")]
    categories: Vec<CategoryRef>,
    #[serde(default, alias = "params", deserialize_with = "wire::lenient_list")]
    parameters: Vec<Parameter>,
    #[serde(default, alias = "url", deserialize_with = "wire::lenient_optional_string")]
    destination_url: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with no price, no image, and no memberships.
    ///
    /// New products are out of stock until marked otherwise.
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: None,
            previous_price: None,
            currency: None,
            availability: false,
            image: None,
            label: None,
            categories: Vec::new(),
            parameters: Vec::new(),
            destination_url: None,
            created_at: None,
        }
    }

    pub fn with_price(mut self, amount: f64, currency: impl Into<String>) -> Self {
        self.price = Some(amount);
        self.currency = Some(currency.into());
        self
    }

    pub fn with_previous_price(mut self, amount: f64) -> Self {
        self.previous_price = Some(amount);
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.availability = available;
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_category(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.categories.push(CategoryRef::new(name, url));
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    pub fn with_destination_url(mut self, url: impl Into<String>) -> Self {
        self.destination_url = Some(url.into());
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        Price {
            current: self.price,
            previous: self.previous_price,
            currency: self.currency.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Whether the product has an actual photo.
    ///
    /// A missing or blank image, or one equal to `placeholder`, counts as no photo.
    pub fn has_real_image(&self, placeholder: &str) -> bool {
        match self.image.as_deref().map(str::trim) {
            Some(url) => !url.is_empty() && url != placeholder,
            None => false,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn categories(&self) -> &[CategoryRef] {
        &self.categories
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Value of the first parameter named `name`, if any.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn destination_url(&self) -> Option<&str> {
        self.destination_url.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Whether a struck-through previous price should be displayed.
    ///
    /// Only a positive previous price that differs from the current one counts.
    pub fn shows_previous_price(&self) -> bool {
        match self.previous_price {
            Some(previous) if previous > 0.0 => self.price != Some(previous),
            _ => false,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
