//! Partial updates for parents
//!
//! Only the fields listed on [`ParentPatch`] may be changed. Unknown keys are
//! rejected when the patch is parsed. The identifier `_id` is accepted so the
//! request body can carry it, and is never applied. `digitCount` and
//! `totalChildren` are not patchable because the issued children were
//! generated from them.

use super::parent::{lenient, Parent, ParentDetails};
use crate::domain::{Result, TombolaError};
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::Deserialize;

/// Allow-listed parent fields a client may change
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParentPatch {
    #[serde(rename = "_id", default)]
    _id: Option<IgnoredAny>,

    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub max_sale: Option<u32>,

    // raffle only
    pub logo: Option<String>,

    // product only
    pub active: Option<bool>,
    pub category: Option<String>,
    pub channel: Option<String>,
    pub manufacturer: Option<String>,
    pub reference: Option<String>,
    pub seller: Option<String>,
}

impl ParentPatch {
    /// Parses a patch from a JSON request body
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for malformed JSON, wrong value types, or keys
    /// outside the allow-list.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| TombolaError::InvalidArgument(format!("Invalid update body: {e}")))
    }

    /// Returns true when the patch changes no field
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Names of the fields this patch sets, in wire form
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut mark = |present: bool, name: &'static str| {
            if present {
                fields.push(name);
            }
        };
        mark(self.name.is_some(), "name");
        mark(self.description.is_some(), "description");
        mark(self.price.is_some(), "price");
        mark(self.max_sale.is_some(), "maxSale");
        mark(self.logo.is_some(), "logo");
        mark(self.active.is_some(), "active");
        mark(self.category.is_some(), "category");
        mark(self.channel.is_some(), "channel");
        mark(self.manufacturer.is_some(), "manufacturer");
        mark(self.reference.is_some(), "reference");
        mark(self.seller.is_some(), "seller");
        fields
    }

    fn has_product_fields(&self) -> bool {
        self.active.is_some()
            || self.category.is_some()
            || self.channel.is_some()
            || self.manufacturer.is_some()
            || self.reference.is_some()
            || self.seller.is_some()
    }

    /// Merges the patch into `parent` and bumps `updatedAt`
    ///
    /// The parent is left untouched when the patch is rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the patch carries fields of the other
    /// parent kind or a negative price.
    pub fn apply(&self, parent: &mut Parent, now: DateTime<Utc>) -> Result<()> {
        if let Some(price) = self.price {
            if price < 0.0 || !price.is_finite() {
                return Err(TombolaError::InvalidArgument(format!(
                    "price must be a non-negative number, got {price}"
                )));
            }
        }

        match &mut parent.details {
            ParentDetails::Raffle { logo } => {
                if self.has_product_fields() {
                    return Err(TombolaError::InvalidArgument(
                        "Product fields cannot be set on a raffle".to_string(),
                    ));
                }
                if let Some(value) = &self.logo {
                    *logo = Some(value.clone());
                }
            }
            ParentDetails::Product(product) => {
                if self.logo.is_some() {
                    return Err(TombolaError::InvalidArgument(
                        "logo cannot be set on a product".to_string(),
                    ));
                }
                if let Some(value) = self.active {
                    product.active = value;
                }
                if let Some(value) = &self.category {
                    product.category = value.clone();
                }
                if let Some(value) = &self.channel {
                    product.channel = value.clone();
                }
                if let Some(value) = &self.manufacturer {
                    product.manufacturer = value.clone();
                }
                if let Some(value) = &self.reference {
                    product.reference = value.clone();
                }
                if let Some(value) = &self.seller {
                    product.seller = value.clone();
                }
            }
        }

        if let Some(value) = &self.name {
            parent.name = value.clone();
        }
        if let Some(value) = &self.description {
            parent.description = value.clone();
        }
        if let Some(value) = self.price {
            parent.price = value;
        }
        if let Some(value) = self.max_sale {
            parent.max_sale = value;
        }
        parent.updated_at = now;

        Ok(())
    }
}
