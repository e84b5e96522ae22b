//! Child records (tickets and product variations)

use super::ids::{ChildId, ParentId};
use super::kind::ParentKind;
use super::parent::Parent;
use crate::domain::{Result, TombolaError};
use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute that links a child document to its parent
pub const PARENT_REF_FIELD: &str = "parentRef";

/// A generated ticket or variation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    #[serde(rename = "_id")]
    pub id: ChildId,

    /// Identifier of the owning parent
    pub parent_ref: ParentId,

    /// Fixed-width numeric code, unique within the issuance batch
    pub code: u64,

    pub price: f64,

    pub quantity: u32,

    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "ts_milliseconds")]
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub details: ChildDetails,
}

/// Kind-specific child fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChildDetails {
    Ticket,
    Variation(VariationDetails),
}

/// Fields carried by product variations
///
/// `variation` and `warehouses` stay empty until inventory systems fill them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationDetails {
    pub seller: String,
    pub variation: String,
    pub warehouses: String,
}

impl Child {
    /// Issues a child for `parent` carrying `code`
    ///
    /// Price and seller are copied from the parent; quantity starts at 1.
    pub fn issue(parent: &Parent, code: u64, now: DateTime<Utc>) -> Self {
        let details = match parent.kind() {
            ParentKind::Raffle => ChildDetails::Ticket,
            ParentKind::Product => ChildDetails::Variation(VariationDetails {
                seller: parent.seller().to_string(),
                ..Default::default()
            }),
        };

        Self {
            id: ChildId::generate(),
            parent_ref: parent.id.clone(),
            code,
            price: parent.price,
            quantity: 1,
            created_at: now,
            updated_at: now,
            details,
        }
    }

    /// Converts the record into a store document
    pub fn to_document(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(TombolaError::from)
    }

    /// Reads a record back from a store document
    pub fn from_document(document: serde_json::Value) -> Result<Self> {
        serde_json::from_value(document).map_err(TombolaError::from)
    }
}
