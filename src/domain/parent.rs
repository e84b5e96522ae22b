//! Parent records (raffles and products)
//!
//! A parent owns one batch of generated children. The common fields live on
//! [`Parent`]; kind-specific fields live in [`ParentDetails`], which is
//! flattened into the stored document and tagged by `kind`.

use super::ids::ParentId;
use super::kind::ParentKind;
use crate::domain::{Result, TombolaError};
use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored raffle or product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    /// Server-generated identifier
    #[serde(rename = "_id")]
    pub id: ParentId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Width of every issued code (1-16)
    pub digit_count: u32,

    /// Number of children issued at creation
    pub total_children: u32,

    /// Purchase cap per buyer (informational)
    #[serde(default)]
    pub max_sale: u32,

    pub price: f64,

    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "ts_milliseconds")]
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub details: ParentDetails,
}

impl Parent {
    /// Returns the kind of this parent
    pub fn kind(&self) -> ParentKind {
        self.details.kind()
    }

    /// Seller copied onto product variations (empty for raffles)
    pub fn seller(&self) -> &str {
        match &self.details {
            ParentDetails::Raffle { .. } => "",
            ParentDetails::Product(product) => &product.seller,
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

/// Kind-specific parent fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParentDetails {
    Raffle {
        #[serde(default)]
        logo: Option<String>,
    },
    Product(ProductDetails),
}

impl ParentDetails {
    pub fn kind(&self) -> ParentKind {
        match self {
            ParentDetails::Raffle { .. } => ParentKind::Raffle,
            ParentDetails::Product(_) => ParentKind::Product,
        }
    }
}

/// Catalogue fields carried by products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDetails {
    pub active: bool,
    pub category: String,
    pub channel: String,
    pub manufacturer: String,
    pub reference: String,
    pub seller: String,
}

/// Creation body for a parent
///
/// Every field is optional on the wire. Numeric fields also accept numeric
/// strings, which is what query-string driven clients send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewParent {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub digit_count: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub total_children: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub max_sale: i64,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    pub active: bool,
    pub category: String,
    pub manufacturer: String,
    pub reference: String,
    pub seller: String,
}

impl NewParent {
    /// Parses a JSON request body
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the body is not a valid creation object.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| TombolaError::InvalidArgument(format!("Invalid request body: {e}")))
    }

    /// Checks `totalChildren` and returns it as a count
    pub fn total_children(&self) -> Result<u32> {
        u32::try_from(self.total_children).map_err(|_| {
            TombolaError::InvalidArgument(format!(
                "totalChildren must be between 0 and {}, got {}",
                u32::MAX,
                self.total_children
            ))
        })
    }

    /// Checks the remaining numeric fields that are not issuance parameters
    pub fn validate_fields(&self) -> Result<()> {
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(TombolaError::InvalidArgument(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if u32::try_from(self.max_sale).is_err() {
            return Err(TombolaError::InvalidArgument(format!(
                "maxSale must be a non-negative integer, got {}",
                self.max_sale
            )));
        }
        Ok(())
    }

    /// Builds the record to store
    ///
    /// `digit_count` and `total_children` must already be validated.
    pub fn into_parent(
        self,
        kind: ParentKind,
        digit_count: u32,
        total_children: u32,
        now: DateTime<Utc>,
    ) -> Parent {
        let details = match kind {
            ParentKind::Raffle => ParentDetails::Raffle { logo: self.logo },
            ParentKind::Product => ParentDetails::Product(ProductDetails {
                active: self.active,
                category: self.category,
                channel: String::new(),
                manufacturer: self.manufacturer,
                reference: self.reference,
                seller: self.seller,
            }),
        };

        Parent {
            id: ParentId::generate(),
            name: self.name,
            description: self.description,
            digit_count,
            total_children,
            max_sale: u32::try_from(self.max_sale).unwrap_or(0),
            price: self.price,
            created_at: now,
            updated_at: now,
            details,
        }
    }
}

/// Numeric fields that also accept numeric strings
///
/// Null and blank strings count as absent.
pub(crate) mod lenient {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    fn parse_integer<E: Error>(value: Option<NumberOrString>) -> std::result::Result<Option<i64>, E> {
        match value {
            None => Ok(None),
            Some(NumberOrString::Integer(n)) => Ok(Some(n)),
            Some(NumberOrString::Float(f)) if f.fract() == 0.0 => Ok(Some(f as i64)),
            Some(NumberOrString::Float(f)) => Err(E::custom(format!("expected an integer, got {f}"))),
            Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected an integer, got '{s}'"))),
        }
    }

    fn parse_number<E: Error>(value: Option<NumberOrString>) -> std::result::Result<Option<f64>, E> {
        match value {
            None => Ok(None),
            Some(NumberOrString::Integer(n)) => Ok(Some(n as f64)),
            Some(NumberOrString::Float(f)) => Ok(Some(f)),
            Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, got '{s}'"))),
        }
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
        parse_integer(Option::<NumberOrString>::deserialize(deserializer)?).map(|n| n.unwrap_or(0))
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
        parse_number(Option::<NumberOrString>::deserialize(deserializer)?).map(|n| n.unwrap_or(0.0))
    }

    pub fn optional_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<f64>, D::Error> {
        parse_number(Option::<NumberOrString>::deserialize(deserializer)?)
    }

    /// Non-negative integer that fits a `u32`
    pub fn optional_count<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<u32>, D::Error> {
        match parse_integer::<D::Error>(Option::<NumberOrString>::deserialize(deserializer)?)? {
            None => Ok(None),
            Some(n) => u32::try_from(n)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a non-negative integer, got {n}"))),
        }
    }
}
