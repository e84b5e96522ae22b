//! Parent kinds
//!
//! Raffles and products share one issuance engine; the kind selects the
//! table pair and the shape of the generated children.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which parent entity a request addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    /// A raffle issuing tickets
    Raffle,
    /// A product issuing variations
    Product,
}

impl ParentKind {
    /// Lowercase name used in paths and stored documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ParentKind::Raffle => "raffle",
            ParentKind::Product => "product",
        }
    }

    /// Display label for the parent entity
    pub fn label(&self) -> &'static str {
        match self {
            ParentKind::Raffle => "Raffle",
            ParentKind::Product => "Product",
        }
    }

    /// Plural noun for the generated children
    pub fn child_noun(&self) -> &'static str {
        match self {
            ParentKind::Raffle => "tickets",
            ParentKind::Product => "variations",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raffle" | "raffles" => Ok(ParentKind::Raffle),
            "product" | "products" => Ok(ParentKind::Product),
            other => Err(format!(
                "Unknown parent kind '{other}'. Must be one of: raffle, product"
            )),
        }
    }
}
