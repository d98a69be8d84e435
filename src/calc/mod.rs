//! Café pricing calculators
//!
//! Pure functions over deserialized form inputs. Required fields that are
//! missing or out of range produce a [`ValidationError`] naming them; optional
//! numeric fields default to zero.

pub mod cafe;
pub mod mix;
pub mod price_list;
pub mod roast;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export main functions
pub use cafe::{calculate_cafe_revenue, CafeInput, CafeReport};
pub use mix::{calculate_mix_price, BeanRow, MixInput, MixReport};
pub use price_list::{build_price_list, search_catalog, Catalog, PriceListInput, PriceList};
pub use roast::{calculate_roast, RoastInput, RoastReport};

/// Currency suffix used in rendered prices
pub const CURRENCY: &str = "Toman";

/// Rejected calculator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    /// Input fields that need fixing
    pub fields: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            message: message.into(),
            fields,
        }
    }

    /// Standard error for highlighted invalid fields
    pub fn invalid_fields(fields: Vec<String>) -> Self {
        Self::new("Please fill the highlighted fields with valid values", fields)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.message, self.fields.join(", "))
        }
    }
}

impl std::error::Error for ValidationError {}
