use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    /// Base price in minor units.
    pub price: i64,
    /// Pre-discount price, rendered struck through by the storefront.
    pub original_price: Option<i64>,
    pub image_url: Option<String>,
    pub sizes: Vec<SizeOption>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn size(&self, name: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|size| size.name == name)
    }
}

/// A named variant of a product. Size names are unique within a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub name: String,
    pub dimensions: Option<String>,
    /// Absolute price for this size. Takes precedence over the modifier.
    pub price: Option<i64>,
    /// Delta on the product base price, used when no absolute price is set.
    pub price_modifier: Option<i64>,
}

/// One row of the cart: a quantity of a product in one selected size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Snapshot of the product captured when the row was added. Catalog
    /// edits made afterwards do not reprice rows already in the cart.
    pub product: Product,
    pub size_name: String,
    /// Informational only; not part of the row identity.
    pub thickness: Option<String>,
    pub quantity: i32,
    /// Materialized unit price times quantity, kept in sync by every mutation.
    pub total_price: i64,
}
