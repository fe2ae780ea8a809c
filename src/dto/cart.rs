use serde::Serialize;

/// Aggregate totals for the cart badge and the checkout summary.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CartSummary {
    pub total_items: i64,
    pub total_price: i64,
}
