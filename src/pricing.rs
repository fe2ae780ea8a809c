use crate::{
    error::{StoreError, StoreResult},
    models::Product,
};

/// Resolve the per-unit price of `product` in the given size.
///
/// An absolute size price wins when the size carries one; otherwise the
/// size modifier (default 0) is added to the product base price. The
/// result never goes below zero. Pure and deterministic: called both when
/// a line item is created and on every quantity update.
pub fn resolve_unit_price(product: &Product, size_name: &str) -> StoreResult<i64> {
    let size = product
        .size(size_name)
        .ok_or_else(|| StoreError::SizeNotFound {
            product: product.id,
            size: size_name.to_string(),
        })?;

    let unit = match size.price {
        Some(price) => price,
        None => product.price + size.price_modifier.unwrap_or(0),
    };

    Ok(unit.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeOption;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(price: i64, sizes: Vec<SizeOption>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Test Mattress".into(),
            description: None,
            category: "mattress".into(),
            price,
            original_price: None,
            image_url: None,
            sizes,
            created_at: Utc::now(),
        }
    }

    fn size(name: &str, price: Option<i64>, price_modifier: Option<i64>) -> SizeOption {
        SizeOption {
            name: name.into(),
            dimensions: None,
            price,
            price_modifier,
        }
    }

    #[test]
    fn absolute_price_wins_over_base_and_modifier() {
        let product = product(5_000, vec![size("Standard", Some(1_500), Some(9_999))]);

        assert_eq!(resolve_unit_price(&product, "Standard").unwrap(), 1_500);
    }

    #[test]
    fn modifier_is_added_to_base_price() {
        let product = product(5_000, vec![size("Queen", None, Some(2_000))]);

        assert_eq!(resolve_unit_price(&product, "Queen").unwrap(), 7_000);
    }

    #[test]
    fn missing_modifier_falls_back_to_base_price() {
        let product = product(5_000, vec![size("Twin", None, None)]);

        assert_eq!(resolve_unit_price(&product, "Twin").unwrap(), 5_000);
    }

    #[test]
    fn negative_result_is_clamped_to_zero() {
        let product = product(1_000, vec![size("Clearance", None, Some(-2_500))]);

        assert_eq!(resolve_unit_price(&product, "Clearance").unwrap(), 0);
    }

    #[test]
    fn unknown_size_fails_fast() {
        let product = product(5_000, vec![size("Queen", None, None)]);

        let result = resolve_unit_price(&product, "King");

        assert!(matches!(
            result,
            Err(StoreError::SizeNotFound { size, .. }) if size == "King"
        ));
    }
}
