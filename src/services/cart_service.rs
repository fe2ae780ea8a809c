use uuid::Uuid;

use crate::{
    dto::cart::CartSummary,
    error::{StoreError, StoreResult},
    models::{CartLineItem, Product},
    pricing::resolve_unit_price,
    storage::Storage,
};

/// The cart for one client session, backed by an injected storage adapter.
///
/// The line-item list lives in memory in insertion order; every mutation
/// writes the full serialized list through to storage under the configured
/// key. There is exactly one logical writer, so no locking is involved.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    items: Vec<CartLineItem>,
    storage: S,
    key: String,
}

impl<S: Storage> CartStore<S> {
    /// Hydrate a cart from storage.
    ///
    /// A missing key yields an empty cart. A document that fails to parse
    /// also yields an empty cart, so a corrupted entry never takes the
    /// storefront down at startup.
    pub fn open(storage: S, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let items = match storage.get(&key)? {
            Some(raw) => match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(error = %err, key = %key, "discarding malformed cart document");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(Self {
            items,
            storage,
            key,
        })
    }

    /// Line items, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of all quantities. Recomputed from the list on every call.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Sum of all materialized line totals. Recomputed from the list on
    /// every call.
    pub fn total_price(&self) -> i64 {
        self.items.iter().map(|item| item.total_price).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total_items: self.total_items(),
            total_price: self.total_price(),
        }
    }

    /// Add `quantity` of `product` in the given size.
    ///
    /// An existing row for the same (product, size) has its quantity
    /// increased and its total repriced from `product`; the thickness
    /// recorded when the row was first added is kept. Otherwise a new row
    /// is appended carrying a snapshot of the product.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        size_name: &str,
        thickness: Option<&str>,
        quantity: i32,
    ) -> StoreResult<()> {
        if quantity <= 0 {
            return Err(StoreError::BadRequest(
                "quantity must be greater than 0".to_string(),
            ));
        }
        let unit_price = resolve_unit_price(product, size_name)?;

        match self.find_mut(product.id, size_name) {
            Some(item) => {
                item.quantity += quantity;
                item.total_price = unit_price * i64::from(item.quantity);
            }
            None => self.items.push(CartLineItem {
                product: product.clone(),
                size_name: size_name.to_string(),
                thickness: thickness.map(str::to_string),
                quantity,
                total_price: unit_price * i64::from(quantity),
            }),
        }

        tracing::debug!(product_id = %product.id, size = %size_name, quantity, "cart add");
        self.persist()
    }

    /// Set the quantity of the (product, size) row.
    ///
    /// A quantity of zero or less removes the row entirely; the cart never
    /// holds a zero-quantity row. The total is repriced from the product
    /// snapshot stored in the row, so catalog edits made after add-time do
    /// not affect it.
    pub fn update_quantity(
        &mut self,
        product_id: Uuid,
        size_name: &str,
        new_quantity: i32,
    ) -> StoreResult<()> {
        if new_quantity <= 0 {
            return self.remove_from_cart(product_id, size_name);
        }

        let item = self
            .find_mut(product_id, size_name)
            .ok_or(StoreError::NotFound)?;
        let unit_price = resolve_unit_price(&item.product, &item.size_name)?;
        item.quantity = new_quantity;
        item.total_price = unit_price * i64::from(new_quantity);

        tracing::debug!(product_id = %product_id, size = %size_name, new_quantity, "cart update");
        self.persist()
    }

    /// Remove the (product, size) row. Removing an absent row is a no-op.
    pub fn remove_from_cart(&mut self, product_id: Uuid, size_name: &str) -> StoreResult<()> {
        let before = self.items.len();
        self.items
            .retain(|item| !(item.product.id == product_id && item.size_name == size_name));
        if self.items.len() != before {
            tracing::debug!(product_id = %product_id, size = %size_name, "cart remove");
        }
        self.persist()
    }

    /// Empty the cart, e.g. after handing the order off to checkout.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.items.clear();
        self.persist()
    }

    fn find_mut(&mut self, product_id: Uuid, size_name: &str) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.id == product_id && item.size_name == size_name)
    }

    // Write-through: the in-memory list has already changed when this runs,
    // and it stays changed even if the write fails.
    fn persist(&mut self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.items)?;
        if let Err(err) = self.storage.set(&self.key, &raw) {
            tracing::warn!(error = %err, key = %self.key, "cart persist failed");
            return Err(err);
        }
        Ok(())
    }
}
