use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, ProductPage, UpdateProductRequest},
    error::{StoreError, StoreResult},
    models::Product,
    params::{ProductQuery, ProductSortBy, SortOrder},
    response::Meta,
};

/// Read side of the catalog, as consumed by the storefront. Implementations
/// must be local: the cart and its callers never wait on the network.
pub trait CatalogReader {
    fn all(&self) -> StoreResult<Vec<Product>>;
    fn find(&self, id: Uuid) -> StoreResult<Option<Product>>;
}

/// Catalog stored as a single JSON document on the local filesystem. Also
/// the write side used by the admin product manager.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
    audit_path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let audit_path = path.with_file_name("audit.log");
        Self { path, audit_path }
    }

    pub fn audit_path(&self) -> &Path {
        &self.audit_path
    }

    fn load(&self) -> StoreResult<Vec<Product>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, products: &[Product]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(products)?)?;
        Ok(())
    }
}

impl CatalogReader for JsonCatalog {
    fn all(&self) -> StoreResult<Vec<Product>> {
        self.load()
    }

    fn find(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.load()?.into_iter().find(|product| product.id == id))
    }
}

pub fn list_products(
    catalog: &impl CatalogReader,
    query: &ProductQuery,
) -> StoreResult<ProductPage> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut items: Vec<Product> = catalog
        .all()?
        .into_iter()
        .filter(|product| matches_query(product, query))
        .collect();

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    items.sort_by(|a, b| {
        let ordering = match sort_by {
            ProductSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            ProductSortBy::Price => a.price.cmp(&b.price),
            ProductSortBy::Name => a.name.cmp(&b.name),
        };
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let total = items.len() as i64;
    let items: Vec<Product> = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Ok(ProductPage {
        items,
        meta: Meta::new(page, limit, total),
    })
}

fn matches_query(product: &Product, query: &ProductQuery) -> bool {
    if let Some(q) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let needle = q.to_lowercase();
        let in_name = product.name.to_lowercase().contains(&needle);
        let in_description = product
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&needle));
        if !in_name && !in_description {
            return false;
        }
    }

    if let Some(category) = query.category.as_ref().filter(|s| !s.is_empty()) {
        if !product.category.eq_ignore_ascii_case(category) {
            return false;
        }
    }

    if let Some(min_price) = query.min_price {
        if product.price < min_price {
            return false;
        }
    }

    if let Some(max_price) = query.max_price {
        if product.price > max_price {
            return false;
        }
    }

    true
}

pub fn get_product(catalog: &impl CatalogReader, id: Uuid) -> StoreResult<Product> {
    catalog.find(id)?.ok_or(StoreError::NotFound)
}

pub fn create_product(catalog: &JsonCatalog, payload: CreateProductRequest) -> StoreResult<Product> {
    let product = Product {
        id: Uuid::new_v4(),
        name: payload.name,
        description: payload.description,
        category: payload.category,
        price: payload.price,
        original_price: payload.original_price,
        image_url: payload.image_url,
        sizes: payload.sizes,
        created_at: Utc::now(),
    };

    let mut products = catalog.load()?;
    products.push(product.clone());
    catalog.save(&products)?;

    if let Err(err) = log_audit(
        &catalog.audit_path,
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    ) {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(product)
}

pub fn update_product(
    catalog: &JsonCatalog,
    id: Uuid,
    payload: UpdateProductRequest,
) -> StoreResult<Product> {
    let mut products = catalog.load()?;
    let product = products
        .iter_mut()
        .find(|product| product.id == id)
        .ok_or(StoreError::NotFound)?;

    if let Some(name) = payload.name {
        product.name = name;
    }
    if let Some(description) = payload.description {
        product.description = Some(description);
    }
    if let Some(category) = payload.category {
        product.category = category;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(original_price) = payload.original_price {
        product.original_price = Some(original_price);
    }
    if let Some(image_url) = payload.image_url {
        product.image_url = Some(image_url);
    }
    if let Some(sizes) = payload.sizes {
        product.sizes = sizes;
    }

    let updated = product.clone();
    catalog.save(&products)?;

    if let Err(err) = log_audit(
        &catalog.audit_path,
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    ) {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(updated)
}

pub fn delete_product(catalog: &JsonCatalog, id: Uuid) -> StoreResult<()> {
    let mut products = catalog.load()?;
    let before = products.len();
    products.retain(|product| product.id != id);

    if products.len() == before {
        return Err(StoreError::NotFound);
    }
    catalog.save(&products)?;

    if let Err(err) = log_audit(
        &catalog.audit_path,
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    ) {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}
