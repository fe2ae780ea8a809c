use storefront_core::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    error::StoreError,
    models::SizeOption,
    params::{Pagination, ProductQuery, ProductSortBy, SortOrder},
    services::catalog_service::{self, CatalogReader, JsonCatalog},
};

#[test]
fn listing_filters_sorts_and_paginates() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog = JsonCatalog::new(dir.path().join("catalog.json"));

    catalog_service::create_product(&catalog, request("Aurora Mattress", "mattress", 300_000))?;
    catalog_service::create_product(&catalog, request("Borealis Mattress", "mattress", 500_000))?;
    catalog_service::create_product(&catalog, request("Cumulus Pillow", "pillow", 45_000))?;

    let mattresses = catalog_service::list_products(
        &catalog,
        &ProductQuery {
            category: Some("mattress".into()),
            ..Default::default()
        },
    )?;
    assert_eq!(mattresses.items.len(), 2);
    assert_eq!(mattresses.meta.total, Some(2));

    let expensive = catalog_service::list_products(
        &catalog,
        &ProductQuery {
            min_price: Some(400_000),
            ..Default::default()
        },
    )?;
    assert_eq!(expensive.items.len(), 1);
    assert_eq!(expensive.items[0].name, "Borealis Mattress");

    // Free text matches name or description, case-insensitively.
    let searched = catalog_service::list_products(
        &catalog,
        &ProductQuery {
            q: Some("cumulus".into()),
            ..Default::default()
        },
    )?;
    assert_eq!(searched.items.len(), 1);
    assert_eq!(searched.items[0].category, "pillow");

    let cheapest_first = catalog_service::list_products(
        &catalog,
        &ProductQuery {
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        },
    )?;
    assert_eq!(cheapest_first.items[0].name, "Cumulus Pillow");
    assert_eq!(cheapest_first.items[2].name, "Borealis Mattress");

    let second_page = catalog_service::list_products(
        &catalog,
        &ProductQuery {
            pagination: Pagination {
                page: Some(2),
                per_page: Some(2),
            },
            sort_by: Some(ProductSortBy::Name),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        },
    )?;
    assert_eq!(second_page.items.len(), 1);
    assert_eq!(second_page.items[0].name, "Cumulus Pillow");
    assert_eq!(second_page.meta.total, Some(3));
    assert_eq!(second_page.meta.page, Some(2));

    Ok(())
}

#[test]
fn product_crud_and_audit_trail() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog = JsonCatalog::new(dir.path().join("catalog.json"));

    let created =
        catalog_service::create_product(&catalog, request("Aurora Mattress", "mattress", 300_000))?;
    assert_eq!(catalog_service::get_product(&catalog, created.id)?.name, "Aurora Mattress");

    // Partial update leaves omitted fields untouched.
    let updated = catalog_service::update_product(
        &catalog,
        created.id,
        UpdateProductRequest {
            price: Some(275_000),
            ..Default::default()
        },
    )?;
    assert_eq!(updated.name, "Aurora Mattress");
    assert_eq!(updated.price, 275_000);
    assert_eq!(updated.sizes, created.sizes);

    catalog_service::delete_product(&catalog, created.id)?;
    assert!(matches!(
        catalog_service::get_product(&catalog, created.id),
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        catalog_service::delete_product(&catalog, created.id),
        Err(StoreError::NotFound)
    ));

    let audit = std::fs::read_to_string(catalog.audit_path())?;
    let actions: Vec<String> = audit
        .lines()
        .map(|line| {
            let entry: serde_json::Value = serde_json::from_str(line)?;
            Ok(entry["action"].as_str().unwrap_or_default().to_string())
        })
        .collect::<anyhow::Result<_>>()?;
    assert_eq!(actions, ["product_create", "product_update", "product_delete"]);

    Ok(())
}

#[test]
fn missing_catalog_file_reads_as_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog = JsonCatalog::new(dir.path().join("catalog.json"));

    assert!(catalog.all()?.is_empty());
    assert!(
        catalog_service::list_products(&catalog, &ProductQuery::default())?
            .items
            .is_empty()
    );

    Ok(())
}

fn request(name: &str, category: &str, price: i64) -> CreateProductRequest {
    CreateProductRequest {
        name: name.into(),
        description: Some(format!("{name} for testing")),
        category: category.into(),
        price,
        original_price: None,
        image_url: None,
        sizes: vec![SizeOption {
            name: "Standard".into(),
            dimensions: None,
            price: None,
            price_modifier: None,
        }],
    }
}
