use storefront_core::{
    config::StoreConfig,
    dto::products::CreateProductRequest,
    models::SizeOption,
    services::catalog_service::{self, CatalogReader, JsonCatalog},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env()?;

    let catalog = JsonCatalog::new(&config.catalog_path);
    let created = seed_products(&catalog)?;

    println!(
        "Seed completed. {created} new products in {}",
        config.catalog_path.display()
    );
    Ok(())
}

fn seed_products(catalog: &JsonCatalog) -> anyhow::Result<usize> {
    let existing = catalog.all()?;
    let mut created = 0;

    for payload in sample_products() {
        if existing.iter().any(|product| product.name == payload.name) {
            continue;
        }
        let product = catalog_service::create_product(catalog, payload)?;
        println!("Seeded product {} ({})", product.name, product.id);
        created += 1;
    }

    Ok(created)
}

fn sample_products() -> Vec<CreateProductRequest> {
    vec![
        CreateProductRequest {
            name: "Cloud Rest Memory Foam Mattress".into(),
            description: Some("Ten-inch memory foam with a cooling gel layer".into()),
            category: "mattress".into(),
            price: 450_000,
            original_price: Some(520_000),
            image_url: None,
            sizes: vec![
                size("Twin", Some("38 x 75 in"), None, None),
                size("Queen", Some("60 x 80 in"), None, Some(120_000)),
                size("King", Some("76 x 80 in"), None, Some(210_000)),
            ],
        },
        CreateProductRequest {
            name: "Orthopedic Firm Spring Mattress".into(),
            description: Some("Pocketed coils with a firm orthopedic top".into()),
            category: "mattress".into(),
            price: 380_000,
            original_price: None,
            image_url: None,
            sizes: vec![
                size("Twin", Some("38 x 75 in"), None, None),
                size("Queen", Some("60 x 80 in"), None, Some(95_000)),
            ],
        },
        CreateProductRequest {
            name: "Contour Latex Pillow".into(),
            description: Some("Ventilated latex, medium loft".into()),
            category: "pillow".into(),
            price: 42_000,
            original_price: Some(48_000),
            image_url: None,
            sizes: vec![
                size("Standard", Some("20 x 26 in"), Some(42_000), None),
                size("King", Some("20 x 36 in"), Some(55_000), None),
            ],
        },
    ]
}

fn size(
    name: &str,
    dimensions: Option<&str>,
    price: Option<i64>,
    price_modifier: Option<i64>,
) -> SizeOption {
    SizeOption {
        name: name.into(),
        dimensions: dimensions.map(str::to_string),
        price,
        price_modifier,
    }
}
