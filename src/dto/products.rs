use serde::{Deserialize, Serialize};

use crate::{
    models::{Product, SizeOption},
    response::Meta,
};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub image_url: Option<String>,
    pub sizes: Vec<SizeOption>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub image_url: Option<String>,
    pub sizes: Option<Vec<SizeOption>>,
}

#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub meta: Meta,
}
