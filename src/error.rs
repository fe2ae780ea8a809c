use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("size {size:?} not found for product {product}")]
    SizeNotFound { product: Uuid, size: String },

    #[error("Storage error")]
    Storage(#[from] std::io::Error),

    #[error("Malformed document")]
    Malformed(#[from] serde_json::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
