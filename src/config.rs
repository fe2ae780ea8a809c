use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub cart_key: String,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir =
            PathBuf::from(env::var("STORE_DATA_DIR").unwrap_or_else(|_| "./data".to_string()));
        let catalog_path = env::var("STORE_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("catalog.json"));
        let cart_key = env::var("STORE_CART_KEY").unwrap_or_else(|_| "cart".to_string());
        Ok(Self {
            data_dir,
            catalog_path,
            cart_key,
        })
    }
}
