use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CatalogLoadError;
use crate::model::{Config, Product};

/// Reads the product catalog. Source order is kept; an empty array is fine.
pub fn load_products(path: &Path) -> Result<Vec<Product>, CatalogLoadError> {
    let bytes = fs::read(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let products: Vec<Product> =
        serde_json::from_slice(&bytes).map_err(|source| CatalogLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(
        path = %path.display(),
        products = products.len(),
        "loaded product catalog"
    );
    Ok(products)
}

/// One load of the catalog. Never edited; a reload builds a new snapshot.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    pub source: PathBuf,
    pub loaded_at: String,
    pub products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn load(cfg: &Config) -> Result<Self, CatalogLoadError> {
        let products = load_products(&cfg.product_config_path)?;
        Ok(Self::new(cfg.product_config_path.clone(), products))
    }

    pub fn new(source: PathBuf, products: Vec<Product>) -> Self {
        Self {
            source,
            loaded_at: now_ts(),
            products,
        }
    }

    pub fn empty() -> Self {
        Self::new(PathBuf::new(), Vec::new())
    }

    pub fn product(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn find(&self, product_id: &str) -> Option<(usize, &Product)> {
        self.products
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
