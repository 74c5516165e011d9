use thiserror::Error;

use crate::providers::ProviderError;
use crate::watchlist::StoreError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
