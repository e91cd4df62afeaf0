use thiserror::Error;

use storefront_client::ClientError;
use storefront_core::{DomainError, ProductId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
}

impl AppError {
    /// Text for the error banner on the current screen.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Client(e) => e.user_message(),
            AppError::Domain(DomainError::NotFound(_)) => "Product not found".to_string(),
            AppError::Domain(_) => "Something went wrong".to_string(),
            AppError::OutOfStock(_) => "Out of Stock".to_string(),
        }
    }
}
