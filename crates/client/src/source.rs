//! The catalog contract the rest of the storefront consumes, and the wire
//! envelopes the API wraps its payloads in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storefront_catalog::{ListProduct, ProductDetails, Ratings, Review};

use crate::error::ClientError;

/// One page of the product list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPage {
    /// Zero-based page index this page was requested with.
    pub page: u32,
    pub items: Vec<ListProduct>,
    /// Whether requesting `page + 1` may return more products.
    pub has_more: bool,
}

/// Everything the detail endpoint returns for one product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductDetailsPayload {
    pub product_details: ProductDetails,
    pub reviews: Vec<Review>,
    pub ratings: Option<Ratings>,
    pub related_products: Vec<ListProduct>,
}

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the zero-based `page` of the product list.
    async fn fetch_products(&self, page: u32) -> Result<ProductPage, ClientError>;

    /// Fetch a product's detail record by its URL slug.
    async fn fetch_product_details(&self, slug: &str) -> Result<ProductDetailsPayload, ClientError>;
}

/// `{ success, message, data }` wrapper around every API response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Payload, or the reason the API gave for not sending one.
    pub fn into_data(self) -> Result<Option<T>, ClientError> {
        if !self.success {
            return Err(ClientError::Rejected(self.message));
        }
        Ok(self.data)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProductsData {
    pub products: Vec<ListProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProductDetailsData {
    pub product_details: Option<ProductDetails>,
    pub reviews: Vec<Review>,
    pub ratings: Option<Ratings>,
    pub related_products: Vec<ListProduct>,
}

impl ProductDetailsData {
    pub fn into_payload(self, slug: &str) -> Result<ProductDetailsPayload, ClientError> {
        let product_details = self
            .product_details
            .ok_or_else(|| ClientError::NotFound(slug.to_string()))?;
        Ok(ProductDetailsPayload {
            product_details,
            reviews: self.reviews,
            ratings: self.ratings,
            related_products: self.related_products,
        })
    }
}
