//! In-memory catalog used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use storefront_catalog::{ListProduct, ProductDetails, Sale};
use storefront_client::{CatalogSource, ClientError, ProductDetailsPayload, ProductPage};

pub(crate) struct FakeCatalog {
    products: Vec<ListProduct>,
    details: Vec<ProductDetails>,
    page_size: usize,
    product_calls: Mutex<u32>,
    detail_calls: Mutex<u32>,
    fail_pages: bool,
}

pub(crate) fn list_product(id: &str, title: &str, offer_price: f64, stock: i64) -> ListProduct {
    let mut p = ListProduct::new(id, title, Sale::new("AED", offer_price + 10.0, offer_price));
    p.slug = format!("slug-{id}");
    p.stock.max = stock;
    p
}

pub(crate) fn details(
    id: &str,
    title: &str,
    regular: f64,
    offer: f64,
    stock: i64,
) -> ProductDetails {
    let mut d = ProductDetails::new(id, title, Sale::new("AED", regular, offer));
    d.slug = format!("slug-{id}");
    d.stock.max = stock;
    d
}

impl FakeCatalog {
    pub(crate) fn new(
        products: Vec<ListProduct>,
        details: Vec<ProductDetails>,
        page_size: usize,
    ) -> Self {
        Self {
            products,
            details,
            page_size,
            product_calls: Mutex::new(0),
            detail_calls: Mutex::new(0),
            fail_pages: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_pages: true,
            ..Self::new(Vec::new(), Vec::new(), 20)
        }
    }

    pub(crate) fn product_calls(&self) -> u32 {
        *self.product_calls.lock().unwrap()
    }

    pub(crate) fn detail_calls(&self) -> u32 {
        *self.detail_calls.lock().unwrap()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_products(&self, page: u32) -> Result<ProductPage, ClientError> {
        *self.product_calls.lock().unwrap() += 1;
        if self.fail_pages {
            return Err(ClientError::Network("connection refused".into()));
        }
        let start = (page as usize * self.page_size).min(self.products.len());
        let end = (start + self.page_size).min(self.products.len());
        let items = self.products[start..end].to_vec();
        let has_more = items.len() >= self.page_size;
        Ok(ProductPage { page, items, has_more })
    }

    async fn fetch_product_details(
        &self,
        slug: &str,
    ) -> Result<ProductDetailsPayload, ClientError> {
        *self.detail_calls.lock().unwrap() += 1;
        self.details
            .iter()
            .find(|d| d.slug == slug)
            .map(|d| ProductDetailsPayload {
                product_details: d.clone(),
                ..ProductDetailsPayload::default()
            })
            .ok_or_else(|| ClientError::NotFound(slug.to_string()))
    }
}
