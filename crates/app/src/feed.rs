//! Infinite product list behind the browse/search screen.

use std::collections::HashSet;

use storefront_catalog::ListProduct;
use storefront_client::{CatalogSource, ClientError, ProductPage};
use storefront_core::ProductId;
use storefront_search::{ProductSearch, SearchOptions};

pub const NO_PRODUCTS_FOUND: &str = "No products found";
pub const NO_PRODUCTS_AVAILABLE: &str = "No products available";

/// Products loaded so far, page by page.
///
/// Pages are appended in order. A product id already present from an earlier
/// page is skipped, so the list stays unique when the catalog shifts between
/// requests.
#[derive(Debug, Clone, Default)]
pub struct ProductFeed {
    products: Vec<ListProduct>,
    seen: HashSet<ProductId>,
    pages_loaded: u32,
    has_more: bool,
    search: SearchOptions,
}

impl ProductFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_options(search: SearchOptions) -> Self {
        Self {
            search,
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[ListProduct] {
        &self.products
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    pub fn is_loaded(&self) -> bool {
        self.pages_loaded > 0
    }

    /// Page to request next, or `None` once the catalog is exhausted.
    pub fn next_page(&self) -> Option<u32> {
        if !self.is_loaded() {
            Some(0)
        } else if self.has_more {
            Some(self.pages_loaded)
        } else {
            None
        }
    }

    /// Whether scrolling to the end should fetch another page. Paging is
    /// suspended while a search query is active.
    pub fn should_load_more(&self, query: &str) -> bool {
        self.is_loaded() && self.next_page().is_some() && query.trim().is_empty()
    }

    /// Fetch the next page and append it. Returns how many new products were
    /// added (0 when there is nothing left to load).
    pub async fn load_next<S>(&mut self, source: &S) -> Result<usize, ClientError>
    where
        S: CatalogSource + ?Sized,
    {
        let Some(page) = self.next_page() else {
            return Ok(0);
        };

        let fetched = source.fetch_products(page).await?;
        Ok(self.append(fetched))
    }

    /// Load the first page again. The loaded products are only replaced once
    /// that page has arrived; on error the feed keeps what it had.
    pub async fn refresh<S>(&mut self, source: &S) -> Result<usize, ClientError>
    where
        S: CatalogSource + ?Sized,
    {
        let fetched = source.fetch_products(0).await?;
        self.products.clear();
        self.seen.clear();
        self.pages_loaded = 0;
        self.has_more = false;
        Ok(self.append(fetched))
    }

    fn append(&mut self, fetched: ProductPage) -> usize {
        let page = fetched.page;
        let before = self.products.len();
        for product in fetched.items {
            if self.seen.insert(product.id.clone()) {
                self.products.push(product);
            }
        }
        let added = self.products.len() - before;

        self.pages_loaded += 1;
        self.has_more = fetched.has_more;

        tracing::debug!(
            page,
            added,
            total = self.products.len(),
            has_more = self.has_more,
            "product feed advanced"
        );
        added
    }

    /// Products to show for `query`: everything when it is blank, otherwise
    /// the ranked search results over what has been loaded.
    pub fn visible(&self, query: &str) -> Vec<&ListProduct> {
        if query.trim().is_empty() {
            return self.products.iter().collect();
        }
        ProductSearch::with_options(&self.products, self.search).search_items(query)
    }

    /// Placeholder text when `visible(query)` is empty.
    pub fn empty_message(&self, query: &str) -> &'static str {
        if query.trim().is_empty() {
            NO_PRODUCTS_AVAILABLE
        } else {
            NO_PRODUCTS_FOUND
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeCatalog, list_product};

    fn catalog(n: usize, page_size: usize) -> FakeCatalog {
        let products = (0..n)
            .map(|i| list_product(&format!("p{i}"), &format!("Product {i}"), 5.0, 3))
            .collect();
        FakeCatalog::new(products, Vec::new(), page_size)
    }

    #[tokio::test]
    async fn pages_accumulate_until_short_page() {
        let source = catalog(25, 10);
        let mut feed = ProductFeed::new();
        assert_eq!(feed.next_page(), Some(0));

        assert_eq!(feed.load_next(&source).await.unwrap(), 10);
        assert_eq!(feed.load_next(&source).await.unwrap(), 10);
        assert_eq!(feed.load_next(&source).await.unwrap(), 5);
        assert_eq!(feed.load_next(&source).await.unwrap(), 0);

        assert_eq!(feed.products().len(), 25);
        assert_eq!(feed.pages_loaded(), 3);
        assert_eq!(feed.next_page(), None);
        assert_eq!(source.product_calls(), 3);
    }

    #[tokio::test]
    async fn paging_pauses_while_searching() {
        let source = catalog(30, 10);
        let mut feed = ProductFeed::new();
        assert!(!feed.should_load_more(""));

        feed.load_next(&source).await.unwrap();
        assert!(feed.should_load_more(""));
        assert!(feed.should_load_more("   "));
        assert!(!feed.should_load_more("vitamin"));
    }

    #[tokio::test]
    async fn duplicate_ids_across_pages_are_skipped() {
        let mut products: Vec<ListProduct> = (0..4)
            .map(|i| list_product(&format!("p{i}"), "Item", 1.0, 1))
            .collect();
        products[3] = list_product("p0", "Item again", 1.0, 1);
        let source = FakeCatalog::new(products, Vec::new(), 2);

        let mut feed = ProductFeed::new();
        feed.load_next(&source).await.unwrap();
        assert_eq!(feed.load_next(&source).await.unwrap(), 1);
        let ids: Vec<&str> = feed.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p1", "p2"]);
    }

    #[tokio::test]
    async fn visible_filters_by_query() {
        let source = FakeCatalog::new(
            vec![
                list_product("1", "Panadol Extra", 10.0, 5),
                list_product("2", "Vitamin C", 20.0, 5),
            ],
            Vec::new(),
            20,
        );
        let mut feed = ProductFeed::new();
        feed.load_next(&source).await.unwrap();

        assert_eq!(feed.visible("").len(), 2);
        let hits = feed.visible("vitamin");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Vitamin C");
        assert!(feed.visible("zzzz").is_empty());
        assert_eq!(feed.empty_message("zzzz"), NO_PRODUCTS_FOUND);
        assert_eq!(feed.empty_message(""), NO_PRODUCTS_AVAILABLE);
    }

    #[tokio::test]
    async fn refresh_starts_over() {
        let source = catalog(15, 10);
        let mut feed = ProductFeed::new();
        feed.load_next(&source).await.unwrap();
        feed.load_next(&source).await.unwrap();
        assert_eq!(feed.refresh(&source).await.unwrap(), 10);
        assert_eq!(feed.pages_loaded(), 1);
        assert_eq!(feed.products().len(), 10);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_loaded_products() {
        let source = catalog(5, 10);
        let mut feed = ProductFeed::new();
        feed.load_next(&source).await.unwrap();
        assert_eq!(feed.products().len(), 5);

        let err = feed.refresh(&FakeCatalog::failing()).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(feed.products().len(), 5);
        assert!(feed.is_loaded());
        assert_eq!(feed.pages_loaded(), 1);
        assert_eq!(feed.next_page(), None);
        assert_eq!(feed.visible("").len(), 5);
    }

    #[tokio::test]
    async fn failed_load_leaves_feed_untouched() {
        let source = FakeCatalog::failing();
        let mut feed = ProductFeed::new();
        let err = feed.load_next(&source).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert!(!feed.is_loaded());
        assert_eq!(feed.next_page(), Some(0));
    }
}
