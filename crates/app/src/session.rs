//! One shopper's session: catalog access, the product feed, the detail cache
//! and the cart, passed around explicitly instead of living in globals.

use std::str::FromStr;

use storefront_cart::{BuyButton, CartState, CartStore, CartView, PricePolicy};
use storefront_catalog::{CatalogProduct, ProductDetails};
use storefront_client::{CatalogSource, ClientConfig, DetailCache, ProductDetailsPayload};
use storefront_core::{DomainError, Entity, ProductId};
use storefront_search::SearchOptions;

use crate::error::AppError;
use crate::feed::ProductFeed;
use crate::views::{ProductCardView, ProductDetailView};

/// A quantity change typed by the user as `ID=QTY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityEdit {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl FromStr for QuantityEdit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = s
            .split_once('=')
            .ok_or_else(|| DomainError::validation(format!("expected ID=QTY, got {s:?}")))?;
        let product_id = id.parse::<ProductId>()?;
        let quantity = quantity.trim().parse::<i64>().map_err(|_| {
            DomainError::validation(format!("quantity must be a whole number, got {quantity:?}"))
        })?;
        Ok(Self {
            product_id,
            quantity,
        })
    }
}

pub struct Session<S> {
    source: S,
    cart: CartStore,
    feed: ProductFeed,
    details: DetailCache,
}

impl<S: CatalogSource> Session<S> {
    pub fn new(source: S, config: &ClientConfig) -> Self {
        Self {
            source,
            cart: CartStore::new(),
            feed: ProductFeed::new(),
            details: DetailCache::new(config.detail_cache_ttl),
        }
    }

    pub fn with_price_policy(mut self, policy: PricePolicy) -> Self {
        self.cart = CartStore::with_policy(policy);
        self
    }

    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.feed = ProductFeed::with_search_options(options);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn feed(&self) -> &ProductFeed {
        &self.feed
    }

    /// Product grid; the first page is fetched on first use.
    pub async fn browse(&mut self) -> Result<Vec<ProductCardView>, AppError> {
        if !self.feed.is_loaded() {
            self.feed.load_next(&self.source).await?;
        }
        Ok(self.search(""))
    }

    /// Pull the next page when the grid is scrolled to the end. Returns how
    /// many products were added.
    pub async fn load_more(&mut self, query: &str) -> Result<usize, AppError> {
        if !self.feed.should_load_more(query) {
            return Ok(0);
        }
        Ok(self.feed.load_next(&self.source).await?)
    }

    /// Reload the grid from the first page.
    pub async fn refresh(&mut self) -> Result<usize, AppError> {
        Ok(self.feed.refresh(&self.source).await?)
    }

    /// Cards for the loaded products matching `query`, best match first.
    pub fn search(&self, query: &str) -> Vec<ProductCardView> {
        let cards: Vec<ProductCardView> = self
            .feed
            .visible(query)
            .into_iter()
            .map(ProductCardView::from)
            .collect();
        tracing::debug!(query, results = cards.len(), "search");
        cards
    }

    /// Detail record for `slug`, from the cache when still fresh.
    pub async fn product_details(&mut self, slug: &str) -> Result<ProductDetails, AppError> {
        if let Some(payload) = self.details.get(slug) {
            tracing::debug!(slug, "detail cache hit");
            return Ok(detail_record(payload));
        }

        let payload = self.source.fetch_product_details(slug).await?;
        let details = detail_record(&payload);
        self.details.insert(slug, payload);
        Ok(details)
    }

    pub async fn open_product(&mut self, slug: &str) -> Result<ProductDetailView, AppError> {
        let details = self.product_details(slug).await?;
        let button = self.buy_button(&details.id, details.stock.in_stock());
        Ok(ProductDetailView::new(&details, button))
    }

    /// Put one unit of `product` in the cart. Out-of-stock products are
    /// refused.
    pub fn add_to_cart(
        &mut self,
        product: impl Into<CatalogProduct>,
    ) -> Result<&CartState, AppError> {
        let product = product.into();
        if !product.stock().in_stock() {
            tracing::info!(product_id = %product.id(), "refused out-of-stock product");
            return Err(AppError::OutOfStock(product.id().clone()));
        }
        Ok(self.cart.add_to_cart(product))
    }

    /// Open `slug` and add it to the cart.
    pub async fn add_by_slug(&mut self, slug: &str) -> Result<&CartState, AppError> {
        let details = self.product_details(slug).await?;
        self.add_to_cart(details)
    }

    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> &CartState {
        self.cart.update_quantity(product_id, quantity)
    }

    /// Apply a user-typed quantity change to an entry already in the cart.
    pub fn apply_edit(&mut self, edit: &QuantityEdit) -> Result<&CartState, AppError> {
        if !self.cart.state().contains(&edit.product_id) {
            return Err(DomainError::not_found(format!("cart entry {}", edit.product_id)).into());
        }
        Ok(self.cart.update_quantity(&edit.product_id, edit.quantity))
    }

    pub fn increment(&mut self, product_id: &ProductId) -> &CartState {
        self.cart.increment(product_id)
    }

    pub fn decrement(&mut self, product_id: &ProductId) -> &CartState {
        self.cart.decrement(product_id)
    }

    pub fn remove(&mut self, product_id: &ProductId) -> &CartState {
        self.cart.remove_from_cart(product_id)
    }

    pub fn clear_cart(&mut self) -> &CartState {
        self.cart.clear()
    }

    pub fn cart_view(&self) -> CartView {
        CartView::from(self.cart.state())
    }

    /// Units in the cart, shown on the header badge.
    pub fn badge_count(&self) -> u64 {
        self.cart.state().item_count()
    }

    pub fn buy_button(&self, product_id: &ProductId, in_stock: bool) -> BuyButton {
        BuyButton::for_product(self.cart.state(), product_id, in_stock)
    }
}

/// The detail record with the payload's reviews and ratings folded in when
/// the record itself came without them.
fn detail_record(payload: &ProductDetailsPayload) -> ProductDetails {
    let mut details = payload.product_details.clone();
    if details.reviews.is_empty() {
        details.reviews = payload.reviews.clone();
    }
    if details.ratings.is_none() {
        details.ratings = payload.ratings.clone();
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeCatalog, details, list_product};
    use storefront_catalog::{Ratings, Review};
    use storefront_client::ClientError;

    fn session() -> Session<FakeCatalog> {
        let products = vec![
            list_product("1", "Panadol Extra", 10.0, 5),
            list_product("2", "Vitamin C 1000mg", 20.0, 5),
            list_product("3", "Baby Shampoo", 15.0, 0),
        ];
        let details = vec![
            details("1", "Panadol Extra", 12.0, 10.0, 5),
            details("2", "Vitamin C 1000mg", 25.0, 20.0, 5),
            details("3", "Baby Shampoo", 15.0, 0.0, 0),
        ];
        Session::new(FakeCatalog::new(products, details, 2), &ClientConfig::default())
    }

    #[tokio::test]
    async fn browse_loads_first_page_once() {
        let mut s = session();
        assert_eq!(s.browse().await.unwrap().len(), 2);
        assert_eq!(s.browse().await.unwrap().len(), 2);
        assert_eq!(s.source().product_calls(), 1);

        assert_eq!(s.load_more("").await.unwrap(), 1);
        assert_eq!(s.load_more("").await.unwrap(), 0);
        assert_eq!(s.browse().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn load_more_waits_while_searching() {
        let mut s = session();
        s.browse().await.unwrap();
        assert_eq!(s.load_more("panadol").await.unwrap(), 0);
        assert_eq!(s.source().product_calls(), 1);
    }

    #[tokio::test]
    async fn search_ranks_loaded_products() {
        let mut s = session();
        s.browse().await.unwrap();
        let cards = s.search("vitamin");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Vitamin C 1000mg");
        assert!(s.search("zzzz").is_empty());
    }

    #[tokio::test]
    async fn open_product_uses_the_cache() {
        let mut s = session();
        let view = s.open_product("slug-2").await.unwrap();
        assert_eq!(view.title, "Vitamin C 1000mg");
        assert_eq!(view.buy_button, BuyButton::AddToCart);

        s.open_product("slug-2").await.unwrap();
        assert_eq!(s.source().detail_calls(), 1);
    }

    #[tokio::test]
    async fn open_unknown_product_is_not_found() {
        let mut s = session();
        let err = s.open_product("ghost").await.unwrap_err();
        assert_eq!(err, AppError::Client(ClientError::NotFound("ghost".into())));
        assert_eq!(err.user_message(), "Product not found");
    }

    #[test]
    fn payload_reviews_fill_the_detail_record() {
        let payload = ProductDetailsPayload {
            product_details: details("9", "Fish Oil", 30.0, 25.0, 3),
            reviews: vec![Review {
                id: "r1".into(),
                value: 5,
                ..Review::default()
            }],
            ratings: Some(Ratings {
                rating: "5.0".into(),
                count: 1,
                ..Ratings::default()
            }),
            ..ProductDetailsPayload::default()
        };

        let record = detail_record(&payload);
        assert_eq!(record.reviews.len(), 1);
        assert_eq!(record.ratings.as_ref().map(|r| r.count), Some(1));
    }

    #[tokio::test]
    async fn cached_payload_is_served_without_a_fetch() {
        let mut s = session();
        let payload = ProductDetailsPayload {
            product_details: details("2", "Vitamin C (cached)", 25.0, 20.0, 5),
            ..ProductDetailsPayload::default()
        };
        s.details.insert("slug-2", payload);

        let view = s.open_product("slug-2").await.unwrap();
        assert_eq!(view.title, "Vitamin C (cached)");
        assert_eq!(s.source().detail_calls(), 0);
    }

    #[tokio::test]
    async fn add_from_detail_updates_button_and_badge() {
        let mut s = session();
        s.add_by_slug("slug-1").await.unwrap();
        s.add_by_slug("slug-1").await.unwrap();

        let view = s.open_product("slug-1").await.unwrap();
        assert_eq!(view.buy_button, BuyButton::InCart(2));
        assert_eq!(view.buy_button.label(), "In Cart (2)");
        assert_eq!(s.badge_count(), 2);
        assert_eq!(s.cart().state().total(), 20.0);
    }

    #[tokio::test]
    async fn out_of_stock_products_are_refused() {
        let mut s = session();
        let err = s.add_by_slug("slug-3").await.unwrap_err();
        assert_eq!(err, AppError::OutOfStock(ProductId::new("3")));
        assert!(s.cart().state().is_empty());

        let view = s.open_product("slug-3").await.unwrap();
        assert_eq!(view.buy_button, BuyButton::OutOfStock);
    }

    #[tokio::test]
    async fn list_and_detail_records_share_a_cart_line() {
        let mut s = session();
        s.browse().await.unwrap();
        let card_product = s.feed().products()[0].clone();
        s.add_to_cart(card_product).unwrap();
        s.add_by_slug("slug-1").await.unwrap();

        let state = s.cart().state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.quantity_of(&ProductId::new("1")), 2);
    }

    #[tokio::test]
    async fn cart_operations_flow_through_the_store() {
        let mut s = session();
        s.add_by_slug("slug-1").await.unwrap();
        s.add_by_slug("slug-2").await.unwrap();
        let p1 = ProductId::new("1");
        let p2 = ProductId::new("2");

        s.update_quantity(&p1, 3);
        assert_eq!(s.badge_count(), 4);
        s.increment(&p2);
        s.decrement(&p1);
        assert_eq!(s.cart().state().total(), 2.0 * 10.0 + 2.0 * 20.0);

        s.remove(&p2);
        let view = s.cart_view();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.total, "AED 20.00");

        s.clear_cart();
        assert!(s.cart_view().is_empty());
        assert_eq!(s.badge_count(), 0);
    }

    #[test]
    fn quantity_edits_parse_from_user_input() {
        let edit: QuantityEdit = " p1 = 3".parse().unwrap();
        assert_eq!(edit.product_id, ProductId::new("p1"));
        assert_eq!(edit.quantity, 3);

        assert!(matches!(" =3".parse::<QuantityEdit>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("p1".parse::<QuantityEdit>(), Err(DomainError::Validation(_))));
        assert!(matches!("p1=two".parse::<QuantityEdit>(), Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn edits_change_cart_entries_and_reject_unknown_ids() {
        let mut s = session();
        s.add_by_slug("slug-1").await.unwrap();

        let edit: QuantityEdit = "1=4".parse().unwrap();
        assert_eq!(s.apply_edit(&edit).unwrap().quantity_of(&ProductId::new("1")), 4);

        let missing: QuantityEdit = "2=1".parse().unwrap();
        let err = s.apply_edit(&missing).unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::NotFound(_))));
        assert_eq!(err.user_message(), "Product not found");
        assert_eq!(s.badge_count(), 4);

        let zero: QuantityEdit = "1=0".parse().unwrap();
        assert!(s.apply_edit(&zero).unwrap().is_empty());
    }

    #[tokio::test]
    async fn browse_failure_surfaces_as_client_error() {
        let mut s = Session::new(FakeCatalog::failing(), &ClientConfig::default());
        let err = s.browse().await.unwrap_err();
        assert!(matches!(err, AppError::Client(ClientError::Network(_))));
    }
}
