//! View models for the product card and product detail screens.

use serde::Serialize;

use storefront_cart::BuyButton;
use storefront_catalog::{ListProduct, ProductDetails, Review};
use storefront_core::ProductId;

/// Reviews shown inline on the detail page.
pub const INLINE_REVIEWS: usize = 2;

/// One tile of the product grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: String,
    pub offer_label: Option<String>,
    pub rating: Option<String>,
    pub link: String,
}

impl From<&ListProduct> for ProductCardView {
    fn from(product: &ListProduct) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            image: product.images.featured_image.clone(),
            price: product.sale.formatted_display_price(),
            offer_label: product.sale.offer_label.clone().filter(|l| !l.is_empty()),
            rating: product.has_rating().then(|| product.rating.clone()),
            link: product.detail_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub author: String,
    pub stars: u32,
    pub date: Option<String>,
    pub text: Option<String>,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            author: review.display_name().to_string(),
            stars: review.stars(),
            date: review.created_date().map(|d| d.format("%Y-%m-%d").to_string()),
            text: review.review.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Everything the product detail screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub slug: String,
    pub title: String,
    pub brand: Option<String>,
    pub images: Vec<String>,
    pub label: Option<String>,
    pub price: String,
    pub regular_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub vat_text: String,
    pub in_stock: bool,
    pub availability: String,
    pub delivery: Vec<String>,
    pub categories: Vec<String>,
    pub rating: Option<String>,
    pub short_description: String,
    pub description: Option<String>,
    pub reviews: Vec<ReviewView>,
    pub more_reviews: Option<String>,
    pub buy_button: BuyButton,
}

impl ProductDetailView {
    pub fn new(details: &ProductDetails, buy_button: BuyButton) -> Self {
        let sale = &details.sale;
        let discount = sale.discount_percent();
        Self {
            id: details.id.clone(),
            slug: details.slug.clone(),
            title: details.title.clone(),
            brand: details
                .brand
                .as_ref()
                .map(|b| b.name.clone())
                .filter(|n| !n.is_empty()),
            images: details.all_images().into_iter().map(str::to_string).collect(),
            label: details.active_label().map(|l| match &l.sub_label_text {
                Some(sub) if !sub.is_empty() => format!("{} {}", l.label_text, sub),
                _ => l.label_text.clone(),
            }),
            price: sale.formatted_display_price(),
            regular_price: sale.formatted_regular_price(),
            discount_percent: (discount > 0).then_some(discount),
            vat_text: sale.vat_text.clone(),
            in_stock: details.stock.in_stock(),
            availability: details.stock.availability_label(),
            delivery: details
                .stock
                .delivery_icons
                .iter()
                .map(|d| d.label.clone())
                .collect(),
            categories: details.categories.iter().map(|c| c.name.clone()).collect(),
            rating: details
                .ratings
                .as_ref()
                .map(|r| format!("{} ({} reviews)", r.rating, r.count)),
            short_description: details.short_description.clone(),
            description: details
                .has_long_description()
                .then(|| details.description.clone()),
            reviews: details
                .top_reviews(INLINE_REVIEWS)
                .iter()
                .map(ReviewView::from)
                .collect(),
            more_reviews: details.more_reviews_label(INLINE_REVIEWS),
            buy_button,
        }
    }
}
