//! What the cart screens render, derived from `CartState`.

use serde::Serialize;

use storefront_catalog::Priceable;
use storefront_core::ProductId;

use crate::state::{CartEntry, CartState};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub title: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartEntry> for CartLineView {
    fn from(entry: &CartEntry) -> Self {
        let product = entry.product();
        let sale = product.sale();
        Self {
            product_id: entry.product_id().clone(),
            title: product.title().to_string(),
            image: product.featured_image().to_string(),
            unit_price: sale.format_amount(entry.unit_price()),
            quantity: entry.quantity(),
            line_total: sale.format_amount(entry.line_total()),
        }
    }
}

/// Cart screen contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub total: String,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart icon badge text; hidden (None) for an empty cart.
    pub fn badge(&self) -> Option<String> {
        (self.item_count > 0).then(|| self.item_count.to_string())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_CART_MESSAGE)
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        // The catalog prices everything in one currency; label the total with
        // the first entry's.
        let total = match state.items().first() {
            Some(entry) => entry.product().sale().format_amount(state.total()),
            None => format!("{:.2}", state.total()),
        };
        Self {
            lines: state.items().iter().map(CartLineView::from).collect(),
            item_count: state.item_count(),
            total,
        }
    }
}

/// Buy button on a product detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "quantity", rename_all = "snake_case")]
pub enum BuyButton {
    AddToCart,
    InCart(u32),
    OutOfStock,
}

impl BuyButton {
    pub fn for_product(state: &CartState, product_id: &ProductId, in_stock: bool) -> Self {
        match state.quantity_of(product_id) {
            0 if !in_stock => BuyButton::OutOfStock,
            0 => BuyButton::AddToCart,
            n => BuyButton::InCart(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            BuyButton::AddToCart => "Add to Cart".to_string(),
            BuyButton::InCart(n) => format!("In Cart ({n})"),
            BuyButton::OutOfStock => "Out of Stock".to_string(),
        }
    }

    pub fn enabled(&self) -> bool {
        !matches!(self, BuyButton::OutOfStock)
    }
}
