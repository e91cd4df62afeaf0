use serde::{Deserialize, Serialize};

use storefront_catalog::{CatalogProduct, Priceable};
use storefront_core::{Entity, ProductId, Reducer, ValueObject};

/// Which price an entry keeps when its product is added again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePolicy {
    /// Keep the product record (and price) captured on the first add.
    #[default]
    Frozen,
    /// Replace the stored product record with the incoming one, so the entry
    /// follows the latest catalog price.
    Refresh,
}

/// One line item: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    product: CatalogProduct,
    quantity: u32,
}

impl ValueObject for CartEntry {}

impl CartEntry {
    fn new(product: CatalogProduct) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn product(&self) -> &CatalogProduct {
        &self.product
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.id()
    }

    /// Always >= 1 for entries held by a `CartState`.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.product.unit_price()
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }
}

/// Cart transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    AddToCart(CatalogProduct),
    RemoveFromCart(ProductId),
    UpdateQuantity {
        product_id: ProductId,
        /// Values below 1 remove the entry.
        quantity: i64,
    },
    ClearCart,
}

impl CartAction {
    /// Stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddToCart(_) => "cart.add",
            CartAction::RemoveFromCart(_) => "cart.remove",
            CartAction::UpdateQuantity { .. } => "cart.update_quantity",
            CartAction::ClearCart => "cart.clear",
        }
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartAction::AddToCart(product) => Some(product.id()),
            CartAction::RemoveFromCart(id) => Some(id),
            CartAction::UpdateQuantity { product_id, .. } => Some(product_id),
            CartAction::ClearCart => None,
        }
    }
}

/// Cart contents and their total.
///
/// Invariants, upheld by every transition:
/// - no two entries share a product id;
/// - every entry has quantity >= 1;
/// - `total` equals the sum of `unit_price * quantity` over the entries.
///
/// There is no way to set `total` or edit entries from outside; state only
/// changes through `reduce`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartState {
    items: Vec<CartEntry>,
    total: f64,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities (the cart badge).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn entry(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.items.iter().find(|e| e.product_id() == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entry(product_id).is_some()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.entry(product_id).map_or(0, CartEntry::quantity)
    }

    /// Apply `action`, resolving re-adds with `policy`.
    pub fn reduce_with(&self, action: &CartAction, policy: PricePolicy) -> Self {
        match action {
            CartAction::AddToCart(product) => self.add(product, policy),
            CartAction::RemoveFromCart(product_id) => self.remove(product_id),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(product_id, *quantity),
            CartAction::ClearCart => Self::default(),
        }
    }

    fn add(&self, product: &CatalogProduct, policy: PricePolicy) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|e| e.product_id() == product.id()) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(1);
                if policy == PricePolicy::Refresh {
                    entry.product = product.clone();
                }
            }
            None => items.push(CartEntry::new(product.clone())),
        }
        Self::from_items(items)
    }

    fn remove(&self, product_id: &ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|e| e.product_id() != product_id)
            .cloned()
            .collect();
        Self::from_items(items)
    }

    fn update_quantity(&self, product_id: &ProductId, quantity: i64) -> Self {
        if quantity < 1 {
            return self.remove(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let items = self
            .items
            .iter()
            .map(|e| {
                if e.product_id() == product_id {
                    CartEntry {
                        quantity,
                        ..e.clone()
                    }
                } else {
                    e.clone()
                }
            })
            .collect();
        Self::from_items(items)
    }

    // Full re-summation in entry order keeps `total` a pure function of
    // `items`, so equal item lists always carry bit-identical totals.
    fn from_items(items: Vec<CartEntry>) -> Self {
        let total = items.iter().fold(0.0, |acc, e| acc + e.line_total());
        Self { items, total }
    }
}

impl Reducer for CartState {
    type Action = CartAction;

    fn reduce(&self, action: &Self::Action) -> Self {
        self.reduce_with(action, PricePolicy::default())
    }
}
