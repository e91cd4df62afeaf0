//! Single-owner holder of the session's cart state.

use storefront_catalog::CatalogProduct;
use storefront_core::ProductId;

use crate::state::{CartAction, CartState, PricePolicy};

type Listener = Box<dyn FnMut(&CartState)>;

/// Owns the current `CartState` and applies transitions to it.
///
/// Dispatch takes `&mut self`: there is exactly one writer, and each
/// transition runs to completion before the next one starts. Listeners are
/// called after a transition that actually changed the state.
pub struct CartStore {
    state: CartState,
    policy: PricePolicy,
    revision: u64,
    listeners: Vec<Listener>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_policy(PricePolicy::default())
    }

    pub fn with_policy(policy: PricePolicy) -> Self {
        Self {
            state: CartState::new(),
            policy,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn policy(&self) -> PricePolicy {
        self.policy
    }

    /// Number of transitions that changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a callback run with the new state after each change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CartState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        let next = self.state.reduce_with(&action, self.policy);

        if next == self.state {
            tracing::debug!(
                action = action.kind(),
                product_id = action.product_id().map(ProductId::as_str),
                "cart transition left state unchanged"
            );
            return &self.state;
        }

        self.state = next;
        self.revision += 1;

        tracing::debug!(
            action = action.kind(),
            product_id = action.product_id().map(ProductId::as_str),
            entries = self.state.len(),
            item_count = self.state.item_count(),
            total = self.state.total(),
            revision = self.revision,
            "cart updated"
        );

        for listener in &mut self.listeners {
            listener(&self.state);
        }

        &self.state
    }

    pub fn add_to_cart(&mut self, product: impl Into<CatalogProduct>) -> &CartState {
        self.dispatch(CartAction::AddToCart(product.into()))
    }

    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> &CartState {
        self.dispatch(CartAction::RemoveFromCart(product_id.clone()))
    }

    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> &CartState {
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.clone(),
            quantity,
        })
    }

    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartAction::ClearCart)
    }

    /// Quantity stepper "+": one more of an entry already in the cart.
    pub fn increment(&mut self, product_id: &ProductId) -> &CartState {
        let quantity = i64::from(self.state.quantity_of(product_id));
        if quantity == 0 {
            return &self.state;
        }
        self.update_quantity(product_id, quantity + 1)
    }

    /// Quantity stepper "-": one fewer; the entry goes away at zero.
    pub fn decrement(&mut self, product_id: &ProductId) -> &CartState {
        let quantity = i64::from(self.state.quantity_of(product_id));
        if quantity == 0 {
            return &self.state;
        }
        self.update_quantity(product_id, quantity - 1)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
