//! Cart domain module.
//!
//! The cart is a small client-side state machine: an ordered list of
//! (product, quantity) entries, unique by product id, plus a total that is
//! always re-derived from the entries. Transitions are pure (`CartState::reduce`);
//! `CartStore` owns the current state for a session and applies them.

pub mod state;
pub mod store;
pub mod view;

pub use state::{CartAction, CartEntry, CartState, PricePolicy};
pub use store::CartStore;
pub use view::{BuyButton, CartLineView, CartView};
