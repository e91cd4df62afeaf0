//! Storefront application layer: the session that ties the cart, the product
//! feed and the catalog client together, and the view models screens render.

pub mod error;
pub mod feed;
pub mod session;
pub mod views;

pub use error::AppError;
pub use feed::ProductFeed;
pub use session::{QuantityEdit, Session};
pub use views::{ProductCardView, ProductDetailView, ReviewView};

#[cfg(test)]
mod fake;
