//! Catalog domain module.
//!
//! Record types returned by the remote product catalog (list and detail
//! endpoints), the `Priceable` capability shared by both shapes, and the small
//! display rules the storefront screens apply to them. Pure data, no IO.

pub mod details;
pub mod priceable;
pub mod product;
pub mod sale;

pub use details::{Brand, BrandImages, Label, ProductDetails, Ratings, Review, ReviewAuthor};
pub use priceable::{CatalogProduct, Priceable};
pub use product::{Category, DeliveryIcon, GalleryImage, Images, ListProduct, Stock};
pub use sale::Sale;
pub use storefront_core::ProductId;
