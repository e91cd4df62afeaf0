//! `storefront-client`
//!
//! **Responsibility:** talking to the remote product catalog.
//!
//! This crate provides:
//! - `ClientConfig`: base URL, page size and timeouts, overridable from the
//!   environment
//! - `CatalogClient`: HTTP implementation of the `CatalogSource` contract
//!   (paginated product list + product details by slug)
//! - `DetailCache`: in-memory cache of detail payloads with an optional max age
//!
//! The catalog API stays the authority; nothing here writes to it.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod source;

pub use cache::DetailCache;
pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use source::{CatalogSource, ProductDetailsPayload, ProductPage};
