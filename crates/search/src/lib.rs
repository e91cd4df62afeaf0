//! Fuzzy product search.
//!
//! Ranks catalog records against a free-text query by title, brand name and
//! category names.

pub mod searchable;
pub mod search;

pub use search::{ProductSearch, SearchHit, SearchKeys, SearchOptions};
pub use searchable::Searchable;
