use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

use crate::product::{Category, Images, Stock};
use crate::sale::Sale;

/// Full product record from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDetails {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub brand: Option<Brand>,
    pub description: String,
    pub short_description: String,
    pub images: Images,
    pub sale: Sale,
    pub categories: Vec<Category>,
    pub label: Option<Label>,
    pub rating: String,
    pub stock: Stock,
    pub reviews: Vec<Review>,
    pub ratings: Option<Ratings>,
}

impl ProductDetails {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, sale: Sale) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sale,
            ..Self::default()
        }
    }

    /// Gallery order: featured image first, then each gallery image at full
    /// resolution.
    pub fn all_images(&self) -> Vec<&str> {
        std::iter::once(self.images.featured_image.as_str())
            .chain(self.images.gallery_images.iter().map(|img| img.full.as_str()))
            .collect()
    }

    /// HTML description: the short one until the reader expands it.
    pub fn description(&self, expanded: bool) -> &str {
        if expanded {
            &self.description
        } else {
            &self.short_description
        }
    }

    pub fn has_long_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Label badge, only while the catalog marks it active.
    pub fn active_label(&self) -> Option<&Label> {
        self.label.as_ref().filter(|label| label.active)
    }

    pub fn top_reviews(&self, n: usize) -> &[Review] {
        &self.reviews[..self.reviews.len().min(n)]
    }

    /// `"View all N reviews"` link text, when more reviews exist than shown.
    pub fn more_reviews_label(&self, shown: usize) -> Option<String> {
        (self.reviews.len() > shown).then(|| format!("View all {} reviews", self.reviews.len()))
    }
}

impl Entity for ProductDetails {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub images: BrandImages,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandImages {
    pub logo: String,
    pub banner: String,
}

/// Promotional badge on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub label_text: String,
    pub icon_type: String,
    pub color_code: String,
    pub active: bool,
    pub sub_label_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub value: u32,
    pub user_id: i64,
    pub review: Option<String>,
    pub is_anonymous: bool,
    pub created_at: String,
    pub user_details: ReviewAuthor,
}

impl Review {
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            "Anonymous"
        } else {
            &self.user_details.name
        }
    }

    /// Star count clamped to the five-star scale.
    pub fn stars(&self) -> u32 {
        self.value.min(5)
    }

    /// Calendar date of the review, if the timestamp parses.
    pub fn created_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc).date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(&self.created_at, "%Y-%m-%d").ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewAuthor {
    pub name: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ratings {
    pub rating: String,
    pub count: u64,
    pub breakdown: BTreeMap<String, u64>,
}
