use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

use crate::details::Brand;
use crate::sale::Sale;

/// Product record as returned by the paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListProduct {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub images: Images,
    pub sale: Sale,
    pub rating: String,
    pub stock: Stock,
    pub categories: Vec<Category>,
    /// Not every list payload carries a brand; search falls back to title and
    /// categories when it is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
}

impl ListProduct {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, sale: Sale) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sale,
            ..Self::default()
        }
    }

    /// Route of the detail page this card links to.
    pub fn detail_path(&self) -> String {
        format!("/product/{}", self.slug)
    }

    pub fn has_rating(&self) -> bool {
        !self.rating.trim().is_empty()
    }
}

impl Entity for ListProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    pub featured_image: String,
    pub featured_video: Option<String>,
    pub other_images: Vec<String>,
    pub gallery_images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    pub image: String,
    pub thumbnail: String,
    pub medium: String,
    pub full: String,
}

/// Stock availability.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stock {
    /// Maximum orderable quantity; 0 means out of stock.
    pub max: i64,
    pub delivery_icons: Vec<DeliveryIcon>,
}

impl Stock {
    pub fn in_stock(&self) -> bool {
        self.max > 0
    }

    pub fn availability_label(&self) -> String {
        if self.in_stock() {
            format!("In Stock ({} available)", self.max)
        } else {
            "Out of Stock".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryIcon {
    pub until: String,
    pub icon: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub slug: String,
}
