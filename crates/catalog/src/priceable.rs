//! The capability every cartable product shares, and the union of the two
//! product shapes the catalog returns.

use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

use crate::details::{Brand, ProductDetails};
use crate::product::{Category, ListProduct, Stock};
use crate::sale::Sale;

/// A catalog record with an identity and a price.
pub trait Priceable: Entity<Id = ProductId> {
    fn sale(&self) -> &Sale;

    /// Offer price used for cart arithmetic (0 when missing).
    fn unit_price(&self) -> f64 {
        self.sale().unit_price()
    }
}

impl Priceable for ListProduct {
    fn sale(&self) -> &Sale {
        &self.sale
    }
}

impl Priceable for ProductDetails {
    fn sale(&self) -> &Sale {
        &self.sale
    }
}

/// A product as it reaches the cart: either a list card record or a detail
/// page record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "product", rename_all = "snake_case")]
pub enum CatalogProduct {
    List(ListProduct),
    Detail(Box<ProductDetails>),
}

impl CatalogProduct {
    pub fn title(&self) -> &str {
        match self {
            CatalogProduct::List(p) => &p.title,
            CatalogProduct::Detail(p) => &p.title,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            CatalogProduct::List(p) => &p.slug,
            CatalogProduct::Detail(p) => &p.slug,
        }
    }

    pub fn featured_image(&self) -> &str {
        match self {
            CatalogProduct::List(p) => &p.images.featured_image,
            CatalogProduct::Detail(p) => &p.images.featured_image,
        }
    }

    pub fn stock(&self) -> &Stock {
        match self {
            CatalogProduct::List(p) => &p.stock,
            CatalogProduct::Detail(p) => &p.stock,
        }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            CatalogProduct::List(p) => &p.categories,
            CatalogProduct::Detail(p) => &p.categories,
        }
    }

    pub fn brand(&self) -> Option<&Brand> {
        match self {
            CatalogProduct::List(p) => p.brand.as_ref(),
            CatalogProduct::Detail(p) => p.brand.as_ref(),
        }
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        match self {
            CatalogProduct::List(p) => &p.id,
            CatalogProduct::Detail(p) => &p.id,
        }
    }
}

impl Priceable for CatalogProduct {
    fn sale(&self) -> &Sale {
        match self {
            CatalogProduct::List(p) => &p.sale,
            CatalogProduct::Detail(p) => &p.sale,
        }
    }
}

impl From<ListProduct> for CatalogProduct {
    fn from(product: ListProduct) -> Self {
        CatalogProduct::List(product)
    }
}

impl From<ProductDetails> for CatalogProduct {
    fn from(product: ProductDetails) -> Self {
        CatalogProduct::Detail(Box::new(product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn both_shapes_expose_id_and_price() {
        let list: CatalogProduct =
            ListProduct::new("p1", "Vitamin C", Sale::new("AED", 40.0, 32.0)).into();
        let detail: CatalogProduct =
            ProductDetails::new("p1", "Vitamin C", Sale::new("AED", 40.0, 30.0)).into();

        assert_eq!(list.id(), detail.id());
        assert!(list.same_identity(&detail));
        assert_eq!(list.unit_price(), 32.0);
        assert_eq!(detail.unit_price(), 30.0);
        assert_ne!(list, detail);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let list: CatalogProduct =
            ListProduct::new("p1", "Vitamin C", Sale::new("AED", 40.0, 32.0)).into();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["kind"], "list");
        assert_eq!(json["product"]["id"], "p1");

        let back: CatalogProduct = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }

    proptest! {
        /// Property: the cart price is always finite and equals any finite offer price.
        #[test]
        fn unit_price_is_finite_offer_or_zero(offer in proptest::num::f64::ANY) {
            let product = ListProduct::new("p", "t", Sale::new("AED", 0.0, offer));
            let price = product.unit_price();
            prop_assert!(price.is_finite());
            if offer.is_finite() {
                prop_assert_eq!(price, offer);
            } else {
                prop_assert_eq!(price, 0.0);
            }
        }
    }
}
