use storefront_catalog::{Brand, CatalogProduct, Category, ListProduct, ProductDetails};

/// Texts a record exposes to search, grouped by key.
pub trait Searchable {
    fn title(&self) -> &str;

    fn brand_name(&self) -> Option<&str>;

    fn category_names(&self) -> Vec<&str>;
}

fn brand_name(brand: Option<&Brand>) -> Option<&str> {
    brand.map(|b| b.name.as_str()).filter(|name| !name.is_empty())
}

fn category_names(categories: &[Category]) -> Vec<&str> {
    categories.iter().map(|c| c.name.as_str()).collect()
}

impl Searchable for ListProduct {
    fn title(&self) -> &str {
        &self.title
    }

    fn brand_name(&self) -> Option<&str> {
        brand_name(self.brand.as_ref())
    }

    fn category_names(&self) -> Vec<&str> {
        category_names(&self.categories)
    }
}

impl Searchable for ProductDetails {
    fn title(&self) -> &str {
        &self.title
    }

    fn brand_name(&self) -> Option<&str> {
        brand_name(self.brand.as_ref())
    }

    fn category_names(&self) -> Vec<&str> {
        category_names(&self.categories)
    }
}

impl Searchable for CatalogProduct {
    fn title(&self) -> &str {
        CatalogProduct::title(self)
    }

    fn brand_name(&self) -> Option<&str> {
        brand_name(self.brand())
    }

    fn category_names(&self) -> Vec<&str> {
        category_names(self.categories())
    }
}
