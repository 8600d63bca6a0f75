use crate::domain::product::Product;
use crate::seeds;

pub const DEFAULT_AUTOCOMPLETE_LIMIT: usize = 8;

/// Read-only product list, kept in the order it was supplied.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn sample() -> Self {
        Self::new(seeds::sample_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let needle = name.trim().to_lowercase();
        self.products.iter().find(|product| product.name.to_lowercase() == needle)
    }

    /// Case-insensitive substring match on product names, in catalog order,
    /// capped at `limit`. A blank term matches nothing.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        let needle = category.trim().to_lowercase();
        self.products.iter().filter(move |product| product.category.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, DEFAULT_AUTOCOMPLETE_LIMIT};

    #[test]
    fn category_filter_matches_names_the_same_way_as_lookup() {
        let catalog = Catalog::sample();
        let exact = catalog.in_category("Vegetables").count();

        assert!(exact > 0);
        assert_eq!(catalog.in_category("  VEGETABLES ").count(), exact);
        assert_eq!(catalog.in_category("vegetables").count(), exact);
        assert_eq!(catalog.in_category("Hardware").count(), 0);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = Catalog::sample();
        let names = catalog
            .search("MILK", DEFAULT_AUTOCOMPLETE_LIMIT)
            .into_iter()
            .map(|product| product.name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(names, ["Milk - Full Cream", "Milk - Toned", "Dairy Milk", "Dairy Milk Silk"]);
    }

    #[test]
    fn search_caps_results_and_ignores_blank_terms() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.search("a", 3).len(), 3);
        assert!(catalog.search("   ", DEFAULT_AUTOCOMPLETE_LIMIT).is_empty());
        assert!(catalog.search("dragonfruit", DEFAULT_AUTOCOMPLETE_LIMIT).is_empty());
    }

    #[test]
    fn exact_lookup_ignores_case_and_padding() {
        let catalog = Catalog::sample();
        let product = catalog.find_by_name("  onion - RED ").expect("onion is stocked");
        assert_eq!(product.name, "Onion - Red");
        assert!(catalog.find_by_name("Onion").is_none());
    }

    #[test]
    fn categories_follow_catalog_order() {
        let catalog = Catalog::sample();
        let categories = catalog.categories();

        assert_eq!(categories.first(), Some(&"Dairy"));
        assert_eq!(categories.len(), 7);
        assert_eq!(catalog.in_category("dairy").count(), 5);
    }
}
