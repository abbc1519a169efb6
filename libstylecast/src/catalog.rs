//! Product and outfit catalog
//!
//! The shopping front-end has no backend; `StaticCatalog` serves the fixed
//! outfit deck and product table every screen draws from.

use crate::types::{OutfitPhoto, Price, Product};

const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1515372039744-b8f02a3ae446?w=300&h=400&fit=crop";

/// Source of outfit cards and product records
pub trait Catalog: Send + Sync {
    /// The discovery deck, in presentation order
    fn outfit_photos(&self) -> Vec<OutfitPhoto>;

    /// Every purchasable product
    fn products(&self) -> Vec<Product>;

    /// Look up one product by id
    fn product(&self, id: &str) -> Option<Product> {
        self.products().into_iter().find(|p| p.id == id)
    }

    /// Look up a product, substituting a zero-priced placeholder for unknown ids
    fn product_or_placeholder(&self, id: &str) -> Product {
        self.product(id).unwrap_or_else(|| Product {
            id: id.to_string(),
            title: "Unknown Product".to_string(),
            price: Price::ZERO,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            description: None,
            style: None,
        })
    }
}

/// Hard-coded catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        Self
    }
}

fn outfit(id: &str, photo: &str, tags: &[&str], style: &str, season: &str) -> OutfitPhoto {
    OutfitPhoto {
        id: id.to_string(),
        image_url: format!(
            "https://images.unsplash.com/photo-{}?w=400&h=600&fit=crop",
            photo
        ),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        style: style.to_string(),
        season: Some(season.to_string()),
    }
}

fn product(
    id: &str,
    title: &str,
    cents: u64,
    photo: &str,
    description: &str,
    style: &str,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price: Price::from_cents(cents),
        image_url: format!(
            "https://images.unsplash.com/photo-{}?w=300&h=400&fit=crop",
            photo
        ),
        description: Some(description.to_string()),
        style: Some(style.to_string()),
    }
}

impl Catalog for StaticCatalog {
    fn outfit_photos(&self) -> Vec<OutfitPhoto> {
        vec![
            outfit("1", "1515372039744-b8f02a3ae446", &["casual", "streetwear", "trendy"], "Urban Casual", "spring"),
            outfit("2", "1539008835657-9e8e9680c956", &["elegant", "formal", "chic"], "Business Chic", "fall"),
            outfit("3", "1544957992-20327709a927", &["boho", "relaxed", "vintage"], "Bohemian", "summer"),
            outfit("4", "1551232864-3f0890e580d9", &["sporty", "athletic", "active"], "Athleisure", "spring"),
            outfit("5", "1542272454315-7ad9b6592e8d", &["minimalist", "clean", "modern"], "Minimalist", "fall"),
        ]
    }

    fn products(&self) -> Vec<Product> {
        vec![
            product("prod_1", "Cropped Puffer Jacket", 8999, "1591047139829-d91aecb6caea", "Perfect for urban casual looks", "Urban Casual"),
            product("prod_2", "High-Waisted Straight Jeans", 7999, "1594633312681-425c7b97ccd1", "Versatile and comfortable", "Minimalist"),
            product("prod_3", "Chunky Knit Sweater", 6599, "1576566588028-4147f3842f27", "Cozy and stylish", "Bohemian"),
            product("prod_4", "Platform Sneakers", 12999, "1549298916-b41d501d3772", "Statement footwear", "Athleisure"),
            product("prod_5", "Oversized Blazer", 14999, "1594633312681-425c7b97ccd1", "Business chic essential", "Business Chic"),
            product("prod_6", "Midi Slip Dress", 9599, "1515372039744-b8f02a3ae446", "Elegant and versatile", "Business Chic"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_deck_has_five_distinct_styles() {
        let photos = StaticCatalog::new().outfit_photos();
        assert_eq!(photos.len(), 5);

        let mut styles: Vec<&str> = photos.iter().map(|p| p.style.as_str()).collect();
        styles.dedup();
        assert_eq!(styles.len(), 5);
        assert!(photos.iter().all(|p| p.tags.len() == 3));
    }

    #[test]
    fn test_product_lookup() {
        let catalog = StaticCatalog::new();
        let jacket = catalog.product("prod_1").unwrap();
        assert_eq!(jacket.title, "Cropped Puffer Jacket");
        assert_eq!(jacket.price.to_string(), "$89.99");
        assert!(catalog.product("prod_99").is_none());
    }

    #[test]
    fn test_unknown_product_gets_placeholder() {
        let placeholder = StaticCatalog::new().product_or_placeholder("mystery");
        assert_eq!(placeholder.id, "mystery");
        assert_eq!(placeholder.title, "Unknown Product");
        assert_eq!(placeholder.price, Price::ZERO);
    }

    #[test]
    fn test_product_ids_unique() {
        let products = StaticCatalog::new().products();
        let mut ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }
}
