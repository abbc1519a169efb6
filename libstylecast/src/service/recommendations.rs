//! Product recommendations driven by liked outfits

use crate::catalog::Catalog;
use crate::types::{LikedOutfit, Product};

/// Headline explaining why the recommendations were chosen
///
/// Uses the first two distinct liked styles, in like order.
pub fn recommendation_reason(liked: &[LikedOutfit]) -> String {
    match distinct_styles(liked).as_slice() {
        [] => "Based on popular trends".to_string(),
        [only] => format!("Because you liked {} style", only),
        [first, second, ..] => format!("Based on your {} and {} preferences", first, second),
    }
}

/// Liked styles with repeats dropped, in the order first liked
pub fn distinct_styles(liked: &[LikedOutfit]) -> Vec<&str> {
    let mut styles: Vec<&str> = Vec::new();
    for outfit in liked {
        let style = outfit.outfit_photo.style.as_str();
        if !styles.contains(&style) {
            styles.push(style);
        }
    }
    styles
}

/// Catalog products, those matching a liked style first
///
/// Order within each group follows the catalog.
pub fn recommend(catalog: &dyn Catalog, liked: &[LikedOutfit]) -> Vec<Product> {
    let mut products = catalog.products();
    products.sort_by_key(|product| !matches_liked_style(product, liked));
    products
}

fn matches_liked_style(product: &Product, liked: &[LikedOutfit]) -> bool {
    product
        .style
        .as_deref()
        .is_some_and(|style| liked.iter().any(|l| l.outfit_photo.style == style))
}
