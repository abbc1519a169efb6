//! Cart pricing and cart edits expressed as store actions

use serde::Serialize;

use crate::catalog::Catalog;
use crate::store::Action;
use crate::types::{CartItem, Price, Product};

/// One priced cart line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
    pub line_total: Price,
}

/// Priced view of the cart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
    pub total_items: u32,
}

impl CartSummary {
    /// Price every cart line against the catalog
    ///
    /// Unknown products are priced at zero. Tax is `tax_rate_bps` basis
    /// points of the subtotal, rounded half up to the cent.
    pub fn compute(items: &[CartItem], catalog: &dyn Catalog, tax_rate_bps: u32) -> Self {
        let lines: Vec<CartLine> = items
            .iter()
            .map(|item| {
                let product = catalog.product_or_placeholder(&item.product_id);
                CartLine {
                    line_total: product.price * item.quantity,
                    item: item.clone(),
                    product,
                }
            })
            .collect();

        let subtotal = lines.iter().fold(Price::ZERO, |acc, l| acc + l.line_total);
        let tax = Price::from_cents((subtotal.cents() * u64::from(tax_rate_bps) + 5_000) / 10_000);
        let total_items = items
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.quantity));

        Self {
            lines,
            subtotal,
            tax,
            total: subtotal + tax,
            total_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Actions that set the quantity of cart line `line` to `quantity`
///
/// Removing a product drops all of its lines, so every line of that product
/// is re-added with its own variant and quantity, the edited one at
/// `quantity`. A quantity of zero leaves the edited line out. An index past
/// the end yields no actions.
pub fn quantity_actions(cart: &[CartItem], line: usize, quantity: u32) -> Vec<Action> {
    let Some(edited) = cart.get(line) else {
        return Vec::new();
    };

    let mut actions = vec![Action::remove_from_cart(edited.product_id.as_str())];
    for (index, item) in cart.iter().enumerate() {
        if item.product_id != edited.product_id {
            continue;
        }
        let count = if index == line { quantity } else { item.quantity };
        actions.extend((0..count).map(|_| Action::AddToCart {
            product_id: item.product_id.clone(),
            variant_id: item.variant_id.clone(),
        }));
    }
    actions
}

/// Actions that empty the cart, one removal per distinct product
pub fn clear_cart_actions(items: &[CartItem]) -> Vec<Action> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !seen.contains(&item.product_id.as_str()) {
            seen.push(&item.product_id);
        }
    }
    seen.into_iter().map(Action::remove_from_cart).collect()
}
