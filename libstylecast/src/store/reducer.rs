//! Reducer function for state transitions
//!
//! `(State, Action) -> Result<State>`
//!
//! The reducer performs no I/O. The only impure inputs are the fresh id and
//! timestamp attached to liked outfits and new cart lines.

use super::actions::Action;
use super::state::AppState;
use crate::config::CartMergePolicy;
use crate::error::StoreError;
use crate::types::{CartItem, LikedOutfit, Screen};

/// Apply one action to the state
///
/// Unknown session or product ids and unrecognized actions leave the state
/// unchanged rather than failing.
///
/// # Errors
///
/// `StoreError::EmptyOutfitDeck` when `NextOutfit` is applied while
/// `outfit_photos` is empty.
pub fn reduce(state: AppState, action: Action) -> Result<AppState, StoreError> {
    let next = match action {
        Action::NavigateTo { screen } => AppState {
            current_screen: screen,
            ..state
        },

        Action::LikeOutfit { outfit } => {
            let mut liked_outfits = state.liked_outfits;
            liked_outfits.push(LikedOutfit::new(outfit));
            AppState {
                liked_outfits,
                ..state
            }
        }

        Action::AddToCart {
            product_id,
            variant_id,
        } => {
            let policy = state.config.cart_merge;
            let mut cart_items = state.cart_items;
            let existing = cart_items
                .iter()
                .position(|item| same_line(policy, item, &product_id, variant_id.as_deref()));

            match existing {
                Some(pos) => {
                    cart_items[pos].quantity = cart_items[pos].quantity.saturating_add(1)
                }
                None => cart_items.push(CartItem::new(product_id, variant_id)),
            }

            AppState {
                cart_items,
                ..state
            }
        }

        Action::RemoveFromCart { product_id } => {
            let mut cart_items = state.cart_items;
            cart_items.retain(|item| item.product_id != product_id);
            AppState {
                cart_items,
                ..state
            }
        }

        Action::StartTryOn { product_id } => AppState {
            selected_product_for_try_on: Some(product_id),
            current_screen: Screen::TryOn,
            ..state
        },

        Action::UpdateTryOn {
            session_id,
            updates,
        } => {
            let mut try_on_sessions = state.try_on_sessions;
            if let Some(session) = try_on_sessions.remove(&session_id) {
                try_on_sessions.insert(session_id, session.merged(updates));
            }
            AppState {
                try_on_sessions,
                ..state
            }
        }

        Action::SetOutfitPhotos { photos } => AppState {
            outfit_photos: photos,
            ..state
        },

        Action::NextOutfit => {
            let len = state.outfit_photos.len();
            if len == 0 {
                return Err(StoreError::EmptyOutfitDeck);
            }
            AppState {
                // A loaded index may sit past the end of a replaced deck
                current_outfit_index: (state.current_outfit_index % len + 1) % len,
                ..state
            }
        }

        Action::SetLoading { is_loading } => AppState {
            is_loading,
            ..state
        },

        Action::Unrecognized => state,
    };

    Ok(next)
}

/// Whether an add for (`product_id`, `variant_id`) lands on `item`
fn same_line(
    policy: CartMergePolicy,
    item: &CartItem,
    product_id: &str,
    variant_id: Option<&str>,
) -> bool {
    match policy {
        // Variants of one product collapse into the first line added
        CartMergePolicy::ByProduct => item.product_id == product_id,
        CartMergePolicy::ByVariant => {
            item.product_id == product_id && item.variant_id.as_deref() == variant_id
        }
    }
}
