//! Actions accepted by the state container
//!
//! On the wire an action is an object tagged by `type` with camelCase
//! fields, e.g.
//! `{"type": "ADD_TO_CART", "productId": "prod_1"}`.

use serde::{Deserialize, Serialize};

use crate::types::{OutfitPhoto, Screen, TryOnSessionUpdate};

/// Actions that trigger state transitions
///
/// Actions are plain data describing what should happen; the reducer
/// (see `reducer.rs`) applies them to state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Move the navigation cursor
    NavigateTo { screen: Screen },

    /// Append the outfit to the liked list
    LikeOutfit { outfit: OutfitPhoto },

    /// Add one unit of a product to the cart
    AddToCart {
        product_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant_id: Option<String>,
    },

    /// Drop every cart line for a product
    RemoveFromCart { product_id: String },

    /// Select a product for try-on and open the try-on screen
    StartTryOn { product_id: String },

    /// Merge fields into an existing try-on session
    UpdateTryOn {
        session_id: String,
        updates: TryOnSessionUpdate,
    },

    /// Replace the outfit deck
    SetOutfitPhotos { photos: Vec<OutfitPhoto> },

    /// Advance the outfit cursor, wrapping at the end of the deck
    NextOutfit,

    SetLoading { is_loading: bool },

    /// Any action tag this build does not know; applied as a no-op
    #[serde(other)]
    Unrecognized,
}

impl Action {
    /// Wire tag of this action, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::NavigateTo { .. } => "NAVIGATE_TO",
            Action::LikeOutfit { .. } => "LIKE_OUTFIT",
            Action::AddToCart { .. } => "ADD_TO_CART",
            Action::RemoveFromCart { .. } => "REMOVE_FROM_CART",
            Action::StartTryOn { .. } => "START_TRY_ON",
            Action::UpdateTryOn { .. } => "UPDATE_TRY_ON",
            Action::SetOutfitPhotos { .. } => "SET_OUTFIT_PHOTOS",
            Action::NextOutfit => "NEXT_OUTFIT",
            Action::SetLoading { .. } => "SET_LOADING",
            Action::Unrecognized => "UNRECOGNIZED",
        }
    }

    pub fn navigate(screen: Screen) -> Self {
        Action::NavigateTo { screen }
    }

    pub fn add_to_cart(product_id: impl Into<String>) -> Self {
        Action::AddToCart {
            product_id: product_id.into(),
            variant_id: None,
        }
    }

    pub fn remove_from_cart(product_id: impl Into<String>) -> Self {
        Action::RemoveFromCart {
            product_id: product_id.into(),
        }
    }

    pub fn start_try_on(product_id: impl Into<String>) -> Self {
        Action::StartTryOn {
            product_id: product_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TryOnStatus;

    #[test]
    fn test_parse_tagged_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"type":"ADD_TO_CART","productId":"prod_1","variantId":"v2"}"#)
                .unwrap();
        assert_eq!(
            action,
            Action::AddToCart {
                product_id: "prod_1".to_string(),
                variant_id: Some("v2".to_string()),
            }
        );

        let action: Action =
            serde_json::from_str(r#"{"type":"NAVIGATE_TO","screen":"tryOn"}"#).unwrap();
        assert_eq!(action, Action::navigate(Screen::TryOn));

        let action: Action =
            serde_json::from_str(r#"{"type":"SET_LOADING","isLoading":true}"#).unwrap();
        assert_eq!(action, Action::SetLoading { is_loading: true });

        let action: Action = serde_json::from_str(r#"{"type":"NEXT_OUTFIT"}"#).unwrap();
        assert_eq!(action, Action::NextOutfit);
    }

    #[test]
    fn test_parse_update_try_on_partial_fields() {
        let action: Action = serde_json::from_str(
            r#"{"type":"UPDATE_TRY_ON","sessionId":"s1","updates":{"status":"completed"}}"#,
        )
        .unwrap();
        match action {
            Action::UpdateTryOn { session_id, updates } => {
                assert_eq!(session_id, "s1");
                assert_eq!(updates.status, Some(TryOnStatus::Completed));
                assert!(updates.result_image_url.is_none());
            }
            other => panic!("Expected UpdateTryOn, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_parses_as_unrecognized() {
        let action: Action =
            serde_json::from_str(r#"{"type":"APPLY_COUPON","code":"SAVE10"}"#).unwrap();
        assert_eq!(action, Action::Unrecognized);
    }

    #[test]
    fn test_unknown_screen_is_rejected() {
        let result: Result<Action, _> =
            serde_json::from_str(r#"{"type":"NAVIGATE_TO","screen":"settings"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let actions = vec![
            Action::navigate(Screen::Cart),
            Action::add_to_cart("p1"),
            Action::remove_from_cart("p1"),
            Action::start_try_on("p7"),
            Action::NextOutfit,
            Action::SetLoading { is_loading: false },
            Action::SetOutfitPhotos { photos: vec![] },
        ];
        for action in actions {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["type"], action.kind());
        }
    }
}
