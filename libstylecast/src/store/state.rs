//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Result, StylecastError};
use crate::types::{CartItem, LikedOutfit, OutfitPhoto, Screen, TryOnSession};

/// Root application state
///
/// This is the single source of truth shared by every screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Current active screen
    pub current_screen: Screen,

    /// Outfits swiped right, in like order
    pub liked_outfits: Vec<LikedOutfit>,

    /// Cart lines, at most one per merge key
    pub cart_items: Vec<CartItem>,

    /// Try-on sessions by session id
    pub try_on_sessions: BTreeMap<String, TryOnSession>,

    /// Cursor into `outfit_photos`
    pub current_outfit_index: usize,

    /// Outfit deck for the discovery screen
    pub outfit_photos: Vec<OutfitPhoto>,

    pub is_loading: bool,

    /// Product chosen on the recommendations screen for try-on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_product_for_try_on: Option<String>,

    /// Store behaviour knobs
    #[serde(default)]
    pub config: StoreConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state with the given store configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            current_screen: Screen::Home,
            liked_outfits: Vec::new(),
            cart_items: Vec::new(),
            try_on_sessions: BTreeMap::new(),
            current_outfit_index: 0,
            outfit_photos: Vec::new(),
            is_loading: false,
            selected_product_for_try_on: None,
            config,
        }
    }

    /// The outfit card under the cursor, if the deck is loaded
    pub fn current_outfit(&self) -> Option<&OutfitPhoto> {
        self.outfit_photos.get(self.current_outfit_index)
    }

    /// Whether the cursor sits on the last card of the deck
    pub fn is_last_outfit(&self) -> bool {
        !self.outfit_photos.is_empty()
            && self.current_outfit_index >= self.outfit_photos.len() - 1
    }

    /// Quantity held for a product across all of its cart lines
    pub fn cart_quantity(&self, product_id: &str) -> u32 {
        self.cart_items
            .iter()
            .filter(|item| item.product_id == product_id)
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Total number of units in the cart
    pub fn total_items(&self) -> u32 {
        self.cart_items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Distinct liked styles, in the order they were first liked
    pub fn liked_styles(&self) -> Vec<&str> {
        crate::service::recommendations::distinct_styles(&self.liked_outfits)
    }

    /// Check a state that arrived from outside the reducer, e.g. a saved file
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a cart line holds zero units or the outfit
    /// cursor points past the loaded deck.
    pub fn validate(&self) -> Result<()> {
        if let Some(item) = self.cart_items.iter().find(|item| item.quantity == 0) {
            return Err(StylecastError::InvalidInput(format!(
                "cart line for {} has quantity 0",
                item.product_id
            )));
        }

        let deck = self.outfit_photos.len();
        let in_range = if deck == 0 {
            self.current_outfit_index == 0
        } else {
            self.current_outfit_index < deck
        };
        if !in_range {
            return Err(StylecastError::InvalidInput(format!(
                "outfit index {} is outside a deck of {}",
                self.current_outfit_index, deck
            )));
        }

        Ok(())
    }
}
