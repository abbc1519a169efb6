//! Actions for the reducer pattern
//!
//! Terminal input, view changes and async completions all reach the state
//! through these actions.

use crossterm::event::KeyEvent;
use libstylecast::store::Action as StoreAction;
use libstylecast::CartItem;

pub use libstylecast::Screen;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick for animations
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    /// Quit the application
    Quit,

    ShowHelp,
    HideHelp,

    // === Shopping state ===
    /// Forward an action to the shopping store
    Store(StoreAction),

    // === Try-on ===
    /// A try-on request was handed to the service layer
    TryOnStarted { request_id: String },

    TryOnSucceeded {
        request_id: String,
        result_image_url: String,
    },

    TryOnFailed { request_id: String, error: String },

    // === Checkout ===
    /// A checkout request was handed to the service layer with `items`
    CheckoutStarted {
        request_id: String,
        items: Vec<CartItem>,
    },

    CheckoutSucceeded { request_id: String, order_id: String },

    CheckoutFailed { request_id: String, error: String },

    // === Error Handling ===
    /// Show error overlay
    ShowError(String),

    /// Dismiss error overlay
    DismissError,

    // === Status Bar ===
    SetStatus(String),
    ClearStatus,
}

impl From<StoreAction> for Action {
    fn from(action: StoreAction) -> Self {
        Action::Store(action)
    }
}
