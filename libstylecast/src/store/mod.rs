//! Application state container
//!
//! The single owner of the shopping session's state:
//! - Actions: the closed set of transitions screens may request
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//! - Store: holds the state and applies actions one at a time

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use state::AppState;

use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Owning container for [`AppState`]
///
/// `dispatch` is the only way to change the held state. A dispatch either
/// applies completely or, on error, leaves the state exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    /// Create a store holding the initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a non-default store configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_state(AppState::with_config(config))
    }

    /// Create a store around an existing state
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Apply one action
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyOutfitDeck` for `NextOutfit` while no
    /// outfit photos are loaded. The held state is unchanged in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<&AppState, StoreError> {
        let kind = action.kind();
        match reduce(self.state.clone(), action) {
            Ok(next) => {
                self.state = next;
                debug!(
                    action = kind,
                    screen = %self.state.current_screen,
                    cart_lines = self.state.cart_items.len(),
                    liked = self.state.liked_outfits.len(),
                    "Action dispatched"
                );
                Ok(&self.state)
            }
            Err(e) => {
                warn!(action = kind, error = %e, "Action rejected");
                Err(e)
            }
        }
    }

    /// Apply actions in order, stopping at the first rejected one
    ///
    /// Actions applied before the failure stay applied.
    pub fn dispatch_all<I>(&mut self, actions: I) -> Result<&AppState, StoreError>
    where
        I: IntoIterator<Item = Action>,
    {
        for action in actions {
            self.dispatch(action)?;
        }
        Ok(&self.state)
    }
}
