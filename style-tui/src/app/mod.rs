//! Application module
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: `(State, Action) -> State`
//!
//! Shopping state lives in the library's `Store`; this layer adds the
//! screen-local view state (cursors, overlays, in-flight requests) and maps
//! keys onto store actions.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, Screen};
pub use reducer::reduce;
pub use state::{AppState, Request, TryOnStep, UiConfig};
