//! Stylecast - a swipe-driven shopping front-end
//!
//! This library holds everything the front-ends share: the application state
//! container and its action protocol, the hard-coded catalog, and the
//! simulated try-on and checkout collaborators.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, StaticCatalog};
pub use config::Config;
pub use error::{Result, StylecastError};
pub use store::{reduce, Action, AppState, Store};
pub use types::{CartItem, LikedOutfit, OutfitPhoto, Product, Screen, TryOnSession, TryOnStatus};
