//! Service layer for Stylecast
//!
//! Everything outside the state container that a front-end needs: product
//! recommendations, cart pricing, and the simulated try-on and checkout
//! collaborators.
//!
//! # Architecture
//!
//! `StylecastService` is a facade over the sub-services, sharing one catalog,
//! one configuration and one event bus:
//!
//! - `TryOnService`: photo validation and simulated try-on
//! - `CheckoutService`: simulated order placement
//! - `EventBus`: progress event distribution
//!
//! Recommendations and cart pricing are pure functions in [`recommendations`]
//! and [`cart`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use libstylecast::service::StylecastService;
//! use libstylecast::service::tryon::TryOnRequest;
//!
//! # async fn example() -> libstylecast::Result<()> {
//! let service = StylecastService::load()?;
//!
//! let image = service.try_on().validate(Path::new("me.jpg"))?;
//! let outcome = service.try_on().try_on(TryOnRequest::new("prod_1", image)).await?;
//! println!("Result: {}", outcome.result_image_url);
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod checkout;
pub mod events;
pub mod recommendations;
pub mod tryon;

use std::sync::Arc;

use rand::Rng;

use self::checkout::{CheckoutService, SimulatedCheckout};
use self::events::{EventBus, EventReceiver};
use self::tryon::{SimulatedTryOn, TryOnService};
use crate::catalog::{Catalog, StaticCatalog};
use crate::{Config, Result};

/// Main service facade
#[derive(Clone)]
pub struct StylecastService {
    catalog: Arc<dyn Catalog>,
    try_on: TryOnService,
    checkout: CheckoutService,
    event_bus: EventBus,
    config: Arc<Config>,
}

impl StylecastService {
    /// Create a service from the configuration file at the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn load() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// Create a service with the static catalog and simulated collaborators
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let try_on = SimulatedTryOn::from_config(&config.try_on);
        let checkout = SimulatedCheckout::from_config(&config.checkout);
        Self::with_parts(
            config,
            Arc::new(StaticCatalog::new()),
            Arc::new(try_on),
            Arc::new(checkout),
        )
    }

    /// Create a service from explicit collaborators
    pub fn with_parts(
        config: Arc<Config>,
        catalog: Arc<dyn Catalog>,
        try_on: Arc<dyn tryon::TryOnProvider>,
        checkout: Arc<dyn checkout::CheckoutProvider>,
    ) -> Self {
        let event_bus = EventBus::new(100);

        let try_on = TryOnService::new(try_on, Arc::new(config.try_on.clone()), event_bus.clone());
        let checkout = CheckoutService::new(checkout, event_bus.clone());

        Self {
            catalog,
            try_on,
            checkout,
            event_bus,
            config,
        }
    }

    pub fn catalog(&self) -> Arc<dyn Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn try_on(&self) -> &TryOnService {
        &self.try_on
    }

    pub fn checkout(&self) -> &CheckoutService {
        &self.checkout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe to progress events from every sub-service
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}

/// Roll the dice for a simulated failure
///
/// Rates at or below zero (and NaN) never fail; rates above one always fail.
pub(crate) fn roll_failure(rate: f64) -> bool {
    if !(rate > 0.0) {
        return false;
    }
    rand::thread_rng().gen_bool(rate.min(1.0))
}
