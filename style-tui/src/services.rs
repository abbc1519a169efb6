//! Service layer adapter for the TUI
//!
//! Bridges the async `StylecastService` to the synchronous event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: owns the service and a tokio runtime
//! - Photo validation: synchronous, runs on the UI thread
//! - Try-on and checkout: spawned on the runtime; the request id is returned
//!   immediately and the outcome arrives later as an event
//! - Events: the tokio broadcast bus is forwarded into a crossbeam channel
//!   the event loop drains without blocking
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use style_tui::services::ServiceHandle;
//!
//! # fn example() -> style_tui::error::Result<()> {
//! let services = ServiceHandle::new()?;
//!
//! let image = services.validate_photo(Path::new("me.jpg"))?;
//! let request_id = services.start_try_on("prod_1".to_string(), image);
//!
//! // Later, in the event loop
//! for event in services.drain_events() {
//!     // Settle the matching request
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use libstylecast::service::events::Event;
use libstylecast::service::tryon::{ImageUpload, TryOnRequest};
use libstylecast::service::StylecastService;
use libstylecast::{CartItem, Catalog, Config};
use tokio::sync::broadcast::error::RecvError;

use crate::error::{Result, TuiError};

/// Service handle for TUI operations
pub struct ServiceHandle {
    service: Arc<StylecastService>,
    runtime: tokio::runtime::Runtime,
    events: Receiver<Event>,
}

impl ServiceHandle {
    /// Create a handle from the configuration at the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the tokio
    /// runtime cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_service(StylecastService::load()?)
    }

    /// Create a handle around an existing service
    pub fn with_service(service: StylecastService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| TuiError::Application(format!("Failed to start async runtime: {}", e)))?;

        let service = Arc::new(service);

        // Subscribe before any work is spawned so no event is missed
        let mut event_rx = service.subscribe();
        let (tx, rx) = unbounded();
        runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            // Receiver dropped, stop forwarding
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(Self {
            service,
            runtime,
            events: rx,
        })
    }

    pub fn config(&self) -> &Config {
        self.service.config()
    }

    pub fn catalog(&self) -> Arc<dyn Catalog> {
        self.service.catalog()
    }

    /// Check a user photo against the try-on limits
    pub fn validate_photo(&self, path: &Path) -> libstylecast::Result<ImageUpload> {
        self.service.try_on().validate(path)
    }

    /// Start a try-on in the background, returning its request id
    ///
    /// The outcome arrives as `TryOnCompleted` or `TryOnFailed`.
    pub fn start_try_on(&self, product_id: String, image: ImageUpload) -> String {
        let request = TryOnRequest::new(product_id, image);
        let request_id = request.request_id.clone();

        let service = Arc::clone(&self.service);
        self.runtime.spawn(async move {
            // Failures are reported on the event bus
            let _ = service.try_on().try_on(request).await;
        });

        request_id
    }

    /// Start a checkout in the background, returning its request id
    ///
    /// The outcome arrives as `CheckoutCompleted` or `CheckoutFailed`.
    pub fn start_checkout(&self, items: Vec<CartItem>) -> String {
        // Generate the id before spawning so it can be returned immediately
        let request_id = uuid::Uuid::new_v4().to_string();

        let service = Arc::clone(&self.service);
        let id = request_id.clone();
        self.runtime.spawn(async move {
            let _ = service.checkout().place_order_with_id(id, &items).await;
        });

        request_id
    }

    /// Every service event received since the last call
    pub fn drain_events(&self) -> Vec<Event> {
        self.events.try_iter().collect()
    }

    /// Block until a service event arrives or the timeout passes
    pub fn wait_event(&self, timeout: std::time::Duration) -> Option<Event> {
        self.events.recv_timeout(timeout).ok()
    }
}
