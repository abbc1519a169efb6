//! Event system for simulated operation progress
//!
//! The try-on and checkout services emit events on an in-process broadcast
//! bus. Any number of subscribers (the TUI, log sinks, tests) may listen;
//! with no subscribers, events are dropped without blocking the emitter.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing progress events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus buffering `capacity` events per subscriber
    ///
    /// ```
    /// use libstylecast::service::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.subscriber_count(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all current subscribers
    pub fn emit(&self, event: Event) {
        // No receivers is not an error
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted by services during simulated operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TryOnStarted {
        request_id: String,
        product_id: String,
    },

    TryOnCompleted {
        request_id: String,
        product_id: String,
        result_image_url: String,
    },

    TryOnFailed {
        request_id: String,
        product_id: String,
        error: String,
    },

    CheckoutStarted {
        request_id: String,
        /// Number of cart lines submitted
        line_count: usize,
    },

    CheckoutCompleted {
        request_id: String,
        order_id: String,
    },

    CheckoutFailed {
        request_id: String,
        error: String,
    },
}

impl Event {
    /// Request this event belongs to
    pub fn request_id(&self) -> &str {
        match self {
            Event::TryOnStarted { request_id, .. }
            | Event::TryOnCompleted { request_id, .. }
            | Event::TryOnFailed { request_id, .. }
            | Event::CheckoutStarted { request_id, .. }
            | Event::CheckoutCompleted { request_id, .. }
            | Event::CheckoutFailed { request_id, .. } => request_id,
        }
    }

    /// Whether this event ends its request
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::TryOnCompleted { .. }
                | Event::TryOnFailed { .. }
                | Event::CheckoutCompleted { .. }
                | Event::CheckoutFailed { .. }
        )
    }
}
