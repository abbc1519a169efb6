//! Event handling infrastructure
//!
//! Merges terminal events (keyboard, resize, tick) and service events from
//! the library's event bus into one action stream.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use libstylecast::service::events::Event as ServiceEvent;

use crate::app::Action;

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick for animations
    Tick,

    /// Progress from the service layer
    Service(ServiceEvent),
}

impl TuiEvent {
    /// Convert into an action; `None` for events the UI has nothing to do with
    pub fn into_action(self) -> Option<Action> {
        match self {
            TuiEvent::Key(key) => Some(Action::Key(key)),
            TuiEvent::Resize(w, h) => Some(Action::Resize(w, h)),
            TuiEvent::Tick => Some(Action::Tick),
            TuiEvent::Service(event) => service_action(event),
        }
    }
}

/// Map a service event to the action that settles the matching request
///
/// Start events are dropped; the event loop records the request id itself
/// when it hands the work off.
pub fn service_action(event: ServiceEvent) -> Option<Action> {
    match event {
        ServiceEvent::TryOnStarted { .. } | ServiceEvent::CheckoutStarted { .. } => None,
        ServiceEvent::TryOnCompleted {
            request_id,
            result_image_url,
            ..
        } => Some(Action::TryOnSucceeded {
            request_id,
            result_image_url,
        }),
        ServiceEvent::TryOnFailed {
            request_id, error, ..
        } => Some(Action::TryOnFailed { request_id, error }),
        ServiceEvent::CheckoutCompleted {
            request_id,
            order_id,
        } => Some(Action::CheckoutSucceeded {
            request_id,
            order_id,
        }),
        ServiceEvent::CheckoutFailed { request_id, error } => {
            Some(Action::CheckoutFailed { request_id, error })
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event, blocking up to the tick rate
    ///
    /// A timeout yields `TuiEvent::Tick`.
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(TuiEvent::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
