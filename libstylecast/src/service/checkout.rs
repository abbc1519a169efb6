//! Simulated checkout

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use super::events::{Event, EventBus};
use crate::config::CheckoutConfig;
use crate::error::{Result, ServiceError};
use crate::types::CartItem;
use crate::StylecastError;

/// A placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    pub line_count: usize,
    pub total_items: u32,
}

/// Payment and order backend
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Place an order for the given cart lines
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty cart, `ServiceError::Checkout` if the
    /// order is declined.
    async fn place_order(&self, items: &[CartItem]) -> Result<OrderConfirmation>;
}

/// Timer-backed stand-in for a payment backend
#[derive(Debug, Clone)]
pub struct SimulatedCheckout {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedCheckout {
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            failure_rate: config.failure_rate,
        }
    }
}

#[async_trait]
impl CheckoutProvider for SimulatedCheckout {
    async fn place_order(&self, items: &[CartItem]) -> Result<OrderConfirmation> {
        if items.is_empty() {
            return Err(StylecastError::InvalidInput("Cart is empty".to_string()));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if super::roll_failure(self.failure_rate) {
            return Err(ServiceError::Checkout("Payment declined".to_string()).into());
        }

        Ok(OrderConfirmation {
            order_id: format!("order_{}", uuid::Uuid::new_v4()),
            line_count: items.len(),
            total_items: items.iter().map(|i| i.quantity).sum(),
        })
    }
}

/// Checkout service
#[derive(Clone)]
pub struct CheckoutService {
    provider: Arc<dyn CheckoutProvider>,
    event_bus: EventBus,
}

impl CheckoutService {
    pub fn new(provider: Arc<dyn CheckoutProvider>, event_bus: EventBus) -> Self {
        Self {
            provider,
            event_bus,
        }
    }

    /// Place an order, reporting progress on the event bus
    pub async fn place_order(&self, items: &[CartItem]) -> Result<OrderConfirmation> {
        let request_id = uuid::Uuid::new_v4().to_string();
        self.place_order_with_id(request_id, items).await
    }

    /// Place an order under a caller-chosen request id
    ///
    /// Front-ends that track in-flight work pick the id up front so they can
    /// match the outcome to the request.
    pub async fn place_order_with_id(
        &self,
        request_id: String,
        items: &[CartItem],
    ) -> Result<OrderConfirmation> {
        self.event_bus.emit(Event::CheckoutStarted {
            request_id: request_id.clone(),
            line_count: items.len(),
        });

        match self.provider.place_order(items).await {
            Ok(confirmation) => {
                info!(
                    request_id = %request_id,
                    order_id = %confirmation.order_id,
                    total_items = confirmation.total_items,
                    "Order placed"
                );
                self.event_bus.emit(Event::CheckoutCompleted {
                    request_id,
                    order_id: confirmation.order_id.clone(),
                });
                Ok(confirmation)
            }
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "Checkout failed");
                self.event_bus.emit(Event::CheckoutFailed {
                    request_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(config: CheckoutConfig) -> (CheckoutService, EventBus) {
        let bus = EventBus::new(10);
        let service = CheckoutService::new(
            Arc::new(SimulatedCheckout::from_config(&config)),
            bus.clone(),
        );
        (service, bus)
    }

    fn instant() -> CheckoutConfig {
        CheckoutConfig {
            delay_ms: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_successful_order() {
        let (service, bus) = service(instant());
        let mut events = bus.subscribe();

        let mut jeans = CartItem::new("prod_2".to_string(), None);
        jeans.quantity = 3;
        let items = vec![CartItem::new("prod_1".to_string(), None), jeans];

        let confirmation = service
            .place_order_with_id("req-1".to_string(), &items)
            .await
            .unwrap();
        assert!(confirmation.order_id.starts_with("order_"));
        assert_eq!(confirmation.line_count, 2);
        assert_eq!(confirmation.total_items, 4);

        assert_eq!(
            events.recv().await.unwrap(),
            Event::CheckoutStarted {
                request_id: "req-1".to_string(),
                line_count: 2
            }
        );
        match events.recv().await.unwrap() {
            Event::CheckoutCompleted {
                request_id,
                order_id,
            } => {
                assert_eq!(request_id, "req-1");
                assert_eq!(order_id, confirmation.order_id);
            }
            other => panic!("Expected CheckoutCompleted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_invalid_input() {
        let (service, _bus) = service(instant());
        let err = service.place_order(&[]).await.unwrap_err();
        assert!(matches!(err, StylecastError::InvalidInput(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn test_declined_order_emits_failure() {
        let (service, bus) = service(CheckoutConfig {
            failure_rate: 1.0,
            ..instant()
        });
        let mut events = bus.subscribe();

        let items = vec![CartItem::new("prod_4".to_string(), None)];
        let err = service.place_order(&items).await.unwrap_err();
        assert!(matches!(
            err,
            StylecastError::Service(ServiceError::Checkout(_))
        ));

        let _started = events.recv().await.unwrap();
        assert!(matches!(
            events.recv().await.unwrap(),
            Event::CheckoutFailed { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_checkout_waits_configured_delay() {
        let provider = SimulatedCheckout::from_config(&CheckoutConfig::default());
        let items = vec![CartItem::new("prod_1".to_string(), None)];

        let start = tokio::time::Instant::now();
        provider.place_order(&items).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
