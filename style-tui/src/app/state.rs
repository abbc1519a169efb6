//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).

use std::sync::Arc;

use libstylecast::service::cart::CartSummary;
use libstylecast::service::recommendations::recommend;
use libstylecast::store::AppState as ShopState;
use libstylecast::{CartItem, Catalog, Config, Product, StaticCatalog, Store};

use super::actions::Screen;

/// Root application state
///
/// The shopping store is the source of truth for everything a screen shows;
/// the rest is per-screen view state.
#[derive(Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Error overlay state
    pub error: Option<String>,

    pub status: StatusBarState,

    /// Shopping state container
    pub store: Store,

    /// Outfit deck and product table
    pub catalog: Arc<dyn Catalog>,

    /// Sales tax shown on the cart screen, in basis points
    pub tax_rate_bps: u32,

    pub discovery: DiscoveryView,
    pub recommendations: RecommendationsView,
    pub try_on: TryOnView,
    pub cart: CartView,

    /// Work the event loop must hand to the service layer
    pub pending: Option<Request>,

    /// Ticks seen so far, drives the processing spinner
    pub tick: u64,

    pub config: UiConfig,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// Discovery screen state
#[derive(Debug, Clone, Default)]
pub struct DiscoveryView {
    /// Set once the last card is swiped; the next visit starts over
    pub finished: bool,
}

/// Recommendations screen state
#[derive(Debug, Clone, Default)]
pub struct RecommendationsView {
    /// Highlighted row in the recommendation list
    pub selected: usize,
}

/// Steps of the try-on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TryOnStep {
    #[default]
    Upload,
    Processing,
    Result,
}

/// Try-on screen state
#[derive(Debug, Clone, Default)]
pub struct TryOnView {
    pub step: TryOnStep,

    /// Photo path typed by the user
    pub photo_path: String,

    /// In-flight try-on request, if any
    pub request_id: Option<String>,

    pub result_image_url: Option<String>,
}

/// Cart screen state
#[derive(Debug, Clone, Default)]
pub struct CartView {
    /// Highlighted cart line
    pub selected: usize,

    /// In-flight checkout request, if any
    pub checkout_request: Option<String>,

    /// Lines submitted with the in-flight checkout
    pub checkout_items: Vec<CartItem>,
}

/// Side effect requested by a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    TryOn {
        product_id: String,
        photo_path: String,
    },
    Checkout {
        items: Vec<CartItem>,
    },
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("STYLECAST_TUI_NO_COLOR").is_err();

        let unicode_enabled = colors_enabled;

        let tick_rate_ms = std::env::var("STYLECAST_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(100);

        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_catalog(Arc::new(StaticCatalog::new()), &Config::default())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("should_quit", &self.should_quit)
            .field("help_visible", &self.help_visible)
            .field("error", &self.error)
            .field("status", &self.status)
            .field("store", &self.store)
            .field("try_on", &self.try_on)
            .field("cart", &self.cart)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state with the static catalog and default config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Arc<dyn Catalog>, config: &Config) -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            error: None,
            status: StatusBarState::default(),
            store: Store::with_config(config.store),
            catalog,
            tax_rate_bps: config.checkout.tax_rate_bps,
            discovery: DiscoveryView::default(),
            recommendations: RecommendationsView::default(),
            try_on: TryOnView::default(),
            cart: CartView::default(),
            pending: None,
            tick: 0,
            config: UiConfig::default(),
        }
    }

    /// Shopping state snapshot
    pub fn shop(&self) -> &ShopState {
        self.store.state()
    }

    pub fn screen(&self) -> Screen {
        self.shop().current_screen
    }

    /// Is a try-on or checkout in flight?
    pub fn is_busy(&self) -> bool {
        self.try_on.request_id.is_some() || self.cart.checkout_request.is_some()
    }

    /// Should printable keys go to the photo path field?
    pub fn accepts_text(&self) -> bool {
        self.screen() == Screen::TryOn
            && self.try_on.step == TryOnStep::Upload
            && self.try_on.request_id.is_none()
            && !self.help_visible
            && self.error.is_none()
    }

    /// Catalog products ranked against the liked outfits; none before the first like
    pub fn recommended_products(&self) -> Vec<Product> {
        let liked = &self.shop().liked_outfits;
        if liked.is_empty() {
            return Vec::new();
        }
        recommend(self.catalog.as_ref(), liked)
    }

    /// Product under the recommendations cursor
    pub fn selected_recommendation(&self) -> Option<Product> {
        self.recommended_products()
            .into_iter()
            .nth(self.recommendations.selected)
    }

    /// Product chosen for try-on
    pub fn try_on_product(&self) -> Option<Product> {
        self.shop()
            .selected_product_for_try_on
            .as_deref()
            .map(|id| self.catalog.product_or_placeholder(id))
    }

    pub fn cart_summary(&self) -> CartSummary {
        CartSummary::compute(&self.shop().cart_items, self.catalog.as_ref(), self.tax_rate_bps)
    }

    /// Take the pending side effect, leaving none
    pub fn take_request(&mut self) -> Option<Request> {
        self.pending.take()
    }
}
