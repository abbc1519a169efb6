//! Test application initialization
//!
//! Verifies that the app starts on the home screen with an empty session and
//! picks up UI settings from the environment.

use serial_test::serial;
use style_tui::app::{AppState, Screen, TryOnStep};

#[test]
fn test_app_initializes_to_home_screen() {
    let state = AppState::new();

    assert_eq!(state.screen(), Screen::Home);
    assert!(!state.should_quit);
}

#[test]
fn test_no_overlays_on_boot() {
    let state = AppState::new();

    assert!(!state.help_visible);
    assert!(state.error.is_none());
    assert!(state.status.message.is_none());
}

#[test]
fn test_shopping_state_starts_empty() {
    let state = AppState::new();
    let shop = state.shop();

    assert!(shop.liked_outfits.is_empty());
    assert!(shop.cart_items.is_empty());
    assert!(shop.outfit_photos.is_empty());
    assert!(shop.selected_product_for_try_on.is_none());
    assert!(!shop.is_loading);
}

#[test]
fn test_nothing_in_flight_on_boot() {
    let state = AppState::new();

    assert!(!state.is_busy());
    assert!(state.pending.is_none());
    assert_eq!(state.try_on.step, TryOnStep::Upload);
}

#[test]
fn test_default_tax_rate() {
    assert_eq!(AppState::new().tax_rate_bps, 800);
}

#[test]
#[serial]
fn test_colors_disabled_with_no_color_env() {
    std::env::set_var("NO_COLOR", "1");
    let state = AppState::new();
    std::env::remove_var("NO_COLOR");

    assert!(!state.config.colors_enabled);
    assert!(!state.config.unicode_enabled);
}

#[test]
#[serial]
fn test_colors_disabled_with_app_env() {
    std::env::remove_var("NO_COLOR");
    std::env::set_var("STYLECAST_TUI_NO_COLOR", "1");
    let state = AppState::new();
    std::env::remove_var("STYLECAST_TUI_NO_COLOR");

    assert!(!state.config.colors_enabled);
}

#[test]
#[serial]
fn test_custom_tick_rate() {
    std::env::set_var("STYLECAST_TUI_TICK_MS", "250");
    let state = AppState::new();
    std::env::remove_var("STYLECAST_TUI_TICK_MS");

    assert_eq!(state.config.tick_rate_ms, 250);
}

#[test]
#[serial]
fn test_invalid_tick_rate_falls_back() {
    std::env::set_var("STYLECAST_TUI_TICK_MS", "soon");
    let state = AppState::new();
    std::env::remove_var("STYLECAST_TUI_TICK_MS");

    assert_eq!(state.config.tick_rate_ms, 100);
}
