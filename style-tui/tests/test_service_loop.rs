//! Drive the reducer against the real service layer
//!
//! Mirrors the event loop: take the pending request, start it on the
//! service handle, then feed service events back until the request settles.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libstylecast::service::StylecastService;
use libstylecast::Config;
use style_tui::app::event::TuiEvent;
use style_tui::app::reducer::ORDER_PLACED;
use style_tui::app::{reduce, Action, AppState, Request, Screen, TryOnStep};
use style_tui::services::ServiceHandle;

fn key(code: KeyCode) -> Action {
    Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn handle() -> ServiceHandle {
    let mut config = Config::default();
    config.try_on.delay_ms = 0;
    config.checkout.delay_ms = 0;
    ServiceHandle::with_service(StylecastService::new(config)).unwrap()
}

fn perform(services: &ServiceHandle, request: Request) -> Action {
    match request {
        Request::TryOn {
            product_id,
            photo_path,
        } => match services.validate_photo(Path::new(&photo_path)) {
            Ok(image) => Action::TryOnStarted {
                request_id: services.start_try_on(product_id, image),
            },
            Err(e) => Action::ShowError(e.to_string()),
        },
        Request::Checkout { items } => Action::CheckoutStarted {
            request_id: services.start_checkout(items.clone()),
            items,
        },
    }
}

/// Run one pending request to completion
fn settle(services: &ServiceHandle, mut state: AppState) -> AppState {
    let request = state.take_request().expect("a pending request");
    state = reduce(state, perform(services, request));

    while state.is_busy() {
        let event = services
            .wait_event(Duration::from_secs(5))
            .expect("service event before timeout");
        if let Some(action) = TuiEvent::Service(event).into_action() {
            state = reduce(state, action);
        }
    }
    state
}

fn state_for(services: &ServiceHandle) -> AppState {
    AppState::with_catalog(services.catalog(), services.config())
}

#[test]
fn test_try_on_then_checkout() {
    let services = handle();
    let mut photo = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    photo.write_all(b"png bytes").unwrap();

    let mut state = state_for(&services);
    for code in [KeyCode::Enter, KeyCode::Right, KeyCode::Right] {
        state = reduce(state, key(code));
    }
    state = reduce(
        state,
        Action::Store(libstylecast::Action::navigate(Screen::Recommendations)),
    );
    state = reduce(state, key(KeyCode::Char('t')));
    for c in photo.path().to_string_lossy().chars() {
        state = reduce(state, key(KeyCode::Char(c)));
    }
    state = reduce(state, key(KeyCode::Enter));

    let state = settle(&services, state);
    assert_eq!(state.try_on.step, TryOnStep::Result);
    assert!(state.try_on.result_image_url.is_some());
    assert!(state.error.is_none());

    let mut state = state;
    for code in [KeyCode::Char('a'), KeyCode::Char('c'), KeyCode::Enter] {
        state = reduce(state, key(code));
    }
    let state = settle(&services, state);

    assert_eq!(state.screen(), Screen::Home);
    assert!(state.shop().cart_items.is_empty());
    assert_eq!(state.status.message.as_deref(), Some(ORDER_PLACED));
}

#[test]
fn test_unreadable_photo_shows_error_without_starting() {
    let services = handle();

    let mut state = state_for(&services);
    state = reduce(
        state,
        Action::Store(libstylecast::Action::start_try_on("prod_1")),
    );
    for c in "/nonexistent/me.png".chars() {
        state = reduce(state, key(KeyCode::Char(c)));
    }
    state = reduce(state, key(KeyCode::Enter));

    let state = settle(&services, state);

    assert!(state.error.is_some());
    assert_eq!(state.try_on.step, TryOnStep::Upload);
    assert!(services.drain_events().is_empty());
}

#[test]
fn test_wrong_file_type_is_rejected() {
    let services = handle();
    let mut notes = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    notes.write_all(b"not an image").unwrap();

    let mut state = state_for(&services);
    state = reduce(
        state,
        Action::Store(libstylecast::Action::start_try_on("prod_1")),
    );
    for c in notes.path().to_string_lossy().chars() {
        state = reduce(state, key(KeyCode::Char(c)));
    }
    state = reduce(state, key(KeyCode::Enter));

    let state = settle(&services, state);

    let error = state.error.unwrap_or_default();
    assert!(error.contains("Unsupported image type"), "got: {}", error);
}
