//! style-tui - Terminal UI for Stylecast
//!
//! Swipe through outfits, review matching products, try them on virtually
//! and check out, all from the terminal.

use std::path::Path;

use anyhow::Context;
use style_tui::{
    app::{
        event::{EventHandler, TuiEvent},
        reduce, Action, AppState, Request,
    },
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};

fn main() -> anyhow::Result<()> {
    // Load config and start the runtime before touching the terminal, so
    // errors print normally
    let services = ServiceHandle::new().context("Failed to initialize Stylecast services")?;

    install_panic_hook();

    let mut terminal = setup_terminal().context("Failed to set up terminal")?;

    let result = run_app(&mut terminal, &services);

    restore_terminal(terminal).context("Failed to restore terminal")?;

    result
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle) -> anyhow::Result<()> {
    let mut state = AppState::with_catalog(services.catalog(), services.config());

    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, &state))?;

        if let Some(action) = event_handler.next()?.into_action() {
            state = reduce(state, action);
        }

        // Settle finished try-ons and checkouts
        for event in services.drain_events() {
            if let Some(action) = TuiEvent::Service(event).into_action() {
                state = reduce(state, action);
            }
        }

        // Hand requested work to the service layer
        if let Some(request) = state.take_request() {
            let action = perform(services, request);
            state = reduce(state, action);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Start the work behind a request, returning the action that records it
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
