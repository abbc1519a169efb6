//! Reducer function for state transitions
//!
//! `(State, Action) -> State`
//!
//! The reducer performs no I/O. Work that needs the service layer (photo
//! validation, try-on, checkout) is left in `AppState::pending` for the
//! event loop to pick up.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libstylecast::service::cart::{clear_cart_actions, quantity_actions};
use libstylecast::store::Action as StoreAction;

use super::actions::{Action, Screen};
use super::state::{AppState, Request, StatusBarState, TryOnStep};

pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const CHECKOUT_FAILED: &str = "Checkout failed. Please try again.";
pub const TRY_ON_FAILED: &str = "Try-on failed. Please try again.";

/// Apply one action to the state
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => AppState {
            tick: state.tick.wrapping_add(1),
            ..state
        },
        Action::Resize(_, _) => state,

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Shopping state ===
        Action::Store(action) => dispatch(state, action),

        // === Try-on ===
        Action::TryOnStarted { request_id } => {
            let mut state = state;
            state.try_on.step = TryOnStep::Processing;
            state.try_on.request_id = Some(request_id);
            state.try_on.result_image_url = None;
            state
        }

        Action::TryOnSucceeded {
            request_id,
            result_image_url,
        } => {
            if !is_current(&state.try_on.request_id, &request_id) {
                return state;
            }
            let mut state = state;
            state.try_on.step = TryOnStep::Result;
            state.try_on.request_id = None;
            state.try_on.result_image_url = Some(result_image_url);
            set_status(state, "Your virtual try-on is ready")
        }

        Action::TryOnFailed { request_id, .. } => {
            if !is_current(&state.try_on.request_id, &request_id) {
                return state;
            }
            let mut state = state;
            state.try_on.step = TryOnStep::Upload;
            state.try_on.request_id = None;
            state.error = Some(TRY_ON_FAILED.to_string());
            state
        }

        // === Checkout ===
        Action::CheckoutStarted { request_id, items } => {
            let mut state = state;
            state.cart.checkout_request = Some(request_id);
            state.cart.checkout_items = items;
            dispatch(state, StoreAction::SetLoading { is_loading: true })
        }

        Action::CheckoutSucceeded { request_id, .. } => {
            if !is_current(&state.cart.checkout_request, &request_id) {
                return state;
            }
            let mut state = state;
            state.cart.checkout_request = None;
            state.cart.selected = 0;

            // Only the submitted lines were ordered
            let ordered = std::mem::take(&mut state.cart.checkout_items);
            let clear = clear_cart_actions(&ordered);
            let state = dispatch_all(state, clear);
            let state = dispatch_all(
                state,
                [
                    StoreAction::SetLoading { is_loading: false },
                    StoreAction::navigate(Screen::Home),
                ],
            );
            set_status(state, ORDER_PLACED)
        }

        Action::CheckoutFailed { request_id, .. } => {
            if !is_current(&state.cart.checkout_request, &request_id) {
                return state;
            }
            let mut state = state;
            state.cart.checkout_request = None;
            state.cart.checkout_items.clear();
            state.error = Some(CHECKOUT_FAILED.to_string());
            dispatch(state, StoreAction::SetLoading { is_loading: false })
        }

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState { error: None, ..state },

        // === Status Bar ===
        Action::SetStatus(message) => set_status(state, message),

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

fn is_current(in_flight: &Option<String>, request_id: &str) -> bool {
    in_flight.as_deref() == Some(request_id)
}

fn set_status(state: AppState, message: impl Into<String>) -> AppState {
    AppState {
        status: StatusBarState {
            message: Some(message.into()),
        },
        ..state
    }
}

/// Apply a store action, surfacing a rejection in the error overlay
fn dispatch(state: AppState, action: StoreAction) -> AppState {
    let mut state = state;
    if let Err(e) = state.store.dispatch(action) {
        state.error = Some(e.to_string());
    }
    state
}

fn dispatch_all<I>(state: AppState, actions: I) -> AppState
where
    I: IntoIterator<Item = StoreAction>,
{
    actions.into_iter().fold(state, dispatch)
}

/// Handle keyboard input
///
/// Maps keys to high-level actions. This is where keybindings are defined.
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    if key.kind != KeyEventKind::Press {
        return state;
    }

    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::Char('q'), KeyModifiers::NONE) if !state.is_busy() && !state.accepts_text() => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.error.is_some() => {
            return reduce(state, Action::DismissError);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        _ => {}
    }

    // Overlays swallow everything else
    if state.help_visible || state.error.is_some() {
        return state;
    }

    match state.screen() {
        Screen::Home => handle_home_key(state, key),
        Screen::Discovery => handle_discovery_key(state, key),
        Screen::Recommendations => handle_recommendations_key(state, key),
        Screen::TryOn => handle_try_on_key(state, key),
        Screen::Cart => handle_cart_key(state, key),
    }
}

fn handle_home_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => enter_discovery(state),
        KeyCode::Char('c') => dispatch(state, StoreAction::navigate(Screen::Cart)),
        _ => state,
    }
}

/// Open the discovery screen, loading the deck on first use
fn enter_discovery(state: AppState) -> AppState {
    let mut state = state;
    if state.shop().outfit_photos.is_empty() {
        let photos = state.catalog.outfit_photos();
        state = dispatch(state, StoreAction::SetOutfitPhotos { photos });
    }
    if state.discovery.finished && !state.shop().outfit_photos.is_empty() {
        state.discovery.finished = false;
        // Wraps back to the first card
        state = dispatch(state, StoreAction::NextOutfit);
    }
    dispatch(state, StoreAction::navigate(Screen::Discovery))
}

fn handle_discovery_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('y') => {
            let Some(outfit) = state.shop().current_outfit().cloned() else {
                return state;
            };
            let style = outfit.style.clone();
            let state = dispatch(state, StoreAction::LikeOutfit { outfit });
            let state = set_status(state, format!("Liked {}", style));
            advance_deck(state)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('x') | KeyCode::Char('n') => {
            if state.shop().current_outfit().is_none() {
                return state;
            }
            advance_deck(state)
        }
        // Coming back resumes at the same card
        KeyCode::Char('s') => show_recommendations(state),
        KeyCode::Esc => dispatch(state, StoreAction::navigate(Screen::Home)),
        _ => state,
    }
}

fn show_recommendations(state: AppState) -> AppState {
    let mut state = state;
    state.recommendations.selected = 0;
    dispatch(state, StoreAction::navigate(Screen::Recommendations))
}

/// Move past the current card; after the last one, show recommendations
fn advance_deck(state: AppState) -> AppState {
    if state.shop().is_last_outfit() {
        let mut state = state;
        state.discovery.finished = true;
        show_recommendations(state)
    } else {
        dispatch(state, StoreAction::NextOutfit)
    }
}

fn handle_recommendations_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let mut state = state;
            state.recommendations.selected = state.recommendations.selected.saturating_sub(1);
            state
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let mut state = state;
            let last = state.recommended_products().len().saturating_sub(1);
            state.recommendations.selected = (state.recommendations.selected + 1).min(last);
            state
        }
        KeyCode::Char('t') | KeyCode::Enter => match state.selected_recommendation() {
            Some(product) => start_try_on(state, product.id),
            None => state,
        },
        KeyCode::Char('a') => match state.selected_recommendation() {
            Some(product) => add_to_cart(state, product.id, &product.title),
            None => state,
        },
        KeyCode::Char('c') => dispatch(state, StoreAction::navigate(Screen::Cart)),
        KeyCode::Esc => enter_discovery(state),
        _ => state,
    }
}

fn start_try_on(state: AppState, product_id: String) -> AppState {
    // One try-on at a time; an in-flight one keeps its product
    if state.try_on.request_id.is_some() {
        return dispatch(state, StoreAction::navigate(Screen::TryOn));
    }
    let mut state = state;
    state.try_on.step = TryOnStep::Upload;
    state.try_on.result_image_url = None;
    dispatch(state, StoreAction::start_try_on(product_id))
}

fn add_to_cart(state: AppState, product_id: String, title: &str) -> AppState {
    let state = dispatch(state, StoreAction::add_to_cart(product_id));
    set_status(state, format!("Added {} to cart", title))
}

fn handle_try_on_key(state: AppState, key: KeyEvent) -> AppState {
    if state.accepts_text() {
        return handle_photo_path_key(state, key);
    }

    match (state.try_on.step, key.code) {
        (TryOnStep::Result, KeyCode::Char('a')) => match state.try_on_product() {
            Some(product) => add_to_cart(state, product.id, &product.title),
            None => state,
        },
        (TryOnStep::Result, KeyCode::Char('r')) => {
            let mut state = state;
            state.try_on.step = TryOnStep::Upload;
            state.try_on.result_image_url = None;
            state
        }
        (TryOnStep::Result, KeyCode::Char('c')) => {
            dispatch(state, StoreAction::navigate(Screen::Cart))
        }
        (_, KeyCode::Esc) => dispatch(state, StoreAction::navigate(Screen::Recommendations)),
        _ => state,
    }
}

fn handle_photo_path_key(state: AppState, key: KeyEvent) -> AppState {
    let mut state = state;
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            state.try_on.photo_path.push(c);
            state
        }
        KeyCode::Backspace => {
            state.try_on.photo_path.pop();
            state
        }
        KeyCode::Enter => submit_photo(state),
        KeyCode::Esc => dispatch(state, StoreAction::navigate(Screen::Recommendations)),
        _ => state,
    }
}

fn submit_photo(state: AppState) -> AppState {
    let Some(product_id) = state.shop().selected_product_for_try_on.clone() else {
        return reduce(
            state,
            Action::ShowError("Choose a product to try on first".to_string()),
        );
    };

    let photo_path = state.try_on.photo_path.trim().to_string();
    if photo_path.is_empty() {
        return reduce(
            state,
            Action::ShowError("Enter the path to a photo first".to_string()),
        );
    }

    AppState {
        pending: Some(Request::TryOn {
            product_id,
            photo_path,
        }),
        ..state
    }
}

fn handle_cart_key(state: AppState, key: KeyEvent) -> AppState {
    let checking_out = state.cart.checkout_request.is_some();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let mut state = state;
            state.cart.selected = state.cart.selected.saturating_sub(1);
            state
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let mut state = state;
            let last = state.shop().cart_items.len().saturating_sub(1);
            state.cart.selected = (state.cart.selected + 1).min(last);
            state
        }
        KeyCode::Char('+') | KeyCode::Char('=') if !checking_out => {
            change_quantity(state, |quantity| quantity.saturating_add(1))
        }
        KeyCode::Char('-') if !checking_out => {
            change_quantity(state, |quantity| quantity.saturating_sub(1))
        }
        KeyCode::Char('d') | KeyCode::Delete if !checking_out => {
            change_quantity(state, |_| 0)
        }
        KeyCode::Enter if !checking_out => {
            if state.shop().cart_items.is_empty() {
                return set_status(state, "Your cart is empty");
            }
            let items = state.shop().cart_items.clone();
            AppState {
                pending: Some(Request::Checkout { items }),
                ..state
            }
        }
        KeyCode::Esc => dispatch(state, StoreAction::navigate(Screen::Recommendations)),
        _ => state,
    }
}

/// Set the selected line's quantity, keeping the cursor on it
fn change_quantity(state: AppState, new_quantity: impl Fn(u32) -> u32) -> AppState {
    let line = state.cart.selected;
    let Some(item) = state.shop().cart_items.get(line).cloned() else {
        return state;
    };
    let quantity = new_quantity(item.quantity);
    let actions = quantity_actions(&state.shop().cart_items, line, quantity);

    let mut state = dispatch_all(state, actions);

    let items = &state.shop().cart_items;
    let selected = items
        .iter()
        .position(|i| i.product_id == item.product_id && i.variant_id == item.variant_id)
        .unwrap_or_else(|| state.cart.selected.min(items.len().saturating_sub(1)));
    state.cart.selected = selected;
    state
}
