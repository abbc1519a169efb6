//! UI rendering
//!
//! Render functions only read state; every screen shares the header, the
//! status bar and the help/error overlays drawn here.

mod cart;
mod discovery;
mod home;
mod recommendations;
mod try_on;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Screen};

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Screen body
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], state);

    match state.screen() {
        Screen::Home => home::render(frame, chunks[1], state),
        Screen::Discovery => discovery::render(frame, chunks[1], state),
        Screen::Recommendations => recommendations::render(frame, chunks[1], state),
        Screen::TryOn => try_on::render(frame, chunks[1], state),
        Screen::Cart => cart::render(frame, chunks[1], state),
    }

    render_status_bar(frame, chunks[2], state);

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error, state);
    }
}

/// Foreground style, or the plain style when colors are disabled
pub(crate) fn fg(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

/// Pick the unicode or ASCII variant of a symbol
pub(crate) fn symbol(state: &AppState, unicode: &'static str, ascii: &'static str) -> &'static str {
    if state.config.unicode_enabled {
        unicode
    } else {
        ascii
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let shop = state.shop();
    let line = Line::from(vec![
        Span::styled(
            " Stylecast ",
            fg(state, Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("| {} ", state.screen().title())),
        Span::styled(
            format!(
                "| {} liked | {} in cart",
                shop.liked_outfits.len(),
                shop.total_items()
            ),
            fg(state, Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render status bar with the latest message and key hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = match (&state.status.message, state.is_busy()) {
        (_, true) if state.cart.checkout_request.is_some() => {
            Span::styled("Processing your order...", fg(state, Color::Yellow))
        }
        (_, true) => Span::styled("Generating your try-on...", fg(state, Color::Yellow)),
        (Some(message), false) => Span::styled(message.as_str(), fg(state, Color::Green)),
        (None, false) => Span::raw(""),
    };

    let lines = vec![
        Line::from(message),
        Line::from(Span::styled(hints(state), fg(state, Color::Gray))),
    ];

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, area);
}

fn hints(state: &AppState) -> &'static str {
    match state.screen() {
        Screen::Home => "Enter: Start discovering | c: Cart | F1: Help | q: Quit",
        Screen::Discovery => "Right/l: Like | Left/x: Pass | s: Skip | Esc: Home | q: Quit",
        Screen::Recommendations if state.shop().liked_outfits.is_empty() => {
            "Esc: Start discovering | c: Cart | q: Quit"
        }
        Screen::Recommendations => {
            "Up/Down: Select | t: Try on | a: Add to cart | c: Cart | Esc: Discover more"
        }
        Screen::TryOn if state.accepts_text() => "Type a photo path | Enter: Generate | Esc: Back",
        Screen::TryOn => "a: Add to cart | r: Try another photo | c: Cart | Esc: Back",
        Screen::Cart => "Up/Down: Select | +/-: Quantity | d: Remove | Enter: Checkout | Esc: Back",
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q        - Quit (not while busy)"),
        Line::from("  Ctrl+C   - Quit"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Esc      - Dismiss overlays / go back"),
        Line::from(""),
        Line::from("Discovery:"),
        Line::from("  Right, l - Like outfit"),
        Line::from("  Left, x  - Pass"),
        Line::from("  s        - Skip to recommendations"),
        Line::from(""),
        Line::from("Recommendations:"),
        Line::from("  t        - Virtual try-on"),
        Line::from("  a        - Add to cart"),
        Line::from(""),
        Line::from("Cart:"),
        Line::from("  + / -    - Change quantity"),
        Line::from("  d        - Remove item"),
        Line::from("  Enter    - Checkout"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Render error overlay
fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, state: &AppState) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            fg(state, Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Helper to create centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(100)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_screen_renders() {
        for screen in Screen::ALL {
            let state = crate::app::reduce(
                AppState::new(),
                crate::app::Action::Store(libstylecast::Action::navigate(screen)),
            );
            let text = draw(&state);
            assert!(text.contains(screen.title()), "{} header missing", screen);
        }
    }

    #[test]
    fn test_recommendations_without_likes_show_empty_state() {
        let state = crate::app::reduce(
            AppState::new(),
            crate::app::Action::Store(libstylecast::Action::navigate(Screen::Recommendations)),
        );
        let text = draw(&state);
        assert!(text.contains("Start Swiping to Get Recommendations"));
        assert!(text.contains("Esc: Start discovering"));
        assert!(!text.contains("Cropped Puffer Jacket"));
    }

    #[test]
    fn test_recommendations_list_products_after_a_like() {
        let mut state = AppState::new();
        for code in [KeyCode::Enter, KeyCode::Right, KeyCode::Char('s')] {
            state = crate::app::reduce(
                state,
                crate::app::Action::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            );
        }
        let text = draw(&state);
        assert!(text.contains("Because you liked Urban Casual style"));
        assert!(text.contains("Cropped Puffer Jacket"));
        assert!(!text.contains("Start Swiping"));
    }

    #[test]
    fn test_error_overlay_renders() {
        let state = crate::app::reduce(
            AppState::new(),
            crate::app::Action::ShowError("Something broke".to_string()),
        );
        assert!(draw(&state).contains("Something broke"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
    }
}
