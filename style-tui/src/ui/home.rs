use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::fg;
use crate::app::AppState;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Discover your style",
            fg(state, Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Swipe through curated outfits, get picks that match your taste,"),
        Line::from("and see them on you with a virtual try-on."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start discovering",
            fg(state, Color::Cyan),
        )),
    ];

    let body = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(body, area);
}
