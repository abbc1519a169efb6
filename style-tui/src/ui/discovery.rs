//! Outfit card for the swipe deck

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{fg, symbol};
use crate::app::AppState;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let shop = state.shop();

    let Some(outfit) = shop.current_outfit() else {
        let empty = Paragraph::new("No outfits to show right now.")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let tags: Vec<Span> = outfit
        .tags
        .iter()
        .flat_map(|tag| {
            [
                Span::styled(format!("#{}", tag), fg(state, Color::Cyan)),
                Span::raw("  "),
            ]
        })
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            outfit.style.as_str(),
            fg(state, Color::Magenta).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(ref season) = outfit.season {
        lines.push(Line::from(Span::styled(
            format!("{} collection", season),
            fg(state, Color::Gray),
        )));
    }
    lines.extend([
        Line::from(""),
        Line::from(tags),
        Line::from(""),
        Line::from(Span::styled(outfit.image_url.as_str(), fg(state, Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} Pass", symbol(state, "✗", "x")),
                fg(state, Color::Red),
            ),
            Span::raw("        "),
            Span::styled(
                format!("Like {}", symbol(state, "♥", "<3")),
                fg(state, Color::Green),
            ),
        ]),
    ]);

    let title = format!(
        " Outfit {} of {} ",
        shop.current_outfit_index + 1,
        shop.outfit_photos.len()
    );

    let card = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}
