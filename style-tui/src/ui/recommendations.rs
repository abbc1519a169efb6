use libstylecast::service::recommendations::recommendation_reason;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::{fg, symbol};
use crate::app::AppState;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let reason = Paragraph::new(Line::from(Span::styled(
        recommendation_reason(&state.shop().liked_outfits),
        fg(state, Color::Magenta).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title(" Curated for you ").borders(Borders::ALL));
    frame.render_widget(reason, chunks[0]);

    let products = state.recommended_products();
    if products.is_empty() {
        render_empty(frame, chunks[1], state);
        return;
    }

    let (left, right) = {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        (halves[0], halves[1])
    };

    let items: Vec<ListItem> = products
        .iter()
        .map(|product| {
            let in_cart = state.shop().cart_quantity(&product.id);
            let mut spans = vec![
                Span::raw(format!("{:<30}", product.title)),
                Span::styled(format!("{:>9}", product.price.to_string()), fg(state, Color::Green)),
            ];
            if in_cart > 0 {
                spans.push(Span::styled(
                    format!("  {} {}", symbol(state, "🛒", "cart"), in_cart),
                    fg(state, Color::Yellow),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Products ").borders(Borders::ALL))
        .highlight_style(fg(state, Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol(symbol(state, "▶ ", "> "));

    let mut list_state = ListState::default().with_selected(Some(state.recommendations.selected));
    frame.render_stateful_widget(list, left, &mut list_state);

    let detail = match products.get(state.recommendations.selected) {
        Some(product) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    product.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(product.price.to_string()),
                Line::from(""),
            ];
            if let Some(ref description) = product.description {
                lines.push(Line::from(description.as_str()));
            }
            if let Some(ref style) = product.style {
                lines.push(Line::from(Span::styled(
                    format!("Style: {}", style),
                    fg(state, Color::Gray),
                )));
            }
            lines
        }
        None => vec![Line::from("No products available")],
    };

    let detail = Paragraph::new(detail)
        .block(Block::default().title(" Details ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, right);
}

fn render_empty(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Start Swiping to Get Recommendations", symbol(state, "👗", "*")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Like some outfits to receive personalized product suggestions"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to start discovering",
            fg(state, Color::Magenta),
        )),
    ];

    let empty = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Products ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(empty, area);
}
