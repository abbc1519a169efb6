use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{fg, symbol};
use crate::app::AppState;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let summary = state.cart_summary();

    if summary.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("Your cart is empty"),
            Line::from(Span::styled(
                "Add items from your recommendations to get started",
                fg(state, Color::Gray),
            )),
        ])
        .block(Block::default().title(" Cart ").borders(Borders::ALL))
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(area);

    let items: Vec<ListItem> = summary
        .lines
        .iter()
        .map(|line| {
            let mut spans = vec![
                Span::raw(format!("{:<30}", line.product.title)),
                Span::raw(format!(" x{:<3}", line.item.quantity)),
                Span::styled(
                    format!("{:>10}", line.line_total.to_string()),
                    fg(state, Color::Green),
                ),
            ];
            if let Some(ref variant) = line.item.variant_id {
                spans.push(Span::styled(
                    format!("  ({})", variant),
                    fg(state, Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Cart ({} items) ", summary.total_items);
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(fg(state, Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol(symbol(state, "▶ ", "> "));

    let mut list_state = ListState::default().with_selected(Some(state.cart.selected));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let rate = format!(
        "Tax ({}.{:02}%)",
        state.tax_rate_bps / 100,
        state.tax_rate_bps % 100
    );
    let totals = vec![
        total_line("Subtotal", summary.subtotal.to_string()),
        total_line(&rate, summary.tax.to_string()),
        Line::from(vec![
            Span::styled(
                format!("{:<20}", "Total"),
                fg(state, Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>12}", summary.total.to_string()),
                fg(state, Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    let totals = Paragraph::new(totals).block(Block::default().borders(Borders::ALL));
    frame.render_widget(totals, chunks[1]);
}

fn total_line(label: &str, amount: String) -> Line<'static> {
    Line::from(format!("{:<20}{:>12}", label, amount))
}
