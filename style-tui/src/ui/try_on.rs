//! Virtual try-on: photo entry, progress, result

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{fg, symbol};
use crate::app::{AppState, TryOnStep};

const SPINNER_UNICODE: [&str; 4] = ["◐", "◓", "◑", "◒"];
const SPINNER_ASCII: [&str; 4] = ["|", "/", "-", "\\"];

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let product_lines = match state.try_on_product() {
        Some(product) => vec![
            Line::from(Span::styled(
                product.title,
                fg(state, Color::Magenta).add_modifier(Modifier::BOLD),
            )),
            Line::from(product.price.to_string()),
        ],
        None => vec![Line::from("No product selected")],
    };
    let product = Paragraph::new(product_lines)
        .block(Block::default().title(" Trying on ").borders(Borders::ALL));
    frame.render_widget(product, chunks[0]);

    match state.try_on.step {
        TryOnStep::Upload => render_upload(frame, chunks[1], state),
        TryOnStep::Processing => render_processing(frame, chunks[1], state),
        TryOnStep::Result => render_result(frame, chunks[1], state),
    }
}

fn render_upload(frame: &mut Frame, area: Rect, state: &AppState) {
    let cursor = if state.tick % 10 < 5 { "_" } else { " " };
    let input = if state.try_on.photo_path.is_empty() {
        Line::from(vec![
            Span::raw(cursor),
            Span::styled(" /path/to/your/photo.jpg", fg(state, Color::DarkGray)),
        ])
    } else {
        Line::from(format!("{}{}", state.try_on.photo_path, cursor))
    };

    let lines = vec![
        Line::from("Upload a full-body photo in good lighting (JPEG, PNG or WebP, up to 5 MB)."),
        Line::from(""),
        input,
    ];

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Your photo ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn render_processing(frame: &mut Frame, area: Rect, state: &AppState) {
    let frames = if state.config.unicode_enabled {
        SPINNER_UNICODE
    } else {
        SPINNER_ASCII
    };
    let spinner = frames[(state.tick % frames.len() as u64) as usize];

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Creating your virtual try-on...", spinner),
            fg(state, Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This usually takes a few seconds",
            fg(state, Color::Gray),
        )),
    ];

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(body, area);
}

fn render_result(frame: &mut Frame, area: Rect, state: &AppState) {
    let result = state.try_on.result_image_url.as_deref().unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            format!("{} Your try-on is ready", symbol(state, "✓", "OK")),
            fg(state, Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Original: "),
            Span::styled(state.try_on.photo_path.as_str(), fg(state, Color::Gray)),
        ]),
        Line::from(vec![
            Span::raw("Result:   "),
            Span::styled(result, fg(state, Color::Cyan)),
        ]),
    ];

    let body = Paragraph::new(lines)
        .block(Block::default().title(" Result ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}
