// Quote list: one line per quote in the current (possibly filtered) view,
// cleared and rebuilt from every snapshot.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::Quote;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match &state.active_category {
        Some(category) => format!("Quotes — {} ({})", category, state.quotes.len()),
        None => format!("Quotes ({})", state.quotes.len()),
    };

    let lines: Vec<Line> = if state.quotes.is_empty() {
        vec![Line::from(Span::styled(
            "No quotes in this category.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state.quotes.iter().map(quote_line).collect()
    };

    let paragraph = Paragraph::new(lines)
        .scroll((state.scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// One display line per quote: the text, then the category in italics.
fn quote_line(quote: &Quote) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("\"{}\"", quote.text),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            quote.category.clone(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
