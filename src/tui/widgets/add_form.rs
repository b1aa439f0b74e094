// Add-quote form overlay: two text inputs (quote text, category).

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::overlay_rect;
use crate::tui::{AddField, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let rect = overlay_rect(area, 60, 8);
    frame.render_widget(Clear, rect);

    let lines = vec![
        field_line("Text", &state.add_form.text, state.add_form.focus == AddField::Text),
        Line::from(""),
        field_line(
            "Category",
            &state.add_form.category,
            state.add_form.focus == AddField::Category,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "[Tab] switch field  [Enter] save  [Esc] cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Add Quote"),
    );
    frame.render_widget(paragraph, rect);
}

/// A labeled input line; the focused field gets a visible cursor block.
fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(format!("{label:>9}: "), label_style),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
