// Modal alert overlay. Blocks input until dismissed with Enter or Esc —
// the terminal rendition of a blocking alert dialog.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::layout::overlay_rect;

pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let rect = overlay_rect(area, 50, 7);
    frame.render_widget(Clear, rect);

    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Notice"));
    frame.render_widget(paragraph, rect);
}
