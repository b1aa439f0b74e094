// Transient bottom-right notification, shown for a few seconds after a
// sync completes.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::notice_rect;

pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    // Width tracks the message, clamped so short notices stay compact.
    let width = (message.len() as u16 + 4).max(20).min(area.width);
    let rect = notice_rect(area, width, 3);
    frame.render_widget(Clear, rect);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::White),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), "Quotes synced with server!"))
            .unwrap();
    }

    #[test]
    fn render_on_narrow_terminal_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(16, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), "Quotes synced with server!"))
            .unwrap();
    }
}
