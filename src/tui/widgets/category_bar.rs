// Category selector bar: the "All" sentinel plus one entry per distinct
// category, rebuilt from every snapshot, with the active selection
// highlighted.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let spans = category_spans(&state.categories, state.active_category.as_deref());
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Categories (c to cycle)"),
    );
    frame.render_widget(paragraph, area);
}

/// Build the selector spans: `[All]` first, then one entry per category in
/// first-occurrence order. The active selection is highlighted; `None`
/// highlights the sentinel.
pub fn category_spans(categories: &[String], active: Option<&str>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    let mut push = |label: String, is_active: bool| {
        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{label}]"), style));
        spans.push(Span::raw(" "));
    };

    push("All".to_string(), active.is_none());
    for category in categories {
        push(category.clone(), active == Some(category.as_str()));
    }

    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(spans: &[Span<'static>]) -> Vec<String> {
        spans
            .iter()
            .map(|s| s.content.as_ref().to_string())
            .filter(|s| s.starts_with('['))
            .collect()
    }

    #[test]
    fn sentinel_comes_first() {
        let categories = vec!["X".to_string(), "Y".to_string()];
        let spans = category_spans(&categories, None);
        assert_eq!(labels(&spans), vec!["[All]", "[X]", "[Y]"]);
    }

    #[test]
    fn all_highlighted_when_no_filter() {
        let categories = vec!["X".to_string()];
        let spans = category_spans(&categories, None);
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[2].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn active_category_highlighted() {
        let categories = vec!["X".to_string(), "Y".to_string()];
        let spans = category_spans(&categories, Some("Y"));
        // spans: [All] " " [X] " " [Y] " "
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[2].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[4].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn preserves_given_order() {
        let categories = vec!["Zed".to_string(), "Alpha".to_string()];
        let spans = category_spans(&categories, None);
        assert_eq!(labels(&spans), vec!["[All]", "[Zed]", "[Alpha]"]);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.categories = vec!["X".to_string(), "Y".to_string()];
        state.active_category = Some("X".to_string());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
