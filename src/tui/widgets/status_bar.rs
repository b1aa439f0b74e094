// Status bar widget: sync indicator, quote count, active filter, last sync.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::SyncStatus;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [sync indicator] [quote counter] [filter] [last synced]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, dot_color) = sync_indicator(state.sync_status);
    spans.push(Span::styled(
        format!(" {} ", dot),
        Style::default().fg(dot_color),
    ));
    spans.push(Span::styled(
        sync_label(state.sync_status),
        Style::default().fg(Color::Gray),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!("{} quotes", state.total_quotes),
        Style::default().fg(Color::White),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    let filter = state
        .active_category
        .as_deref()
        .unwrap_or("All");
    spans.push(Span::styled(
        format!("Filter: {filter}"),
        Style::default().fg(Color::White),
    ));

    if let Some(last) = &state.last_synced {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("Synced {last}"),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the sync dot character and its color.
pub fn sync_indicator(status: SyncStatus) -> (&'static str, Color) {
    match status {
        SyncStatus::Disabled => ("○", Color::DarkGray),
        SyncStatus::Pending => ("●", Color::Yellow),
        SyncStatus::Synced => ("●", Color::Green),
        SyncStatus::Error => ("●", Color::Red),
    }
}

/// Short status-bar label for the sync state.
pub fn sync_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Disabled => "sync off",
        SyncStatus::Pending => "sync pending",
        SyncStatus::Synced => "synced",
        SyncStatus::Error => "sync error",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
