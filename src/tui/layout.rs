// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                               |
// +--------------------------------------------------+
// | Quote Panel (6 rows)                             |
// +--------------------------------------------------+
// | Category Bar (3 rows)                            |
// +--------------------------------------------------+
// | Quote List (fill)                                |
// +--------------------------------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+
//
// Overlays (add form, import prompt, alerts) are centered over the whole
// area; transient notices float bottom-right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: sync indicator, quote count, last sync time.
    pub status_bar: Rect,
    /// Current random quote display.
    pub quote_panel: Rect,
    /// Category selector with the "All" sentinel.
    pub category_bar: Rect,
    /// Scrollable list of all (or filtered) quotes.
    pub quote_list: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(6), // quote panel
            Constraint::Length(3), // category bar
            Constraint::Min(5),    // quote list
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        quote_panel: vertical[1],
        category_bar: vertical[2],
        quote_list: vertical[3],
        help_bar: vertical[4],
    }
}

/// Centered overlay rect of at most `width` x `height`, clamped to `area`.
pub fn overlay_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Bottom-right floating rect for transient notices.
pub fn notice_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width - width;
    // Sit just above the help bar.
    let y = area.y + area.height.saturating_sub(height + 1);
    Rect::new(x, y, width, height)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
