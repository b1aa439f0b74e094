// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the app orchestrator's snapshots.
// The orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::model::Quote;
use crate::protocol::{AppSnapshot, SyncStatus, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

/// How long a transient notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which overlay (if any) is capturing keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    AddForm,
    ImportPrompt,
}

/// Which add-form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Text,
    Category,
}

/// In-progress contents of the add-quote form.
#[derive(Debug, Clone)]
pub struct AddFormState {
    pub text: String,
    pub category: String,
    pub focus: AddField,
}

impl Default for AddFormState {
    fn default() -> Self {
        AddFormState {
            text: String::new(),
            category: String::new(),
            focus: AddField::Text,
        }
    }
}

impl AddFormState {
    /// The field currently receiving keystrokes.
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AddField::Text => &mut self.text,
            AddField::Category => &mut self.category,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.category.clear();
        self.focus = AddField::Text;
    }
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Snapshot fields are replaced wholesale by `UiUpdate::Snapshot`; the rest
/// (mode, overlay buffers, scroll, alert, notice) is owned by the TUI.
pub struct ViewState {
    pub current_quote: Option<Quote>,
    /// Quotes visible in the list (already filtered by the orchestrator).
    pub quotes: Vec<Quote>,
    /// Distinct categories in first-occurrence order.
    pub categories: Vec<String>,
    /// Active category filter; `None` means All.
    pub active_category: Option<String>,
    pub total_quotes: usize,
    pub sync_status: SyncStatus,
    pub last_synced: Option<String>,
    pub mode: Mode,
    pub add_form: AddFormState,
    pub import_path: String,
    /// Quote list scroll offset.
    pub scroll: usize,
    /// Modal alert text; blocks input until dismissed.
    pub alert: Option<String>,
    /// Transient notice text and the instant it appeared.
    pub notice: Option<(String, Instant)>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            current_quote: None,
            quotes: Vec::new(),
            categories: Vec::new(),
            active_category: None,
            total_quotes: 0,
            sync_status: SyncStatus::Pending,
            last_synced: None,
            mode: Mode::Normal,
            add_form: AddFormState::default(),
            import_path: String::new(),
            scroll: 0,
            alert: None,
            notice: None,
        }
    }
}

impl ViewState {
    /// Apply a full state snapshot from the app orchestrator. UI-local
    /// state (mode, overlay buffers, alert, notice) is left unchanged.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.current_quote = snapshot.current_quote;
        self.quotes = snapshot.quotes;
        self.categories = snapshot.categories;
        self.active_category = snapshot.active_category;
        self.total_quotes = snapshot.total_quotes;
        self.sync_status = snapshot.sync_status;
        self.last_synced = snapshot.last_synced;
        // Keep the scroll offset within the new list.
        self.scroll = self.scroll.min(self.quotes.len().saturating_sub(1));
    }

    /// Drop the notice once its display time has elapsed.
    pub fn expire_notice(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.notice {
            if now.duration_since(*shown_at) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Notice(text) => {
            state.notice = Some((text, Instant::now()));
        }
        UiUpdate::Alert(text) => {
            state.alert = Some(text);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: base zones, then whichever overlay is active.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::quote_panel::render(frame, layout.quote_panel, state);
    widgets::category_bar::render(frame, layout.category_bar, state);
    widgets::quote_list::render(frame, layout.quote_list, state);
    render_help_bar(frame, &layout);

    match state.mode {
        Mode::AddForm => widgets::add_form::render(frame, frame.area(), state),
        Mode::ImportPrompt => widgets::import_prompt::render(frame, frame.area(), state),
        Mode::Normal => {}
    }

    // Alert sits above everything else.
    if let Some(alert) = &state.alert {
        widgets::alert::render(frame, frame.area(), alert);
    }

    if let Some((notice, _)) = &state.notice {
        widgets::notice::render(frame, frame.area(), notice);
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " n:Random | a:Add | c:Category | e:Export | i:Import | q:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal on crash. We capture the original hook and
    // chain ours before it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    // ~30fps render tick
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state) {
                            let quitting = command == UserCommand::Quit;
                            if cmd_tx.send(command).await.is_err() {
                                break;
                            }
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc. -- ignore
                    }
                    Some(Err(_)) | None => {
                        // Input error or stream ended
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                view_state.expire_notice(Instant::now());
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
