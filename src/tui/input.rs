// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (scrolling, entering
// and editing the form/prompt overlays, dismissing alerts).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{AddField, Mode, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator. Returns `None` when the key press was handled
/// locally by mutating `ViewState` (e.g. overlay editing, scrolling) or was
/// ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // A modal alert blocks everything until dismissed.
    if view_state.alert.is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            view_state.alert = None;
        }
        return None;
    }

    match view_state.mode {
        Mode::AddForm => handle_add_form(key_event, view_state),
        Mode::ImportPrompt => handle_import_prompt(key_event, view_state),
        Mode::Normal => handle_normal(key_event, view_state),
    }
}

/// Normal mode key dispatch.
fn handle_normal(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('n') => Some(UserCommand::ShowRandom),

        KeyCode::Char('a') => {
            view_state.mode = Mode::AddForm;
            view_state.add_form.clear();
            None
        }

        KeyCode::Char('c') => Some(UserCommand::CycleCategory),

        KeyCode::Char('e') => Some(UserCommand::Export),

        KeyCode::Char('i') => {
            view_state.mode = Mode::ImportPrompt;
            view_state.import_path.clear();
            None
        }

        // List scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.scroll = view_state.scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.scroll = view_state.scroll.saturating_add(1);
            None
        }
        KeyCode::PageUp => {
            view_state.scroll = view_state.scroll.saturating_sub(page_size());
            None
        }
        KeyCode::PageDown => {
            view_state.scroll = view_state.scroll.saturating_add(page_size());
            None
        }

        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

/// Add-form mode: capture text into the focused field.
///
/// - Printable characters append to the focused field
/// - Backspace removes the last character
/// - Tab (or Up/Down) switches fields
/// - Enter submits (validation happens in the store)
/// - Esc cancels
fn handle_add_form(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.mode = Mode::Normal;
            view_state.add_form.clear();
            None
        }
        KeyCode::Enter => {
            view_state.mode = Mode::Normal;
            let text = std::mem::take(&mut view_state.add_form.text);
            let category = std::mem::take(&mut view_state.add_form.category);
            view_state.add_form.clear();
            Some(UserCommand::AddQuote { text, category })
        }
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            view_state.add_form.focus = match view_state.add_form.focus {
                AddField::Text => AddField::Category,
                AddField::Category => AddField::Text,
            };
            None
        }
        KeyCode::Backspace => {
            view_state.add_form.focused_mut().pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.add_form.focused_mut().push(c);
            None
        }
        _ => None,
    }
}

/// Import-prompt mode: capture a file path.
///
/// Enter with an empty path cancels silently (no file chosen).
fn handle_import_prompt(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.mode = Mode::Normal;
            view_state.import_path.clear();
            None
        }
        KeyCode::Enter => {
            view_state.mode = Mode::Normal;
            let path = std::mem::take(&mut view_state.import_path);
            if path.is_empty() {
                None
            } else {
                Some(UserCommand::Import {
                    path: PathBuf::from(path),
                })
            }
        }
        KeyCode::Backspace => {
            view_state.import_path.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.import_path.push(c);
            None
        }
        _ => None,
    }
}

/// Page size for PageUp/PageDown scrolling.
fn page_size() -> usize {
    20
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Helper to create a KeyEvent with Ctrl modifier.
    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    // -- Normal mode commands --

    #[test]
    fn n_returns_show_random() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), &mut state),
            Some(UserCommand::ShowRandom)
        );
    }

    #[test]
    fn c_returns_cycle_category() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::CycleCategory)
        );
    }

    #[test]
    fn e_returns_export() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('e')), &mut state),
            Some(UserCommand::Export)
        );
    }

    #[test]
    fn q_returns_quit() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn ctrl_c_quits_in_any_mode() {
        for mode in [Mode::Normal, Mode::AddForm, Mode::ImportPrompt] {
            let mut state = ViewState::default();
            state.mode = mode;
            assert_eq!(
                handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
                Some(UserCommand::Quit)
            );
        }
    }

    #[test]
    fn unknown_key_returns_none() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('x')), &mut state).is_none());
    }

    // -- Scrolling --

    #[test]
    fn down_increments_scroll() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.scroll, 1);
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.scroll, 2);
    }

    #[test]
    fn up_does_not_underflow() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn page_keys_scroll_by_page() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll, 20);
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.scroll, 0);
    }

    // -- Add form --

    #[test]
    fn a_enters_add_form_mode() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('a')), &mut state).is_none());
        assert_eq!(state.mode, Mode::AddForm);
        assert!(state.add_form.text.is_empty());
        assert_eq!(state.add_form.focus, AddField::Text);
    }

    #[test]
    fn add_form_captures_chars_into_focused_field() {
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        for c in "abc".chars() {
            handle_key(key(KeyCode::Char(c)), &mut state);
        }
        assert_eq!(state.add_form.text, "abc");
        assert!(state.add_form.category.is_empty());
    }

    #[test]
    fn add_form_tab_switches_fields() {
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        handle_key(key(KeyCode::Char('t')), &mut state);
        handle_key(key(KeyCode::Tab), &mut state);
        handle_key(key(KeyCode::Char('X')), &mut state);
        assert_eq!(state.add_form.text, "t");
        assert_eq!(state.add_form.category, "X");
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.add_form.focus, AddField::Text);
    }

    #[test]
    fn add_form_backspace_edits_focused_field() {
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        state.add_form.text = "abc".to_string();
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.add_form.text, "ab");
    }

    #[test]
    fn add_form_enter_submits_both_fields() {
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        state.add_form.text = "The obstacle is the way".to_string();
        state.add_form.category = "Stoic".to_string();

        let result = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            result,
            Some(UserCommand::AddQuote {
                text: "The obstacle is the way".to_string(),
                category: "Stoic".to_string(),
            })
        );
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.add_form.text.is_empty());
    }

    #[test]
    fn add_form_enter_submits_even_when_empty() {
        // Validation lives in the store; the empty submission surfaces the
        // "please enter both fields" alert.
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        let result = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            result,
            Some(UserCommand::AddQuote {
                text: String::new(),
                category: String::new(),
            })
        );
    }

    #[test]
    fn add_form_esc_cancels_and_discards() {
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        state.add_form.text = "draft".to_string();
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.add_form.text.is_empty());
    }

    #[test]
    fn add_form_q_is_text_not_quit() {
        let mut state = ViewState::default();
        state.mode = Mode::AddForm;
        let result = handle_key(key(KeyCode::Char('q')), &mut state);
        assert!(result.is_none());
        assert_eq!(state.add_form.text, "q");
    }

    // -- Import prompt --

    #[test]
    fn i_enters_import_prompt() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('i')), &mut state).is_none());
        assert_eq!(state.mode, Mode::ImportPrompt);
    }

    #[test]
    fn import_prompt_captures_path_and_submits() {
        let mut state = ViewState::default();
        state.mode = Mode::ImportPrompt;
        for c in "q.json".chars() {
            handle_key(key(KeyCode::Char(c)), &mut state);
        }
        let result = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            result,
            Some(UserCommand::Import {
                path: PathBuf::from("q.json"),
            })
        );
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.import_path.is_empty());
    }

    #[test]
    fn import_prompt_empty_enter_cancels_silently() {
        let mut state = ViewState::default();
        state.mode = Mode::ImportPrompt;
        let result = handle_key(key(KeyCode::Enter), &mut state);
        assert!(result.is_none());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn import_prompt_esc_cancels() {
        let mut state = ViewState::default();
        state.mode = Mode::ImportPrompt;
        state.import_path = "half/typed".to_string();
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.import_path.is_empty());
    }

    // -- Alert modal --

    #[test]
    fn alert_blocks_commands_until_dismissed() {
        let mut state = ViewState::default();
        state.alert = Some("Quote added successfully!".to_string());

        // Commands are blocked
        assert!(handle_key(key(KeyCode::Char('n')), &mut state).is_none());
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert!(state.alert.is_some());

        // Enter dismisses
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert!(state.alert.is_none());

        // Input flows again afterwards
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), &mut state),
            Some(UserCommand::ShowRandom)
        );
    }

    #[test]
    fn alert_esc_also_dismisses() {
        let mut state = ViewState::default();
        state.alert = Some("msg".to_string());
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.alert.is_none());
    }

    #[test]
    fn alert_ctrl_c_still_quits() {
        let mut state = ViewState::default();
        state.alert = Some("msg".to_string());
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    // -- KeyEventKind filtering --

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let release_event = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(handle_key(release_event, &mut state).is_none());
    }

    #[test]
    fn repeat_events_are_ignored() {
        let mut state = ViewState::default();
        let repeat_event = KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        };
        assert!(handle_key(repeat_event, &mut state).is_none());
        assert_eq!(state.scroll, 0);
    }
}
