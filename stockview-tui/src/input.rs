//! Keyboard input dispatch: global keys first, then the focused form field.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Field};

/// Days moved by PageUp / PageDown on a date field.
const DATE_PAGE_DAYS: i64 = 30;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // 1. Global keys (always available).
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if ctrl => {
            app.running = false;
            return;
        }
        KeyCode::Char('s') if ctrl => {
            app.save_csv();
            return;
        }
        KeyCode::Enter | KeyCode::F(5) => {
            app.request_fetch();
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.form.focus = app.form.focus.prev();
            } else {
                app.form.focus = app.form.focus.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.form.focus = app.form.focus.prev();
            return;
        }
        _ => {}
    }

    // 2. Field-specific keys.
    match app.form.focus {
        Field::Fetch => {
            if key.code == KeyCode::Char(' ') {
                app.request_fetch();
            }
        }
        Field::Start | Field::End => handle_date_key(app, key),
        Field::Symbol => handle_text_key(app, key),
    }
}

fn handle_date_key(app: &mut AppState, key: KeyEvent) {
    let shifted = match key.code {
        KeyCode::Up => app.form.shift_date(1),
        KeyCode::Down => app.form.shift_date(-1),
        KeyCode::PageUp => app.form.shift_date(DATE_PAGE_DAYS),
        KeyCode::PageDown => app.form.shift_date(-DATE_PAGE_DAYS),
        _ => {
            handle_text_key(app, key);
            return;
        }
    };
    if !shifted {
        app.set_warning("Fix the date text (YYYY-MM-DD) before stepping it");
    }
}

fn handle_text_key(app: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    let Some(text) = app.form.focused_text_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) if !c.is_control() => text.push(c),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}
