use crate::error::{ClockError, NetworkErrorKind};
use crate::features::app::{ClockWidget, WorkerHandle};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::error;

use super::state::{Field, FormState, InputMode};

/// What the event loop should do after a key press.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum KeyOutcome {
    Continue,
    Submit,
    Quit,
}

pub(super) fn handle_key(key: KeyEvent, mode: &mut InputMode, form: &mut FormState) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }
    match *mode {
        InputMode::Normal => handle_normal_key(key, mode),
        InputMode::Editing(field) => handle_editing_key(key, mode, form, field),
        InputMode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                *mode = InputMode::Normal;
            }
            KeyOutcome::Continue
        }
    }
}

fn handle_normal_key(key: KeyEvent, mode: &mut InputMode) -> KeyOutcome {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('?') => *mode = InputMode::Help,
        KeyCode::Char('e') | KeyCode::Char('r') | KeyCode::Tab => {
            *mode = InputMode::Editing(Field::Region)
        }
        KeyCode::Char('c') => *mode = InputMode::Editing(Field::City),
        KeyCode::Enter | KeyCode::Char('f') => return KeyOutcome::Submit,
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_editing_key(
    key: KeyEvent,
    mode: &mut InputMode,
    form: &mut FormState,
    field: Field,
) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => *mode = InputMode::Normal,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            *mode = InputMode::Editing(field.other())
        }
        KeyCode::Enter => {
            *mode = InputMode::Normal;
            return KeyOutcome::Submit;
        }
        KeyCode::Backspace => {
            form.field_mut(field).pop();
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                form.field_mut(field).push(ch);
            }
        }
        _ => {}
    }
    KeyOutcome::Continue
}

/// Reads the form, starts a request and hands it to the worker.
pub(super) fn submit_form(widget: &mut ClockWidget, worker: &WorkerHandle, form: &FormState) {
    let request = widget.begin_request(form.query());
    if !worker.submit(request.clone()) {
        error!("lookup worker is gone; failing request");
        widget.complete_request(
            &request,
            Err(ClockError::network(
                NetworkErrorKind::Io,
                "lookup worker stopped",
            )),
        );
    }
}
