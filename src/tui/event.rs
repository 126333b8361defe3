use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::NoteId;

use super::app::{App, Focus, Mode};

/// Side effect requested by a key press.
///
/// Pure UI state changes are applied to the [`App`] directly; anything that
/// touches the store or network is returned to the event loop, which owns
/// the service and client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Exit the application
    Quit,
    /// Create a blank note and open it in the editor
    CreateNote,
    /// Persist the editor buffers to the note with this id
    SaveNote {
        id: NoteId,
        title: String,
        content: String,
    },
    /// Delete the note with this id (confirmation already given)
    DeleteNote(NoteId),
    /// Fetch the current temperature for the status line
    FetchWeather,
}

/// Handles a key event, mutating UI state and returning any requested
/// side effect.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits, regardless of mode or focus
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match app.mode().clone() {
        Mode::Edit(_) => handle_editor_key(app, key),
        Mode::ConfirmDelete(id) => handle_confirm_key(app, key, id),
        Mode::Browse => handle_browse_key(app, key),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys first; 'q' only quits outside the search bar so the
    // letter stays typable in queries
    match key.code {
        KeyCode::Char('q') if app.focus() != Focus::SearchInput => return Some(Action::Quit),
        KeyCode::Tab => {
            app.next_focus();
            return None;
        }
        KeyCode::BackTab => {
            app.prev_focus();
            return None;
        }
        _ => {}
    }

    match app.focus() {
        Focus::SearchInput => handle_search_key(app, key),
        Focus::NoteList => handle_note_list_key(app, key),
        Focus::DetailView => handle_detail_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char(c) => app.push_search_char(c),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter | KeyCode::Down => app.next_focus(),
        _ => {}
    }
    None
}

fn handle_note_list_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('a') => return Some(Action::CreateNote),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('w') => return Some(Action::FetchWeather),
        KeyCode::Enter => {
            if let Some(note) = app.selected_note().cloned() {
                app.open_editor(&note);
            }
        }
        KeyCode::Esc => {
            app.clear_selection();
            app.reset_focus();
        }
        _ => {}
    }
    None
}

fn handle_detail_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_detail_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_detail_up(1),
        KeyCode::PageDown => app.scroll_detail_down(10),
        KeyCode::PageUp => app.scroll_detail_up(10),
        KeyCode::Enter => {
            if let Some(note) = app.selected_note().cloned() {
                app.open_editor(&note);
            }
        }
        KeyCode::Esc => app.reset_focus(),
        _ => {}
    }
    None
}

fn handle_editor_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    let Mode::Edit(editor) = app.mode() else {
        return None;
    };
    let mut editor = editor.clone();

    match key.code {
        // Ctrl+S saves unless both fields are blank, mirroring the save
        // guard of the edit screen
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if editor.is_blank() {
                app.set_status("Nothing to save: note is empty");
                return None;
            }
            app.close_overlay();
            return Some(Action::SaveNote {
                id: editor.note_id,
                title: editor.title,
                content: editor.content,
            });
        }
        KeyCode::Esc => {
            app.close_overlay();
            return None;
        }
        KeyCode::Tab => editor.toggle_field(),
        KeyCode::Enter => {
            // Newlines only make sense in the content field; in the title
            // Enter moves to the content field instead
            match editor.field {
                super::app::EditorField::Title => editor.toggle_field(),
                super::app::EditorField::Content => editor.push_char('\n'),
            }
        }
        KeyCode::Char(c) => editor.push_char(c),
        KeyCode::Backspace => editor.pop_char(),
        _ => {}
    }

    *app.mode_mut() = Mode::Edit(editor);
    None
}

fn handle_confirm_key(app: &mut App, key: KeyEvent, id: NoteId) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.close_overlay();
            Some(Action::DeleteNote(id))
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.close_overlay();
            None
        }
        _ => None,
    }
}
