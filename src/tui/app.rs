use crate::models::{Note, NoteId, SortOption};
use crate::view;

/// Application state for the TUI.
///
/// Holds the latest store snapshot plus the two user-controlled view inputs
/// (search query and sort option). The displayed list is always the pure
/// derivation of those three, recomputed whenever any of them changes.
#[derive(Debug, Clone)]
pub struct App {
    /// Latest full snapshot from the note store
    all_notes: Vec<Note>,
    /// Derived list currently displayed (filtered and sorted)
    notes: Vec<Note>,
    /// Currently selected note index into the derived list
    selected_index: Option<usize>,
    /// Search input buffer
    search_input: String,
    /// Active sort specification
    sort_option: SortOption,
    /// Currently focused panel
    focus: Focus,
    /// Interaction mode (browsing, editing, or confirming a delete)
    mode: Mode,
    /// Transient status line (weather reading, save confirmation, errors)
    status: Option<String>,
    /// Scroll offset for the detail view
    detail_scroll: u16,
}

/// Panel focus state for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Search bar is focused (typing re-derives the view)
    SearchInput,
    /// Note list panel is focused (j/k navigation, Enter to edit)
    NoteList,
    /// Detail panel is focused (j/k scrolling)
    DetailView,
}

/// Interaction mode layered over the panel focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing
    Browse,
    /// Editing a note in the overlay
    Edit(Editor),
    /// Waiting for delete confirmation of the selected note
    ConfirmDelete(NoteId),
}

/// Which editor field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Content,
}

/// Buffered state of the note edit overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
    pub field: EditorField,
}

impl Editor {
    /// Opens an editor pre-filled from an existing note.
    pub fn for_note(note: &Note) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            field: EditorField::Title,
        }
    }

    /// Switches the active field between title and content.
    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            EditorField::Title => EditorField::Content,
            EditorField::Content => EditorField::Title,
        };
    }

    /// Appends a character to the active field.
    pub fn push_char(&mut self, c: char) {
        match self.field {
            EditorField::Title => self.title.push(c),
            EditorField::Content => self.content.push(c),
        }
    }

    /// Removes the last character from the active field.
    pub fn pop_char(&mut self) {
        match self.field {
            EditorField::Title => {
                self.title.pop();
            }
            EditorField::Content => {
                self.content.pop();
            }
        }
    }

    /// Returns true when neither field carries any non-whitespace text.
    ///
    /// A fully blank edit is not saved, matching the save guard of the
    /// original edit screen.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

impl App {
    /// Creates a new App with default state.
    ///
    /// Default focus is the search bar; the sort option starts at id
    /// ascending; the note list is empty until the first snapshot arrives.
    pub fn new() -> Self {
        Self {
            all_notes: Vec::new(),
            notes: Vec::new(),
            selected_index: None,
            search_input: String::new(),
            sort_option: SortOption::default(),
            focus: Focus::SearchInput,
            mode: Mode::Browse,
            status: None,
            detail_scroll: 0,
        }
    }

    /// Returns the currently displayed (derived) notes.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the latest unfiltered store snapshot.
    pub fn all_notes(&self) -> &[Note] {
        &self.all_notes
    }

    /// Returns the currently selected note index.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Returns the search input buffer.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Returns the active sort option.
    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    /// Returns the current focus state.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the current interaction mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Mutable access to the interaction mode, used by the key handler to
    /// write back editor buffers.
    pub fn mode_mut(&mut self) -> &mut Mode {
        &mut self.mode
    }

    /// Returns the transient status line, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Sets the transient status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Clears the transient status line.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Installs a fresh store snapshot and re-derives the displayed list.
    ///
    /// Called after every store mutation. Keeps the selection on the same
    /// note id when it is still present in the derived view.
    pub fn set_notes(&mut self, notes: Vec<Note>) {
        let keep = self.selected_note().map(|n| n.id);
        self.all_notes = notes;
        self.rederive(keep);
    }

    /// Re-runs the view derivation over the current snapshot.
    fn rederive(&mut self, keep_selected: Option<NoteId>) {
        self.notes = view::derive_view(&self.all_notes, &self.search_input, self.sort_option);
        self.selected_index =
            keep_selected.and_then(|id| self.notes.iter().position(|n| n.id == id));
        self.detail_scroll = 0;
    }

    /// Returns the currently selected note, if any.
    pub fn selected_note(&self) -> Option<&Note> {
        self.selected_index.and_then(|i| self.notes.get(i))
    }

    /// Selects the note with the given id, when present in the derived view.
    pub fn select_note(&mut self, id: NoteId) {
        self.selected_index = self.notes.iter().position(|n| n.id == id);
    }

    /// Cycles focus to the next panel in Tab order.
    ///
    /// Order: search -> list -> detail -> search.
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::SearchInput => Focus::NoteList,
            Focus::NoteList => Focus::DetailView,
            Focus::DetailView => Focus::SearchInput,
        };
        self.auto_select_on_note_list_focus();
    }

    /// Cycles focus to the previous panel in reverse Tab order.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::SearchInput => Focus::DetailView,
            Focus::NoteList => Focus::SearchInput,
            Focus::DetailView => Focus::NoteList,
        };
        self.auto_select_on_note_list_focus();
    }

    /// Auto-selects the first note when entering the list with no selection.
    fn auto_select_on_note_list_focus(&mut self) {
        if self.focus == Focus::NoteList && self.selected_index.is_none() && !self.notes.is_empty()
        {
            self.selected_index = Some(0);
        }
    }

    /// Moves selection down in the derived list, wrapping at the end.
    pub fn select_next(&mut self) {
        if self.notes.is_empty() {
            self.selected_index = None;
            return;
        }

        self.selected_index = Some(match self.selected_index {
            None => 0,
            Some(i) => {
                if i + 1 >= self.notes.len() {
                    0
                } else {
                    i + 1
                }
            }
        });
        self.detail_scroll = 0;
    }

    /// Moves selection up in the derived list, wrapping at the start.
    pub fn select_previous(&mut self) {
        if self.notes.is_empty() {
            self.selected_index = None;
            return;
        }

        self.selected_index = Some(match self.selected_index {
            None => self.notes.len() - 1,
            Some(0) => self.notes.len() - 1,
            Some(i) => i - 1,
        });
        self.detail_scroll = 0;
    }

    /// Returns the current detail view scroll offset.
    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// Scrolls the detail view down by the specified amount.
    pub fn scroll_detail_down(&mut self, amount: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(amount);
    }

    /// Scrolls the detail view up by the specified amount.
    pub fn scroll_detail_up(&mut self, amount: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(amount);
    }

    /// Appends a character to the search query and re-derives the view.
    ///
    /// Derivation is an in-memory pass over the snapshot, so it runs on
    /// every keystroke without debouncing.
    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.rederive(None);
    }

    /// Removes the last character from the search query and re-derives.
    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.rederive(None);
    }

    /// Clears the search query, restoring the full set.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.rederive(None);
    }

    /// Advances the sort option to the next combination and re-derives,
    /// keeping the selection on the same note.
    pub fn cycle_sort(&mut self) {
        let keep = self.selected_note().map(|n| n.id);
        self.sort_option = self.sort_option.cycled();
        self.rederive(keep);
    }

    /// Opens the edit overlay for the given note.
    pub fn open_editor(&mut self, note: &Note) {
        self.mode = Mode::Edit(Editor::for_note(note));
    }

    /// Asks for confirmation before deleting the selected note.
    ///
    /// No-op when nothing is selected.
    pub fn request_delete(&mut self) {
        if let Some(note) = self.selected_note() {
            self.mode = Mode::ConfirmDelete(note.id);
        }
    }

    /// Returns to normal browsing, dropping any overlay state.
    pub fn close_overlay(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Clears the selection (Esc key behavior).
    pub fn clear_selection(&mut self) {
        self.selected_index = None;
    }

    /// Returns focus to the search bar (Esc key behavior).
    pub fn reset_focus(&mut self) {
        self.focus = Focus::SearchInput;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
