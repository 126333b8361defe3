use serde::{Deserialize, Serialize};

use super::NoteId;

/// A note with its title and freeform content.
///
/// Notes are the only entity in the system: a flat record identified by a
/// database-assigned id. Both text fields may be empty; the "add" action
/// creates exactly such a blank placeholder to be filled in afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier from the database.
    pub id: NoteId,
    /// The note's title, possibly empty.
    pub title: String,
    /// The note's body text, possibly empty.
    pub content: String,
}

impl Note {
    /// Creates a note with the given id, title, and content.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Note, NoteId};
    ///
    /// let note = Note::new(NoteId::new(1), "Groceries", "milk, eggs");
    /// assert_eq!(note.id.get(), 1);
    /// assert_eq!(note.title, "Groceries");
    /// ```
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Creates a blank placeholder note with the given id.
    pub fn blank(id: NoteId) -> Self {
        Self::new(id, "", "")
    }

    /// Returns true when both title and content are empty.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Returns the title for display, substituting "Untitled" for blank titles.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}
