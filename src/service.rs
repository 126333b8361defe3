use std::cell::RefCell;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use rusqlite::OptionalExtension;

use crate::{Database, Note, NoteId};

/// Service layer providing note management operations.
///
/// NoteService owns a Database instance and is the sole source of truth for
/// the note list. All mutations are serialized through its connection, and
/// every successful mutation publishes the new full list to subscribers so
/// a front-end can re-derive its view. This service is UI-independent and
/// is shared by the CLI and TUI interfaces.
///
/// # Examples
///
/// ```
/// use jot::{Database, NoteService};
///
/// # fn main() -> anyhow::Result<()> {
/// let db = Database::in_memory()?;
/// let service = NoteService::new(db);
/// # Ok(())
/// # }
/// ```
pub struct NoteService {
    db: Database,
    observers: RefCell<Vec<Sender<Vec<Note>>>>,
}

impl NoteService {
    /// Creates a new NoteService with the given database.
    ///
    /// Takes ownership of the database instance. The service becomes the sole
    /// owner and manages all database operations through its methods.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Returns a reference to the underlying database.
    ///
    /// Useful for testing or advanced operations that need direct database access.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Registers an observer of the note list.
    ///
    /// After every successful mutation the service sends the complete,
    /// freshly-listed note set to each live subscriber. Receivers that have
    /// been dropped are pruned on the next send.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let db = Database::in_memory()?;
    /// let service = NoteService::new(db);
    ///
    /// let updates = service.subscribe();
    /// service.create_note()?;
    ///
    /// let snapshot = updates.try_recv().expect("mutation publishes a snapshot");
    /// assert_eq!(snapshot.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe(&self) -> Receiver<Vec<Note>> {
        let (tx, rx) = mpsc::channel();
        self.observers.borrow_mut().push(tx);
        rx
    }

    /// Creates a blank placeholder note and returns it.
    ///
    /// The placeholder has empty title and content; the caller is expected to
    /// follow up with `update_note` once the user has filled the note in.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let db = Database::in_memory()?;
    /// let service = NoteService::new(db);
    ///
    /// let note = service.create_note()?;
    /// assert!(note.id.get() > 0);
    /// assert!(note.is_blank());
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_note(&self) -> Result<Note> {
        self.insert_note("", "")
    }

    /// Inserts a note with the given title and content, returning it with its
    /// assigned id.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let db = Database::in_memory()?;
    /// let service = NoteService::new(db);
    ///
    /// let note = service.insert_note("Groceries", "milk, eggs")?;
    /// assert_eq!(note.title, "Groceries");
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert_note(&self, title: &str, content: &str) -> Result<Note> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO notes (title, content) VALUES (?1, ?2)",
            (title, content),
        )?;
        let id = conn.last_insert_rowid();

        self.notify_observers()?;
        Ok(Note::new(NoteId::new(id), title, content))
    }

    /// Retrieves a note by its ID.
    ///
    /// Returns `None` if no note exists with the given ID. This is not
    /// considered an error condition.
    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let conn = self.db.connection();

        let note = conn
            .query_row(
                "SELECT id, title, content FROM notes WHERE id = ?1",
                [id.get()],
                |row| {
                    Ok(Note::new(
                        NoteId::new(row.get(0)?),
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        Ok(note)
    }

    /// Replaces the title and content of the note with the matching id.
    ///
    /// A no-op when the id is absent; other notes are never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, NoteId, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let db = Database::in_memory()?;
    /// let service = NoteService::new(db);
    ///
    /// let note = service.create_note()?;
    /// service.update_note(note.id, "Plan", "write the report")?;
    /// assert_eq!(service.get_note(note.id)?.unwrap().title, "Plan");
    ///
    /// // Unknown id is a no-op, not an error
    /// service.update_note(NoteId::new(999), "x", "y")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn update_note(&self, id: NoteId, title: &str, content: &str) -> Result<()> {
        let conn = self.db.connection();

        conn.execute(
            "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3",
            (title, content, id.get()),
        )?;

        self.notify_observers()?;
        Ok(())
    }

    /// Deletes a note by its ID.
    ///
    /// This operation is idempotent: deleting a non-existent note returns
    /// `Ok(())` without error.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let db = Database::in_memory()?;
    /// let service = NoteService::new(db);
    ///
    /// let note = service.create_note()?;
    /// service.delete_note(note.id)?;
    /// service.delete_note(note.id)?; // second delete also succeeds
    /// assert_eq!(service.get_note(note.id)?, None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete_note(&self, id: NoteId) -> Result<()> {
        let conn = self.db.connection();

        conn.execute("DELETE FROM notes WHERE id = ?1", [id.get()])?;

        self.notify_observers()?;
        Ok(())
    }

    /// Lists every note, ordered by descending id (most recent first).
    ///
    /// This is the store's default order; display ordering is the view
    /// derivation's concern.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare("SELECT id, title, content FROM notes ORDER BY id DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Note::new(
                NoteId::new(row.get(0)?),
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut notes = Vec::new();
        for row_result in rows {
            notes.push(row_result?);
        }

        Ok(notes)
    }

    /// Atomically discards all existing notes and inserts the given set.
    ///
    /// Used by import. Runs in a single transaction so a failure rolls the
    /// store back to its prior contents and readers never observe the
    /// intermediate empty state. Explicit ids from the imported notes are
    /// preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, Note, NoteId, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let db = Database::in_memory()?;
    /// let service = NoteService::new(db);
    /// service.insert_note("old", "gone after import")?;
    ///
    /// let imported = vec![Note::new(NoteId::new(7), "new", "kept id 7")];
    /// service.replace_all(&imported)?;
    ///
    /// let notes = service.list_notes()?;
    /// assert_eq!(notes, imported);
    /// # Ok(())
    /// # }
    /// ```
    pub fn replace_all(&self, notes: &[Note]) -> Result<()> {
        let conn = self.db.connection();

        conn.execute("BEGIN TRANSACTION", [])?;

        let result: Result<()> = (|| {
            conn.execute("DELETE FROM notes", [])?;
            for note in notes {
                conn.execute(
                    "INSERT INTO notes (id, title, content) VALUES (?1, ?2, ?3)",
                    (note.id.get(), &note.title, &note.content),
                )?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                self.notify_observers()?;
                Ok(())
            }
            Err(e) => {
                conn.execute("ROLLBACK", []).ok();
                Err(e)
            }
        }
    }

    /// Sends the current full note list to every live subscriber.
    ///
    /// Skips the snapshot query entirely when nobody is listening.
    /// Subscribers whose receiving end has been dropped are removed.
    fn notify_observers(&self) -> Result<()> {
        if self.observers.borrow().is_empty() {
            return Ok(());
        }

        let snapshot = self.list_notes()?;
        self.observers
            .borrow_mut()
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
        Ok(())
    }
}

#[cfg(test)]
#[path = "service/tests.rs"]
mod tests;
