//! Transfer codec: JSON serialization of the note list for export/import.
//!
//! The on-disk format is a UTF-8 JSON array of `{id, title, content}`
//! records. A malformed document is a hard error; the codec never degrades
//! a parse failure into an empty list.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::Note;

/// Errors that can occur while encoding, decoding, or moving note lists
/// to and from disk.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The document is not a valid note list
    #[error("Malformed note document: {0}")]
    Parse(#[source] serde_json::Error),

    /// Serializing a note list failed
    #[error("Failed to encode notes: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading or writing the transfer file failed
    #[error("Transfer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes the full note list into the textual interchange format.
///
/// # Examples
///
/// ```
/// use jot::{Note, NoteId, transfer};
///
/// let notes = vec![Note::new(NoteId::new(1), "Plan", "ship it")];
/// let text = transfer::encode_notes(&notes)?;
/// assert!(text.contains("\"title\": \"Plan\""));
/// # Ok::<(), jot::TransferError>(())
/// ```
pub fn encode_notes(notes: &[Note]) -> Result<String, TransferError> {
    serde_json::to_string_pretty(notes).map_err(TransferError::Encode)
}

/// Parses the interchange format back into a note list.
///
/// A malformed document yields [`TransferError::Parse`] rather than a
/// silent empty result, so a failed import can never masquerade as an
/// import of nothing.
///
/// # Examples
///
/// ```
/// use jot::transfer;
///
/// let notes = transfer::decode_notes(r#"[{"id":2,"title":"a","content":"b"}]"#)?;
/// assert_eq!(notes.len(), 1);
/// assert_eq!(notes[0].id.get(), 2);
///
/// assert!(transfer::decode_notes("not json").is_err());
/// # Ok::<(), jot::TransferError>(())
/// ```
pub fn decode_notes(text: &str) -> Result<Vec<Note>, TransferError> {
    serde_json::from_str(text).map_err(TransferError::Parse)
}

/// Encodes the note list and writes it to the given path.
///
/// An unwritable destination surfaces as [`TransferError::Io`]; the caller's
/// note state is unaffected either way.
pub fn export_to_path(notes: &[Note], path: impl AsRef<Path>) -> Result<(), TransferError> {
    let text = encode_notes(notes)?;
    fs::write(path, text)?;
    Ok(())
}

/// Reads the file at the given path and decodes it into a note list.
pub fn import_from_path(path: impl AsRef<Path>) -> Result<Vec<Note>, TransferError> {
    let text = fs::read_to_string(path)?;
    decode_notes(&text)
}
