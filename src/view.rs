//! Pure view derivation: (notes, search query, sort option) -> display list.
//!
//! Nothing here touches the database. The front-ends feed in the latest
//! store snapshot plus whatever query and sort option the user has chosen,
//! and re-run the derivation whenever any of the three inputs changes.

use std::cmp::Ordering;

use crate::{Note, SortBy, SortOption, SortOrder};

/// Keeps a note iff the query is empty or is a case-insensitive substring
/// of the note's title or content.
///
/// # Examples
///
/// ```
/// use jot::{Note, NoteId, view};
///
/// let notes = vec![
///     Note::new(NoteId::new(1), "Meeting", "agenda"),
///     Note::new(NoteId::new(2), "Trip", "pack bags"),
/// ];
///
/// let hits = view::filter_notes(&notes, "meeting");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].title, "Meeting");
///
/// // Empty query keeps everything
/// assert_eq!(view::filter_notes(&notes, "").len(), 2);
/// ```
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    if query.is_empty() {
        return notes.to_vec();
    }

    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Orders notes by the field named in the sort option.
///
/// Text fields compare case-insensitively. The sort is stable: notes with
/// equal keys retain their relative input order, in both directions, which
/// keeps the derived view deterministic for identical inputs. Descending
/// order reverses the comparator rather than the result list so that ties
/// are not flipped.
pub fn sort_notes(mut notes: Vec<Note>, option: SortOption) -> Vec<Note> {
    let by = option.sort_by;
    notes.sort_by(|a, b| {
        let ordering = match by {
            SortBy::Id => a.id.cmp(&b.id),
            SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortBy::Content => a.content.to_lowercase().cmp(&b.content.to_lowercase()),
        };
        apply_order(ordering, option.sort_order)
    });
    notes
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Filters then sorts: the complete derivation from store snapshot to
/// display list.
///
/// An empty input list or a query matching nothing both yield an empty
/// result; rendering a "no notes" message is the caller's concern.
pub fn derive_view(notes: &[Note], query: &str, option: SortOption) -> Vec<Note> {
    sort_notes(filter_notes(notes, query), option)
}
