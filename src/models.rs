mod ids;
mod note;
mod sort;

pub use ids::NoteId;
pub use note::Note;
pub use sort::{SortBy, SortOption, SortOrder};
