use std::fmt;

use clap::ValueEnum;

/// Field a note list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortBy {
    /// Database id (insertion order)
    #[default]
    Id,
    /// Title, compared case-insensitively
    Title,
    /// Content, compared case-insensitively
    Content,
}

/// Direction a sort is applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    /// Smallest key first
    #[default]
    Ascending,
    /// Largest key first
    Descending,
}

/// A complete sort specification: which field, in which direction.
///
/// The default is id ascending, matching the order notes were created in.
///
/// # Examples
///
/// ```
/// use jot::{SortBy, SortOption, SortOrder};
///
/// let option = SortOption::default();
/// assert_eq!(option.sort_by, SortBy::Id);
/// assert_eq!(option.sort_order, SortOrder::Ascending);
///
/// let by_title = SortOption::new(SortBy::Title, SortOrder::Descending);
/// assert_eq!(by_title.to_string(), "title descending");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOption {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl SortOption {
    /// Creates a sort option from its two components.
    pub fn new(sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    /// Advances to the next of the six (field, direction) combinations.
    ///
    /// Used by the TUI sort key to cycle through every option in a fixed
    /// order: id asc, id desc, title asc, title desc, content asc,
    /// content desc, then back to id asc.
    pub fn cycled(self) -> Self {
        use SortBy::*;
        use SortOrder::*;
        match (self.sort_by, self.sort_order) {
            (Id, Ascending) => Self::new(Id, Descending),
            (Id, Descending) => Self::new(Title, Ascending),
            (Title, Ascending) => Self::new(Title, Descending),
            (Title, Descending) => Self::new(Content, Ascending),
            (Content, Ascending) => Self::new(Content, Descending),
            (Content, Descending) => Self::new(Id, Ascending),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Id => write!(f, "id"),
            SortBy::Title => write!(f, "title"),
            SortBy::Content => write!(f, "content"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sort_by, self.sort_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_id_ascending() {
        let option = SortOption::default();
        assert_eq!(option.sort_by, SortBy::Id);
        assert_eq!(option.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn cycling_visits_all_six_combinations() {
        let mut option = SortOption::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(option);
            option = option.cycled();
        }
        // Back at the start after a full loop
        assert_eq!(option, SortOption::default());
        // All six combinations are distinct
        for (i, a) in seen.iter().enumerate() {
            for b in seen.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_formats_are_lowercase() {
        let option = SortOption::new(SortBy::Content, SortOrder::Descending);
        assert_eq!(option.to_string(), "content descending");
    }
}
