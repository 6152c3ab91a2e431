//! Icon glyphs used by the UI
//!
//! Every icon is a variant here, so a missing icon is a compile error rather
//! than a runtime lookup failure.

use crate::pipeline::SortDirection;

/// Known UI icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Submit marker next to the ticker input
    ArrowBigRight,
    SortAscending,
    SortDescending,
    /// Marker on the filter panel's apply hint
    Filter,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::ArrowBigRight => "\u{279C}", // ➜
            Icon::SortAscending => "\u{25B2}", // ▲
            Icon::SortDescending => "\u{25BC}", // ▼
            Icon::Filter => "\u{2261}",        // ≡
        }
    }

    /// Sort indicator for a column header
    pub fn for_direction(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Icon::SortAscending,
            SortDirection::Descending => Icon::SortDescending,
        }
    }
}
