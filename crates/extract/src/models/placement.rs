/// An existing entry that belongs to the same series as a new title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesMatch {
    pub category: String,
    /// Position of the matching entry within its category.
    pub index: usize,
    /// The matching entry, verbatim.
    pub title: String,
}

/// Where a new title should be stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub category: String,
    /// Index to insert at; the entry currently there (if any) shifts down.
    pub index: usize,
    /// The entry the new title is being grouped after, if one matched.
    pub grouped_with: Option<SeriesMatch>,
}
impl Placement {
    /// Directly after an existing entry of the same series.
    pub fn after(found: SeriesMatch) -> Self {
        Self {
            category: found.category.clone(),
            index: found.index + 1,
            grouped_with: Some(found),
        }
    }

    /// At the end of a category holding `len` entries.
    pub fn end_of(category: impl Into<String>, len: usize) -> Self {
        Self {
            category: category.into(),
            index: len,
            grouped_with: None,
        }
    }
}
