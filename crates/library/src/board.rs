//! One topic's categories and their ordered entries.

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use std::collections::BTreeMap;
use talenest_extract::SeriesMatcher;
use talenest_extract::models::{Placement, SeriesMatch};
use tracing::instrument;

/// Stored in place of a blank title.
pub const PLACEHOLDER_TITLE: &str = "New Entry";

/// A named, ordered list of entry titles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    name: String,
    titles: Vec<String>,
}
impl Category {
    fn new(name: String) -> Self {
        Self {
            name,
            titles: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Category names are compared trimmed and lowercased.
fn category_name(name: &str) -> Result<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        exn::bail!(ErrorKind::BlankName);
    }
    Ok(name)
}

pub(crate) fn entry_title(title: &str) -> &str {
    if title.trim().is_empty() { PLACEHOLDER_TITLE } else { title }
}

/// The categories of a single topic, in display order.
///
/// Also remembers the page URL each entry was added from, keyed by title,
/// and which category new entries go to when they don't belong to an
/// existing series.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    categories: Vec<Category>,
    default_category: Option<String>,
    urls: BTreeMap<String, String>,
}

impl Board {
    /// A board with empty categories. Blank and repeated names are skipped.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = Self::default();
        for name in categories {
            if let Ok(name) = category_name(name.as_ref())
                && board.position(&name).is_err()
            {
                board.categories.push(Category::new(name));
            }
        }
        board
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.position(name).ok().map(|i| &self.categories[i])
    }

    /// Titles of `name`, or `None` if there's no such category.
    pub fn titles(&self, name: &str) -> Option<&[String]> {
        self.category(name).map(Category::titles)
    }

    /// URL the entry titled `title` was added from, if known.
    pub fn url(&self, title: &str) -> Option<&str> {
        self.urls.get(title).map(String::as_str)
    }

    /// The explicitly chosen default category, else the first one.
    pub fn default_category(&self) -> Option<&str> {
        self.default_category.as_deref().or_else(|| self.categories.first().map(Category::name))
    }

    fn position(&self, name: &str) -> Result<usize> {
        let wanted = name.trim().to_lowercase();
        self.categories
            .iter()
            .position(|c| c.name == wanted)
            .ok_or_raise(|| ErrorKind::UnknownCategory(name.to_string()))
    }

    fn category_at(&self, name: &str, index: usize) -> Result<&String> {
        let category = &self.categories[self.position(name)?];
        category.titles.get(index).ok_or_raise(|| ErrorKind::IndexOutOfRange {
            category: category.name.clone(),
            index,
        })
    }

    fn contains_title(&self, title: &str) -> bool {
        self.categories.iter().any(|c| c.titles.iter().any(|t| t == title))
    }

    /// Drops the URL of a title once no entry carries that title any more.
    fn forget_url(&mut self, title: &str) {
        if !self.contains_title(title) {
            self.urls.remove(title);
        }
    }

    pub fn set_default_category(&mut self, name: &str) -> Result<()> {
        let index = self.position(name)?;
        self.default_category = Some(self.categories[index].name.clone());
        Ok(())
    }

    /// Appends a new, empty category.
    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let name = category_name(name)?;
        if self.position(&name).is_ok() {
            exn::bail!(ErrorKind::DuplicateCategory(name));
        }
        self.categories.push(Category::new(name));
        Ok(())
    }

    /// Renames a category in place, keeping its entries and its position.
    pub fn rename_category(&mut self, from: &str, to: &str) -> Result<()> {
        let index = self.position(from)?;
        let to = category_name(to)?;
        if self.categories[index].name == to {
            return Ok(());
        }
        if self.position(&to).is_ok() {
            exn::bail!(ErrorKind::DuplicateCategory(to));
        }
        let old = std::mem::replace(&mut self.categories[index].name, to.clone());
        if self.default_category.as_deref() == Some(old.as_str()) {
            self.default_category = Some(to);
        }
        Ok(())
    }

    /// Removes a category along with all of its entries, which are returned.
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        let index = self.position(name)?;
        let removed = self.categories.remove(index);
        if self.default_category.as_deref() == Some(removed.name.as_str()) {
            self.default_category = None;
        }
        for title in &removed.titles {
            self.forget_url(title);
        }
        Ok(removed)
    }

    /// Moves a category to `to_index` (clamped) among the others.
    pub fn move_category(&mut self, name: &str, to_index: usize) -> Result<()> {
        let category = self.categories.remove(self.position(name)?);
        let to_index = to_index.min(self.categories.len());
        self.categories.insert(to_index, category);
        Ok(())
    }

    /// Inserts `title` where `placement` says, returning the index it landed
    /// at. An index past the end appends. A blank title is stored as
    /// [`PLACEHOLDER_TITLE`].
    pub fn insert(&mut self, placement: &Placement, title: &str) -> Result<usize> {
        let position = self.position(&placement.category)?;
        let category = &mut self.categories[position];
        let index = placement.index.min(category.titles.len());
        category.titles.insert(index, entry_title(title).to_string());
        tracing::debug!(category = %category.name, index, "entry inserted");
        Ok(index)
    }

    /// Adds `title` to a single category (the default one when `category`
    /// is `None`), directly after the most recent entry of the same series,
    /// or at the end.
    #[instrument(level = "debug", skip(self, matcher))]
    pub fn add(&mut self, matcher: &SeriesMatcher, category: Option<&str>, title: &str) -> Result<Placement> {
        let name = match category {
            Some(name) => self.categories[self.position(name)?].name.clone(),
            None => self.default_category().ok_or_raise(|| ErrorKind::NoCategories)?.to_string(),
        };
        let titles = self.titles(&name).unwrap_or_default();
        let placement = match matcher.find_insertion_point(titles, entry_title(title)) {
            Some(index) => Placement::after(SeriesMatch {
                category: name.clone(),
                index,
                title: titles[index].clone(),
            }),
            None => Placement::end_of(name.clone(), titles.len()),
        };
        self.insert(&placement, title)?;
        Ok(placement)
    }

    /// Adds `title` next to the most recent entry of the same series in any
    /// category, searching categories in display order, or at the end of the
    /// default category. `url` is remembered for the entry when given.
    #[instrument(level = "debug", skip(self, matcher))]
    pub fn quick_add(&mut self, matcher: &SeriesMatcher, title: &str, url: Option<&str>) -> Result<Placement> {
        let default = self.default_category().ok_or_raise(|| ErrorKind::NoCategories)?.to_string();
        let title = entry_title(title);
        let entries = self.categories.iter().map(|c| (c.name.as_str(), c.titles.as_slice()));
        let placement = matcher.plan_placement(entries, &default, title);
        self.insert(&placement, title)?;
        if let Some(url) = url {
            self.urls.insert(title.to_string(), url.to_string());
        }
        Ok(placement)
    }

    /// Drag-and-drop: takes the entry out of `from`, then inserts it into
    /// `to` at `to_index` (clamped). Within one category, `to_index` counts
    /// positions after the removal.
    pub fn move_entry(&mut self, from: &str, from_index: usize, to: &str, to_index: usize) -> Result<()> {
        self.category_at(from, from_index)?;
        let to = self.position(to)?;
        let from = self.position(from)?;
        let title = self.categories[from].titles.remove(from_index);
        let titles = &mut self.categories[to].titles;
        titles.insert(to_index.min(titles.len()), title);
        Ok(())
    }

    /// Removes and returns an entry.
    pub fn remove_entry(&mut self, category: &str, index: usize) -> Result<String> {
        self.category_at(category, index)?;
        let position = self.position(category)?;
        let title = self.categories[position].titles.remove(index);
        self.forget_url(&title);
        Ok(title)
    }

    /// Replaces an entry's title, carrying its URL over.
    pub fn rename_entry(&mut self, category: &str, index: usize, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            exn::bail!(ErrorKind::BlankName);
        }
        self.category_at(category, index)?;
        let position = self.position(category)?;
        let old = std::mem::replace(&mut self.categories[position].titles[index], title.to_string());
        if let Some(url) = self.urls.get(&old).cloned() {
            self.urls.insert(title.to_string(), url);
            self.forget_url(&old);
        }
        Ok(())
    }

    /// Entries whose lowercased title contains `needle`, which must already
    /// be lowercase.
    pub(crate) fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = (&'a str, usize, &'a str)> + 'a {
        self.categories.iter().flat_map(move |category| {
            category
                .titles
                .iter()
                .enumerate()
                .filter(move |(_, title)| title.to_lowercase().contains(needle))
                .map(move |(index, title)| (category.name.as_str(), index, title.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn board() -> Board {
        let mut board = Board::new(["favorite", "watching", "completed"]);
        let matcher = SeriesMatcher::default();
        board.add(&matcher, Some("watching"), "My Show Episode 1").unwrap();
        board.add(&matcher, Some("watching"), "Other Show Episode 7").unwrap();
        board.add(&matcher, Some("completed"), "Old Show S1 - E12").unwrap();
        board
    }

    fn titles<'a>(board: &'a Board, category: &str) -> Vec<&'a str> {
        board.titles(category).unwrap().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_new_normalizes_names() {
        let board = Board::new([" Favorite ", "WATCHING", "watching", "  "]);
        let names: Vec<_> = board.categories().iter().map(Category::name).collect();
        assert_eq!(names, vec!["favorite", "watching"]);
        assert_eq!(board.default_category(), Some("favorite"));
    }

    #[test]
    fn test_empty_board_has_no_default() {
        let mut board = Board::new(Vec::<String>::new());
        assert_eq!(board.default_category(), None);
        let err = board.quick_add(&SeriesMatcher::default(), "Anything", None).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NoCategories));
    }

    #[rstest]
    fn test_add_groups_within_category(mut board: Board) {
        let placement = board.add(&SeriesMatcher::default(), Some("watching"), "My Show Episode 2").unwrap();
        assert_eq!(placement.index, 1);
        assert_eq!(titles(&board, "watching"), vec!["My Show Episode 1", "My Show Episode 2", "Other Show Episode 7"]);
    }

    #[rstest]
    fn test_add_defaults_to_default_category(mut board: Board) {
        board.add(&SeriesMatcher::default(), None, "Brand New Show Episode 1").unwrap();
        assert_eq!(titles(&board, "favorite"), vec!["Brand New Show Episode 1"]);
    }

    #[rstest]
    fn test_add_blank_title(mut board: Board) {
        board.add(&SeriesMatcher::default(), Some("favorite"), "   ").unwrap();
        assert_eq!(titles(&board, "favorite"), vec![PLACEHOLDER_TITLE]);
    }

    #[rstest]
    fn test_quick_add_groups_across_categories(mut board: Board) {
        board.set_default_category("favorite").unwrap();
        let placement = board
            .quick_add(&SeriesMatcher::default(), "Old Show S2 - E1", Some("https://example.com/old-show/s2e1"))
            .unwrap();
        assert_eq!(placement.category, "completed");
        assert_eq!(placement.index, 1);
        assert_eq!(titles(&board, "completed"), vec!["Old Show S1 - E12", "Old Show S2 - E1"]);
        assert_eq!(board.url("Old Show S2 - E1"), Some("https://example.com/old-show/s2e1"));
    }

    #[rstest]
    fn test_quick_add_without_match(mut board: Board) {
        board.set_default_category("Completed").unwrap();
        let placement = board.quick_add(&SeriesMatcher::default(), "Unrelated Thing Episode 1", None).unwrap();
        assert_eq!(placement, Placement::end_of("completed", 1));
        assert_eq!(titles(&board, "completed"), vec!["Old Show S1 - E12", "Unrelated Thing Episode 1"]);
        assert_eq!(board.url("Unrelated Thing Episode 1"), None);
    }

    #[rstest]
    fn test_insert_clamps_index(mut board: Board) {
        let index = board.insert(&Placement::end_of("watching", 99), "Late Entry").unwrap();
        assert_eq!(index, 2);
        let err = board.insert(&Placement::end_of("dropped", 0), "Nowhere").unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownCategory(_)));
    }

    #[rstest]
    fn test_rename_category(mut board: Board) {
        board.set_default_category("watching").unwrap();
        board.rename_category("watching", " Currently Watching ").unwrap();
        assert_eq!(board.default_category(), Some("currently watching"));
        assert_eq!(board.categories()[1].name(), "currently watching");
        assert_eq!(titles(&board, "currently watching").len(), 2);
        assert!(board.titles("watching").is_none());
    }

    #[rstest]
    #[case("completed", ErrorKind::DuplicateCategory("completed".into()))]
    #[case("  ", ErrorKind::BlankName)]
    fn test_rename_category_rejected(mut board: Board, #[case] to: &str, #[case] expected: ErrorKind) {
        let err = board.rename_category("watching", to).unwrap_err();
        assert_eq!(*err, expected);
    }

    #[rstest]
    fn test_rename_category_to_itself(mut board: Board) {
        board.rename_category("watching", "WATCHING").unwrap();
        assert_eq!(titles(&board, "watching").len(), 2);
    }

    #[rstest]
    fn test_add_duplicate_category(mut board: Board) {
        let err = board.add_category("Favorite").unwrap_err();
        assert_eq!(*err, ErrorKind::DuplicateCategory("favorite".into()));
        board.add_category("Dropped").unwrap();
        assert_eq!(board.categories().last().map(Category::name), Some("dropped"));
    }

    #[rstest]
    fn test_remove_default_category(mut board: Board) {
        board.quick_add(&SeriesMatcher::default(), "Solo Thing", Some("https://example.com/solo")).unwrap();
        board.set_default_category("favorite").unwrap();
        let removed = board.remove_category("favorite").unwrap();
        assert_eq!(removed.titles(), ["Solo Thing"]);
        assert_eq!(board.default_category(), Some("watching"));
        assert_eq!(board.url("Solo Thing"), None);
    }

    #[rstest]
    #[case(0, &["completed", "favorite", "watching"])]
    #[case(1, &["favorite", "completed", "watching"])]
    #[case(7, &["favorite", "watching", "completed"])]
    fn test_move_category(mut board: Board, #[case] to: usize, #[case] expected: &[&str]) {
        board.move_category("completed", to).unwrap();
        let names: Vec<_> = board.categories().iter().map(Category::name).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    fn test_move_entry_within_category(mut board: Board) {
        board.move_entry("watching", 0, "watching", 1).unwrap();
        assert_eq!(titles(&board, "watching"), vec!["Other Show Episode 7", "My Show Episode 1"]);
    }

    #[rstest]
    fn test_move_entry_across_categories(mut board: Board) {
        board.move_entry("watching", 1, "completed", 0).unwrap();
        assert_eq!(titles(&board, "watching"), vec!["My Show Episode 1"]);
        assert_eq!(titles(&board, "completed"), vec!["Other Show Episode 7", "Old Show S1 - E12"]);
    }

    #[rstest]
    fn test_move_entry_rejected_keeps_entry(mut board: Board) {
        let err = board.move_entry("watching", 0, "dropped", 0).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownCategory(_)));
        let err = board.move_entry("watching", 5, "completed", 0).unwrap_err();
        assert!(matches!(&*err, ErrorKind::IndexOutOfRange { index: 5, .. }));
        assert_eq!(titles(&board, "watching").len(), 2);
    }

    #[rstest]
    fn test_remove_entry(mut board: Board) {
        assert_eq!(board.remove_entry("watching", 0).unwrap(), "My Show Episode 1");
        assert_eq!(titles(&board, "watching"), vec!["Other Show Episode 7"]);
        assert!(board.remove_entry("watching", 1).is_err());
    }

    #[rstest]
    fn test_rename_entry_keeps_url(mut board: Board) {
        board.quick_add(&SeriesMatcher::default(), "My Show Episode 2", Some("https://example.com/2")).unwrap();
        board.rename_entry("watching", 1, "  My Show Episode 2 (rewatch) ").unwrap();
        assert_eq!(board.url("My Show Episode 2 (rewatch)"), Some("https://example.com/2"));
        assert_eq!(board.url("My Show Episode 2"), None);
        let err = board.rename_entry("watching", 1, " ").unwrap_err();
        assert_eq!(*err, ErrorKind::BlankName);
    }

    #[rstest]
    fn test_matching(board: Board) {
        let found: Vec<_> = board.matching("show").collect();
        assert_eq!(
            found,
            vec![
                ("watching", 0, "My Show Episode 1"),
                ("watching", 1, "Other Show Episode 7"),
                ("completed", 0, "Old Show S1 - E12"),
            ]
        );
    }
}
