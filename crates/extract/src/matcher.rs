//! Finding where a new title belongs among existing entries.
//!
//! Everything here is a read-only query over a snapshot the caller supplies.
//! Nothing is inserted; the caller decides and performs the write.

use crate::models::{Placement, SeriesMatch};
use crate::series::SeriesKey;
use tracing::instrument;

/// Minimum key length (exclusive) for substring matches to count.
pub const DEFAULT_CONTAINMENT_THRESHOLD: usize = 10;

/// Matches a new title's series against existing entries, preferring the most
/// recently added (highest index) entry of each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesMatcher {
    threshold: usize,
}
impl Default for SeriesMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINMENT_THRESHOLD)
    }
}
impl SeriesMatcher {
    pub fn new(containment_threshold: usize) -> Self {
        Self {
            threshold: containment_threshold,
        }
    }

    /// Scans from the end, stopping at the first entry of the same series.
    fn last_match<T: AsRef<str>>(&self, key: &SeriesKey, titles: &[T]) -> Option<usize> {
        titles.iter().rposition(|title| key.matches(&SeriesKey::new(title.as_ref()), self.threshold))
    }

    /// Index of the most recent entry in `existing` from the same series as
    /// `new_title`; insert directly after it. `None` means append.
    #[instrument(level = "debug", skip(self, existing), fields(existing = existing.len()))]
    pub fn find_insertion_point<T: AsRef<str>>(&self, existing: &[T], new_title: &str) -> Option<usize> {
        self.last_match(&SeriesKey::new(new_title), existing)
    }

    /// The most recent entry of the same series in every category that has
    /// one, in the order the categories were given. Never more than one match
    /// per category.
    #[instrument(level = "debug", skip(self, entries))]
    pub fn find_all_matches<I, K, V, T>(&self, entries: I, new_title: &str) -> Vec<SeriesMatch>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[T]>,
        T: AsRef<str>,
    {
        let key = SeriesKey::new(new_title);
        entries
            .into_iter()
            .filter_map(|(category, titles)| {
                let titles = titles.as_ref();
                self.last_match(&key, titles).map(|index| SeriesMatch {
                    category: category.as_ref().to_string(),
                    index,
                    title: titles[index].as_ref().to_string(),
                })
            })
            .collect()
    }

    /// Decides where a quick-added title goes: directly after the most recent
    /// entry of the same series in the first category (in iteration order)
    /// that has one, otherwise at the end of `default_category`.
    #[instrument(level = "debug", skip(self, entries))]
    pub fn plan_placement<I, K, V, T>(&self, entries: I, default_category: &str, new_title: &str) -> Placement
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[T]>,
        T: AsRef<str>,
    {
        let key = SeriesKey::new(new_title);
        let mut default_len = 0;
        for (category, titles) in entries {
            let (category, titles) = (category.as_ref(), titles.as_ref());
            if let Some(index) = self.last_match(&key, titles) {
                tracing::debug!(category, index, "grouping with existing series");
                return Placement::after(SeriesMatch {
                    category: category.to_string(),
                    index,
                    title: titles[index].as_ref().to_string(),
                });
            }
            if category == default_category {
                default_len = titles.len();
            }
        }
        Placement::end_of(default_category, default_len)
    }
}

/// See [`SeriesMatcher::find_insertion_point`].
///
/// ```rust
/// use talenest_extract::find_insertion_point;
/// assert_eq!(find_insertion_point(&["My Show S2 - E14"], "My Show S2 - E15"), Some(0));
/// assert_eq!(find_insertion_point::<&str>(&[], "Anything"), None);
/// ```
pub fn find_insertion_point<T: AsRef<str>>(existing: &[T], new_title: &str) -> Option<usize> {
    SeriesMatcher::default().find_insertion_point(existing, new_title)
}

/// See [`SeriesMatcher::find_all_matches`].
pub fn find_all_matches<I, K, V, T>(entries: I, new_title: &str) -> Vec<SeriesMatch>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<[T]>,
    T: AsRef<str>,
{
    SeriesMatcher::default().find_all_matches(entries, new_title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entries(categories: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        categories
            .iter()
            .map(|(category, titles)| (category.to_string(), titles.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_sole_match() {
        assert_eq!(find_insertion_point(&["My Show S2 - E14"], "My Show S2 - E15"), Some(0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(find_insertion_point::<String>(&[], "Anything"), None);
    }

    #[test]
    fn test_most_recent_wins() {
        let existing = ["My Show Episode 1", "Other Show Episode 1", "My Show Episode 2", "Third Show Episode 9"];
        assert_eq!(find_insertion_point(&existing, "My Show Episode 3"), Some(2));
    }

    #[test]
    fn test_no_match() {
        let existing = ["My Show Episode 1", "Other Show Episode 1"];
        assert_eq!(find_insertion_point(&existing, "Brand New Thing Episode 1"), None);
    }

    #[test]
    fn test_short_keys_do_not_contain_each_other() {
        assert_eq!(find_insertion_point(&["Look Episode 1"], "Ok Episode 1"), None);
        assert_eq!(find_insertion_point(&["Ok Episode 1"], "Look Episode 1"), None);
    }

    #[test]
    fn test_long_keys_contain_each_other() {
        let existing = ["Attack on Titan Episode 3"];
        assert_eq!(find_insertion_point(&existing, "Attack on Titan Final Season Episode 4"), Some(0));
    }

    #[test]
    fn test_marker_only_titles_match_long_titles() {
        // "Episode 1" reduces to an empty key, which every string contains.
        assert_eq!(find_insertion_point(&["Episode 1"], "Attack on Titan Episode 4"), Some(0));
        assert_eq!(find_insertion_point(&["Episode 1"], "Naruto Episode 4"), None);
    }

    #[test]
    fn test_custom_threshold() {
        let matcher = SeriesMatcher::new(3);
        assert_eq!(matcher.find_insertion_point(&["Naruto Episode 3"], "Naruto Shippuden Episode 4"), Some(0));
        assert_eq!(find_insertion_point(&["Naruto Episode 3"], "Naruto Shippuden Episode 4"), Some(0));
        assert_eq!(SeriesMatcher::new(20).find_insertion_point(&["Naruto Episode 3"], "Naruto Shippuden Episode 4"), None);
    }

    #[test]
    fn test_all_matches_one_per_category() {
        let entries = entries(&[
            ("completed", &["My Show S1 - E12", "Other Show Episode 3"]),
            ("dropped", &["Nothing Alike Episode 2"]),
            ("watching", &["My Show S2 - E1", "Other Show Episode 4", "My Show S2 - E2", "My Show S2 - E3"]),
        ]);
        let matches = find_all_matches(&entries, "My Show S2 - E4");
        assert_eq!(
            matches,
            vec![
                SeriesMatch {
                    category: "completed".into(),
                    index: 0,
                    title: "My Show S1 - E12".into(),
                },
                SeriesMatch {
                    category: "watching".into(),
                    index: 3,
                    title: "My Show S2 - E3".into(),
                },
            ]
        );
    }

    #[test]
    fn test_all_matches_none() {
        let entries = entries(&[("watching", &["My Show Episode 1"]), ("completed", &[])]);
        assert!(find_all_matches(&entries, "Different Thing Episode 1").is_empty());
    }

    #[test]
    fn test_all_matches_preserves_given_order() {
        let entries = vec![("b", vec!["Show Episode 1"]), ("a", vec!["Show Episode 2"])];
        let categories: Vec<_> =
            find_all_matches(entries, "Show Episode 3").into_iter().map(|m| m.category).collect();
        assert_eq!(categories, vec!["b", "a"]);
    }

    #[test]
    fn test_placement_groups_with_first_matching_category() {
        let entries = entries(&[
            ("completed", &["Old Thing Episode 9"]),
            ("favorite", &["My Show Episode 1", "My Show Episode 2", "Else Episode 1"]),
            ("watching", &["My Show Episode 5"]),
        ]);
        let placement = SeriesMatcher::default().plan_placement(&entries, "watching", "My Show Episode 3");
        assert_eq!(placement.category, "favorite");
        assert_eq!(placement.index, 2);
        assert_eq!(placement.grouped_with.map(|m| m.title), Some("My Show Episode 2".to_string()));
    }

    #[test]
    fn test_placement_defaults_to_end() {
        let entries = entries(&[("completed", &["Old Thing Episode 9"]), ("watching", &["A Episode 1", "B Episode 1"])]);
        let placement = SeriesMatcher::default().plan_placement(&entries, "watching", "New Thing Episode 1");
        assert_eq!(placement, Placement::end_of("watching", 2));
    }

    #[test]
    fn test_placement_missing_default_category() {
        let entries = entries(&[("completed", &["Old Thing Episode 9"])]);
        let placement = SeriesMatcher::default().plan_placement(&entries, "watching", "New Thing Episode 1");
        assert_eq!(placement, Placement::end_of("watching", 0));
    }
}
