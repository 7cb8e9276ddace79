//! Series identity keys.

use crate::consts;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A title with its installment markers and source tag removed, lowercased.
///
/// Only ever compared, never displayed. Distinct series with similar names can
/// collide; that's an accepted cost of matching this loosely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SeriesKey(String);
impl SeriesKey {
    /// Reduces a title to its series key.
    ///
    /// Each marker pattern removes its *first* occurrence only, in a fixed
    /// order: `Chapter N`, `Episode N`, `EN`, `CH N`, `VN`, `SN`, then a
    /// trailing ` - SOURCE-TAG`. The long words go first, otherwise `E\d+`
    /// would turn `Episode 5` into `pisode`. Separators left dangling at
    /// either end are trimmed and inner whitespace collapsed.
    pub fn new(title: &str) -> Self {
        let mut key = title.to_string();
        for pattern in [
            &consts::KEY_CHAPTER,
            &consts::KEY_EPISODE,
            &consts::KEY_E,
            &consts::KEY_CH,
            &consts::KEY_V,
            &consts::KEY_S,
            &consts::KEY_SOURCE_TAG,
        ] {
            key = pattern.replace(&key, "").into_owned();
        }
        let key = consts::KEY_EDGE_SEPARATORS.replace_all(&key, "");
        Self(key.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether `other` names the same series as `self`.
    ///
    /// Equal keys always match. Otherwise one must contain the other, and
    /// `self` must be longer than `threshold` characters; short keys like
    /// `ok` would otherwise match half the library (`look`, `book`, ...).
    /// An empty key is contained in every key, so a marker-only title like
    /// `"Episode 1"` matches any long enough title.
    pub fn matches(&self, other: &SeriesKey, threshold: usize) -> bool {
        if self == other {
            return true;
        }
        if self.len() <= threshold {
            return false;
        }
        self.0.contains(other.as_str()) || other.0.contains(self.as_str())
    }
}
impl From<&str> for SeriesKey {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}
impl AsRef<str> for SeriesKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl Display for SeriesKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Reduces a title to its [`SeriesKey`].
///
/// ```rust
/// use talenest_extract::series_key;
/// assert_eq!(series_key("My Show S2 - E14"), series_key("My Show S2 - E15"));
/// assert_eq!(series_key("My Show S2 - E14").as_str(), "my show");
/// ```
pub fn series_key(title: &str) -> SeriesKey {
    SeriesKey::new(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("My Show S2 - E14", "my show")]
    #[case("My Show Episode 4", "my show")]
    #[case("Solo Leveling Chapter 110", "solo leveling")]
    #[case("Berserk V3 CH22", "berserk")]
    #[case("Some Novel Chapter 5 - WTR-LAB", "some novel")]
    #[case("Some Novel - Chapter 5", "some novel")]
    #[case("  Spaced   Out   Title  Episode 2 ", "spaced out title")]
    #[case("Episode 4", "")]
    fn test_series_key(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(series_key(title).as_str(), expected);
    }

    #[test]
    fn test_long_words_before_short_markers() {
        // Were `E\d+` applied first, this would leave a stray "pisode".
        assert_eq!(series_key("Frieren Episode 5").as_str(), "frieren");
    }

    #[test]
    fn test_first_occurrence_only() {
        assert_eq!(series_key("Show E1 E2").as_str(), "show e2");
    }

    #[test]
    fn test_lowercase_words_are_not_source_tags() {
        assert_eq!(series_key("Attack on Titan - Final").as_str(), "attack on titan - final");
    }

    #[rstest]
    #[case("my show", "my show", true)]
    #[case("ok", "look", false)]
    #[case("look", "ok", false)]
    #[case("one piece", "one piece film red", false)]
    #[case("one piece film red", "one piece", true)]
    #[case("attack on titan final season", "attack on titan", true)]
    #[case("a long enough title", "", true)]
    #[case("short", "", false)]
    #[case("", "", true)]
    fn test_matches(#[case] key: &str, #[case] other: &str, #[case] expected: bool) {
        let key = SeriesKey(key.to_string());
        let other = SeriesKey(other.to_string());
        assert_eq!(key.matches(&other, 10), expected);
    }
}
