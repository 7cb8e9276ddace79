use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// The top-level tabs of a shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Topic {
    #[default]
    Anime,
    Manga,
    Fiction,
    Misc,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Anime, Topic::Manga, Topic::Fiction, Topic::Misc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Fiction => "fiction",
            Self::Misc => "misc",
        }
    }

    /// Categories a fresh board for this topic starts with.
    pub fn default_categories(&self) -> &'static [&'static str] {
        match self {
            Self::Anime => &["favorite", "watching", "completed"],
            Self::Manga => &["favorite", "reading", "completed"],
            Self::Fiction => &["favorite", "fanfics", "novel", "completed"],
            Self::Misc => &["favorite"],
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let Some(topic) = Self::ALL.into_iter().find(|topic| topic.as_str().eq_ignore_ascii_case(wanted)) else {
            exn::bail!(ErrorKind::UnknownTopic(s.to_string()));
        };
        Ok(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("anime", Topic::Anime)]
    #[case("Manga", Topic::Manga)]
    #[case(" fiction ", Topic::Fiction)]
    #[case("MISC", Topic::Misc)]
    fn test_parse(#[case] input: &str, #[case] expected: Topic) {
        assert_eq!(input.parse::<Topic>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "movies".parse::<Topic>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownTopic(name) if name == "movies"));
    }

    #[test]
    fn test_display_round_trips() {
        for topic in Topic::ALL {
            assert_eq!(topic.to_string().parse::<Topic>().unwrap(), topic);
        }
    }

    #[test]
    fn test_every_topic_has_a_favorite_first() {
        for topic in Topic::ALL {
            assert_eq!(topic.default_categories().first(), Some(&"favorite"));
        }
    }
}
