use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which family of installment marker a catalog rule recognises.
///
/// The kind decides how a [`Installment`](super::Installment) is read out of
/// the rule's capture groups, and how it is later written into a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Kind {
    /// `Episode 4`, `?ep=4`, `ep-4`
    Episode,
    /// `Chapter 22`, `?chapter=22`, `ch. 22`
    Chapter,
    /// `s2e14`, `Season 2 Episode 14`
    SeasonEpisode,
    /// `v3ch22`, `Vol. 3 Ch. 22`
    VolumeChapter,
}
impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Episode => "episode",
            Kind::Chapter => "chapter",
            Kind::SeasonEpisode => "season-episode",
            Kind::VolumeChapter => "volume-chapter",
        }
    }

    /// Compound kinds carry a second number (season or volume) alongside the
    /// episode/chapter number.
    pub fn is_compound(&self) -> bool {
        matches!(self, Kind::SeasonEpisode | Kind::VolumeChapter)
    }
}
impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
