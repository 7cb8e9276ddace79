use super::Kind;

/// The installment numbers recognised on a page.
///
/// Numbers are kept exactly as they appeared (digits only, leading zeros
/// untouched). The compound variants always carry both of their numbers, so
/// there is no way to hold a season without an episode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum Installment {
    Episode { episode: String },
    Chapter { chapter: String },
    SeasonEpisode { season: String, episode: String },
    VolumeChapter { volume: String, chapter: String },
}
impl Installment {
    pub fn kind(&self) -> Kind {
        match self {
            Installment::Episode { .. } => Kind::Episode,
            Installment::Chapter { .. } => Kind::Chapter,
            Installment::SeasonEpisode { .. } => Kind::SeasonEpisode,
            Installment::VolumeChapter { .. } => Kind::VolumeChapter,
        }
    }

    /// The episode or chapter number, whichever this installment counts in.
    pub fn number(&self) -> &str {
        match self {
            Installment::Episode { episode } | Installment::SeasonEpisode { episode, .. } => episode,
            Installment::Chapter { chapter } | Installment::VolumeChapter { chapter, .. } => chapter,
        }
    }

    pub fn season(&self) -> Option<&str> {
        match self {
            Installment::SeasonEpisode { season, .. } => Some(season),
            _ => None,
        }
    }

    pub fn volume(&self) -> Option<&str> {
        match self {
            Installment::VolumeChapter { volume, .. } => Some(volume),
            _ => None,
        }
    }
}
