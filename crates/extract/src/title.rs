//! Canonical display titles.
//!
//! A page title such as `"Watch My Show Episode 3 - Crunchyroll"` becomes
//! `"My Show Episode 4"` when the page turned out to be episode 4: site
//! branding and marketing noise are dropped, any installment marker already
//! in the title is replaced by one built from the [`Extraction`], and
//! season/volume markers are laid out consistently.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{Extraction, Kind};
use exn::ResultExt;
use regex::{Regex, escape as regex_escape};
use std::sync::LazyLock;
use tracing::instrument;

static STANDARD: LazyLock<TitleBuilder> = LazyLock::new(|| TitleBuilder {
    site_suffix: TitleBuilder::site_suffix_regex(consts::KNOWN_SITES.iter().copied()).unwrap(),
});

/// Builds canonical titles, stripping a configurable set of site names.
#[derive(Debug, Clone)]
pub struct TitleBuilder {
    site_suffix: Regex,
}
impl Default for TitleBuilder {
    fn default() -> Self {
        STANDARD.clone()
    }
}
impl TitleBuilder {
    /// A builder that strips the built-in [`KNOWN_SITES`](consts::KNOWN_SITES)
    /// plus `extra_sites`. Blank names are ignored.
    pub fn with_extra_sites(extra_sites: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Self> {
        let extra: Vec<String> = extra_sites
            .into_iter()
            .map(|site| site.as_ref().trim().to_string())
            .filter(|site| !site.is_empty())
            .collect();
        if extra.is_empty() {
            return Ok(Self::default());
        }
        let sites = consts::KNOWN_SITES.iter().copied().chain(extra.iter().map(String::as_str));
        Ok(Self {
            site_suffix: Self::site_suffix_regex(sites)?,
        })
    }

    fn site_suffix_regex<'a>(sites: impl Iterator<Item = &'a str>) -> Result<Regex> {
        let alternatives = sites.map(regex_escape).collect::<Vec<_>>().join("|");
        // The name must end at a non-word character, so `MAL` doesn't eat `- Malevolent`.
        let pattern = format!(r"(?i)\s*[-|]\s*(?:{alternatives})(?:\W.*)?$");
        Regex::new(&pattern).or_raise(|| ErrorKind::InvalidPattern(pattern.clone()))
    }

    /// Turns a raw page title into a canonical display title.
    ///
    /// 1. Drops a leading `Watch`/`Read`/`Stream`.
    /// 2. Drops a trailing `- Site Name` or `| Site Name` segment.
    /// 3. Drops trailing descriptors (`Online`, `Free`, `HD`, `Sub`, `Dub`, ...).
    /// 4. Borrows the season number from a `Season N` in the title when the
    ///    extraction has none.
    /// 5. With an episode number, replaces whatever installment marker the
    ///    title already has with one built from the extraction.
    /// 6. Lays out `S2E14` as `S2 - E14` and `V3CH22` as `V3 CH22`.
    ///
    /// Without an episode number the result is the cleaned up raw title.
    #[instrument(level = "debug", skip(self, extraction), fields(kind))]
    pub fn build(&self, raw_title: &str, extraction: &Extraction) -> String {
        let title = consts::LEADING_VERB.replace(raw_title.trim(), "");
        let title = self.site_suffix.replace(&title, "");
        let mut title = consts::DESCRIPTOR_SUFFIX.replace(&title, "").into_owned();

        if let Some(episode) = extraction.episode_number() {
            let kind = extraction.kind();
            if let Some(kind) = kind {
                tracing::Span::current().record("kind", kind.as_str());
            }
            let season = extraction.season_number().map(str::to_string).or_else(|| {
                consts::SEASON_IN_TITLE.captures(&title).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
            });
            let suffix = match (season, kind, extraction.volume_number()) {
                (Some(season), _, _) => format!("S{season} - E{episode}"),
                (None, Some(Kind::VolumeChapter), Some(volume)) => format!("V{volume} CH{episode}"),
                (None, Some(Kind::Chapter), _) => format!("Chapter {episode}"),
                _ => format!("Episode {episode}"),
            };
            let base = strip_markers(&title);
            title = if base.is_empty() { suffix } else { format!("{base} {suffix}") };
        }

        format_markers(title.trim())
    }
}

/// Removes installment markers from the end of a title, then a dangling
/// separator. A bare trailing number only counts as a marker when the title
/// has no explicit one, so `"Mob Psycho 100 Episode 3"` keeps its `100`.
fn strip_markers(title: &str) -> String {
    let mut title = title.to_string();
    let mut stripped = false;
    for marker in [
        &consts::SEASON_EPISODE_MARKER,
        &consts::VOLUME_CHAPTER_MARKER,
        &consts::EPISODE_MARKER,
        &consts::VOLUME_MARKER,
        &consts::SEASON_MARKER,
    ] {
        if marker.is_match(&title) {
            title = marker.replace(&title, "").into_owned();
            stripped = true;
        }
    }
    if !stripped {
        title = consts::TRAILING_NUMBER.replace(&title, "").into_owned();
    }
    consts::TRAILING_SEPARATOR.replace(&title, "").trim().to_string()
}

/// Builds a canonical title with the built-in site list. See
/// [`TitleBuilder::build`].
///
/// ```rust
/// use talenest_extract::{build_title, models::{Extraction, Installment}};
/// let extraction = Extraction::new(
///     "Watch My Show Episode 3 - Crunchyroll",
///     "https://example.com",
///     Some(Installment::Episode { episode: "4".into() }),
/// );
/// assert_eq!(build_title(&extraction.raw_title, &extraction), "My Show Episode 4");
/// ```
pub fn build_title(raw_title: &str, extraction: &Extraction) -> String {
    STANDARD.build(raw_title, extraction)
}

/// Rewrites every `S<n>E<m>` shape as `S<n> - E<m>` and every `V<n>CH<m>`
/// shape as `V<n> CH<m>`, where the two halves may be separated by nothing, a
/// space, a dot or a dash. Applying it twice changes nothing further.
pub fn format_markers(title: &str) -> String {
    let title = consts::SEASON_EPISODE_FORMAT.replace_all(title, "${1} - E${2}");
    consts::VOLUME_CHAPTER_FORMAT.replace_all(&title, "${1} CH${2}").into_owned()
}
