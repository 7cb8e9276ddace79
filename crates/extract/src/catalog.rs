//! Ordered recognition rules for installment markers.
//!
//! Rule order is precedence: explicit query parameters and path markers come
//! first, loose textual markers after, compound season/volume markers last.
//! The first rule that matches wins. Each rule carries its [`Kind`] from the
//! moment it's defined, so the capture groups always mean the same thing.

use crate::models::{Installment, Kind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::instrument;

static STANDARD: LazyLock<Catalog> = LazyLock::new(Catalog::build_standard);

/// How much a rule's match can be trusted relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// Tried in catalog order.
    Strong,
    /// Only tried once no strong rule matched the same text. Bare `-e14`
    /// style markers are too easily part of something else (`s2e14`).
    Weak,
}

/// Which rules a scan is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every rule in the catalog.
    All,
    /// Only strong single-number episode and chapter rules; page body text
    /// is too noisy to trust the compound or bare `-e14` forms.
    Simple,
}
impl Scope {
    fn admits(&self, rule: &Rule) -> bool {
        match self {
            Scope::All => true,
            Scope::Simple => !rule.kind.is_compound() && rule.confidence == Confidence::Strong,
        }
    }
}

/// One regular expression and the kind of marker it recognises.
#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    regex: Regex,
    kind: Kind,
    confidence: Confidence,
}
impl Rule {
    fn new(name: &'static str, pattern: &str, kind: Kind, confidence: Confidence) -> Self {
        // Patterns are compile-time constants.
        let regex = Regex::new(&format!("(?i){pattern}")).unwrap();
        Self {
            name,
            regex,
            kind,
            confidence,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Reads an installment out of the first match in `text`.
    ///
    /// Single-number kinds read capture group 1. Compound kinds read the
    /// season/volume from group 1 and the episode/chapter from group 2.
    pub fn capture(&self, text: &str) -> Option<Installment> {
        let captures = self.regex.captures(text)?;
        let group = |i: usize| captures.get(i).map(|m| m.as_str().to_string());
        Some(match self.kind {
            Kind::Episode => Installment::Episode { episode: group(1)? },
            Kind::Chapter => Installment::Chapter { chapter: group(1)? },
            Kind::SeasonEpisode => Installment::SeasonEpisode {
                season: group(1)?,
                episode: group(2)?,
            },
            Kind::VolumeChapter => Installment::VolumeChapter {
                volume: group(1)?,
                chapter: group(2)?,
            },
        })
    }
}

/// The ordered list of rules.
#[derive(Debug)]
pub struct Catalog {
    rules: Vec<Rule>,
}
impl Catalog {
    /// The built-in catalog, compiled once.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    fn build_standard() -> Self {
        use Confidence::{Strong, Weak};
        use Kind::{Chapter, Episode, SeasonEpisode, VolumeChapter};
        Self {
            rules: vec![
                // Query and path markers
                Rule::new("query-ep", r"[?&]ep=(\d+)", Episode, Strong),
                Rule::new("query-episode", r"[?&]episode=(\d+)", Episode, Strong),
                Rule::new("query-ch", r"[?&]ch=(\d+)", Chapter, Strong),
                Rule::new("query-chapter", r"[?&]chapter=(\d+)", Chapter, Strong),
                Rule::new("path-episode", r"episode[-_](\d+)", Episode, Strong),
                Rule::new("path-ep", r"ep[-_](\d+)", Episode, Strong),
                Rule::new("dash-e", r"-e(\d+)\b", Episode, Weak),
                Rule::new("slash-e", r"/e(\d+)\b", Episode, Weak),
                // Textual markers
                Rule::new("slug-chapter", r"chapter[-_](\d+)", Chapter, Strong),
                Rule::new("slug-ch", r"ch[-_](\d+)", Chapter, Strong),
                Rule::new("text-episode", r"episode\s*(\d+)", Episode, Strong),
                Rule::new("text-ep", r"ep\.\s*(\d+)", Episode, Strong),
                Rule::new("text-chapter", r"chapter\s*(\d+)", Chapter, Strong),
                Rule::new("text-ch", r"ch\.\s*(\d+)", Chapter, Strong),
                // Compound markers
                Rule::new("short-season-episode", r"s(\d+)e(\d+)", SeasonEpisode, Strong),
                Rule::new("long-season-episode", r"season\s*(\d+)\s*episode\s*(\d+)", SeasonEpisode, Strong),
                Rule::new("short-volume-chapter", r"v(\d+)\s*ch(\d+)", VolumeChapter, Strong),
                Rule::new("long-volume-chapter", r"vol\.\s*(\d+)\s*ch\.\s*(\d+)", VolumeChapter, Strong),
            ],
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Finds the first rule (by confidence, then catalog order) that matches
    /// `text` within `scope`.
    #[instrument(level = "trace", skip(self, text), fields(text_len = text.len()))]
    pub fn scan(&self, text: &str, scope: Scope) -> Option<(&Rule, Installment)> {
        [Confidence::Strong, Confidence::Weak].into_iter().find_map(|confidence| {
            self.rules
                .iter()
                .filter(|rule| rule.confidence == confidence && scope.admits(rule))
                .find_map(|rule| rule.capture(text).map(|installment| (rule, installment)))
        })
    }
}
