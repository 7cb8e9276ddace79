use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Site names whose branding is stripped from the end of a page title.
pub const KNOWN_SITES: &[&str] = &[
    "Crunchyroll",
    "Funimation",
    "Netflix",
    "Hulu",
    "MAL",
    "MyAnimeList",
    "MangaDex",
    "Anicrush",
    "AnimeDao",
    "GogoAnime",
    "9anime",
    "Zoro.to",
    "AnimeFlix",
    "WebNovel",
];

/// Schemes that page scripts can never be injected into.
pub const RESTRICTED_SCHEMES: &[&str] = &["chrome://", "chrome-extension://", "about:", "edge://"];

// Title cleanup, applied in this order.
regex!(LEADING_VERB, r"(?i)^\s*(?:Watch|Read|Stream)\s+");
// Descriptors only count when nothing but more descriptors, or an `on`/`at` tail, follows them.
regex!(
    DESCRIPTOR_SUFFIX,
    r"(?i)(?:\s+(?:Online|Free|HD|(?:English\s+|Eng\s+)?(?:Dubbed|Subbed|Sub|Dub))\b)+(?:\s+(?:on|at)\b.*)?\s*$"
);
regex!(SEASON_IN_TITLE, r"(?i)\bSeason\s*(\d+)");

// Installment markers already present at the end of a title, removed before a fresh one is
// appended. Each may be followed by a decimal part and bracketed notes like `(Final)`.
regex!(SEASON_EPISODE_MARKER, r"(?i)\s*(?:[-—–|:]\s*)?\bS\d+\s*[-.]?\s*E\d+(?:\.\d+)?(?:\s*[(\[][^)\]]*[)\]])*\s*$");
regex!(
    VOLUME_CHAPTER_MARKER,
    r"(?i)\s*(?:[-—–|:]\s*)?\bV(?:ol)?\.?\s*\d+\s*[-.]?\s*Ch(?:apter)?\.?\s*\d+(?:\.\d+)?(?:\s*[(\[][^)\]]*[)\]])*\s*$"
);
regex!(
    EPISODE_MARKER,
    r"(?i)\s*(?:[-—–|:]\s*)?\b(?:Episode|Ep|Chapter|Ch)\.?\s*\d+(?:\.\d+)?(?:\s*[(\[][^)\]]*[)\]])*\s*$"
);
regex!(VOLUME_MARKER, r"(?i)\s*(?:[-—–|:]\s*)?\bVol(?:ume)?\.?\s*\d+\s*$");
regex!(SEASON_MARKER, r"(?i)\s*(?:[-—–|:]\s*)?\bSeason\s*\d+\s*$");
regex!(TRAILING_NUMBER, r"\s*\d+\s*$");
regex!(TRAILING_SEPARATOR, r"\s*[-—–|:]+\s*$");

// Cosmetic marker layout.
regex!(SEASON_EPISODE_FORMAT, r"(?i)\b(S\d+)[ .-]?E(\d+)");
regex!(VOLUME_CHAPTER_FORMAT, r"(?i)\b(V\d+)[ .-]?CH(\d+)");

// Series key reduction, applied in this order, first occurrence only.
regex!(KEY_CHAPTER, r"(?i)Chapter\s+\d+");
regex!(KEY_EPISODE, r"(?i)Episode\s+\d+");
regex!(KEY_E, r"(?i)E\d+");
regex!(KEY_CH, r"(?i)CH\s*\d+");
regex!(KEY_V, r"(?i)V\d+");
regex!(KEY_S, r"(?i)S\d+");
regex!(KEY_SOURCE_TAG, r"\s*-\s*[A-Z][A-Z0-9-]*\s*$");
regex!(KEY_EDGE_SEPARATORS, r"^[\s\-—–|:]+|[\s\-—–|:]+$");
