//! Installment extraction from what a page exposes.

use crate::catalog::{Catalog, Scope};
use crate::models::Extraction;
use tracing::instrument;

/// What page scripting reports about the current page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    /// Leading visible text of the page.
    pub body: String,
}
impl PageSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Where on the page an installment marker was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Source {
    #[display("url")]
    Url,
    #[display("title")]
    Title,
    #[display("body")]
    Body,
}
impl Source {
    /// Sources in the order they're consulted, with the rules each may use.
    const TIERS: [(Source, Scope); 3] = [
        (Source::Url, Scope::All),
        (Source::Title, Scope::All),
        (Source::Body, Scope::Simple),
    ];
}

/// Applies a [`Catalog`] to the URL, then the title, then the body of a page.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'c> {
    catalog: &'c Catalog,
}
impl Default for Extractor<'static> {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}
impl<'c> Extractor<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Scans the whole catalog against the URL; failing that, against the
    /// title; failing that, the episode and chapter rules only against the
    /// body. The first match wins.
    ///
    /// Finding nothing is not an error: the returned [`Extraction`] simply
    /// carries no installment.
    #[instrument(level = "debug", skip(self, body), fields(body_len = body.len()))]
    pub fn extract(&self, url: &str, title: &str, body: &str) -> Extraction {
        for (source, scope) in Source::TIERS {
            let text = match source {
                Source::Url => url,
                Source::Title => title,
                Source::Body => body,
            };
            if let Some((rule, installment)) = self.catalog.scan(text, scope) {
                tracing::debug!(%source, rule = rule.name(), kind = %rule.kind(), "installment marker found");
                return Extraction::new(title, url, Some(installment));
            }
        }
        tracing::debug!("no installment marker found");
        Extraction::new(title, url, None)
    }

    pub fn extract_snapshot(&self, snapshot: &PageSnapshot) -> Extraction {
        self.extract(&snapshot.url, &snapshot.title, &snapshot.body)
    }
}

/// Extracts with the standard catalog. See [`Extractor::extract`].
///
/// ```rust
/// use talenest_extract::{extract, models::Kind};
/// let found = extract("https://example.com/watch/my-show?ep=7", "Watch My Show", "");
/// assert_eq!(found.episode_number(), Some("7"));
/// assert_eq!(found.kind(), Some(Kind::Episode));
/// ```
pub fn extract(url: &str, title: &str, body: &str) -> Extraction {
    Extractor::default().extract(url, title, body)
}
