//! The boundary with browser page scripting.
//!
//! Scripting a live page is the only part of an add-action that can fail or
//! hang. Every failure (restricted scheme, blocked injection, page error,
//! timeout) is absorbed here and turned into a degraded [`Extraction`] that
//! carries only what the browser already knew about the tab.

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockProbe;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::extract::{Extractor, PageSnapshot};
use crate::models::Extraction;
use crate::snippet::{DEFAULT_BODY_CHARS, safe_text_truncate};
use async_trait::async_trait;
use exn::ResultExt;
use std::time::Duration;
use tracing::instrument;

/// Default deadline for a page probe to answer.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// A browser tab, as known without running anything inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tab {
    pub url: String,
    pub title: String,
}
impl Tab {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Runs a script inside a tab's page and reports what it sees.
///
/// Implementations report their own failures as
/// [`ErrorKind::ProbeFailed`]; restricted schemes and timeouts are handled by
/// [`extract_from_tab`] before and around the call.
///
/// ```
/// use talenest_extract::{PageProbe, PageSnapshot, Tab, error::Result};
///
/// async fn page_title(probe: &dyn PageProbe, tab: &Tab) -> Result<String> {
///     let PageSnapshot { title, .. } = probe.snapshot(tab).await?;
///     Ok(title)
/// }
/// ```
#[async_trait]
pub trait PageProbe: Send + Sync {
    async fn snapshot(&self, tab: &Tab) -> Result<PageSnapshot>;
}

/// Limits placed on page probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub timeout: Duration,
    /// Characters of body text kept for extraction.
    pub body_chars: usize,
    /// URL prefixes that are never probed.
    pub restricted_schemes: Vec<String>,
}
impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            body_chars: DEFAULT_BODY_CHARS,
            restricted_schemes: consts::RESTRICTED_SCHEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
impl ProbeOptions {
    pub fn is_restricted(&self, url: &str) -> bool {
        self.restricted_schemes.iter().any(|scheme| url.starts_with(scheme.as_str()))
    }
}

async fn snapshot<P>(probe: &P, tab: &Tab, options: &ProbeOptions) -> Result<PageSnapshot>
where
    P: PageProbe + ?Sized,
{
    if options.is_restricted(&tab.url) {
        exn::bail!(ErrorKind::Restricted(tab.url.clone()));
    }
    tokio::time::timeout(options.timeout, probe.snapshot(tab)).await.or_raise(|| ErrorKind::Timeout(options.timeout))?
}

/// Probes the page behind `tab` and extracts its installment.
///
/// Never fails. If the page can't be probed, the result is
/// [`Extraction::degraded`] with the tab's own title and URL, and the
/// add-action carries on from there. There are no retries.
#[instrument(skip(probe, extractor, options), fields(url = %tab.url))]
pub async fn extract_from_tab<P>(probe: &P, extractor: &Extractor<'_>, tab: &Tab, options: &ProbeOptions) -> Extraction
where
    P: PageProbe + ?Sized,
{
    match snapshot(probe, tab, options).await {
        Ok(page) => {
            let body = safe_text_truncate(&page.body, options.body_chars);
            extractor.extract(&page.url, &page.title, body)
        },
        Err(error) => {
            tracing::warn!(?error, "page extraction unavailable, falling back to tab title");
            Extraction::degraded(tab.title.clone(), tab.url.clone())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Installment, Kind};
    use rstest::rstest;

    fn tab(url: &str) -> Tab {
        Tab::new(url, "Watch My Show Episode 3 - Crunchyroll")
    }

    #[rstest]
    #[case("chrome://extensions")]
    #[case("chrome-extension://abcdef/popup.html")]
    #[case("about:blank")]
    #[case("edge://settings")]
    fn test_restricted(#[case] url: &str) {
        assert!(ProbeOptions::default().is_restricted(url));
    }

    #[rstest]
    #[case("https://example.com/watch?ep=3")]
    #[case("http://example.com/about:blank")]
    fn test_not_restricted(#[case] url: &str) {
        assert!(!ProbeOptions::default().is_restricted(url));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_probe_success() {
        let probe = MockProbe::respond(PageSnapshot::new(
            "https://example.com/watch/my-show?ep=4",
            "Watch My Show Episode 3 - Crunchyroll",
            "",
        ));
        let found =
            extract_from_tab(&probe, &Extractor::default(), &tab("https://example.com/"), &ProbeOptions::default()).await;
        assert_eq!(found.installment, Some(Installment::Episode { episode: "4".into() }));
        assert_eq!(found.raw_url, "https://example.com/watch/my-show?ep=4");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_restricted_never_probes() {
        let probe = MockProbe::respond(PageSnapshot::new("chrome://newtab", "New Tab", "Episode 1"));
        let found = extract_from_tab(&probe, &Extractor::default(), &tab("chrome://newtab"), &ProbeOptions::default()).await;
        assert_eq!(found, Extraction::degraded("Watch My Show Episode 3 - Crunchyroll", "chrome://newtab"));
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_probe_failure_degrades() {
        let probe = MockProbe::fail("injection blocked");
        let found =
            extract_from_tab(&probe, &Extractor::default(), &tab("https://example.com/"), &ProbeOptions::default()).await;
        assert_eq!(found.kind(), None);
        assert_eq!(found.raw_title, "Watch My Show Episode 3 - Crunchyroll");
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_probe_timeout_degrades() {
        let probe = MockProbe::stall();
        let options = ProbeOptions {
            timeout: Duration::from_millis(250),
            ..ProbeOptions::default()
        };
        let found = extract_from_tab(&probe, &Extractor::default(), &tab("https://example.com/"), &options).await;
        assert_eq!(found, Extraction::degraded("Watch My Show Episode 3 - Crunchyroll", "https://example.com/"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_body_is_truncated() {
        let body = format!("{}Chapter 9", "x".repeat(600));
        let probe = MockProbe::respond(PageSnapshot::new("https://example.com/novel", "My Novel", body.clone()));
        let extractor = Extractor::default();
        let found = extract_from_tab(&probe, &extractor, &tab("https://example.com/novel"), &ProbeOptions::default()).await;
        assert_eq!(found.installment, None);

        let options = ProbeOptions {
            body_chars: 1000,
            ..ProbeOptions::default()
        };
        let found = extract_from_tab(&probe, &extractor, &tab("https://example.com/novel"), &options).await;
        assert_eq!(found.kind(), Some(Kind::Chapter));
    }
}
