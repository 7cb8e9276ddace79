use super::{Installment, Kind};

/// Everything learned about the current page during one add-action.
///
/// An extraction without an [`Installment`] is a normal outcome, not an
/// error: plenty of pages have no discoverable episode metadata, and pages
/// that couldn't be probed at all end up here too.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extraction {
    /// Page (or tab) title, as observed.
    pub raw_title: String,
    /// Page (or tab) URL, as observed.
    pub raw_url: String,
    pub installment: Option<Installment>,
}
impl Extraction {
    pub fn new(raw_title: impl Into<String>, raw_url: impl Into<String>, installment: Option<Installment>) -> Self {
        Self {
            raw_title: raw_title.into(),
            raw_url: raw_url.into(),
            installment,
        }
    }

    /// The result handed back when the page couldn't be scripted: only what
    /// the browser already knew about the tab.
    pub fn degraded(raw_title: impl Into<String>, raw_url: impl Into<String>) -> Self {
        Self::new(raw_title, raw_url, None)
    }

    pub fn kind(&self) -> Option<Kind> {
        self.installment.as_ref().map(Installment::kind)
    }

    pub fn episode_number(&self) -> Option<&str> {
        self.installment.as_ref().map(Installment::number)
    }

    pub fn season_number(&self) -> Option<&str> {
        self.installment.as_ref().and_then(Installment::season)
    }

    pub fn volume_number(&self) -> Option<&str> {
        self.installment.as_ref().and_then(Installment::volume)
    }
}
