use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use talenest_extract::{
    DEFAULT_BODY_CHARS, DEFAULT_CONTAINMENT_THRESHOLD, DEFAULT_PROBE_TIMEOUT, ProbeOptions, RESTRICTED_SCHEMES,
    SeriesMatcher, TitleBuilder,
};
use talenest_library::{Shelf, Topic};

/// Page probing limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub timeout_ms: u64,
    pub body_chars: usize,
    pub restricted_schemes: Vec<String>,
}
impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: u64::try_from(DEFAULT_PROBE_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            body_chars: DEFAULT_BODY_CHARS,
            restricted_schemes: RESTRICTED_SCHEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
impl ProbeConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            exn::bail!(ErrorKind::InvalidValue {
                field: "probe.timeout_ms",
                value: self.timeout_ms.to_string(),
            });
        }
        if self.body_chars == 0 {
            exn::bail!(ErrorKind::InvalidValue {
                field: "probe.body_chars",
                value: self.body_chars.to_string(),
            });
        }
        // A blank prefix matches every URL and would disable probing entirely.
        if let Some(blank) = self.restricted_schemes.iter().find(|s| s.trim().is_empty()) {
            exn::bail!(ErrorKind::InvalidValue {
                field: "probe.restricted_schemes",
                value: format!("{blank:?}"),
            });
        }
        Ok(())
    }

    pub fn options(&self) -> ProbeOptions {
        ProbeOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            body_chars: self.body_chars,
            restricted_schemes: self.restricted_schemes.clone(),
        }
    }
}

/// Title normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Site names stripped from titles on top of the built-in list.
    pub extra_sites: Vec<String>,
}
impl TitleConfig {
    pub fn builder(&self) -> Result<TitleBuilder> {
        TitleBuilder::with_extra_sites(&self.extra_sites).or_raise(|| ErrorKind::InvalidValue {
            field: "title.extra_sites",
            value: self.extra_sites.join(", "),
        })
    }
}

/// Series matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub containment_threshold: usize,
}
impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            containment_threshold: DEFAULT_CONTAINMENT_THRESHOLD,
        }
    }
}
impl MatchingConfig {
    pub fn matcher(&self) -> SeriesMatcher {
        SeriesMatcher::new(self.containment_threshold)
    }
}

/// Shelf layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Category names per topic, replacing that topic's built-in defaults.
    pub topics: BTreeMap<String, Vec<String>>,
}
impl LibraryConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        for (topic, categories) in &self.topics {
            topic.parse::<Topic>().or_raise(|| ErrorKind::InvalidValue {
                field: "library.topics",
                value: format!("unknown topic {topic}"),
            })?;
            if categories.iter().any(|c| c.trim().is_empty()) {
                exn::bail!(ErrorKind::InvalidValue {
                    field: "library.topics",
                    value: format!("blank category in {topic}"),
                });
            }
        }
        Ok(())
    }

    /// A shelf with these categories in place of the built-in ones.
    pub fn shelf(&self) -> Result<Shelf> {
        Shelf::with_categories(&self.topics).or_raise(|| ErrorKind::InvalidValue {
            field: "library.topics",
            value: self.topics.keys().cloned().collect::<Vec<_>>().join(", "),
        })
    }
}
