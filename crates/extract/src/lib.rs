//! Installment extraction and series matching for bookmarked pages.
//!
//! Given what a browser knows about a page (URL, title, a snippet of body
//! text) this crate works out which episode or chapter it is, turns the
//! page title into a canonical display title, and finds where a new title
//! belongs among existing entries of the same series.
//!
//! ```rust
//! use talenest_extract::{build_title, extract, find_insertion_point};
//!
//! let found = extract("https://example.com/watch/my-show?ep=4", "Watch My Show Episode 3 - Crunchyroll", "");
//! let title = build_title(&found.raw_title, &found);
//! assert_eq!(title, "My Show Episode 4");
//! assert_eq!(find_insertion_point(&["My Show Episode 2", "My Show Episode 3", "Other"], &title), Some(1));
//! ```

mod catalog;
mod consts;
pub mod error;
mod extract;
mod matcher;
pub mod models;
mod page;
mod series;
mod snippet;
mod title;

pub use crate::catalog::{Catalog, Confidence, Rule, Scope};
pub use crate::consts::{KNOWN_SITES, RESTRICTED_SCHEMES};
pub use crate::extract::{Extractor, PageSnapshot, Source, extract};
pub use crate::matcher::{DEFAULT_CONTAINMENT_THRESHOLD, SeriesMatcher, find_all_matches, find_insertion_point};
#[cfg(any(test, feature = "mock"))]
pub use crate::page::MockProbe;
pub use crate::page::{DEFAULT_PROBE_TIMEOUT, PageProbe, ProbeOptions, Tab, extract_from_tab};
pub use crate::series::{SeriesKey, series_key};
pub use crate::snippet::{DEFAULT_BODY_CHARS, safe_text_truncate};
pub use crate::title::{TitleBuilder, build_title, format_markers};
