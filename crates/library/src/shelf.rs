//! A board per topic, plus the add-from-page flow that feeds them.

use crate::board::{Board, entry_title};
use crate::error::Result;
use crate::topic::Topic;
use std::collections::BTreeMap;
use talenest_extract::models::Placement;
use talenest_extract::{Extractor, PageProbe, ProbeOptions, SeriesMatcher, Tab, TitleBuilder, extract_from_tab};
use tracing::instrument;

/// Everything the add-from-page flow needs besides the page itself.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub extractor: Extractor<'static>,
    pub probe: ProbeOptions,
    pub titles: TitleBuilder,
    pub matcher: SeriesMatcher,
}

/// What an add-from-page did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    pub topic: Topic,
    /// The title as stored.
    pub title: String,
    pub placement: Placement,
}

/// An entry whose title matched a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub topic: Topic,
    pub category: String,
    pub index: usize,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    boards: BTreeMap<Topic, Board>,
    /// The topic new pages are added to.
    active: Topic,
}

impl Default for Shelf {
    fn default() -> Self {
        Self {
            boards: Topic::ALL.into_iter().map(|topic| (topic, Board::new(topic.default_categories()))).collect(),
            active: Topic::default(),
        }
    }
}

impl Shelf {
    /// A shelf whose boards start with the given categories instead of the
    /// built-in defaults, for the topics named.
    pub fn with_categories(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut shelf = Self::default();
        for (topic, categories) in overrides {
            shelf.boards.insert(topic.parse()?, Board::new(categories));
        }
        Ok(shelf)
    }

    pub fn active(&self) -> Topic {
        self.active
    }

    pub fn set_active(&mut self, topic: Topic) {
        self.active = topic;
    }

    pub fn board(&self, topic: Topic) -> Option<&Board> {
        self.boards.get(&topic)
    }

    pub fn board_mut(&mut self, topic: Topic) -> &mut Board {
        self.boards.entry(topic).or_insert_with(|| Board::new(topic.default_categories()))
    }

    /// Entries across every topic whose title contains `query`, ignoring
    /// case. A blank query finds nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.boards
            .iter()
            .flat_map(|(topic, board)| {
                board.matching(&needle).map(move |(category, index, title)| SearchHit {
                    topic: *topic,
                    category: category.to_string(),
                    index,
                    title: title.to_string(),
                })
            })
            .collect()
    }

    /// Adds the page behind `tab` to the active topic.
    ///
    /// Probes the page for its installment (falling back to the tab's own
    /// title if that fails), builds a canonical title, and places it after
    /// the most recent entry of the same series anywhere on the board, or at
    /// the end of the default category. The tab's URL is remembered.
    #[instrument(skip(self, probe, options), fields(topic = %self.active, url = %tab.url))]
    pub async fn add_from_page<P>(&mut self, probe: &P, tab: &Tab, options: &AddOptions) -> Result<Added>
    where
        P: PageProbe + ?Sized,
    {
        let extraction = extract_from_tab(probe, &options.extractor, tab, &options.probe).await;
        let title = options.titles.build(&extraction.raw_title, &extraction);
        let topic = self.active;
        let placement = self.board_mut(topic).quick_add(&options.matcher, &title, Some(&tab.url))?;
        tracing::info!(category = %placement.category, %title, "added");
        Ok(Added {
            topic,
            title: entry_title(&title).to_string(),
            placement,
        })
    }
}
