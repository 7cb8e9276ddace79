//! Topic shelves of categorized bookmarks.
//!
//! A [`Shelf`] holds one [`Board`] per [`Topic`]; a board is an ordered set
//! of categories, each an ordered list of titles. New titles are grouped with
//! earlier installments of the same series wherever those live on the board.

mod board;
pub mod error;
mod shelf;
mod topic;

pub use crate::board::{Board, Category, PLACEHOLDER_TITLE};
pub use crate::shelf::{AddOptions, Added, SearchHit, Shelf};
pub use crate::topic::Topic;
