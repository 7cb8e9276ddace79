//! Scripted page probe for testing.

use super::{PageProbe, Tab};
use crate::error::{ErrorKind, Result};
use crate::extract::PageSnapshot;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Behaviour {
    Respond(PageSnapshot),
    Fail(String),
    Stall,
}

/// A [`PageProbe`] that always behaves the same way, whatever the tab.
///
/// Counts how many times it was asked, so tests can assert that restricted
/// pages are never probed at all.
pub struct MockProbe {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl MockProbe {
    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers every probe with `snapshot`.
    pub fn respond(snapshot: PageSnapshot) -> Self {
        Self::with(Behaviour::Respond(snapshot))
    }

    /// Fails every probe with [`ErrorKind::ProbeFailed`].
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::with(Behaviour::Fail(reason.into()))
    }

    /// Never answers.
    pub fn stall() -> Self {
        Self::with(Behaviour::Stall)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageProbe for MockProbe {
    async fn snapshot(&self, _tab: &Tab) -> Result<PageSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Respond(snapshot) => Ok(snapshot.clone()),
            Behaviour::Fail(reason) => {
                exn::bail!(ErrorKind::ProbeFailed(reason.clone()));
            },
            Behaviour::Stall => std::future::pending().await,
        }
    }
}
