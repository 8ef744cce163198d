//! Review list storage.
//!
//! Two independent lists with independent lifecycles: the session holds the
//! most recent successful batch result, the history holds the persisted
//! collection fetched on demand. Both are only ever replaced wholesale -
//! there is no merging, appending, or partial overwrite path.

use crate::models::Review;
use crate::view::View;

/// Holds the current session and the fetched history.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Vec<Review>,
    history: Vec<Review>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with a new successful batch result.
    pub fn replace_session(&mut self, reviews: Vec<Review>) {
        self.session = reviews;
    }

    /// Replace the history with a freshly fetched collection.
    pub fn replace_history(&mut self, reviews: Vec<Review>) {
        self.history = reviews;
    }

    /// The most recent successful batch, in service order.
    pub fn session(&self) -> &[Review] {
        &self.session
    }

    /// The persisted collection as of the last fetch.
    pub fn history(&self) -> &[Review] {
        &self.history
    }

    /// The list backing a given view.
    ///
    /// Upload shows the session list so the stats bar over the latest batch
    /// stays visible while picking the next one.
    pub fn active_list(&self, view: View) -> &[Review] {
        match view {
            View::Upload | View::Results => &self.session,
            View::History => &self.history,
        }
    }
}
