//! View state machine.
//!
//! Three views behind an explicit enum rather than a pile of booleans, with
//! the loading overlay as an orthogonal flag on top. The controller itself
//! is pure: navigation returns the side effect it calls for and the caller
//! decides how to run it, which keeps every transition unit-testable.

use std::fmt;

/// The three top-level views. Initial state is Upload; there is no terminal
/// state, the client runs until the user quits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    Results,
    History,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Upload => write!(f, "Upload"),
            View::Results => write!(f, "Results"),
            View::History => write!(f, "History"),
        }
    }
}

/// Side effect a navigation asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    /// Re-fetch the persisted history. Emitted on every entry into the
    /// History view, repeated entries included - no de-duplication.
    RefreshHistory,
}

/// Finite state machine coordinating the active view and the loading flag.
#[derive(Debug)]
pub struct ViewController {
    active: View,
    loading: bool,
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            active: View::Upload,
            loading: false,
        }
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// While set, the active view's content is suppressed in favor of a
    /// progress indicator.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Move to `target`. Any state may reach any state. Entering History
    /// always requests a history refresh, even from History itself.
    pub fn navigate(&mut self, target: View) -> Option<NavEffect> {
        self.active = target;
        match target {
            View::History => Some(NavEffect::RefreshHistory),
            _ => None,
        }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Clear the loading flag. Called unconditionally, on success and on
    /// failure, before any view transition is evaluated.
    pub fn clear_loading(&mut self) {
        self.loading = false;
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}
