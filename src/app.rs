//! Application orchestration.
//!
//! Wires the pipeline together: intake feeds the client, successful results
//! land in the store, the view controller decides what is shown. One
//! in-flight remote operation at a time - the same flag gates re-submission
//! and history fetches, so neither list can be partially overwritten by
//! interleaved responses.
//!
//! There is no cancellation path: once a request is sent it runs to the
//! configured timeout or completion, and an unresponsive service keeps the
//! loading overlay up for that long.

use crate::client::{self, ReviewClient};
use crate::intake::{self, FileCandidate, Intake, PendingFile};
use crate::store::SessionStore;
use crate::view::{NavEffect, View, ViewController};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// What a submission attempt came to, for the caller to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The session was replaced with this many reviews.
    Submitted(usize),
    /// Nothing is selected; no request was made.
    NothingPending,
    /// Another request is in flight; no request was made.
    Busy,
    /// The request failed; the session is untouched. The message is meant
    /// for a blocking user-visible notification.
    Failed(String),
}

/// The assembled client application.
pub struct App {
    intake: Intake,
    client: ReviewClient,
    store: SessionStore,
    view: ViewController,
    busy: bool,
    show_progress: bool,
}

impl App {
    pub fn new(client: ReviewClient, extensions: Vec<String>, show_progress: bool) -> Self {
        Self {
            intake: Intake::new(extensions),
            client,
            store: SessionStore::new(),
            view: ViewController::new(),
            busy: false,
            show_progress,
        }
    }

    /// Run command-line paths through intake.
    pub fn select_paths(&mut self, paths: &[PathBuf]) -> usize {
        self.select(intake::candidates_from_paths(paths))
    }

    /// Run raw candidates through intake. Returns the accepted count;
    /// zero means the prior selection was kept.
    pub fn select(&mut self, candidates: Vec<FileCandidate>) -> usize {
        self.intake.select(candidates)
    }

    /// Drop the pending entry at `index`.
    pub fn remove_pending(&mut self, index: usize) -> Option<PendingFile> {
        self.intake.remove(index)
    }

    pub fn pending(&self) -> &[PendingFile] {
        self.intake.pending()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn active_view(&self) -> View {
        self.view.active()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// Submit the pending batch for analysis.
    ///
    /// The selection is consumed up front, as a submission hands the batch
    /// off. On success the session is replaced wholesale and the view moves
    /// to Results; on failure the session keeps its exact prior value. The
    /// loading flag drops on both paths before any transition is evaluated.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.busy {
            return SubmitOutcome::Busy;
        }
        if self.intake.is_empty() {
            return SubmitOutcome::NothingPending;
        }

        let batch = self.intake.take_pending();

        self.busy = true;
        self.view.begin_loading();
        let spinner = self.spinner(format!("Analyzing {} file(s)...", batch.len()));

        let result = self.client.submit(&batch).await;

        spinner.finish_and_clear();
        self.busy = false;
        self.view.clear_loading();

        match result {
            Ok(reviews) => {
                for name in client::unreported_files(&batch, &reviews) {
                    warn!("Service returned no review for {}", name);
                }

                let count = reviews.len();
                self.store.replace_session(reviews);
                self.view.navigate(View::Results);
                info!("Session replaced with {} review(s)", count);
                SubmitOutcome::Submitted(count)
            }
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }

    /// Navigate to a view, running whatever side effect the transition
    /// calls for. Entering History refreshes the history list every time.
    pub async fn navigate(&mut self, target: View) {
        if let Some(NavEffect::RefreshHistory) = self.view.navigate(target) {
            self.refresh_history().await;
        }
    }

    /// Fetch the persisted history and replace the history list.
    ///
    /// Failure here is logged and otherwise silent: history is background
    /// population of a passive list, and the prior value simply stays.
    async fn refresh_history(&mut self) {
        if self.busy {
            info!("Skipping history refresh: a request is already in flight");
            return;
        }

        self.busy = true;
        self.view.begin_loading();
        let spinner = self.spinner("Loading review history...".to_string());

        let result = self.client.fetch_history().await;

        spinner.finish_and_clear();
        self.busy = false;
        self.view.clear_loading();

        match result {
            Ok(reviews) => {
                info!("History refreshed: {} review(s)", reviews.len());
                self.store.replace_history(reviews);
            }
            Err(e) => {
                warn!("History fetch failed: {}", e);
            }
        }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    #[cfg(test)]
    fn force_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testsupport::*;
    use crate::intake::default_extensions;
    use std::io::Write;

    const BATCH_OK: &str = r#"{"reviews": [{
        "filename": "app.js",
        "readability_score": 7.0,
        "modularity_score": 5.0,
        "potential_issues": ["mixes sync and async patterns"],
        "suggestions": ["use async/await consistently"]
    }]}"#;

    const HISTORY_ONE: &str = r#"{"reviews": [{
        "id": "h1",
        "filename": "past.py",
        "readability_score": 8.0,
        "modularity_score": 6.0,
        "created_at": "2026-08-01 10:22:41"
    }]}"#;

    const HISTORY_TWO: &str = r#"{"reviews": [
        {"id": "h1", "filename": "past.py", "readability_score": 8.0, "modularity_score": 6.0},
        {"id": "h2", "filename": "new.rs", "readability_score": 9.0, "modularity_score": 9.0}
    ]}"#;

    fn test_app(base_url: &str) -> App {
        let client = ReviewClient::new(base_url, Duration::from_secs(5));
        App::new(client, default_extensions(), false)
    }

    fn write_sample(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "fn main() {{}}").unwrap();
        path
    }

    #[tokio::test]
    async fn test_submit_success_replaces_session_and_shows_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, "app.js");

        let (url, handle) = spawn_one_shot_server(canned_response("200 OK", BATCH_OK));
        let mut app = test_app(&url);

        assert_eq!(app.select_paths(&[path]), 1);
        assert_eq!(app.active_view(), View::Upload);

        let outcome = app.submit().await;
        handle.join().unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted(1));
        assert_eq!(app.store().session().len(), 1);
        assert_eq!(app.store().session()[0].filename, "app.js");
        assert_eq!(app.active_view(), View::Results);
        assert!(!app.is_loading());
        assert!(app.pending().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_session_untouched() {
        let dir = tempfile::tempdir().unwrap();

        let (url, handle) = spawn_server(vec![
            canned_response("200 OK", BATCH_OK),
            canned_response("500 Internal Server Error", "boom"),
        ]);
        let mut app = test_app(&url);

        // First batch succeeds and becomes the session.
        app.select_paths(&[write_sample(&dir, "app.js")]);
        assert_eq!(app.submit().await, SubmitOutcome::Submitted(1));
        let before = app.store().session().to_vec();

        // Second batch fails; the session must be exactly what it was.
        app.select_paths(&[write_sample(&dir, "other.rs")]);
        let outcome = app.submit().await;
        handle.join().unwrap();

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(app.store().session(), before.as_slice());
        assert!(!app.is_loading());
        assert_eq!(app.active_view(), View::Results);
    }

    #[tokio::test]
    async fn test_submit_without_selection_is_silent() {
        let mut app = test_app("http://127.0.0.1:9");
        assert_eq!(app.submit().await, SubmitOutcome::NothingPending);
        assert!(app.store().session().is_empty());
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app("http://127.0.0.1:9");
        app.select_paths(&[write_sample(&dir, "app.js")]);

        app.force_busy(true);
        assert_eq!(app.submit().await, SubmitOutcome::Busy);
        // The refused submission must not have consumed the selection.
        assert_eq!(app.pending().len(), 1);
    }

    #[tokio::test]
    async fn test_every_history_activation_fetches() {
        let (url, handle) = spawn_server(vec![
            canned_response("200 OK", HISTORY_ONE),
            canned_response("200 OK", HISTORY_TWO),
        ]);
        let mut app = test_app(&url);

        app.navigate(View::History).await;
        assert_eq!(app.store().history().len(), 1);

        // Re-activating without leaving the view fetches again.
        app.navigate(View::History).await;
        handle.join().unwrap();

        assert_eq!(app.store().history().len(), 2);
        assert_eq!(app.active_view(), View::History);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_failed_history_fetch_keeps_prior_list() {
        let (url, handle) = spawn_server(vec![
            canned_response("200 OK", HISTORY_ONE),
            canned_response("500 Internal Server Error", "down"),
        ]);
        let mut app = test_app(&url);

        app.navigate(View::History).await;
        assert_eq!(app.store().history().len(), 1);

        app.navigate(View::History).await;
        handle.join().unwrap();

        // Silent failure: the prior list stays, no state reset.
        assert_eq!(app.store().history().len(), 1);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_history_refresh_skipped_while_busy() {
        let mut app = test_app("http://127.0.0.1:9");

        app.force_busy(true);
        app.navigate(View::History).await;

        // The view changes but no fetch ran against the dead endpoint.
        assert_eq!(app.active_view(), View::History);
        assert!(app.store().history().is_empty());
    }
}
