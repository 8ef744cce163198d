//! HTTP client for the remote review service.
//!
//! The service exposes two endpoints: `POST /review` accepts a multipart
//! batch of source files and returns their reviews, `GET /reviews` returns
//! the full persisted history. Every way a call can go wrong collapses into
//! one [`ClientError`] so callers have a single failure signal to react to.

use crate::intake::PendingFile;
use crate::models::{Review, ReviewsEnvelope};
use reqwest::multipart::{Form, Part};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure signal for review service calls.
///
/// Callers treat every variant the same way: the operation failed and no
/// partial result exists. The variants only differ in what gets logged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not complete (connect failure, timeout, ...).
    #[error("cannot reach review service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("review service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body did not contain the expected review list.
    #[error("review service response is missing the review list")]
    MalformedResponse,

    /// A pending file could not be read off disk for encoding.
    #[error("failed to read {name}: {source}")]
    FileRead {
        name: String,
        source: std::io::Error,
    },
}

/// Client for the review service endpoints.
pub struct ReviewClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ReviewClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a batch of files for analysis.
    ///
    /// All files are encoded into a single multipart body under a repeated
    /// `files` field and sent in one request. On success the service's
    /// review sequence is returned in the order the service reported it;
    /// that order is authoritative and need not mirror the input order.
    pub async fn submit(&self, files: &[PendingFile]) -> Result<Vec<Review>, ClientError> {
        let url = format!("{}/review", self.base_url);

        let mut form = Form::new();
        for file in files {
            let bytes =
                tokio::fs::read(&file.path)
                    .await
                    .map_err(|e| ClientError::FileRead {
                        name: file.name.clone(),
                        source: e,
                    })?;

            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str("text/plain")?;
            form = form.part("files", part);
        }

        debug!("Submitting {} files to {}", files.len(), url);

        let response = self.http_client.post(&url).multipart(form).send().await?;
        self.decode(response).await
    }

    /// Fetch the full persisted review history.
    pub async fn fetch_history(&self) -> Result<Vec<Review>, ClientError> {
        let url = format!("{}/reviews", self.base_url);
        debug!("Fetching history from {}", url);

        let response = self.http_client.get(&url).send().await?;
        self.decode(response).await
    }

    /// Turn a raw response into sanitized reviews or a failure signal.
    async fn decode(&self, response: reqwest::Response) -> Result<Vec<Review>, ClientError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body = response.text().await?;
        let envelope: ReviewsEnvelope =
            serde_json::from_str(&body).map_err(|_| ClientError::MalformedResponse)?;

        let mut reviews = envelope.reviews;
        for review in &mut reviews {
            if !review.scores_in_range() {
                debug!("Clamping out-of-range scores for {}", review.filename);
                review.clamp_scores();
            }
        }

        Ok(reviews)
    }
}

/// Names of submitted files the service did not report a review for.
///
/// Correlation is by `filename` only. Positional matching is never used:
/// the service names every record, and guessing by position would mislabel
/// results whenever counts diverge.
pub fn unreported_files(submitted: &[PendingFile], reviews: &[Review]) -> Vec<String> {
    let reported: HashSet<&str> = reviews.iter().map(|r| r.filename.as_str()).collect();

    submitted
        .iter()
        .filter(|f| !reported.contains(f.name.as_str()))
        .map(|f| f.name.clone())
        .collect()
}
