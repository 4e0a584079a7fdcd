use futures::stream::{self, StreamExt};
use reqwest::header;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{MAX_CONCURRENT_FETCHES, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::models::{FanOutRecordings, RecordingBatch, UserList, ZoomUser};

#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("Zoom API returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Zoom API request timed out")]
    Timeout,
    #[error("Zoom API is unreachable: {0}")]
    Unreachable(String),
    #[error("Invalid response format from Zoom API: {0}")]
    MalformedResponse(String),
}

impl ZoomError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ZoomError::Timeout
        } else {
            ZoomError::Unreachable(err.to_string())
        }
    }
}

pub struct ZoomClient {
    client: Client,
    base_url: String,
}

impl ZoomClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build Zoom HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Lists every user reachable by the access token.
    pub async fn list_users(&self, access_token: &str) -> Result<Vec<ZoomUser>, ZoomError> {
        let url = format!("{}/users", self.base_url);
        debug!("Listing users via {}", url);

        let list: UserList = self.get_json(&url, access_token).await?;
        Ok(list.users)
    }

    /// Fetches one user's recordings for the date range. `user_id` must
    /// already be sanitized; `from`/`to` are `YYYY-MM-DD`.
    pub async fn user_recordings(
        &self,
        access_token: &str,
        user_id: &str,
        from: &str,
        to: &str,
    ) -> Result<RecordingBatch, ZoomError> {
        let url = format!(
            "{}/users/{}/recordings?from={}&to={}",
            self.base_url, user_id, from, to
        );
        debug!("Fetching recordings via {}", url);

        self.get_json(&url, access_token).await
    }

    /// Fan-out mode: list all users under the token, then fetch each user's
    /// recordings with bounded concurrency. A listing failure is fatal; a
    /// single user's failure is skipped and counted. Batch order follows the
    /// user list order.
    pub async fn fetch_all_recordings(
        &self,
        access_token: &str,
        from: &str,
        to: &str,
    ) -> Result<FanOutRecordings, ZoomError> {
        let users = self.list_users(access_token).await?;
        debug!("Fanning out recordings fetch across {} users", users.len());

        let results: Vec<(String, Result<RecordingBatch, ZoomError>)> = stream::iter(users)
            .map(|user| async move {
                let outcome = self
                    .user_recordings(access_token, &user.id, from, to)
                    .await;
                (user.id, outcome)
            })
            .buffered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await;

        let mut recordings = FanOutRecordings::default();
        for (user_id, outcome) in results {
            match outcome {
                Ok(batch) => recordings.batches.push(batch),
                Err(e) => {
                    warn!("Skipping recordings for user {}: {}", user_id, e);
                    recordings.skipped_users += 1;
                }
            }
        }
        Ok(recordings)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, ZoomError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ZoomError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ZoomError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ZoomError::MalformedResponse(e.to_string()))
    }
}
