//! HTTP client for the score service.
//!
//! Thin wrapper over the service's JSON API: authenticate, register,
//! submit a finished run, fetch the leaderboard. All calls are async and
//! only ever run on the persistence worker, never the simulation thread.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use vastland_data::{AccountProfile, LeaderboardEntry, ScoreRecord};

/// Errors surfaced to the game as values; they never interrupt simulation
/// state, the game just degrades to offline mode.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication rejected: {0}")]
    AuthRejected(String),

    #[error("service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    success: bool,
    profile: Option<AccountProfile>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SubmitResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct LeaderboardResponse {
    entries: Vec<LeaderboardEntry>,
}

pub struct ScoreClient {
    client: Client,
    base_url: String,
}

impl ScoreClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AccountProfile> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response: AuthResponse = self
            .client
            .post(&url)
            .json(&CredentialsRequest { username, password })
            .send()
            .await?
            .json()
            .await?;

        match (response.success, response.profile) {
            (true, Some(profile)) => Ok(profile),
            _ => Err(ClientError::AuthRejected(
                response.error.unwrap_or_else(|| "invalid credentials".to_string()),
            )),
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}/api/auth/register", self.base_url);
        let response: SubmitResponse = self
            .client
            .post(&url)
            .json(&CredentialsRequest { username, password })
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(())
        } else {
            Err(ClientError::Service(
                response.error.unwrap_or_else(|| "registration failed".to_string()),
            ))
        }
    }

    pub async fn save_score(&self, record: &ScoreRecord) -> Result<()> {
        let url = format!("{}/api/scores", self.base_url);
        let response: SubmitResponse = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(())
        } else {
            Err(ClientError::Service(
                response.error.unwrap_or_else(|| "score rejected".to_string()),
            ))
        }
    }

    pub async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let url = format!("{}/api/scores/top?limit={limit}", self.base_url);
        let response: LeaderboardResponse = self.client.get(&url).send().await?.json().await?;
        Ok(response.entries)
    }
}
