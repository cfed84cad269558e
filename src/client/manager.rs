//! Background persistence worker.
//!
//! The simulation thread submits [`PersistenceRequest`]s over a channel; a
//! tokio task runs the HTTP calls and pushes [`PersistenceResult`]s back over
//! a single-producer/single-consumer handoff. The game drains completions at
//! one fixed point per frame, so no callback ever touches world or entity
//! state from the worker.

use std::sync::mpsc as std_mpsc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use vastland_data::{AccountProfile, LeaderboardEntry, ScoreRecord};

use crate::client::score::{ClientError, ScoreClient};
use crate::model::config::NetConfig;

#[derive(Debug)]
pub enum PersistenceRequest {
    Authenticate { username: String, password: String },
    Register { username: String, password: String },
    /// Fire-and-forget; the completion only reports delivery.
    SaveScore(ScoreRecord),
    TopScores { limit: usize },
}

#[derive(Debug)]
pub enum PersistenceResult {
    Authenticated(Result<AccountProfile, ClientError>),
    Registered(Result<(), ClientError>),
    ScoreSaved(Result<(), ClientError>),
    TopScores(Result<Vec<LeaderboardEntry>, ClientError>),
}

pub struct PersistenceManager {
    tx: Option<mpsc::UnboundedSender<PersistenceRequest>>,
    completed: std_mpsc::Receiver<PersistenceResult>,
    worker: Option<JoinHandle<()>>,
}

impl PersistenceManager {
    /// Spawns the worker when the service is enabled; otherwise the manager
    /// is a sink that drops requests (offline mode).
    pub fn new(config: &NetConfig) -> Self {
        let (done_tx, done_rx) = std_mpsc::channel();

        if !config.enabled {
            return Self {
                tx: None,
                completed: done_rx,
                worker: None,
            };
        }

        let client = match ScoreClient::new(config.base_url.clone(), config.timeout_secs) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("score client unavailable: {e}; running offline");
                return Self {
                    tx: None,
                    completed: done_rx,
                    worker: None,
                };
            }
        };

        let (tx, mut rx) = mpsc::unbounded_channel::<PersistenceRequest>();
        let worker = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let result = match request {
                    PersistenceRequest::Authenticate { username, password } => {
                        PersistenceResult::Authenticated(
                            client.authenticate(&username, &password).await,
                        )
                    }
                    PersistenceRequest::Register { username, password } => {
                        PersistenceResult::Registered(client.register(&username, &password).await)
                    }
                    PersistenceRequest::SaveScore(record) => {
                        PersistenceResult::ScoreSaved(client.save_score(&record).await)
                    }
                    PersistenceRequest::TopScores { limit } => {
                        PersistenceResult::TopScores(client.top_scores(limit).await)
                    }
                };
                if done_tx.send(result).is_err() {
                    break;
                }
            }
        });

        Self {
            tx: Some(tx),
            completed: done_rx,
            worker: Some(worker),
        }
    }

    pub fn is_online(&self) -> bool {
        self.tx.is_some()
    }

    /// Non-blocking submit. Dropped silently in offline mode.
    pub fn submit(&self, request: PersistenceRequest) {
        match &self.tx {
            Some(tx) => {
                if tx.send(request).is_err() {
                    tracing::warn!("persistence worker gone; request dropped");
                }
            }
            None => tracing::debug!("offline; persistence request dropped"),
        }
    }

    /// Drains every completion that has arrived since the last call.
    /// Called once per frame at a fixed point in the loop.
    pub fn drain_completed(&self) -> Vec<PersistenceResult> {
        self.completed.try_iter().collect()
    }

    /// Cancels all pending operations. In-flight and queued requests are
    /// abandoned; completions already delivered remain drainable.
    pub fn shutdown(&mut self) {
        self.tx = None;
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

impl Drop for PersistenceManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
