//! Leaderboard service client.
//!
//! [`score::ScoreClient`] speaks the HTTP contract; [`manager::PersistenceManager`]
//! runs it on a background worker so the simulation thread never blocks on
//! the network.

pub mod manager;
pub mod score;

pub use manager::{PersistenceManager, PersistenceRequest, PersistenceResult};
pub use score::{ClientError, ScoreClient};
