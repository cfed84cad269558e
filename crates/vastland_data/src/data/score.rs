use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated account as returned by the leaderboard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: Uuid,
    pub name: String,
    pub best_score: u64,
}

/// A finished run, submitted fire-and-forget to the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: Uuid,
    pub name: String,
    pub kills: u32,
    /// Seconds survived.
    pub survival_time: f64,
    pub score: u64,
    pub submitted_at: String,
}

/// One row of the remote leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub kills: u32,
    pub survival_time: f64,
    pub score: u64,
}

impl ScoreRecord {
    /// Composite score: kills dominate, survival time breaks ties.
    pub fn compute_score(kills: u32, survival_time: f64) -> u64 {
        u64::from(kills) * 100 + survival_time.max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_weighs_kills_over_time() {
        assert_eq!(ScoreRecord::compute_score(0, 0.0), 0);
        assert_eq!(ScoreRecord::compute_score(3, 59.9), 359);
        assert!(ScoreRecord::compute_score(10, 0.0) > ScoreRecord::compute_score(9, 99.0));
    }

    #[test]
    fn test_score_ignores_negative_time() {
        assert_eq!(ScoreRecord::compute_score(1, -5.0), 100);
    }
}
