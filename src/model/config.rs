//! Configuration management for game parameters.
//!
//! Strongly-typed structures that map to the `config.toml` file. Defaults
//! are hardcoded in the `Default` impls; a config file overrides them.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! seed = 42
//!
//! [chunks]
//! load_radius = 3
//!
//! [spawn]
//! max_enemies = 20
//! interval = 2.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain seed. `None` draws one from entropy at startup.
    pub seed: Option<u64>,
}

/// Chunk residency configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ChunkConfig {
    /// Chebyshev radius, in chunks, of the resident window around the player.
    pub load_radius: i32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { load_radius: 3 }
    }
}

/// Player stats and combat tuning.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f64,
    /// Tiles per second.
    pub speed: f64,
    /// Collision radius in tiles.
    pub radius: f64,
    /// Reach of an attack, in tiles from the player's center.
    pub attack_radius: f64,
    pub attack_damage: f64,
    /// Seconds between attacks.
    pub attack_cooldown: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            speed: 6.0,
            radius: 0.4,
            attack_radius: 1.6,
            attack_damage: 18.0,
            attack_cooldown: 0.35,
        }
    }
}

/// Enemy spawn policy.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds between spawn attempts.
    pub interval: f64,
    /// Population cap for live enemies.
    pub max_enemies: usize,
    /// Inner edge of the spawn band, in tiles from the player.
    pub radius_min: f64,
    /// Outer edge of the spawn band.
    pub radius_max: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval: 2.0,
            max_enemies: 20,
            radius_min: 12.0,
            radius_max: 24.0,
        }
    }
}

/// Leaderboard service endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NetConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Offline mode when false: no worker is spawned and score
    /// submissions are dropped.
    pub enabled: bool,
    /// Name scores are submitted under.
    pub player_name: String,
    /// Optional stored credentials; when both are present the app
    /// authenticates on startup.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            enabled: false,
            player_name: "wanderer".to_string(),
            username: None,
            password: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub chunks: ChunkConfig,
    pub player: PlayerConfig,
    pub spawn: SpawnConfig,
    pub net: NetConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.chunks.load_radius > 0, "Load radius must be positive");
        anyhow::ensure!(
            self.chunks.load_radius <= 32,
            "Load radius too large (max 32)"
        );
        anyhow::ensure!(self.player.max_health > 0.0, "Player health must be positive");
        anyhow::ensure!(self.player.speed > 0.0, "Player speed must be positive");
        anyhow::ensure!(
            self.player.attack_cooldown > 0.0,
            "Attack cooldown must be positive"
        );
        anyhow::ensure!(self.spawn.interval > 0.0, "Spawn interval must be positive");
        anyhow::ensure!(
            self.spawn.radius_min > 0.0 && self.spawn.radius_max >= self.spawn.radius_min,
            "Spawn band must satisfy 0 < radius_min <= radius_max"
        );
        anyhow::ensure!(
            self.net.timeout_secs > 0,
            "Network timeout must be positive"
        );
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file, falling back to defaults when the
    /// file is missing or invalid.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("could not read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
