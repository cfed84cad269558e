use serde::{Deserialize, Serialize};

/// Terrain classification for a single world tile.
///
/// Derived purely from world coordinates and the world seed; immutable
/// once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Deep water. Hazard, impassable.
    Water,
    /// Shoreline sand.
    Sand,
    /// Default open grassland.
    #[default]
    Grass,
    /// Dense forest, walkable.
    Forest,
    /// Bare rock, impassable.
    Rock,
}

impl TileKind {
    /// Whether entities may stand on this tile.
    pub fn is_walkable(&self) -> bool {
        match self {
            TileKind::Water | TileKind::Rock => false,
            TileKind::Sand | TileKind::Grass | TileKind::Forest => true,
        }
    }

    /// Whether this tile is a hazard rather than a plain obstacle.
    pub fn is_hazard(&self) -> bool {
        matches!(self, TileKind::Water)
    }
}
