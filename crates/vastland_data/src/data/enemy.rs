use serde::{Deserialize, Serialize};

/// Enemy archetype. Closed set; each variant carries immutable base stats
/// and a relative spawn weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow, weak, common.
    Slime,
    /// Fast pursuer with moderate damage.
    Stalker,
    /// Slow heavy hitter, rare.
    Brute,
}

/// Base stats for an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: f64,
    /// Tiles per second.
    pub speed: f64,
    /// Damage dealt to the player per contact hit.
    pub contact_damage: f64,
    /// Collision radius in tiles.
    pub radius: f64,
    /// Seconds between contact hits from the same enemy.
    pub contact_cooldown: f64,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Slime, EnemyKind::Stalker, EnemyKind::Brute];

    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Slime => EnemyStats {
                max_health: 20.0,
                speed: 2.0,
                contact_damage: 5.0,
                radius: 0.4,
                contact_cooldown: 1.0,
            },
            EnemyKind::Stalker => EnemyStats {
                max_health: 35.0,
                speed: 4.5,
                contact_damage: 10.0,
                radius: 0.35,
                contact_cooldown: 0.8,
            },
            EnemyKind::Brute => EnemyStats {
                max_health: 90.0,
                speed: 1.5,
                contact_damage: 25.0,
                radius: 0.6,
                contact_cooldown: 1.5,
            },
        }
    }

    /// Relative spawn weight.
    pub fn spawn_weight(&self) -> f64 {
        match self {
            EnemyKind::Slime => 6.0,
            EnemyKind::Stalker => 3.0,
            EnemyKind::Brute => 1.0,
        }
    }

    /// Selects an archetype from a unit-interval roll by walking the
    /// cumulative spawn weights. Stable for a given roll, so spawn policy
    /// stays testable with injected draws.
    pub fn pick(roll: f64) -> EnemyKind {
        let total: f64 = Self::ALL.iter().map(|k| k.spawn_weight()).sum();
        let mut threshold = roll.clamp(0.0, 1.0) * total;
        for kind in Self::ALL {
            threshold -= kind.spawn_weight();
            if threshold < 0.0 {
                return kind;
            }
        }
        // roll == 1.0 lands exactly on the upper bound
        EnemyKind::Brute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_is_stable_for_fixed_rolls() {
        assert_eq!(EnemyKind::pick(0.0), EnemyKind::Slime);
        assert_eq!(EnemyKind::pick(0.3), EnemyKind::Slime);
        // 6/10 boundary: first roll past the slime band
        assert_eq!(EnemyKind::pick(0.65), EnemyKind::Stalker);
        assert_eq!(EnemyKind::pick(0.95), EnemyKind::Brute);
        assert_eq!(EnemyKind::pick(1.0), EnemyKind::Brute);
    }

    #[test]
    fn test_pick_clamps_out_of_range_rolls() {
        assert_eq!(EnemyKind::pick(-1.0), EnemyKind::Slime);
        assert_eq!(EnemyKind::pick(2.0), EnemyKind::Brute);
    }

    #[test]
    fn test_weights_are_positive() {
        for kind in EnemyKind::ALL {
            assert!(kind.spawn_weight() > 0.0);
            assert!(kind.stats().max_health > 0.0);
            assert!(kind.stats().radius > 0.0);
        }
    }
}
