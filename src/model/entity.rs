//! Simulation units: the player and enemy variants.
//!
//! Dispatch is a tagged variant, not an inheritance chain: an [`Entity`]
//! carries the shared physical state and an [`EntityKind`] with the
//! per-variant data. Behavior that needs the whole world (movement clamps,
//! combat resolution) runs in `world::update`; this module owns the state
//! transitions that are local to one entity.

use ratatui::style::Color;
use uuid::Uuid;

use vastland_data::EnemyKind;

use crate::model::config::PlayerConfig;

/// Player-only accumulators.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub kills: u32,
    /// Seconds survived this run.
    pub survival_time: f64,
    /// Seconds until the next attack is allowed.
    pub attack_cooldown: f64,
    pub speed: f64,
    pub radius: f64,
    pub attack_radius: f64,
    pub attack_damage: f64,
    pub attack_interval: f64,
}

/// Enemy-only state; base stats live on [`EnemyKind`].
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub kind: EnemyKind,
    /// Seconds until this enemy may deal contact damage again.
    pub contact_cooldown: f64,
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(EnemyState),
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub health: f64,
    pub max_health: f64,
    pub alive: bool,
    pub spawned_tick: u64,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new_player(x: f64, y: f64, config: &PlayerConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            health: config.max_health,
            max_health: config.max_health,
            alive: true,
            spawned_tick: 0,
            kind: EntityKind::Player(PlayerState {
                speed: config.speed,
                radius: config.radius,
                attack_radius: config.attack_radius,
                attack_damage: config.attack_damage,
                attack_interval: config.attack_cooldown,
                ..Default::default()
            }),
        }
    }

    pub fn new_enemy(x: f64, y: f64, kind: EnemyKind, tick: u64) -> Self {
        let stats = kind.stats();
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            health: stats.max_health,
            max_health: stats.max_health,
            alive: true,
            spawned_tick: tick,
            kind: EntityKind::Enemy(EnemyState {
                kind,
                contact_cooldown: 0.0,
            }),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(state) => Some(state),
            EntityKind::Enemy(_) => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(state),
            EntityKind::Enemy(_) => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&EnemyState> {
        match &self.kind {
            EntityKind::Enemy(state) => Some(state),
            EntityKind::Player(_) => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.kind {
            EntityKind::Enemy(state) => Some(state),
            EntityKind::Player(_) => None,
        }
    }

    pub fn radius(&self) -> f64 {
        match &self.kind {
            EntityKind::Player(state) => state.radius,
            EntityKind::Enemy(state) => state.kind.stats().radius,
        }
    }

    pub fn speed(&self) -> f64 {
        match &self.kind {
            EntityKind::Player(state) => state.speed,
            EntityKind::Enemy(state) => state.kind.stats().speed,
        }
    }

    /// Circle-overlap test against another entity's position and radius.
    pub fn overlaps(&self, other_x: f64, other_y: f64, other_radius: f64) -> bool {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        let reach = self.radius() + other_radius;
        dx * dx + dy * dy < reach * reach
    }

    /// Applies a displacement, clamped per axis against walkability: a
    /// blocked axis leaves that coordinate unchanged while the other axis
    /// may still advance.
    pub fn apply_movement(&mut self, dx: f64, dy: f64, is_walkable: impl Fn(f64, f64) -> bool) {
        let new_x = self.x + dx;
        if is_walkable(new_x, self.y) {
            self.x = new_x;
        }
        let new_y = self.y + dy;
        if is_walkable(self.x, new_y) {
            self.y = new_y;
        }
    }

    /// Health is clamped at zero and the alive flag transition is
    /// one-directional.
    pub fn take_damage(&mut self, amount: f64) {
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    pub fn symbol(&self) -> char {
        match &self.kind {
            EntityKind::Player(_) => '@',
            EntityKind::Enemy(state) => match state.kind {
                EnemyKind::Slime => 'o',
                EnemyKind::Stalker => 's',
                EnemyKind::Brute => 'B',
            },
        }
    }

    pub fn color(&self) -> Color {
        match &self.kind {
            EntityKind::Player(_) => Color::Yellow,
            EntityKind::Enemy(state) => match state.kind {
                EnemyKind::Slime => Color::Green,
                EnemyKind::Stalker => Color::Magenta,
                EnemyKind::Brute => Color::Red,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Entity {
        Entity::new_player(0.0, 0.0, &PlayerConfig::default())
    }

    #[test]
    fn test_new_player_has_valid_initial_state() {
        let p = player();
        assert!(p.alive);
        assert_eq!(p.health, p.max_health);
        assert!(p.is_player());
        assert_eq!(p.as_player().unwrap().kills, 0);
    }

    #[test]
    fn test_new_enemy_takes_base_stats() {
        let e = Entity::new_enemy(1.0, 2.0, EnemyKind::Brute, 7);
        assert_eq!(e.max_health, EnemyKind::Brute.stats().max_health);
        assert_eq!(e.spawned_tick, 7);
        assert_eq!(e.as_enemy().unwrap().kind, EnemyKind::Brute);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut p = player();
        p.take_damage(1_000.0);
        assert_eq!(p.health, 0.0);
        assert!(!p.alive);
    }

    #[test]
    fn test_alive_flag_is_one_directional() {
        let mut p = player();
        p.take_damage(p.max_health);
        assert!(!p.alive);
        // healing past zero must not resurrect
        p.health = 50.0;
        p.take_damage(0.0);
        assert!(!p.alive);
    }

    #[test]
    fn test_movement_blocked_per_axis() {
        let mut p = player();
        // wall at x >= 1.0, open everywhere else
        p.apply_movement(2.0, 3.0, |x, _| x < 1.0);
        assert_eq!(p.x, 0.0, "blocked axis must not move");
        assert_eq!(p.y, 3.0, "open axis still advances");
    }

    #[test]
    fn test_movement_open_terrain() {
        let mut p = player();
        p.apply_movement(2.0, -1.0, |_, _| true);
        assert_eq!((p.x, p.y), (2.0, -1.0));
    }

    #[test]
    fn test_overlap_is_circle_based() {
        let p = player();
        let r = p.radius();
        assert!(p.overlaps(r * 0.5, 0.0, r));
        assert!(!p.overlaps(10.0, 10.0, r));
    }
}
