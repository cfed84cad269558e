//! World state: chunk residency, the entity registry, and the per-tick
//! simulation pass.
//!
//! The world is the single point of contact for the game loop. One call to
//! [`World::update`] runs a full tick in a fixed order: player update,
//! chunk recenter, enemy updates, reaping, spawn policy. A tick never
//! suspends; callers observe it as atomic.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use vastland_data::EnemyKind;

use crate::model::chunk::ChunkStore;
use crate::model::config::AppConfig;
use crate::model::entity::Entity;
use crate::model::spawn::SpawnController;
use crate::model::terrain::{TerrainGenerator, TerrainSource};

/// Input-derived intent for one tick of the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Movement intent, each axis in [-1, 1].
    pub move_x: f64,
    pub move_y: f64,
    pub attack: bool,
}

/// Things that happened during a tick, for the UI and log layers.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { kind: EnemyKind, x: f64, y: f64 },
    EnemySlain { kind: EnemyKind },
    PlayerDamaged { amount: f64, health_left: f64 },
    PlayerDied { kills: u32, survival_time: f64 },
}

pub struct World {
    chunks: ChunkStore,
    entities: Vec<Entity>,
    player_id: Uuid,
    pub tick: u64,
    rng: ChaCha8Rng,
    spawner: SpawnController,
    pub config: AppConfig,
    seed: u64,
}

impl World {
    /// Builds a world over noise terrain. Seed misconfiguration (an invalid
    /// config) is fatal here; nothing downstream can repair it.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let seed = config.world.seed.unwrap_or_else(rand::random);
        Self::with_source(Box::new(TerrainGenerator::new(seed)), seed, config)
    }

    /// Builds a world over an injected terrain source (tests use synthetic
    /// terrain; the game uses [`TerrainGenerator`]).
    pub fn with_source(
        source: Box<dyn TerrainSource>,
        seed: u64,
        config: AppConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let mut chunks = ChunkStore::new(source, config.chunks.load_radius);
        chunks.ensure_resident(0.0, 0.0, 0);

        let (px, py) = Self::find_spawn_point(&chunks);
        let player = Entity::new_player(px, py, &config.player);
        let player_id = player.id;
        tracing::info!(seed, px, py, "world created");

        Ok(Self {
            chunks,
            entities: vec![player],
            player_id,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawner: SpawnController::new(config.spawn.clone()),
            config,
            seed,
        })
    }

    /// Nearest walkable tile center to the origin, scanned ring by ring
    /// inside the initial resident window.
    fn find_spawn_point(chunks: &ChunkStore) -> (f64, f64) {
        let max = i64::from(chunks.load_radius()) * crate::model::chunk::CHUNK_SIZE;
        for ring in 0..max {
            for ty in -ring..=ring {
                for tx in -ring..=ring {
                    if tx.abs().max(ty.abs()) != ring {
                        continue;
                    }
                    let (x, y) = (tx as f64 + 0.5, ty as f64 + 0.5);
                    if chunks
                        .tile_at(x, y)
                        .map(|t| t.is_walkable())
                        .unwrap_or(false)
                    {
                        return (x, y);
                    }
                }
            }
        }
        (0.5, 0.5)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn remove_entity(&mut self, id: Uuid) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == self.player_id)
    }

    pub fn enemy_count(&self) -> usize {
        self.entities.iter().filter(|e| !e.is_player()).count()
    }

    /// Delegates chunk residency to the store.
    pub fn update_loaded_chunks(&mut self, focus_x: f64, focus_y: f64) {
        self.chunks.ensure_resident(focus_x, focus_y, self.tick);
    }

    /// Fail-safe walkability: an absent chunk is never walkable.
    pub fn is_walkable(&self, x: f64, y: f64) -> bool {
        self.chunks
            .tile_at(x, y)
            .map(|t| t.is_walkable())
            .unwrap_or(false)
    }

    /// Releases entities and resident chunks.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.chunks.clear();
    }

    /// One simulation tick in fixed order: player → recenter → enemies →
    /// reap → spawn.
    pub fn update(&mut self, dt: f64, input: &PlayerInput) -> Vec<GameEvent> {
        self.tick += 1;
        let mut events = Vec::new();
        let mut entities = std::mem::take(&mut self.entities);

        let player_idx = entities.iter().position(|e| e.id == self.player_id);

        // 1. Player movement, cooldowns, attack resolution
        if let Some(pi) = player_idx {
            if entities[pi].alive {
                self.update_player(&mut entities, pi, dt, input, &mut events);
            }
        }

        // 2. Recenter chunk residency on the player
        let (focus_x, focus_y) = match player_idx {
            Some(pi) => (entities[pi].x, entities[pi].y),
            None => (0.0, 0.0),
        };
        self.chunks.ensure_resident(focus_x, focus_y, self.tick);

        // 3. Enemy pursuit and contact damage
        if let Some(pi) = player_idx {
            self.update_enemies(&mut entities, pi, dt, &mut events);
        }

        // 4. Reap dead non-player entities
        let player_id = self.player_id;
        entities.retain(|e| e.alive || e.id == player_id);

        // 5. Spawn policy
        if self.spawner.tick(dt) {
            self.try_spawn(&mut entities, player_idx.is_some(), &mut events);
        }

        self.entities = entities;
        events
    }

    fn update_player(
        &mut self,
        entities: &mut [Entity],
        pi: usize,
        dt: f64,
        input: &PlayerInput,
        events: &mut Vec<GameEvent>,
    ) {
        let chunks = &self.chunks;

        // Movement: normalize diagonal intent, clamp per axis on walkability.
        let (mut mx, mut my) = (input.move_x, input.move_y);
        let magnitude = (mx * mx + my * my).sqrt();
        if magnitude > 1.0 {
            mx /= magnitude;
            my /= magnitude;
        }
        let speed = entities[pi].speed();
        entities[pi].apply_movement(mx * speed * dt, my * speed * dt, |x, y| {
            chunks
                .tile_at(x, y)
                .map(|t| t.is_walkable())
                .unwrap_or(false)
        });

        let (px, py) = (entities[pi].x, entities[pi].y);
        let (attack_ready, attack_radius, attack_damage) = {
            let state = entities[pi]
                .as_player_mut()
                .expect("player index holds a player");
            state.survival_time += dt;
            state.attack_cooldown = (state.attack_cooldown - dt).max(0.0);
            (
                state.attack_cooldown <= 0.0,
                state.attack_radius,
                state.attack_damage,
            )
        };

        if input.attack && attack_ready {
            let mut kills = 0;
            for i in 0..entities.len() {
                if i == pi || !entities[i].alive {
                    continue;
                }
                if entities[i].overlaps(px, py, attack_radius) {
                    entities[i].take_damage(attack_damage);
                    if !entities[i].alive {
                        if let Some(enemy) = entities[i].as_enemy() {
                            events.push(GameEvent::EnemySlain { kind: enemy.kind });
                        }
                        kills += 1;
                    }
                }
            }
            let state = entities[pi]
                .as_player_mut()
                .expect("player index holds a player");
            state.kills += kills;
            state.attack_cooldown = state.attack_interval;
        }
    }

    fn update_enemies(
        &mut self,
        entities: &mut [Entity],
        pi: usize,
        dt: f64,
        events: &mut Vec<GameEvent>,
    ) {
        let chunks = &self.chunks;
        let (px, py) = (entities[pi].x, entities[pi].y);
        let player_radius = entities[pi].radius();
        let player_alive = entities[pi].alive;
        let mut damage_to_player = 0.0;

        for i in 0..entities.len() {
            if i == pi || !entities[i].alive {
                continue;
            }

            // Pursuit toward the player's last known position.
            let dx = px - entities[i].x;
            let dy = py - entities[i].y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > 1e-6 {
                let speed = entities[i].speed();
                entities[i].apply_movement(
                    dx / dist * speed * dt,
                    dy / dist * speed * dt,
                    |x, y| {
                        chunks
                            .tile_at(x, y)
                            .map(|t| t.is_walkable())
                            .unwrap_or(false)
                    },
                );
            }

            // Contact damage under a per-enemy cooldown.
            let overlapping = entities[i].overlaps(px, py, player_radius);
            if let Some(enemy) = entities[i].as_enemy_mut() {
                enemy.contact_cooldown = (enemy.contact_cooldown - dt).max(0.0);
                if player_alive && overlapping && enemy.contact_cooldown <= 0.0 {
                    let stats = enemy.kind.stats();
                    damage_to_player += stats.contact_damage;
                    enemy.contact_cooldown = stats.contact_cooldown;
                }
            }
        }

        if damage_to_player > 0.0 {
            let was_alive = entities[pi].alive;
            entities[pi].take_damage(damage_to_player);
            events.push(GameEvent::PlayerDamaged {
                amount: damage_to_player,
                health_left: entities[pi].health,
            });
            if was_alive && !entities[pi].alive {
                let state = entities[pi].as_player().expect("player index holds a player");
                events.push(GameEvent::PlayerDied {
                    kills: state.kills,
                    survival_time: state.survival_time,
                });
                tracing::info!(
                    kills = state.kills,
                    survival_time = state.survival_time,
                    "player died"
                );
            }
        }
    }

    fn try_spawn(
        &mut self,
        entities: &mut Vec<Entity>,
        has_player: bool,
        events: &mut Vec<GameEvent>,
    ) {
        if !has_player {
            return;
        }
        let enemy_count = entities.iter().filter(|e| !e.is_player()).count();
        if enemy_count >= self.spawner.max_enemies() {
            return;
        }

        let (px, py) = entities
            .iter()
            .find(|e| e.id == self.player_id)
            .map(|p| (p.x, p.y))
            .unwrap_or((0.0, 0.0));

        let proposal = self.spawner.propose(px, py, &mut self.rng);
        let walkable = self
            .chunks
            .tile_at(proposal.x, proposal.y)
            .map(|t| t.is_walkable())
            .unwrap_or(false);
        if !walkable {
            // Silent rejection: try again next interval.
            tracing::trace!(x = proposal.x, y = proposal.y, "spawn candidate rejected");
            return;
        }

        events.push(GameEvent::EnemySpawned {
            kind: proposal.kind,
            x: proposal.x,
            y: proposal.y,
        });
        entities.push(Entity::new_enemy(
            proposal.x,
            proposal.y,
            proposal.kind,
            self.tick,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vastland_data::TileKind;

    fn flat_world() -> World {
        let mut config = AppConfig::default();
        config.world.seed = Some(1);
        World::with_source(Box::new(|_: i64, _: i64| TileKind::Grass), 1, config).unwrap()
    }

    #[test]
    fn test_new_world_registers_the_player() {
        let world = flat_world();
        assert_eq!(world.entities().len(), 1);
        assert!(world.player().is_some());
        assert_eq!(world.enemy_count(), 0);
    }

    #[test]
    fn test_add_and_remove_entity() {
        let mut world = flat_world();
        let enemy = Entity::new_enemy(5.0, 5.0, EnemyKind::Slime, 0);
        let id = enemy.id;
        world.add_entity(enemy);
        assert_eq!(world.enemy_count(), 1);
        assert!(world.remove_entity(id));
        assert!(!world.remove_entity(id));
        assert_eq!(world.enemy_count(), 0);
    }

    #[test]
    fn test_clear_releases_entities_and_chunks() {
        let mut world = flat_world();
        world.clear();
        assert!(world.entities().is_empty());
        assert_eq!(world.chunks().resident_count(), 0);
        assert!(!world.is_walkable(0.0, 0.0));
    }

    #[test]
    fn test_update_recenters_on_the_player() {
        let mut config = AppConfig::default();
        config.world.seed = Some(1);
        // no spawns: this test watches the residency window only
        config.spawn.interval = 1_000.0;
        let mut world =
            World::with_source(Box::new(|_: i64, _: i64| TileKind::Grass), 1, config).unwrap();
        let input = PlayerInput {
            move_x: 1.0,
            ..Default::default()
        };
        for _ in 0..200 {
            world.update(0.25, &input);
        }
        let px = world.player().unwrap().x;
        assert!(px > 100.0, "player travelled, got {px}");
        // resident window followed the player
        assert!(world.is_walkable(px, 0.5));
        assert!(!world.is_walkable(px - 1000.0, 0.5));
    }

    #[test]
    fn test_survival_time_accumulates() {
        let mut world = flat_world();
        for _ in 0..10 {
            world.update(0.5, &PlayerInput::default());
        }
        let state = world.player().unwrap().as_player().unwrap();
        assert!((state.survival_time - 5.0).abs() < 1e-9);
    }
}
