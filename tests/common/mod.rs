use vastland_data::TileKind;
use vastland_lib::model::config::AppConfig;
use vastland_lib::model::entity::Entity;
use vastland_lib::model::terrain::TerrainSource;
use vastland_lib::model::world::World;

/// Test world factory: pinned seed, optional synthetic terrain, optional
/// pre-placed entities.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    source: Option<Box<dyn TerrainSource>>,
    entities: Vec<Entity>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        Self {
            config,
            source: None,
            entities: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_source<S: TerrainSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// All-grass terrain: every candidate is walkable.
    pub fn flat(self) -> Self {
        self.with_source(|_: i64, _: i64| TileKind::Grass)
    }

    /// Grass everywhere except a single rock tile.
    pub fn with_obstacle_at(self, tile_x: i64, tile_y: i64) -> Self {
        self.with_source(move |x: i64, y: i64| {
            if x == tile_x && y == tile_y {
                TileKind::Rock
            } else {
                TileKind::Grass
            }
        })
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn build(self) -> World {
        let seed = self.config.world.seed.unwrap_or(42);
        let mut world = match self.source {
            Some(source) => World::with_source(source, seed, self.config),
            None => World::new(self.config),
        }
        .expect("test world config is valid");
        for entity in self.entities {
            world.add_entity(entity);
        }
        world
    }
}
