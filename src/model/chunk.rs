//! Chunk residency management.
//!
//! The world is unbounded; only a square window of chunks around a focus
//! position (the player) is ever materialized. [`ChunkStore::ensure_resident`]
//! is the single owner of that window: it generates missing chunks and evicts
//! stale ones so memory stays O(radius²) no matter how far the focus travels.
//! Tile queries never generate terrain on their own.

use std::collections::HashMap;

use vastland_data::TileKind;

use crate::model::terrain::TerrainSource;

/// Chunk edge length in tiles.
pub const CHUNK_SIZE: i64 = 16;

/// Coordinate of a chunk: world tile coordinate floor-divided by [`CHUNK_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    pub fn of_tile(tile_x: i64, tile_y: i64) -> Self {
        Self {
            cx: tile_x.div_euclid(CHUNK_SIZE) as i32,
            cy: tile_y.div_euclid(CHUNK_SIZE) as i32,
        }
    }

    pub fn of_world(world_x: f64, world_y: f64) -> Self {
        Self::of_tile(world_x.floor() as i64, world_y.floor() as i64)
    }

    /// Square-window distance between chunk coordinates.
    pub fn chebyshev(&self, other: &ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cy - other.cy).abs())
    }

    /// Tile coordinate of this chunk's lower corner.
    pub fn origin(&self) -> (i64, i64) {
        (
            i64::from(self.cx) * CHUNK_SIZE,
            i64::from(self.cy) * CHUNK_SIZE,
        )
    }
}

/// A dense square block of generated tiles. Owned exclusively by the
/// [`ChunkStore`]; queries hand out tiles by value.
pub struct Chunk {
    pub coord: ChunkCoord,
    tiles: Vec<TileKind>,
    pub generated_tick: u64,
}

impl Chunk {
    /// Fills every tile from the terrain source.
    fn generate(coord: ChunkCoord, source: &dyn TerrainSource, tick: u64) -> Self {
        let (ox, oy) = coord.origin();
        let size = CHUNK_SIZE as usize;
        let mut tiles = Vec::with_capacity(size * size);
        for ly in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                tiles.push(source.tile_at(ox + lx, oy + ly));
            }
        }
        Self {
            coord,
            tiles,
            generated_tick: tick,
        }
    }

    pub fn tile(&self, local_x: usize, local_y: usize) -> TileKind {
        self.tiles[local_y * CHUNK_SIZE as usize + local_x]
    }
}

/// Sparse map of resident chunks plus the policy that maintains it.
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
    source: Box<dyn TerrainSource>,
    load_radius: i32,
}

impl ChunkStore {
    pub fn new(source: Box<dyn TerrainSource>, load_radius: i32) -> Self {
        Self {
            chunks: HashMap::new(),
            source,
            load_radius,
        }
    }

    pub fn load_radius(&self) -> i32 {
        self.load_radius
    }

    /// Makes the resident set exactly the Chebyshev ball of `load_radius`
    /// chunks around the focus. Missing chunks are generated, chunks outside
    /// the ball are evicted. No hysteresis: the post-condition is an exact
    /// set equality, tested at the boundary.
    pub fn ensure_resident(&mut self, focus_x: f64, focus_y: f64, tick: u64) {
        let focus = ChunkCoord::of_world(focus_x, focus_y);
        let radius = self.load_radius;

        let before = self.chunks.len();
        self.chunks.retain(|coord, _| coord.chebyshev(&focus) <= radius);
        let evicted = before - self.chunks.len();

        let mut generated = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let coord = ChunkCoord {
                    cx: focus.cx + dx,
                    cy: focus.cy + dy,
                };
                if !self.chunks.contains_key(&coord) {
                    self.chunks
                        .insert(coord, Chunk::generate(coord, self.source.as_ref(), tick));
                    generated += 1;
                }
            }
        }

        if generated > 0 || evicted > 0 {
            tracing::debug!(
                generated,
                evicted,
                resident = self.chunks.len(),
                focus_cx = focus.cx,
                focus_cy = focus.cy,
                "chunk residency updated"
            );
        }
    }

    /// O(1) lookup. `None` when the owning chunk is not resident; residency
    /// is controlled solely by [`ensure_resident`](Self::ensure_resident).
    pub fn tile_at(&self, world_x: f64, world_y: f64) -> Option<TileKind> {
        let tile_x = world_x.floor() as i64;
        let tile_y = world_y.floor() as i64;
        let coord = ChunkCoord::of_tile(tile_x, tile_y);
        self.chunks.get(&coord).map(|chunk| {
            chunk.tile(
                tile_x.rem_euclid(CHUNK_SIZE) as usize,
                tile_y.rem_euclid(CHUNK_SIZE) as usize,
            )
        })
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn resident_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Resident chunks intersecting a world-coordinate rectangle. The
    /// renderer walks this instead of every resident chunk.
    pub fn chunks_in_region(
        &self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> impl Iterator<Item = &Chunk> {
        let lo = ChunkCoord::of_world(min_x, min_y);
        let hi = ChunkCoord::of_world(max_x, max_y);
        self.chunks.values().filter(move |chunk| {
            chunk.coord.cx >= lo.cx
                && chunk.coord.cx <= hi.cx
                && chunk.coord.cy >= lo.cy
                && chunk.coord.cy <= hi.cy
        })
    }
}
