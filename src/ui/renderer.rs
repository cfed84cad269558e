//! World rendering.
//!
//! [`WorldWidget`] draws the tiles and entities visible through a [`Camera`]
//! into a ratatui buffer. Only resident chunks intersecting the camera's
//! region are walked, never the whole resident window.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

use vastland_data::TileKind;

use crate::model::chunk::CHUNK_SIZE;
use crate::model::world::World;

/// Viewport centered on a world position, one terminal cell per tile.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub center_x: f64,
    pub center_y: f64,
}

impl Camera {
    pub fn centered_on(center_x: f64, center_y: f64) -> Self {
        Self { center_x, center_y }
    }

    /// World-coordinate rectangle visible through `inner`.
    pub fn visible_region(&self, inner: Rect) -> (f64, f64, f64, f64) {
        let half_w = f64::from(inner.width) / 2.0;
        let half_h = f64::from(inner.height) / 2.0;
        (
            self.center_x - half_w,
            self.center_y - half_h,
            self.center_x + half_w,
            self.center_y + half_h,
        )
    }

    pub fn world_to_screen(&self, world_x: f64, world_y: f64, inner: Rect) -> Option<(u16, u16)> {
        let (min_x, min_y, _, _) = self.visible_region(inner);
        let sx = (world_x - min_x).floor();
        let sy = (world_y - min_y).floor();
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(inner.width) || sy >= f64::from(inner.height) {
            return None;
        }
        Some((inner.x + sx as u16, inner.y + sy as u16))
    }
}

fn tile_symbol(kind: TileKind) -> char {
    match kind {
        TileKind::Water => '≈',
        TileKind::Sand => '░',
        TileKind::Grass => ' ',
        TileKind::Forest => '♠',
        TileKind::Rock => '█',
    }
}

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Water => Color::Blue,
        TileKind::Sand => Color::Yellow,
        TileKind::Grass => Color::Green,
        TileKind::Forest => Color::Green,
        TileKind::Rock => Color::DarkGray,
    }
}

pub struct WorldWidget<'a> {
    world: &'a World,
    camera: Camera,
}

impl<'a> WorldWidget<'a> {
    pub fn new(world: &'a World, camera: Camera) -> Self {
        Self { world, camera }
    }
}

impl Widget for WorldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Vastland (tick {})", self.world.tick))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (min_x, min_y, max_x, max_y) = self.camera.visible_region(inner);

        // Tiles, chunk by chunk, restricted to the camera's region.
        for chunk in self.world.chunks().chunks_in_region(min_x, min_y, max_x, max_y) {
            let (ox, oy) = chunk.coord.origin();
            for ly in 0..CHUNK_SIZE {
                for lx in 0..CHUNK_SIZE {
                    let wx = (ox + lx) as f64 + 0.5;
                    let wy = (oy + ly) as f64 + 0.5;
                    if let Some((sx, sy)) = self.camera.world_to_screen(wx, wy, inner) {
                        let kind = chunk.tile(lx as usize, ly as usize);
                        let cell = &mut buf[(sx, sy)];
                        cell.set_char(tile_symbol(kind));
                        cell.set_fg(tile_color(kind));
                    }
                }
            }
        }

        // Entities on top.
        for entity in self.world.entities() {
            if !entity.alive && !entity.is_player() {
                continue;
            }
            if let Some((sx, sy)) = self.camera.world_to_screen(entity.x, entity.y, inner) {
                let cell = &mut buf[(sx, sy)];
                cell.set_char(entity.symbol());
                cell.set_fg(entity.color());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_region_is_centered() {
        let camera = Camera::centered_on(100.0, 50.0);
        let inner = Rect::new(0, 0, 40, 20);
        let (min_x, min_y, max_x, max_y) = camera.visible_region(inner);
        assert_eq!((min_x, min_y), (80.0, 40.0));
        assert_eq!((max_x, max_y), (120.0, 60.0));
    }

    #[test]
    fn test_world_to_screen_maps_center_to_middle() {
        let camera = Camera::centered_on(0.0, 0.0);
        let inner = Rect::new(1, 1, 40, 20);
        let (sx, sy) = camera.world_to_screen(0.0, 0.0, inner).unwrap();
        assert_eq!((sx, sy), (1 + 20, 1 + 10));
    }

    #[test]
    fn test_world_to_screen_rejects_offscreen_points() {
        let camera = Camera::centered_on(0.0, 0.0);
        let inner = Rect::new(0, 0, 10, 10);
        assert!(camera.world_to_screen(100.0, 0.0, inner).is_none());
        assert!(camera.world_to_screen(0.0, -100.0, inner).is_none());
    }
}
