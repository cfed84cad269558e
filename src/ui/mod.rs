pub mod renderer;
pub mod tui;

pub use renderer::{Camera, WorldWidget};
pub use tui::Tui;
