pub mod renderer;

pub use renderer::{CELL_WIDTH, Cell, Renderer, cell_at};
