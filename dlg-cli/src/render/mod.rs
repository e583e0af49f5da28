mod color_mode;
mod renderer;
mod theme;

pub use color_mode::{ColorMode, use_color};
pub use renderer::Renderer;
