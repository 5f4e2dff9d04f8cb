mod renderer;

pub use renderer::{Hud, Renderer};
