mod layout;
mod renderer;

pub use layout::{label_text, place_label, LabelLayout, Rect};
pub use renderer::{render_overlay, DrawSurface, Rgba};
