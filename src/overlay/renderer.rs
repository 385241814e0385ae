use crate::models::FaceRecord;

use super::layout::{label_text, place_label, Rect};

pub type Rgba = [u8; 4];

const BOX_COLOR: Rgba = [0, 255, 0, 255];
const PANEL_COLOR: Rgba = [0, 0, 0, 153];
const TEXT_COLOR: Rgba = [0, 255, 0, 255];
const BOX_STROKE_WIDTH: f64 = 2.0;

/// Thin boundary over whatever 2-D surface the host environment offers.
/// The renderer only needs these primitives.
pub trait DrawSurface {
    fn clear(&mut self);

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, line_width: f64);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgba);

    fn text_width(&self, text: &str) -> f64;
}

/// Draw the per-face boxes and labels for one analysis result. Purely a
/// function of the latest result: the previous drawing is cleared first and
/// nothing is retained between calls.
pub fn render_overlay<S: DrawSurface + ?Sized>(surface: &mut S, faces: &[FaceRecord]) {
    surface.clear();

    for face in faces {
        surface.stroke_rect(
            Rect {
                x: face.x,
                y: face.y,
                w: face.w,
                h: face.h,
            },
            BOX_COLOR,
            BOX_STROKE_WIDTH,
        );

        let text = label_text(face);
        let width = surface.text_width(&text);
        let layout = place_label(face, text, width);

        surface.fill_rect(layout.panel, PANEL_COLOR);
        surface.fill_text(&layout.text, layout.text_x, layout.text_y, TEXT_COLOR);
    }
}
