use crate::models::FaceRecord;

/// Minimum distance from the top edge before a label flips below its box.
const TOP_MARGIN: f64 = 18.0;
/// Baseline offset when the label sits above the box.
const ABOVE_OFFSET: f64 = 8.0;
/// Baseline offset when the label sits below the box.
const BELOW_OFFSET: f64 = 18.0;
const PANEL_PAD_X: f64 = 4.0;
const PANEL_ASCENT: f64 = 16.0;
const PANEL_HEIGHT: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Where one face's label goes: the text baseline origin plus the backing
/// panel that keeps it legible over arbitrary video.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub text: String,
    pub text_x: f64,
    pub text_y: f64,
    pub panel: Rect,
}

pub fn label_text(face: &FaceRecord) -> String {
    format!("ID{} - {} ({:.2})", face.id, face.emotion, face.engagement)
}

/// Default placement is above the box; if that lands closer than the top
/// margin the label moves below instead, so it never clips off-surface.
pub fn place_label(face: &FaceRecord, text: String, text_width: f64) -> LabelLayout {
    let text_x = face.x;
    let mut text_y = face.y - ABOVE_OFFSET;

    if text_y < TOP_MARGIN {
        text_y = face.y + face.h + BELOW_OFFSET;
    }

    LabelLayout {
        text,
        text_x,
        text_y,
        panel: Rect {
            x: text_x - PANEL_PAD_X,
            y: text_y - PANEL_ASCENT,
            w: text_width + 2.0 * PANEL_PAD_X,
            h: PANEL_HEIGHT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_at(x: f64, y: f64, w: f64, h: f64) -> FaceRecord {
        FaceRecord {
            id: 7,
            x,
            y,
            w,
            h,
            emotion: "happy".into(),
            engagement: 0.825,
            ..FaceRecord::default()
        }
    }

    #[test]
    fn label_formats_engagement_to_two_decimals() {
        let face = face_at(10.0, 50.0, 40.0, 40.0);
        assert_eq!(label_text(&face), "ID7 - happy (0.82)");
    }

    #[test]
    fn label_sits_above_when_there_is_headroom() {
        let face = face_at(10.0, 100.0, 40.0, 40.0);
        let layout = place_label(&face, label_text(&face), 80.0);
        assert_eq!(layout.text_y, 92.0);
        assert_eq!(layout.panel.x, 6.0);
        assert_eq!(layout.panel.w, 88.0);
    }

    #[test]
    fn label_flips_below_near_the_top_edge() {
        let face = face_at(10.0, 20.0, 40.0, 40.0);
        let layout = place_label(&face, label_text(&face), 80.0);
        // 20 - 8 = 12 < 18, so it drops under the box
        assert_eq!(layout.text_y, 20.0 + 40.0 + 18.0);
    }
}
