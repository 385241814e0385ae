use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fixed emotion category set, in dashboard display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

pub const EMOTION_COUNT: usize = 7;

impl Emotion {
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL.iter().copied().find(|e| e.as_str() == label)
    }

    /// Index into fixed-order vectors (radar data, grid rows).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// One detected face in a single analysis response. The id is unique within
/// the response only; the server does not guarantee stable tracking across
/// frames. All fields default so a partially-populated record still
/// deserializes and aggregates as zeros.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FaceRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub engagement: f64,
    /// Per-category weights. Not guaranteed to sum to 1 or to cover every
    /// category; unknown keys are ignored downstream.
    #[serde(default)]
    pub probs: HashMap<String, f64>,
}

/// Body of a successful analyze call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrameAnalysis {
    #[serde(default)]
    pub faces: Vec<FaceRecord>,
}

/// What one submission produced: a parsed frame, or nothing because the
/// transport or server failed. Unavailable renders exactly like a frame with
/// zero faces.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Frame(FrameAnalysis),
    Unavailable,
}

impl AnalysisOutcome {
    pub fn faces(&self) -> &[FaceRecord] {
        match self {
            AnalysisOutcome::Frame(frame) => &frame.faces,
            AnalysisOutcome::Unavailable => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_labels_round_trip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.as_str()), Some(emotion));
        }
        assert_eq!(Emotion::from_label("bored"), None);
    }

    #[test]
    fn face_record_defaults_missing_fields_to_zero() {
        let face: FaceRecord = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(face.id, 3);
        assert_eq!(face.engagement, 0.0);
        assert!(face.probs.is_empty());

        let frame: FrameAnalysis = serde_json::from_str(r#"{}"#).unwrap();
        assert!(frame.faces.is_empty());
    }
}
