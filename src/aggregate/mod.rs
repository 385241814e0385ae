use crate::models::{AnalysisOutcome, Emotion, EMOTION_COUNT};

/// Per-tick reduction of one analysis result into the dashboard scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAggregate {
    /// Arithmetic mean of the face engagement scores. Deliberately not
    /// clamped here: the gauge clamps at display time, the time series keeps
    /// the raw mean.
    pub engagement: f64,
    /// Mean weight per category in `Emotion::ALL` order. Faces missing a
    /// category contribute 0 for it.
    pub probs: [f64; EMOTION_COUNT],
    pub face_count: usize,
}

impl FrameAggregate {
    pub fn zero() -> Self {
        Self {
            engagement: 0.0,
            probs: [0.0; EMOTION_COUNT],
            face_count: 0,
        }
    }
}

/// Pure reduction: no shared state, deterministic, never fails. Unknown
/// probability keys and malformed face records fall out as zeros.
pub fn aggregate(outcome: &AnalysisOutcome) -> FrameAggregate {
    let faces = outcome.faces();
    if faces.is_empty() {
        return FrameAggregate::zero();
    }

    let n = faces.len() as f64;

    let engagement = faces.iter().map(|f| f.engagement).sum::<f64>() / n;

    let mut probs = [0.0; EMOTION_COUNT];
    for face in faces {
        for (label, weight) in &face.probs {
            if let Some(emotion) = Emotion::from_label(label) {
                probs[emotion.index()] += weight / n;
            }
        }
    }

    FrameAggregate {
        engagement,
        probs,
        face_count: faces.len(),
    }
}
