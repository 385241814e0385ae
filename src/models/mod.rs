mod face;

pub use face::{AnalysisOutcome, Emotion, FaceRecord, FrameAnalysis, EMOTION_COUNT};
