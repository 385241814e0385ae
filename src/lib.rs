//! Real-time engagement dashboard client: samples a video source on a fixed
//! period, submits each frame to a remote analysis service, and folds the
//! per-face metrics into bounded-history telemetry behind the dashboard
//! charts plus a bounding-box overlay.

pub mod aggregate;
pub mod analysis;
pub mod capture;
pub mod config;
pub mod models;
pub mod overlay;
pub mod session;
pub mod telemetry;
pub mod utils;

pub use aggregate::{aggregate as aggregate_frame, FrameAggregate};
pub use analysis::{AnalysisPort, HttpAnalysisClient};
pub use capture::{CaptureSource, TestPatternSource};
pub use config::{DashboardSettings, SettingsStore};
pub use models::{AnalysisOutcome, Emotion, FaceRecord, FrameAnalysis, EMOTION_COUNT};
pub use overlay::{render_overlay, DrawSurface};
pub use session::{SessionController, SessionStatus};
pub use telemetry::{ChartSink, TelemetryStore};
