use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::analysis::AnalysisPort;
use crate::capture::CaptureSource;
use crate::config::DashboardSettings;
use crate::overlay::DrawSurface;
use crate::telemetry::{ChartSink, TelemetryStore};

use super::loop_worker::sampling_loop;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
}

/// Drives the Idle/Running transition: opens the recording session on the
/// server, arms the sampling loop, and on stop disarms the loop before any
/// resource is released so no tick can fire against a dead capture source.
pub struct SessionController<P: AnalysisPort> {
    port: Arc<P>,
    settings: DashboardSettings,
    telemetry: Arc<Mutex<TelemetryStore>>,
    session_id: Option<String>,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl<P: AnalysisPort> SessionController<P> {
    pub fn new(port: Arc<P>, settings: DashboardSettings) -> Self {
        let telemetry = Arc::new(Mutex::new(TelemetryStore::new(settings.history_capacity)));
        Self {
            port,
            settings,
            telemetry,
            session_id: None,
            handle: None,
            cancel_token: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.handle.is_some() {
            SessionStatus::Running
        } else {
            SessionStatus::Idle
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Shared handle to the chart-backing state, for dashboards that want to
    /// read snapshots outside the publish path.
    pub fn telemetry(&self) -> Arc<Mutex<TelemetryStore>> {
        Arc::clone(&self.telemetry)
    }

    /// Open the remote recording session, then arm the sampling loop. The
    /// loop task takes ownership of the capture source, draw surface, and
    /// chart sink for the lifetime of the session.
    pub async fn start<C: CaptureSource>(
        &mut self,
        source: Arc<C>,
        surface: Box<dyn DrawSurface + Send>,
        sink: Box<dyn ChartSink + Send>,
    ) -> Result<String> {
        if self.handle.is_some() {
            bail!("session already running");
        }

        self.port
            .open_session(&self.settings.capture_mode)
            .await
            .context("failed to open recording session")?;

        let session_id = Uuid::new_v4().to_string();
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(sampling_loop(
            session_id.clone(),
            Duration::from_millis(self.settings.sample_interval_ms),
            self.settings.jpeg_quality,
            Arc::clone(&self.port),
            source,
            Arc::clone(&self.telemetry),
            surface,
            sink,
            cancel_token.clone(),
        ));

        info!("session {} started", session_id);

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.session_id = Some(session_id.clone());
        Ok(session_id)
    }

    /// Disarm the loop (cancel, then join: the loop's shutdown path clears
    /// the overlay and zeroes the dashboard), then close the remote session.
    /// The returned summary is whatever the server produced; opaque here.
    pub async fn stop(&mut self) -> Result<Value> {
        if self.handle.is_none() {
            bail!("no active session to stop");
        }

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("sampling loop task failed to join")?;
        }

        let session_id = self.session_id.take();

        let summary = self
            .port
            .close_session()
            .await
            .context("failed to close recording session")?;

        if let Some(id) = session_id {
            info!("session {} stopped", id);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::TestPatternSource;
    use crate::models::FrameAnalysis;
    use crate::overlay::Rect;
    use crate::telemetry::GridCell;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullSurface;

    impl DrawSurface for NullSurface {
        fn clear(&mut self) {}
        fn stroke_rect(&mut self, _rect: Rect, _color: [u8; 4], _line_width: f64) {}
        fn fill_rect(&mut self, _rect: Rect, _color: [u8; 4]) {}
        fn fill_text(&mut self, _text: &str, _x: f64, _y: f64, _color: [u8; 4]) {}
        fn text_width(&self, text: &str) -> f64 {
            text.len() as f64 * 8.0
        }
    }

    struct NullSink;

    impl ChartSink for NullSink {
        fn set_instant(&mut self, _engagement: f64, _face_count: usize) -> Result<()> {
            Ok(())
        }
        fn set_gauge(&mut self, _value: f64) -> Result<()> {
            Ok(())
        }
        fn append_series_point(&mut self, _label: &str, _value: f64) -> Result<()> {
            Ok(())
        }
        fn replace_radar(&mut self, _values: &[f64; crate::models::EMOTION_COUNT]) -> Result<()> {
            Ok(())
        }
        fn replace_grid(&mut self, _cells: &[GridCell]) -> Result<()> {
            Ok(())
        }
    }

    /// Counts lifecycle calls; analyze returns an empty frame.
    struct LifecyclePort {
        opened: AtomicUsize,
        closed: AtomicUsize,
    }

    impl AnalysisPort for LifecyclePort {
        async fn analyze(&self, _jpeg: Vec<u8>) -> Result<FrameAnalysis> {
            Ok(FrameAnalysis::default())
        }

        async fn open_session(&self, _mode: &str) -> Result<()> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn close_session(&self) -> Result<Value> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"avgEngagement": 0.42}))
        }
    }

    fn controller() -> (Arc<LifecyclePort>, SessionController<LifecyclePort>) {
        let port = Arc::new(LifecyclePort {
            opened: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
        });
        let controller = SessionController::new(Arc::clone(&port), DashboardSettings::default());
        (port, controller)
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_sequence_the_remote_session_boundary() {
        let (port, mut controller) = controller();
        assert_eq!(controller.status(), SessionStatus::Idle);

        controller
            .start(
                Arc::new(TestPatternSource::new(8, 8)),
                Box::new(NullSurface),
                Box::new(NullSink),
            )
            .await
            .unwrap();

        assert_eq!(controller.status(), SessionStatus::Running);
        assert_eq!(port.opened.load(Ordering::SeqCst), 1);
        assert_eq!(port.closed.load(Ordering::SeqCst), 0);

        let summary = controller.stop().await.unwrap();
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert_eq!(port.closed.load(Ordering::SeqCst), 1);
        assert_eq!(summary["avgEngagement"], 0.42);
        assert!(controller.session_id().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn starting_twice_is_an_error() {
        let (_port, mut controller) = controller();

        controller
            .start(
                Arc::new(TestPatternSource::new(8, 8)),
                Box::new(NullSurface),
                Box::new(NullSink),
            )
            .await
            .unwrap();

        let err = controller
            .start(
                Arc::new(TestPatternSource::new(8, 8)),
                Box::new(NullSurface),
                Box::new(NullSink),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already running"));

        controller.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_when_idle_is_an_error() {
        let (_port, mut controller) = controller();
        assert!(controller.stop().await.is_err());
    }
}
