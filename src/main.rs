//! Headless demo: runs the sampling pipeline against a configured analysis
//! server with a synthetic test-pattern source, logging what the dashboard
//! would render, until Ctrl-C stops the session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use engauge::models::EMOTION_COUNT;
use engauge::overlay::Rect;
use engauge::telemetry::GridCell;
use engauge::{
    ChartSink, DashboardSettings, DrawSurface, HttpAnalysisClient, SessionController,
    SettingsStore, TestPatternSource,
};

/// Chart boundary that just logs the values a real dashboard would draw.
struct LogChartSink;

impl ChartSink for LogChartSink {
    fn set_instant(&mut self, engagement: f64, face_count: usize) -> Result<()> {
        info!("engagement {engagement:.2}, faces {face_count}");
        Ok(())
    }

    fn set_gauge(&mut self, _value: f64) -> Result<()> {
        Ok(())
    }

    fn append_series_point(&mut self, label: &str, value: f64) -> Result<()> {
        info!("series point {label} = {value:.3}");
        Ok(())
    }

    fn replace_radar(&mut self, _values: &[f64; EMOTION_COUNT]) -> Result<()> {
        Ok(())
    }

    fn replace_grid(&mut self, cells: &[GridCell]) -> Result<()> {
        info!("trend grid holds {} cells", cells.len());
        Ok(())
    }
}

/// Drawing boundary for a host with no real surface attached.
struct LogSurface;

impl DrawSurface for LogSurface {
    fn clear(&mut self) {}

    fn stroke_rect(&mut self, rect: Rect, _color: [u8; 4], _line_width: f64) {
        info!("box at ({:.0},{:.0}) {}x{}", rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_rect(&mut self, _rect: Rect, _color: [u8; 4]) {}

    fn fill_text(&mut self, text: &str, _x: f64, _y: f64, _color: [u8; 4]) {
        info!("label {text}");
    }

    fn text_width(&self, text: &str) -> f64 {
        // 16px font approximation; only panel sizing depends on this
        text.len() as f64 * 8.0
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings_path = std::env::var("ENGAUGE_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("engauge.json"));
    let settings: DashboardSettings = SettingsStore::new(settings_path)?.settings();

    info!("engauge starting against {}", settings.api_base);

    let port = Arc::new(HttpAnalysisClient::new(settings.api_base.clone())?);
    let mut controller = SessionController::new(port, settings);

    let session_id = controller
        .start(
            Arc::new(TestPatternSource::new(640, 480)),
            Box::new(LogSurface),
            Box::new(LogChartSink),
        )
        .await?;
    info!("session {session_id} running; Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    let summary = controller.stop().await?;
    info!("session summary: {summary}");

    Ok(())
}
