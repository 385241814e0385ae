use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::aggregate::aggregate;
use crate::analysis::AnalysisPort;
use crate::capture::{encode_jpeg_sample, CaptureSource};
use crate::models::AnalysisOutcome;
use crate::overlay::{render_overlay, DrawSurface};
use crate::telemetry::{ChartSink, TelemetryStore};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_info, log_warn};

/// Timer-driven sampling worker. Once per period: grab the current frame,
/// compress it, submit it for analysis, and fold the response into the
/// dashboard. The submission is awaited inline and the ticker skips missed
/// ticks, so at most one request is ever outstanding; ticks that land while
/// one is in flight are dropped, never queued. A slow server therefore
/// lowers the effective sampling rate instead of building a backlog.
#[allow(clippy::too_many_arguments)]
pub async fn sampling_loop<P, C>(
    session_id: String,
    interval: Duration,
    jpeg_quality: u8,
    port: Arc<P>,
    source: Arc<C>,
    telemetry: Arc<Mutex<TelemetryStore>>,
    mut surface: Box<dyn DrawSurface + Send>,
    mut sink: Box<dyn ChartSink + Send>,
    cancel_token: CancellationToken,
) where
    P: AnalysisPort,
    C: CaptureSource,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Source not ready (camera warming up, stream gone): skip
                // this tick and retry on the next one.
                let Some((width, height)) = source.frame_size() else {
                    continue;
                };
                if width == 0 || height == 0 {
                    continue;
                }

                let sample = match rasterize_sample(&source, jpeg_quality).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        log_warn!("frame rasterization failed for session {}: {err:?}", session_id);
                        continue;
                    }
                };

                // No timeout on the submission: a hung request holds the
                // in-flight slot and delays the next tick's eligibility.
                // Racing against the cancel token means a completion that
                // arrives after stop() is dropped before it can touch the
                // dashboard.
                let outcome = tokio::select! {
                    result = port.analyze(sample) => match result {
                        Ok(frame) => AnalysisOutcome::Frame(frame),
                        Err(err) => {
                            log_warn!("analysis failed for session {}: {err:?}", session_id);
                            AnalysisOutcome::Unavailable
                        }
                    },
                    _ = cancel_token.cancelled() => break,
                };

                commit_tick(&outcome, &telemetry, surface.as_mut(), sink.as_mut()).await;
            }
            _ = cancel_token.cancelled() => {
                log_info!("sampling loop shutting down");
                break;
            }
        }
    }

    shutdown_dashboard(&telemetry, surface.as_mut(), sink.as_mut()).await;
    log_info!("sampling loop for session {} exited", session_id);
}

/// Grab the current frame and encode the JPEG sample off the async thread.
async fn rasterize_sample<C: CaptureSource>(source: &Arc<C>, quality: u8) -> Result<Vec<u8>> {
    let source = Arc::clone(source);
    tokio::task::spawn_blocking(move || {
        let frame = source.grab()?;
        encode_jpeg_sample(&frame, quality)
    })
    .await
    .context("sample encoding worker join failed")?
}

/// Fold one submission's outcome into the dashboard. Overlay first, then the
/// numeric commit, then the fallible chart publish; a chart failure never
/// rolls back the committed numbers.
async fn commit_tick(
    outcome: &AnalysisOutcome,
    telemetry: &Arc<Mutex<TelemetryStore>>,
    surface: &mut (dyn DrawSurface + Send),
    sink: &mut (dyn ChartSink + Send),
) {
    render_overlay(surface, outcome.faces());

    let agg = aggregate(outcome);
    let label = Utc::now().format("%H:%M:%S").to_string();

    let mut store = telemetry.lock().await;
    store.commit(&agg, label);
    store.publish(sink);
}

/// Stop path: wipe the overlay, zero the store, and push the zeroed values
/// out so the dashboard reads 0.00 / 0 after the session ends.
async fn shutdown_dashboard(
    telemetry: &Arc<Mutex<TelemetryStore>>,
    surface: &mut (dyn DrawSurface + Send),
    sink: &mut (dyn ChartSink + Send),
) {
    surface.clear();

    let mut store = telemetry.lock().await;
    store.reset();
    store.publish(sink);
}
