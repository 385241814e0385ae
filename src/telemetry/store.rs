use anyhow::Result;
use log::warn;

use crate::aggregate::FrameAggregate;
use crate::models::EMOTION_COUNT;

use super::window::{GridCell, ScalarWindow, TrendGrid};

/// Charting boundary: whatever renders the dashboard implements these
/// primitives. Every method may fail; the store logs and swallows failures
/// so a broken chart never loses the numeric readout.
pub trait ChartSink {
    /// Instantaneous numeric readouts (gauge value plus face-count text).
    fn set_instant(&mut self, engagement: f64, face_count: usize) -> Result<()>;

    fn set_gauge(&mut self, value: f64) -> Result<()>;

    fn append_series_point(&mut self, label: &str, value: f64) -> Result<()>;

    fn replace_radar(&mut self, values: &[f64; EMOTION_COUNT]) -> Result<()>;

    fn replace_grid(&mut self, cells: &[GridCell]) -> Result<()>;
}

/// All chart-backing state for one session: the instantaneous values and the
/// three history views, updated together from each tick's aggregate.
pub struct TelemetryStore {
    gauge: f64,
    face_count: usize,
    series: ScalarWindow,
    radar: [f64; EMOTION_COUNT],
    grid: TrendGrid,
}

impl TelemetryStore {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            gauge: 0.0,
            face_count: 0,
            series: ScalarWindow::new(history_capacity),
            radar: [0.0; EMOTION_COUNT],
            grid: TrendGrid::new(history_capacity),
        }
    }

    /// Commit one tick. Pure state only; nothing here can fail, so the
    /// numbers are always consistent before any chart is touched.
    pub fn commit(&mut self, aggregate: &FrameAggregate, series_label: String) {
        self.gauge = aggregate.engagement.clamp(0.0, 1.0);
        self.face_count = aggregate.face_count;

        self.series.push(series_label, aggregate.engagement);
        self.radar = aggregate.probs;
        self.grid.push_column(&aggregate.probs);
    }

    /// Push the committed state to the charting boundary. Numeric readouts
    /// go first; each view failure is logged and skipped independently.
    pub fn publish<S: ChartSink + ?Sized>(&self, sink: &mut S) {
        if let Err(err) = sink.set_instant(self.gauge, self.face_count) {
            warn!("instant readout update failed: {err:?}");
        }
        if let Err(err) = sink.set_gauge(self.gauge) {
            warn!("gauge update failed: {err:?}");
        }
        if let Some((label, value)) = self.series.iter().last() {
            if let Err(err) = sink.append_series_point(label, *value) {
                warn!("series update failed: {err:?}");
            }
        }
        if let Err(err) = sink.replace_radar(&self.radar) {
            warn!("radar update failed: {err:?}");
        }
        if let Err(err) = sink.replace_grid(self.grid.cells()) {
            warn!("grid update failed: {err:?}");
        }
    }

    /// Session-stop reset: zero the instantaneous values and drop history.
    /// The grid's tick index survives by design.
    pub fn reset(&mut self) {
        self.gauge = 0.0;
        self.face_count = 0;
        self.series.clear();
        self.radar = [0.0; EMOTION_COUNT];
        self.grid.clear();
    }

    pub fn gauge(&self) -> f64 {
        self.gauge
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn series(&self) -> &ScalarWindow {
        &self.series
    }

    pub fn radar(&self) -> &[f64; EMOTION_COUNT] {
        &self.radar
    }

    pub fn grid(&self) -> &TrendGrid {
        &self.grid
    }
}
