mod store;
mod window;

pub use store::{ChartSink, TelemetryStore};
pub use window::{GridCell, ScalarWindow, TrendGrid};
