mod client;

pub use client::{AnalysisPort, HttpAnalysisClient};
