use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    /// Base URL of the analysis server.
    pub api_base: String,
    /// Capture mode reported to the server on session start.
    pub capture_mode: String,
    /// Sampling period. Faster than ~600ms tends to lag the upload path.
    pub sample_interval_ms: u64,
    /// JPEG quality for frame samples (0-100). Compressed hard to keep
    /// upload latency bounded; fidelity is secondary.
    pub jpeg_quality: u8,
    /// Capacity of the sliding history windows behind the charts.
    pub history_capacity: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".into(),
            capture_mode: "webcam".into(),
            sample_interval_ms: 600,
            jpeg_quality: 60,
            history_capacity: 30,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<DashboardSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            DashboardSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> DashboardSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, settings: DashboardSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &DashboardSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
