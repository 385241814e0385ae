use std::future::Future;

use anyhow::{anyhow, Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::models::FrameAnalysis;

/// Boundary to the remote analysis service. One implementation speaks HTTP;
/// tests substitute mocks.
pub trait AnalysisPort: Send + Sync + 'static {
    /// Submit one JPEG frame sample for analysis.
    fn analyze(&self, jpeg: Vec<u8>) -> impl Future<Output = Result<FrameAnalysis>> + Send;

    /// Open a logical recording session on the server.
    fn open_session(&self, mode: &str) -> impl Future<Output = Result<()>> + Send;

    /// Close the recording session. The returned summary is opaque to this
    /// client; callers surface it as-is.
    fn close_session(&self) -> impl Future<Output = Result<Value>> + Send;
}

pub struct HttpAnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    /// No request timeout on purpose: a slow server throttles the sampling
    /// loop through the in-flight guard instead of triggering aborts.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

impl AnalysisPort for HttpAnalysisClient {
    async fn analyze(&self, jpeg: Vec<u8>) -> Result<FrameAnalysis> {
        let url = format!("{}/analyze_frame", self.base_url);

        let part = Part::bytes(jpeg)
            .file_name("frame.jpg")
            .mime_str("image/jpeg")
            .context("invalid mime type for frame part")?;
        let form = Form::new().part("frame", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("analyze_frame request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("analyze_frame returned {}", response.status()));
        }

        response
            .json::<FrameAnalysis>()
            .await
            .context("analyze_frame response was not valid json")
    }

    async fn open_session(&self, mode: &str) -> Result<()> {
        let url = format!("{}/rt_start?mode={}", self.base_url, mode);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("rt_start request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("rt_start returned {}", response.status()));
        }

        Ok(())
    }

    async fn close_session(&self) -> Result<Value> {
        let url = format!("{}/rt_stop", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("rt_stop request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("rt_stop returned {}", response.status()));
        }

        response
            .json::<Value>()
            .await
            .context("rt_stop summary was not valid json")
    }
}
