//! Video analyzer backed by the remote avinfo operation

use async_trait::async_trait;
use std::sync::Arc;

use crate::avinfo::{AvinfoClient, HttpAvinfoClient};
use crate::blob::{Blob, QiniuService, StorageService};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::metadata::VideoMetadata;
use crate::registry::Analyzer;

/// Extracts width, height, duration and aspect ratio of video blobs.
///
/// Extraction never fails from the caller's point of view: any error while
/// building the URL, fetching or decoding the report yields an empty
/// [`VideoMetadata`].
#[derive(Clone)]
pub struct QiniuVideoAnalyzer {
    service: Arc<dyn StorageService>,
    client: Arc<dyn AvinfoClient>,
    fop: String,
}

impl QiniuVideoAnalyzer {
    pub fn new(service: Arc<dyn StorageService>, client: Arc<dyn AvinfoClient>) -> Self {
        Self {
            service,
            client,
            fop: "avinfo".to_string(),
        }
    }

    /// Build an analyzer talking to a public Qiniu bucket over HTTP.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let service = QiniuService::from_config(&config.service);
        let client = HttpAvinfoClient::new(&config.http)?;
        Ok(Self::new(Arc::new(service), Arc::new(client)).with_fop(config.analyzer.fop.clone()))
    }

    pub fn with_fop(mut self, fop: impl Into<String>) -> Self {
        self.fop = fop.into();
        self
    }

    pub fn accept(blob: &Blob) -> bool {
        blob.is_video()
    }

    /// Extract metadata for `blob`, degrading to an empty result on failure.
    pub async fn metadata(&self, blob: &Blob) -> VideoMetadata {
        match self.try_metadata(blob).await {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!("Failed to analyze video {}: {}", blob.key, e);
                VideoMetadata::default()
            }
        }
    }

    async fn try_metadata(&self, blob: &Blob) -> Result<VideoMetadata> {
        let url = self.service.url(&blob.key, Some(&self.fop))?;
        tracing::debug!("Requesting avinfo for {} from {}", blob.key, url);

        let response = self.client.fetch(&url).await?;
        let meta = VideoMetadata::from_response(&response);
        tracing::debug!(
            "Analyzed {}: {} streams, metadata {:?}",
            blob.key,
            response.streams.len(),
            meta
        );
        Ok(meta)
    }
}

#[async_trait]
impl Analyzer for QiniuVideoAnalyzer {
    fn name(&self) -> &'static str {
        "qiniu_video"
    }

    fn accept(&self, blob: &Blob) -> bool {
        QiniuVideoAnalyzer::accept(blob)
    }

    async fn metadata(&self, blob: &Blob) -> VideoMetadata {
        QiniuVideoAnalyzer::metadata(self, blob).await
    }
}
