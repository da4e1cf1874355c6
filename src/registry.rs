//! Analyzer selection
//!
//! The attachment host asks each registered analyzer in turn whether it
//! accepts a blob and runs the first one that does. Blobs nobody accepts get
//! empty metadata.

use async_trait::async_trait;
use std::sync::Arc;

use crate::blob::Blob;
use crate::metadata::VideoMetadata;

/// A metadata extractor the host can plug in.
#[async_trait]
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    fn accept(&self, blob: &Blob) -> bool;

    async fn metadata(&self, blob: &Blob) -> VideoMetadata;
}

#[derive(Clone, Default)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, analyzer: Arc<dyn Analyzer>) -> &mut Self {
        self.analyzers.push(analyzer);
        self
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    pub fn analyzer_for(&self, blob: &Blob) -> Option<&Arc<dyn Analyzer>> {
        self.analyzers.iter().find(|a| a.accept(blob))
    }

    pub async fn analyze(&self, blob: &Blob) -> VideoMetadata {
        match self.analyzer_for(blob) {
            Some(analyzer) => {
                tracing::debug!("Analyzing {} with {}", blob.key, analyzer.name());
                analyzer.metadata(blob).await
            }
            None => {
                tracing::debug!("No analyzer accepts {}", blob.key);
                VideoMetadata::default()
            }
        }
    }
}
