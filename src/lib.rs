//! Qiniu video analyzer
//!
//! Extracts width, height, duration and aspect ratio of stored videos by
//! asking the Qiniu `avinfo` operation to inspect them, then normalizing the
//! first video stream of the report into a sparse [`VideoMetadata`].
//!
//! ```no_run
//! use qiniu_video_analyzer::{AnalyzerConfig, Blob, QiniuVideoAnalyzer};
//!
//! # async fn run() -> qiniu_video_analyzer::Result<()> {
//! let mut config = AnalyzerConfig::default();
//! config.service.domain = "cdn.example.com".to_string();
//!
//! let analyzer = QiniuVideoAnalyzer::from_config(&config)?;
//! let blob = Blob::new("uploads/clip.mp4").with_content_type("video/mp4");
//! if QiniuVideoAnalyzer::accept(&blob) {
//!     let meta = analyzer.metadata(&blob).await;
//!     println!("{}", serde_json::to_string(&meta).unwrap());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod avinfo;
pub mod blob;
pub mod config;
pub mod error;
pub mod metadata;
pub mod registry;

pub use analyzer::QiniuVideoAnalyzer;
pub use avinfo::{AvinfoClient, AvinfoResponse, DurationValue, HttpAvinfoClient, StreamDescriptor};
pub use blob::{Blob, QiniuService, StorageService};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use metadata::VideoMetadata;
pub use registry::{Analyzer, AnalyzerRegistry};
