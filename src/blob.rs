//! Attachment handles and the storage services that address them
//!
//! A [`Blob`] is the caller's view of a stored file. It is never mutated
//! here; analyzers only ask it whether it looks like a video and hand its
//! key to a [`StorageService`] to obtain an inspection URL.

use url::Url;

use crate::config::ServiceConfig;
use crate::error::{AnalyzerError, Result};

/// A stored attachment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    pub key: String,
    pub content_type: Option<String>,
    pub filename: Option<String>,
    pub byte_size: Option<u64>,
}

impl Blob {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_byte_size(mut self, byte_size: u64) -> Self {
        self.byte_size = Some(byte_size);
        self
    }

    /// True when the declared content type is a video type.
    pub fn is_video(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("video"))
            .unwrap_or(false)
    }
}

/// Resolves blob keys to URLs, optionally asking for a remote file operation.
pub trait StorageService: Send + Sync {
    fn url(&self, key: &str, fop: Option<&str>) -> Result<Url>;
}

/// Public Qiniu bucket reachable through a bound domain.
#[derive(Debug, Clone)]
pub struct QiniuService {
    domain: String,
    protocol: String,
}

impl QiniuService {
    pub fn new(domain: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            domain: domain.into().trim_end_matches('/').to_string(),
            protocol: protocol.into(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.domain.clone(), config.protocol.clone())
    }
}

impl StorageService for QiniuService {
    fn url(&self, key: &str, fop: Option<&str>) -> Result<Url> {
        if self.domain.is_empty() {
            return Err(AnalyzerError::InvalidUrl("bucket domain is empty".to_string()));
        }
        if key.is_empty() {
            return Err(AnalyzerError::InvalidUrl("blob key is empty".to_string()));
        }
        // URL parsing collapses dot segments in any spelling, so such a key
        // would address a different object.
        if key.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(AnalyzerError::InvalidUrl(format!(
                "blob key has a dot segment: {}",
                key
            )));
        }

        let mut url = Url::parse(&format!(
            "{}://{}/{}",
            self.protocol,
            self.domain,
            encode_key(key)
        ))?;
        if let Some(fop) = fop.filter(|f| !f.is_empty()) {
            url.set_query(Some(fop));
        }
        Ok(url)
    }
}

// Keys may contain '/', which must survive as a path separator.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
