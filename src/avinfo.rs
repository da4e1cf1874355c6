//! Qiniu avinfo responses and the transport that fetches them
//!
//! The inspection service returns an ffprobe-style report:
//!
//! ```json
//! { "streams": [ { "codec_type": "video", "width": 240, "height": 240,
//!                  "duration": "2.000000", "display_aspect_ratio": "1:1",
//!                  "tags": { "rotate": "90" } } ] }
//! ```
//!
//! Only the shape of the envelope is checked. Individual stream fields are
//! looked up lazily and come back as `None` when missing or of an unexpected
//! JSON type.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{AnalyzerError, Result};

/// A duration exactly as the service reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Text(String),
    Number(serde_json::Number),
}

/// One media stream of the inspected file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamDescriptor {
    fields: Map<String, Value>,
}

impl StreamDescriptor {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }

    pub fn codec_type(&self) -> Option<&str> {
        self.get_str("codec_type")
    }

    pub fn is_video(&self) -> bool {
        self.codec_type() == Some("video")
    }

    pub fn width(&self) -> Option<u64> {
        self.get_u64("width")
    }

    pub fn height(&self) -> Option<u64> {
        self.get_u64("height")
    }

    pub fn duration(&self) -> Option<DurationValue> {
        match self.get("duration")? {
            Value::String(s) => Some(DurationValue::Text(s.clone())),
            Value::Number(n) => Some(DurationValue::Number(n.clone())),
            _ => None,
        }
    }

    pub fn display_aspect_ratio(&self) -> Option<&str> {
        self.get_str("display_aspect_ratio")
    }

    /// The `tags.rotate` entry, when `tags` is an object holding a string.
    pub fn rotate_tag(&self) -> Option<&str> {
        self.get("tags")
            .and_then(Value::as_object)
            .and_then(|tags| tags.get("rotate"))
            .and_then(Value::as_str)
    }

    /// Stored dimensions are pre-rotation; a quarter turn transposes them.
    pub fn is_rotated(&self) -> bool {
        matches!(self.rotate_tag(), Some("90") | Some("-90"))
    }
}

/// Decoded avinfo report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvinfoResponse {
    pub streams: Vec<StreamDescriptor>,
}

impl AvinfoResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut body) = value else {
            return Err(AnalyzerError::MalformedResponse(
                "response body is not an object".to_string(),
            ));
        };

        let streams = match body.remove("streams") {
            Some(Value::Array(streams)) => streams,
            Some(other) => {
                return Err(AnalyzerError::MalformedResponse(format!(
                    "`streams` is not an array: {}",
                    other
                )))
            }
            None => {
                return Err(AnalyzerError::MalformedResponse(
                    "missing `streams` field".to_string(),
                ))
            }
        };

        let streams = streams
            .into_iter()
            .enumerate()
            .map(|(i, stream)| match stream {
                Value::Object(fields) => Ok(StreamDescriptor::new(fields)),
                other => Err(AnalyzerError::MalformedResponse(format!(
                    "stream {} is not an object: {}",
                    i, other
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { streams })
    }

    /// First stream whose `codec_type` is `video`.
    pub fn video_stream(&self) -> Option<&StreamDescriptor> {
        self.streams.iter().find(|s| s.is_video())
    }
}

/// Fetches avinfo reports.
#[async_trait]
pub trait AvinfoClient: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<AvinfoResponse>;
}

/// reqwest-backed avinfo transport.
#[derive(Debug, Clone)]
pub struct HttpAvinfoClient {
    http_client: Client,
}

impl HttpAvinfoClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl AvinfoClient for HttpAvinfoClient {
    async fn fetch(&self, url: &Url) -> Result<AvinfoResponse> {
        let res = self.http_client.get(url.clone()).send().await?;
        let status = res.status();
        tracing::debug!("avinfo response for {}: {}", url, status);
        if !status.is_success() {
            return Err(AnalyzerError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        AvinfoResponse::from_slice(&body)
    }
}
