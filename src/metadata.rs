//! Sparse video metadata

use serde::{Deserialize, Serialize};

use crate::avinfo::{AvinfoResponse, DurationValue, StreamDescriptor};

/// Dimensions, duration and aspect ratio of a video.
///
/// Fields the service did not report stay `None` and are left out of the
/// serialized form entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl VideoMetadata {
    /// Normalize a single video stream, applying the rotation fix.
    pub fn from_stream(stream: &StreamDescriptor) -> Self {
        let (mut width, mut height) = (stream.width(), stream.height());
        if stream.is_rotated() {
            std::mem::swap(&mut width, &mut height);
        }

        Self {
            width,
            height,
            duration: stream.duration(),
            aspect_ratio: stream.display_aspect_ratio().map(str::to_string),
        }
    }

    /// Normalize the first video stream of a report. No video stream means
    /// nothing is known, which is not an error.
    pub fn from_response(response: &AvinfoResponse) -> Self {
        let empty = StreamDescriptor::default();
        let stream = response.video_stream().unwrap_or(&empty);
        Self::from_stream(stream)
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.duration.is_none()
            && self.aspect_ratio.is_none()
    }
}
