//! Camera records.

use serde::{Deserialize, Serialize};

/// A camera installed at a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    pub camera_id: i64,
    pub location_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_installation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_last_maintenance: Option<String>,
    /// Live stream URL (RTSP/HLS depending on the vendor)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_mac: Option<String>,
    #[serde(default)]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub modified_date: String,
}

impl Camera {
    /// Human-readable label for list rows.
    pub fn display_name(&self) -> String {
        self.camera_location
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Camera {}", self.camera_id))
    }

    /// Whether a live stream can be opened for this camera.
    pub fn is_streamable(&self) -> bool {
        self.status
            && self
                .camera_stream_url
                .as_deref()
                .is_some_and(|url| !url.is_empty())
    }
}
