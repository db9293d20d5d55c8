//! Camera events and the event-record sync request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An event captured by a camera (motion, tag match, etc).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub event_id: i64,
    pub camera_id: i64,
    /// Camera name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_camera: Option<String>,
    /// Location name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    #[serde(default)]
    pub event_timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_metadata: Option<Map<String, Value>>,
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

impl Event {
    /// Title for list rows: the tag if present, else the type, else "Event".
    pub fn title(&self) -> &str {
        self.event_tag
            .as_deref()
            .or(self.event_type.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("Event")
    }
}

/// Body of `POST /fetch-store-event-records`.
///
/// Asks the backend to pull events off the camera hardware for a time
/// window and store them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraEventRecordRequest {
    pub location_id: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<i64>,
}

/// A single record returned by the event sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraEventRecord {
    pub event_id: i64,
    pub camera_id: i64,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub event_timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CameraEventRecordResponse {
    #[serde(default)]
    pub events: Vec<CameraEventRecord>,
    #[serde(default)]
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_title_fallbacks() {
        let mut event: Event = serde_json::from_value(serde_json::json!({
            "event_id": 1,
            "camera_id": 2,
            "event_type": "motion"
        }))
        .unwrap();
        assert_eq!(event.title(), "motion");

        event.event_tag = Some("Truck at gate".to_string());
        assert_eq!(event.title(), "Truck at gate");

        event.event_tag = None;
        event.event_type = None;
        assert_eq!(event.title(), "Event");
    }

    #[test]
    fn test_record_request_omits_camera_when_absent() {
        let req = CameraEventRecordRequest {
            location_id: 4,
            start_time: "2024-05-01T00:00:00Z".to_string(),
            end_time: "2024-05-02T00:00:00Z".to_string(),
            camera_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("camera_id").is_none());
        assert_eq!(json["location_id"], 4);
    }
}
