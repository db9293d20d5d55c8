//! Event service (read-only, plus the hardware event sync)

use chrono::{DateTime, SecondsFormat, Utc};
use secureview_types::{CameraEventRecordRequest, CameraEventRecordResponse, Event};
use std::sync::Arc;
use tracing::info;

use super::{between, eq, like, Listing};
use crate::api::ApiClient;
use crate::error::Result;

const EVENT: &str = "/event";
const EVENTS: &str = "/events";
const FETCH_STORE_EVENT_RECORDS: &str = "/fetch-store-event-records";

pub struct EventService {
    api: Arc<ApiClient>,
}

impl EventService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /event/{event_id}
    pub async fn get(&self, event_id: i64) -> Result<Event> {
        self.api
            .get(&format!("{}/{}", EVENT, event_id), &vec![])
            .await
    }

    /// GET /events
    pub fn list(&self) -> Listing {
        Listing::new(self.api.clone(), EVENTS)
    }

    pub fn by_camera(&self, camera_id: i64) -> Listing {
        self.list().with_filter(eq("camera_id", camera_id))
    }

    pub fn by_location(&self, location_id: i64) -> Listing {
        self.list().with_filter(eq("location_id", location_id))
    }

    pub fn by_type(&self, event_type: &str) -> Listing {
        self.list().with_filter(eq("event_type", event_type))
    }

    pub fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Listing {
        self.list().with_filter(between(
            "event_timestamp",
            &timestamp(start),
            &timestamp(end),
        ))
    }

    pub fn search(&self, keyword: &str) -> Listing {
        self.list().with_filter(like("event_description", keyword))
    }

    /// POST /fetch-store-event-records
    ///
    /// Has the backend pull events off the camera hardware for the window
    /// and store them.
    pub async fn fetch_and_store_records(
        &self,
        request: &CameraEventRecordRequest,
    ) -> Result<CameraEventRecordResponse> {
        let response: CameraEventRecordResponse = self
            .api
            .post(FETCH_STORE_EVENT_RECORDS, Some(request), &vec![])
            .await?;
        info!(
            location_id = request.location_id,
            total = response.total_count,
            "Synced event records"
        );
        Ok(response)
    }
}

pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
