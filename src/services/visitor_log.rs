//! Visitor log service (read-only)
//!
//! Every list is sorted newest first.

use chrono::{DateTime, Utc};
use secureview_types::{AccessType, VisitorLog, VisitorType};
use std::sync::Arc;

use super::event::timestamp;
use super::{between, eq, like, Listing};
use crate::api::ApiClient;
use crate::error::Result;

const YARD_VISITOR_LOG: &str = "/yard-visitor-log";
const NEWEST_FIRST: &str = "capture_time,desc";

pub struct VisitorLogService {
    api: Arc<ApiClient>,
}

impl VisitorLogService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /yard-visitor-log/{log_id}
    pub async fn get(&self, log_id: i64) -> Result<VisitorLog> {
        self.api
            .get(&format!("{}/{}", YARD_VISITOR_LOG, log_id), &vec![])
            .await
    }

    /// GET /yard-visitor-log
    pub fn list(&self) -> Listing {
        Listing::new(self.api.clone(), YARD_VISITOR_LOG).with_sort(NEWEST_FIRST)
    }

    pub fn by_location(&self, location_id: i64) -> Listing {
        self.list().with_filter(eq("location_id", location_id))
    }

    pub fn by_access_type(&self, access_type: AccessType) -> Listing {
        self.list().with_filter(eq("entry_type", access_type))
    }

    /// Capture time is stored as Unix milliseconds, so the bounds are sent
    /// in that form.
    pub fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Listing {
        self.list().with_filter(between(
            "capture_time",
            &start.timestamp_millis().to_string(),
            &end.timestamp_millis().to_string(),
        ))
    }

    /// Same as [`by_date_range`](Self::by_date_range) with RFC 3339 bounds,
    /// for deployments that index capture time as a timestamp column.
    pub fn by_date_range_rfc3339(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Listing {
        self.list()
            .with_filter(between("capture_time", &timestamp(start), &timestamp(end)))
    }

    pub fn by_visitor_type(&self, visitor_type: VisitorType) -> Listing {
        self.list().with_filter(eq("visitor_type", visitor_type))
    }

    pub fn search(&self, keyword: &str) -> Listing {
        self.list().with_filter(like("visitor_name", keyword))
    }
}
