//! Read services for backend resources
//!
//! Each service builds endpoint, filter, and sort for its resource. List
//! calls return a [`Listing`], which is a [`PageFetcher`] ready to hand to
//! a [`PaginatedLoader`]:
//!
//! ```ignore
//! let cameras = CameraService::new(api.clone());
//! let loader = cameras.by_location(12).loader::<Camera>(20);
//! loader.refresh().await;
//! ```

pub mod camera;
pub mod event;
pub mod location;
pub mod visitor_log;

pub use camera::CameraService;
pub use event::EventService;
pub use location::LocationService;
pub use visitor_log::VisitorLogService;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::{ApiClient, QueryParams};
use crate::error::Result;
use crate::pagination::{PageFetcher, PageRequest, PaginatedLoader};

/// A paged list endpoint with its filter and sort bound in.
#[derive(Clone)]
pub struct Listing {
    api: Arc<ApiClient>,
    endpoint: &'static str,
    filter: Option<String>,
    sort: Option<String>,
}

impl Listing {
    pub fn new(api: Arc<ApiClient>, endpoint: &'static str) -> Self {
        Self {
            api,
            endpoint,
            filter: None,
            sort: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn query(&self, request: PageRequest) -> QueryParams {
        let mut params: QueryParams = request
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k, Some(v)))
            .collect();
        params.push(("sort", self.sort.clone()));
        params.push(("filter", self.filter.clone()));
        params
    }

    pub fn loader<T>(self, page_size: u32) -> PaginatedLoader<T, Self>
    where
        T: DeserializeOwned + Send + Sync,
    {
        PaginatedLoader::new(self, page_size)
    }
}

#[async_trait]
impl PageFetcher for Listing {
    async fn fetch_page(&self, request: PageRequest) -> Result<Value> {
        self.api.get_json(self.endpoint, &self.query(request)).await
    }
}

/// `field:value`
pub(crate) fn eq(field: &str, value: impl std::fmt::Display) -> String {
    format!("{}:{}", field, value)
}

/// `field:like:value`
pub(crate) fn like(field: &str, value: &str) -> String {
    format!("{}:like:{}", field, value)
}

/// `field:gte:start,field:lte:end`
pub(crate) fn between(field: &str, start: &str, end: &str) -> String {
    format!("{}:gte:{},{}:lte:{}", field, start, field, end)
}

/// Same `like` term across several fields, comma separated.
pub(crate) fn like_any(fields: &[&str], value: &str) -> String {
    fields
        .iter()
        .map(|field| like(field, value))
        .collect::<Vec<_>>()
        .join(",")
}
