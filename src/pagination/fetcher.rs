//! The page source a loader pulls from

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

use super::PageRequest;
use crate::error::Result;

/// Produces the raw envelope for one page.
///
/// Implemented by [`Listing`](crate::services::Listing) for backend
/// resources, and by any async closure taking a [`PageRequest`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Value>;
}

#[async_trait]
impl<F, Fut> PageFetcher for F
where
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<Value> {
        (self)(request).await
    }
}
