//! PaginatedLoader - accumulates pages from a PageFetcher
//!
//! The loader owns a list view's paging state: the items fetched so far,
//! the last page the backend confirmed, and the latest totals. Views call
//! [`refresh`](PaginatedLoader::refresh) to (re)load the first page and
//! [`load_more`](PaginatedLoader::load_more) when scrolled to the end.
//!
//! Fetch failures never escape: the message lands in `error` and the
//! operation returns normally.
//!
//! Overlapping calls are not serialized. The state lock is only held while
//! reading or applying state, never across the fetch, so whichever response
//! resolves last is the one that sticks.

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::envelope::NormalizedPage;
use super::{PageFetcher, PageRequest, FIRST_PAGE};
use crate::error::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeMode {
    Replace,
    Append,
}

struct LoaderState<T> {
    items: Vec<T>,
    page: u32,
    size: u32,
    total_pages: u32,
    total_elements: u64,
    loading: bool,
    error: Option<String>,
}

impl<T> LoaderState<T> {
    fn new(size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: FIRST_PAGE,
            size,
            total_pages: 0,
            total_elements: 0,
            loading: false,
            error: None,
        }
    }

    fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Mark a fetch as started and return the page size to request.
    fn begin_fetch(&mut self) -> u32 {
        self.loading = true;
        self.error = None;
        self.size
    }
}

/// Point-in-time copy of a loader's state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSnapshot<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
}

impl<T> LoaderSnapshot<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct PaginatedLoader<T, F> {
    fetcher: F,
    state: RwLock<LoaderState<T>>,
}

impl<T, F> PaginatedLoader<T, F>
where
    T: DeserializeOwned + Send + Sync,
    F: PageFetcher,
{
    /// Create a loader bound to `fetcher`. Nothing is fetched until
    /// [`refresh`](Self::refresh) is called.
    pub fn new(fetcher: F, initial_page_size: u32) -> Self {
        let size = if initial_page_size == 0 {
            warn!(
                "Page size 0 is not valid, using default of {}",
                DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        } else {
            initial_page_size
        };

        Self {
            fetcher,
            state: RwLock::new(LoaderState::new(size)),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Clear everything and load the first page.
    pub async fn refresh(&self) {
        let size = {
            let mut state = self.state.write().await;
            state.items.clear();
            state.page = FIRST_PAGE;
            state.begin_fetch()
        };
        self.fetch_page(PageRequest::first(size), MergeMode::Replace)
            .await;
    }

    /// Append the next page. Does nothing while a fetch is in flight or
    /// when the last page has already been loaded.
    pub async fn load_more(&self) {
        let request = {
            let mut state = self.state.write().await;
            if state.loading || !state.has_more() {
                debug!(
                    page = state.page,
                    total_pages = state.total_pages,
                    loading = state.loading,
                    "load_more skipped"
                );
                return;
            }
            let next = state.page + 1;
            PageRequest::new(next, state.begin_fetch())
        };
        self.fetch_page(request, MergeMode::Append).await;
    }

    /// Change the page length and drop loaded items. Does not fetch; call
    /// [`refresh`](Self::refresh) afterwards to repopulate.
    pub async fn set_page_size(&self, size: u32) -> Result<()> {
        if size == 0 {
            return Err(Error::InvalidPageSize);
        }
        let mut state = self.state.write().await;
        state.size = size;
        state.page = FIRST_PAGE;
        state.items.clear();
        Ok(())
    }

    async fn fetch_page(&self, request: PageRequest, mode: MergeMode) {
        debug!(page = request.page, size = request.size, ?mode, "Fetching page");

        let result = match self.fetcher.fetch_page(request).await {
            Ok(envelope) => NormalizedPage::from_envelope(envelope, request.page).decode::<T>(),
            Err(e) => Err(e),
        };

        let mut state = self.state.write().await;
        match result {
            Ok(page) => {
                debug!(
                    received = page.content.len(),
                    number = page.number,
                    total_pages = page.total_pages,
                    total_elements = page.total_elements,
                    "Page loaded"
                );
                match mode {
                    MergeMode::Replace => state.items = page.content,
                    MergeMode::Append => state.items.extend(page.content),
                }
                state.page = page.number;
                state.total_pages = page.total_pages;
                state.total_elements = page.total_elements;
            }
            Err(e) => {
                warn!(page = request.page, "Page fetch failed: {}", e);
                state.error = Some(e.user_message());
            }
        }
        state.loading = false;
    }

    pub async fn page(&self) -> u32 {
        self.state.read().await.page
    }

    pub async fn size(&self) -> u32 {
        self.state.read().await.size
    }

    pub async fn total_pages(&self) -> u32 {
        self.state.read().await.total_pages
    }

    pub async fn total_elements(&self) -> u64 {
        self.state.read().await.total_elements
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.items.is_empty()
    }
}

impl<T, F> PaginatedLoader<T, F>
where
    T: DeserializeOwned + Clone + Send + Sync,
    F: PageFetcher,
{
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    pub async fn snapshot(&self) -> LoaderSnapshot<T> {
        let state = self.state.read().await;
        LoaderSnapshot {
            items: state.items.clone(),
            page: state.page,
            size: state.size,
            total_pages: state.total_pages,
            total_elements: state.total_elements,
            loading: state.loading,
            error: state.error.clone(),
            has_more: state.has_more(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Serves `total_pages` pages of `per_page` numbered items.
    struct ScriptedFetcher {
        total_pages: u32,
        per_page: u32,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedFetcher {
        fn new(total_pages: u32, per_page: u32) -> Self {
            Self {
                total_pages,
                per_page,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(&self, request: PageRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request);
            let start = (request.page - 1) * self.per_page;
            let content: Vec<u32> = (start..start + self.per_page).collect();
            Ok(json!({
                "content": content,
                "number": request.page,
                "totalPages": self.total_pages,
                "totalElements": self.total_pages * self.per_page
            }))
        }
    }

    /// Blocks every fetch until `gate` is notified.
    struct GatedFetcher {
        calls: AtomicUsize,
        started: Notify,
        gate: Notify,
    }

    #[async_trait]
    impl PageFetcher for GatedFetcher {
        async fn fetch_page(&self, request: PageRequest) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.gate.notified().await;
            Ok(json!({
                "content": ["x", "y"],
                "number": request.page,
                "totalPages": 3
            }))
        }
    }

    #[tokio::test]
    async fn test_initial_state() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(3, 2), 20);
        let snap = loader.snapshot().await;
        assert!(snap.items.is_empty());
        assert_eq!(snap.page, 1);
        assert_eq!(snap.size, 20);
        assert_eq!(snap.total_pages, 0);
        assert_eq!(snap.total_elements, 0);
        assert!(!snap.loading);
        assert!(snap.error.is_none());
        assert!(!snap.has_more);
        assert_eq!(loader.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_replaces_and_load_more_appends() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(3, 2), 2);

        loader.refresh().await;
        assert_eq!(loader.items().await, vec![0, 1]);
        assert!(loader.has_more().await);

        loader.load_more().await;
        assert_eq!(loader.len().await, 4);

        loader.load_more().await;
        let snap = loader.snapshot().await;
        assert_eq!(snap.items, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(snap.page, 3);
        assert_eq!(snap.total_elements, 6);
        assert!(!snap.has_more);

        // Refresh drops the accumulated pages
        loader.refresh().await;
        assert_eq!(loader.items().await, vec![0, 1]);
        assert_eq!(loader.page().await, 1);

        let requested: Vec<u32> = loader
            .fetcher()
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.page)
            .collect();
        assert_eq!(requested, vec![1, 2, 3, 1]);
    }

    #[tokio::test]
    async fn test_load_more_noop_at_last_page() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(1, 2), 2);
        loader.refresh().await;
        assert_eq!(loader.fetcher().calls(), 1);
        let before = loader.snapshot().await;

        loader.load_more().await;

        assert_eq!(loader.fetcher().calls(), 1);
        assert_eq!(loader.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_load_more_before_first_refresh_is_noop() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(3, 2), 2);
        loader.load_more().await;
        assert_eq!(loader.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_load_more_noop_while_loading() {
        let loader = PaginatedLoader::<String, _>::new(
            GatedFetcher {
                calls: AtomicUsize::new(0),
                started: Notify::new(),
                gate: Notify::new(),
            },
            2,
        );
        let fetcher = loader.fetcher();

        // First page goes through immediately
        fetcher.gate.notify_one();
        loader.refresh().await;
        fetcher.started.notified().await;
        assert!(loader.has_more().await);

        tokio::join!(loader.load_more(), async {
            fetcher.started.notified().await;
            assert!(loader.is_loading().await);

            loader.load_more().await;
            assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);

            fetcher.gate.notify_one();
        });

        assert!(!loader.is_loading().await);
        assert_eq!(loader.len().await, 4);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    /// Page 1 answers at once; later pages wait for `gate`.
    struct SlowNextPage {
        started: Notify,
        gate: Notify,
    }

    #[async_trait]
    impl PageFetcher for SlowNextPage {
        async fn fetch_page(&self, request: PageRequest) -> Result<Value> {
            if request.page > FIRST_PAGE {
                self.started.notify_one();
                self.gate.notified().await;
            }
            let base = request.page * 10;
            Ok(json!({
                "content": [base, base + 1],
                "number": request.page,
                "totalPages": 3
            }))
        }
    }

    #[tokio::test]
    async fn test_refresh_during_pending_load_more_last_response_wins() {
        let loader = PaginatedLoader::<u32, _>::new(
            SlowNextPage {
                started: Notify::new(),
                gate: Notify::new(),
            },
            2,
        );
        let fetcher = loader.fetcher();
        loader.refresh().await;
        assert_eq!(loader.items().await, vec![10, 11]);

        tokio::join!(loader.load_more(), async {
            fetcher.started.notified().await;

            // Refresh completes while page 2 is still outstanding
            loader.refresh().await;
            let snap = loader.snapshot().await;
            assert_eq!(snap.items, vec![10, 11]);
            assert_eq!(snap.page, 1);
            assert!(!snap.loading);

            fetcher.gate.notify_one();
        });

        // The late page 2 lands on top of the refreshed state
        let snap = loader.snapshot().await;
        assert_eq!(snap.items, vec![10, 11, 20, 21]);
        assert_eq!(snap.page, 2);
        assert!(!snap.loading);
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn test_hateoas_envelope_through_loader() {
        let fetch = |_req: PageRequest| async {
            Ok::<_, Error>(json!({
                "_embedded": {"content": ["a", "b"]},
                "page": {"number": 2, "total_pages": 5, "total_elements": 50}
            }))
        };
        let loader = PaginatedLoader::<String, _>::new(fetch, 20);
        loader.refresh().await;

        let snap = loader.snapshot().await;
        assert_eq!(snap.items, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(snap.page, 2);
        assert_eq!(snap.total_pages, 5);
        assert_eq!(snap.total_elements, 50);
        assert!(snap.has_more);
    }

    #[tokio::test]
    async fn test_bare_data_envelope_through_loader() {
        let fetch = |_req: PageRequest| async { Ok::<_, Error>(json!({"data": ["a", "b"]})) };
        let loader = PaginatedLoader::<String, _>::new(fetch, 20);
        loader.refresh().await;

        let snap = loader.snapshot().await;
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.page, 1);
        assert_eq!(snap.total_pages, 1);
        assert_eq!(snap.total_elements, 2);
        assert!(!snap.has_more);
    }

    #[tokio::test]
    async fn test_backend_page_number_is_authoritative() {
        // Backend reports 0-based numbers regardless of what was asked
        let fetch = |_req: PageRequest| async {
            Ok::<_, Error>(json!({"content": [1], "number": 0, "totalPages": 2}))
        };
        let loader = PaginatedLoader::<u32, _>::new(fetch, 1);
        loader.refresh().await;
        assert_eq!(loader.page().await, 0);
        assert!(loader.has_more().await);

        loader.load_more().await;
        assert_eq!(loader.page().await, 0);
        assert_eq!(loader.items().await, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_refresh_error_surfaces_message() {
        let fetch = |_req: PageRequest| async { Err::<Value, _>(Error::fetch("Network down")) };
        let loader = PaginatedLoader::<u32, _>::new(fetch, 20);
        loader.refresh().await;

        let snap = loader.snapshot().await;
        assert_eq!(snap.error.as_deref(), Some("Network down"));
        assert!(!snap.loading);
        assert!(snap.items.is_empty());
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let fetch = |_req: PageRequest| async { Err::<Value, _>(Error::fetch("")) };
        let loader = PaginatedLoader::<u32, _>::new(fetch, 20);
        loader.refresh().await;
        assert_eq!(loader.error().await.as_deref(), Some("Failed to fetch data"));
    }

    #[tokio::test]
    async fn test_load_more_error_keeps_items_and_next_attempt_clears_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let fetch = move |req: PageRequest| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 1 {
                    return Err(Error::Http {
                        status: 503,
                        message: "HTTP Error: 503 - Service Unavailable".to_string(),
                    });
                }
                Ok(json!({"content": [req.page], "number": req.page, "totalPages": 3}))
            }
        };
        let loader = PaginatedLoader::<u32, _>::new(fetch, 1);

        loader.refresh().await;
        loader.load_more().await;
        assert_eq!(
            loader.error().await.as_deref(),
            Some("HTTP Error: 503 - Service Unavailable")
        );
        assert_eq!(loader.items().await, vec![1]);
        assert_eq!(loader.page().await, 1);

        // Manual retry
        loader.load_more().await;
        assert!(loader.error().await.is_none());
        assert_eq!(loader.items().await, vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_undecodable_item_is_a_fetch_error() {
        let fetch = |_req: PageRequest| async { Ok::<_, Error>(json!({"content": ["not-a-number"]})) };
        let loader = PaginatedLoader::<u32, _>::new(fetch, 20);
        loader.refresh().await;
        assert!(loader.error().await.is_some());
        assert!(loader.is_empty().await);
        assert_eq!(loader.total_pages().await, 0);
    }

    #[tokio::test]
    async fn test_set_page_size_defers_fetch() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(3, 2), 2);
        loader.refresh().await;
        loader.load_more().await;
        assert_eq!(loader.fetcher().calls(), 2);

        loader.set_page_size(50).await.unwrap();

        let snap = loader.snapshot().await;
        assert!(snap.items.is_empty());
        assert_eq!(snap.page, 1);
        assert_eq!(snap.size, 50);
        assert_eq!(loader.fetcher().calls(), 2);

        loader.refresh().await;
        let last = *loader.fetcher().requests.lock().unwrap().last().unwrap();
        assert_eq!(last, PageRequest::new(1, 50));
    }

    #[tokio::test]
    async fn test_set_page_size_rejects_zero() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(3, 2), 2);
        assert!(matches!(
            loader.set_page_size(0).await,
            Err(Error::InvalidPageSize)
        ));
        assert_eq!(loader.size().await, 2);
    }

    #[tokio::test]
    async fn test_zero_initial_size_uses_default() {
        let loader = PaginatedLoader::<u32, _>::new(ScriptedFetcher::new(1, 1), 0);
        assert_eq!(loader.size().await, DEFAULT_PAGE_SIZE);
    }
}
