//! Page request parameters

use serde::Serialize;

/// Index of the first page. Pages are 1-based throughout the client.
pub const FIRST_PAGE: u32 = 1;

/// Parameters handed to a [`PageFetcher`](super::PageFetcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub paged: bool,
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            paged: true,
            page,
            size,
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(FIRST_PAGE, size)
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("paged", self.paged.to_string()),
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}
