//! Paged list loading
//!
//! - [`PageRequest`] - the `paged/page/size` parameters sent for each page
//! - [`PageFetcher`] - anything that turns a request into a raw envelope
//! - [`NormalizedPage`] - tolerant parsing of the backend's envelope shapes
//! - [`PaginatedLoader`] - accumulated list state driven by a view

pub mod envelope;
pub mod fetcher;
pub mod loader;
pub mod request;

pub use envelope::{ContentLocation, NormalizedPage};
pub use fetcher::PageFetcher;
pub use loader::{LoaderSnapshot, PaginatedLoader, DEFAULT_PAGE_SIZE};
pub use request::{PageRequest, FIRST_PAGE};
