//! Page envelope normalization
//!
//! List endpoints do not agree on how a page is wrapped. Spring HATEOAS
//! responses put items under `_embedded.content` with metadata in a `page`
//! object, plain Spring pages use top-level `content` and camelCase totals,
//! and a few endpoints return `data` as either the array or a wrapper.
//!
//! [`NormalizedPage::from_envelope`] tries each known layout in a fixed
//! order and falls back to "one page, whatever came back".

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Where a page's content array can live, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLocation {
    /// `_embedded.content`
    Embedded,
    /// `content`
    TopLevel,
    /// `data.content`, only when `data` is an object
    DataWrapper,
    /// `data` itself, only when it is an array
    DataArray,
}

impl ContentLocation {
    pub const PRIORITY: [ContentLocation; 4] = [
        Self::Embedded,
        Self::TopLevel,
        Self::DataWrapper,
        Self::DataArray,
    ];

    fn pointer(self) -> &'static str {
        match self {
            Self::Embedded => "/_embedded/content",
            Self::TopLevel => "/content",
            Self::DataWrapper => "/data/content",
            Self::DataArray => "/data",
        }
    }

    /// Whether `envelope` holds a non-empty array at this location.
    fn matches(self, envelope: &Value) -> bool {
        let data = envelope.get("data");
        let shape_ok = match self {
            Self::DataWrapper => data.is_some_and(Value::is_object),
            Self::DataArray => data.is_some_and(Value::is_array),
            Self::Embedded | Self::TopLevel => true,
        };
        shape_ok
            && envelope
                .pointer(self.pointer())
                .and_then(Value::as_array)
                .is_some_and(|items| !items.is_empty())
    }

    /// First location that matches `envelope`.
    pub fn detect(envelope: &Value) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|loc| loc.matches(envelope))
    }

    fn take(self, envelope: &mut Value) -> Vec<Value> {
        match envelope.pointer_mut(self.pointer()).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }
}

/// A page envelope reduced to the fields the loader cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPage<T = Value> {
    pub content: Vec<T>,
    /// Page index reported by the backend (or the requested one)
    pub number: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl NormalizedPage<Value> {
    pub fn from_envelope(mut envelope: Value, requested_page: u32) -> Self {
        let content = ContentLocation::detect(&envelope)
            .map(|loc| loc.take(&mut envelope))
            .unwrap_or_default();

        let page_info = match envelope.get("page") {
            Some(page) if page.is_object() => page,
            _ => &envelope,
        };

        let number = page_field(page_info, "number").unwrap_or(requested_page);

        let total_pages = page_field(page_info, "total_pages")
            .or_else(|| page_field(page_info, "totalPages"))
            .or_else(|| page_field(&envelope, "totalPages"))
            .unwrap_or(1);

        let total_elements = count_field(page_info, "total_elements")
            .or_else(|| count_field(page_info, "totalElements"))
            .or_else(|| count_field(&envelope, "totalElements"))
            .unwrap_or(content.len() as u64);

        Self {
            content,
            number,
            total_pages,
            total_elements,
        }
    }

    /// Decode every content element into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<NormalizedPage<T>> {
        let content = self
            .content
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(NormalizedPage {
            content,
            number: self.number,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        })
    }
}

/// Read a non-negative count. Accepts integers, whole floats, and numeric
/// strings; anything else counts as absent.
fn count_field(source: &Value, key: &str) -> Option<u64> {
    match source.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// [`count_field`] narrowed to `u32`; out-of-range values count as absent.
fn page_field(source: &Value, key: &str) -> Option<u32> {
    count_field(source, key).and_then(|n| u32::try_from(n).ok())
}
