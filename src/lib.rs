//! SecureView Client
//!
//! Client for viewing security-camera feeds, visitor entry/exit logs, and
//! site events across multiple locations, backed by the SecureView REST API.
//!
//! This library provides:
//! - Paged list loading with tolerant envelope parsing ([`pagination`])
//! - A shared HTTP client with bearer-token auth ([`api`])
//! - Login and session persistence ([`auth`])
//! - Camera, event, location, and visitor-log services ([`services`])

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod pagination;
pub mod services;

pub use error::{Error, Result};
pub use pagination::{LoaderSnapshot, PageFetcher, PageRequest, PaginatedLoader};

/// Wire types, re-exported so consumers need only this crate.
pub use secureview_types as types;
