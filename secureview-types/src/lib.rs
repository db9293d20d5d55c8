//! Shared wire types for the SecureView backend.
//!
//! These are the records the REST API hands back to the client:
//! - [`camera`] - Cameras and their installation metadata
//! - [`event`] - Camera events and event-record sync requests
//! - [`location`] - Physical sites (yards) that cameras belong to
//! - [`visitor_log`] - Yard entry/exit records
//! - [`auth`] - Login request/response types
//!
//! Every optional backend field deserializes with a default and unknown
//! fields are ignored, since the backend adds fields without notice.

pub mod auth;
pub mod camera;
pub mod event;
pub mod location;
pub mod visitor_log;

// Re-export commonly used types at crate root
pub use auth::{LoginCredentials, LoginData, LoginResponse, User};
pub use camera::Camera;
pub use event::{CameraEventRecord, CameraEventRecordRequest, CameraEventRecordResponse, Event};
pub use location::{CameraDetail, CameraLocation, ContactInfo, LocationContacts};
pub use visitor_log::{AccessType, CaptureType, VisitorLog, VisitorType};
