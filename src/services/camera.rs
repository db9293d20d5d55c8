//! Camera service (read-only)

use secureview_types::Camera;
use std::sync::Arc;

use super::{eq, like_any, Listing};
use crate::api::ApiClient;
use crate::error::Result;

const CAMERA: &str = "/camera";
const CAMERAS: &str = "/cameras";

/// Fields the camera search matches against.
const SEARCH_FIELDS: [&str; 3] = ["camera_location", "camera_company", "camera_mac"];

pub struct CameraService {
    api: Arc<ApiClient>,
}

impl CameraService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /camera/{camera_id}
    pub async fn get(&self, camera_id: i64) -> Result<Camera> {
        self.api
            .get(&format!("{}/{}", CAMERA, camera_id), &vec![])
            .await
    }

    /// GET /cameras
    pub fn list(&self) -> Listing {
        Listing::new(self.api.clone(), CAMERAS)
    }

    pub fn by_location(&self, location_id: i64) -> Listing {
        self.list().with_filter(eq("location_id", location_id))
    }

    /// Matches location, company, or MAC address.
    pub fn search(&self, keyword: &str) -> Listing {
        self.list().with_filter(like_any(&SEARCH_FIELDS, keyword))
    }
}
