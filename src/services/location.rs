//! Location service (read-only, plus playback sync)

use secureview_types::CameraLocation;
use std::sync::Arc;
use tracing::info;

use super::{eq, like_any, Listing};
use crate::api::ApiClient;
use crate::error::Result;

const CAMERA_LOCATION: &str = "/camera-location";
const CAMERA_LOCATIONS: &str = "/camera-locations";
const FETCH_STORE_PLAYBACKS: &str = "/fetch-store-playbacks";

const SEARCH_FIELDS: [&str; 2] = ["location_name", "location_code"];

pub struct LocationService {
    api: Arc<ApiClient>,
}

impl LocationService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /camera-location/{location_id}
    pub async fn get(&self, location_id: i64) -> Result<CameraLocation> {
        self.api
            .get(&format!("{}/{}", CAMERA_LOCATION, location_id), &vec![])
            .await
    }

    /// GET /camera-locations
    pub fn list(&self) -> Listing {
        Listing::new(self.api.clone(), CAMERA_LOCATIONS)
    }

    /// Matches location name or code.
    pub fn search(&self, term: &str) -> Listing {
        self.list().with_filter(like_any(&SEARCH_FIELDS, term))
    }

    pub fn by_city(&self, city: &str) -> Listing {
        self.list().with_filter(eq("location_city", city))
    }

    pub fn by_state(&self, state: &str) -> Listing {
        self.list().with_filter(eq("location_state", state))
    }

    /// POST /fetch-store-playbacks?location_id={id}
    pub async fn fetch_and_store_playbacks(&self, location_id: i64) -> Result<()> {
        self.api
            .post::<(), serde_json::Value>(
                FETCH_STORE_PLAYBACKS,
                None,
                &vec![("location_id", Some(location_id.to_string()))],
            )
            .await?;
        info!(location_id, "Requested playback sync");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_location_filters() {
        let s = LocationService::new(test_server::anonymous_client("http://localhost/v2"));
        assert_eq!(
            s.search("north").filter(),
            Some("location_name:like:north,location_code:like:north")
        );
        assert_eq!(s.by_city("Calgary").filter(), Some("location_city:Calgary"));
        assert_eq!(s.by_state("AB").filter(), Some("location_state:AB"));
        assert_eq!(s.list().endpoint(), "/camera-locations");
    }

    #[tokio::test]
    async fn test_get_location_and_playbacks() {
        let app = Router::new()
            .route(
                "/v2/camera-location/12",
                get(|| async { Json(json!({"ycl_id": 12, "ycl_name": "Main Yard"})) }),
            )
            .route(
                "/v2/fetch-store-playbacks",
                post(|Query(q): Query<HashMap<String, String>>| async move {
                    if q.get("location_id").map(String::as_str) == Some("12") {
                        StatusCode::ACCEPTED
                    } else {
                        StatusCode::BAD_REQUEST
                    }
                }),
            );
        let base = test_server::spawn(app).await;
        let service = LocationService::new(test_server::anonymous_client(&base));

        assert_eq!(service.get(12).await.unwrap().ycl_name, "Main Yard");
        service.fetch_and_store_playbacks(12).await.unwrap();
        assert_eq!(
            service.fetch_and_store_playbacks(13).await.unwrap_err().status(),
            Some(400)
        );
    }
}
