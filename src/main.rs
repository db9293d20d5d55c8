//! SecureView command-line client
//!
//! Pages through one backend resource and prints each record as a JSON line.
//!
//! ```text
//! secureview <cameras|events|locations|visitor-logs> [max_pages]
//! ```

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secureview_client::api::ApiClient;
use secureview_client::auth::{AuthService, FileTokenStore, TokenStore};
use secureview_client::config;
use secureview_client::services::{
    CameraService, EventService, Listing, LocationService, VisitorLogService,
};
use secureview_client::types::{Camera, CameraLocation, Event, LoginCredentials, VisitorLog};

const DEFAULT_MAX_PAGES: u32 = 5;
const USAGE: &str = "usage: secureview <cameras|events|locations|visitor-logs> [max_pages]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays machine-readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secureview_client=debug,secureview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let resource = args.next().context(USAGE)?;
    let max_pages = match args.next() {
        Some(n) => n.parse::<u32>().context("max_pages must be a number")?,
        None => DEFAULT_MAX_PAGES,
    };

    // Load configuration
    let config = config::load_config()?;
    info!(base_url = %config.base_url, page_size = config.page_size, "Configuration loaded");

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open_default());
    let api = Arc::new(ApiClient::new(&config, tokens)?);

    let auth = AuthService::new(api.clone());
    if !auth.is_authenticated().await {
        match config.credentials() {
            Some((username, password)) => {
                auth.login(&LoginCredentials {
                    username: username.to_string(),
                    password: password.to_string(),
                })
                .await
                .context("login failed")?;
            }
            None => warn!("No stored session and no credentials configured, requests are anonymous"),
        }
    }

    let page_size = config.page_size;
    match resource.as_str() {
        "cameras" => dump::<Camera>(CameraService::new(api).list(), page_size, max_pages).await,
        "events" => dump::<Event>(EventService::new(api).list(), page_size, max_pages).await,
        "locations" => {
            dump::<CameraLocation>(LocationService::new(api).list(), page_size, max_pages).await
        }
        "visitor-logs" => {
            dump::<VisitorLog>(VisitorLogService::new(api).list(), page_size, max_pages).await
        }
        other => bail!("unknown resource '{}'\n{}", other, USAGE),
    }
}

/// Load up to `max_pages` pages and print every record.
async fn dump<T>(listing: Listing, page_size: u32, max_pages: u32) -> Result<()>
where
    T: DeserializeOwned + Serialize + Clone + Send + Sync,
{
    let endpoint = listing.endpoint();
    let loader = listing.loader::<T>(page_size);

    loader.refresh().await;
    let mut pages = 1;
    while pages < max_pages && loader.has_more().await {
        loader.load_more().await;
        if loader.error().await.is_some() {
            break;
        }
        pages += 1;
    }

    let snapshot = loader.snapshot().await;
    for item in &snapshot.items {
        println!("{}", serde_json::to_string(item)?);
    }
    info!(
        endpoint,
        loaded = snapshot.items.len(),
        total = snapshot.total_elements,
        pages,
        has_more = snapshot.has_more,
        "Listing complete"
    );

    if let Some(error) = snapshot.error {
        bail!("{}: {}", endpoint, error);
    }
    Ok(())
}
