//! Login and session handling

mod store;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

use reqwest::header::{HeaderMap, AUTHORIZATION};
use secureview_types::{LoginCredentials, LoginResponse, User};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::{Error, Result};

const LOGIN_ENDPOINT: &str = "/login";
const REFRESH_TOKEN_ENDPOINT: &str = "/refresh-token";

/// Headers some deployments return the JWT in, checked after `Authorization`.
const TOKEN_HEADERS: [&str; 3] = ["x-auth-token", "x-access-token", "token"];

pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Sign in and store the token (and user, when the response carries one).
    ///
    /// Returns the token that was stored. If storing fails the store is left
    /// signed out.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String> {
        let response = self
            .api
            .post_unauthenticated(LOGIN_ENDPOINT, credentials)
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: body_message(&body).unwrap_or_else(|| "Login failed".to_string()),
            });
        }

        let login: LoginResponse = serde_json::from_value(body).unwrap_or_default();
        let token = resolve_token(&headers, &login).ok_or(Error::MissingToken)?;

        let tokens = self.api.tokens();
        tokens.save_token(&token).await?;
        if let Some(user) = login.user() {
            // A half-stored session would leave requests authorized after a failed login
            if let Err(e) = tokens.save_user(user).await {
                if let Err(clear_err) = tokens.clear().await {
                    warn!("Failed to roll back session token: {}", clear_err);
                }
                return Err(e);
            }
        }

        info!(user = %credentials.username, "Signed in");
        Ok(token)
    }

    /// Exchange a refresh token for a new session. The new token is stored.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<LoginResponse> {
        let response = self
            .api
            .post_unauthenticated(
                REFRESH_TOKEN_ENDPOINT,
                &json!({ "refresh_token": refresh_token }),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: "Token refresh failed".to_string(),
            });
        }

        let headers = response.headers().clone();
        let login: LoginResponse = response.json().await?;
        if let Some(token) = resolve_token(&headers, &login) {
            self.api.tokens().save_token(&token).await?;
            debug!("Session token refreshed");
        }
        Ok(login)
    }

    pub async fn logout(&self) -> Result<()> {
        self.api.tokens().clear().await?;
        info!("Signed out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.api.tokens().token().await.is_some()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.api.tokens().user().await
    }
}

fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Token from response headers first, then from the body.
///
/// `Authorization` wins (with any `Bearer ` prefix stripped), then the
/// custom token headers, then [`LoginResponse::body_token`].
pub fn resolve_token(headers: &HeaderMap, body: &LoginResponse) -> Option<String> {
    if let Some(auth) = header_value(headers, AUTHORIZATION.as_str()) {
        return Some(auth.strip_prefix("Bearer ").unwrap_or(auth).to_string());
    }
    TOKEN_HEADERS
        .iter()
        .find_map(|name| header_value(headers, name))
        .or_else(|| body.body_token())
        .map(str::to_string)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
