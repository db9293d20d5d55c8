//! Login request/response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Nested `data` object some login endpoints wrap their payload in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Login response body. The token may sit at the top level, under `data`,
/// or only in a response header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LoginData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginResponse {
    /// First non-empty token in the body: `token`, `access_token`,
    /// `data.token`, `data.access_token`.
    pub fn body_token(&self) -> Option<&str> {
        let data = self.data.as_ref();
        [
            self.token.as_deref(),
            self.access_token.as_deref(),
            data.and_then(|d| d.token.as_deref()),
            data.and_then(|d| d.access_token.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<&User> {
        self.user
            .as_ref()
            .or_else(|| self.data.as_ref().and_then(|d| d.user.as_ref()))
    }
}
