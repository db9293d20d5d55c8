//! Session token persistence

use async_trait::async_trait;
use secureview_types::User;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::config::get_config_dir;
use crate::error::Result;

const SESSION_FILE: &str = "session.json";

/// Where the bearer token and signed-in user live between requests.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn token(&self) -> Option<String>;
    async fn save_token(&self, token: &str) -> Result<()>;
    async fn user(&self) -> Option<User>;
    async fn save_user(&self, user: &User) -> Result<()>;
    /// Forget token and user.
    async fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// Process-local store, used by tests and one-shot CLI runs.
#[derive(Default)]
pub struct MemoryTokenStore {
    session: RwLock<Session>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            session: RwLock::new(Session {
                token: Some(token.into()),
                user: None,
            }),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        self.session.write().await.token = Some(token.to_string());
        Ok(())
    }

    async fn user(&self) -> Option<User> {
        self.session.read().await.user.clone()
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.session.write().await.user = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = Session::default();
        Ok(())
    }
}

/// JSON file store. The file is read once at construction and rewritten on
/// every change. Memory only takes a change once the file write succeeded.
pub struct FileTokenStore {
    path: PathBuf,
    session: RwLock<Session>,
}

impl FileTokenStore {
    /// Store at `session.json` in the config directory.
    pub fn open_default() -> Self {
        Self::open(get_config_dir().join(SESSION_FILE))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = load_session(&path);
        Self {
            path,
            session: RwLock::new(session),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("Saved session to {}", self.path.display());
        Ok(())
    }
}

/// Unreadable or corrupt files count as "signed out".
fn load_session(path: &Path) -> Session {
    if !path.exists() {
        return Session::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Session>(&content) {
            Ok(session) => {
                tracing::info!("Loaded session from {}", path.display());
                session
            }
            Err(e) => {
                tracing::warn!("Failed to parse session file: {}", e);
                Session::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read session file: {}", e);
            Session::default()
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        let mut session = self.session.write().await;
        let next = Session {
            token: Some(token.to_string()),
            ..session.clone()
        };
        self.persist(&next).await?;
        *session = next;
        Ok(())
    }

    async fn user(&self) -> Option<User> {
        self.session.read().await.user.clone()
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let mut session = self.session.write().await;
        let next = Session {
            user: Some(user.clone()),
            ..session.clone()
        };
        self.persist(&next).await?;
        *session = next;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut session = self.session.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *session = Session::default();
        Ok(())
    }
}
