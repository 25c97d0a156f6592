use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{ClientError, ClientResult};

/// Credentials for one run of the dashboard. Built once at entry and handed to
/// every call that talks to the backend.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub async fn from_store(store: &dyn TokenStore) -> Result<Self> {
        Ok(match store.load().await? {
            Some(token) => Self::with_token(token),
            None => Self::anonymous(),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn require_token(&self) -> ClientResult<&str> {
        self.token().ok_or(ClientError::MissingToken)
    }
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// Keeps the bearer token in a small JSON file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read token file '{}'", self.path.display()))
            }
        };
        let stored: StoredToken = serde_json::from_str(&raw)
            .with_context(|| format!("token file '{}' is corrupted", self.path.display()))?;
        let token = stored.token.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create token directory '{}'", parent.display())
            })?;
        }
        let raw = serde_json::to_string(&StoredToken {
            token: token.trim().to_string(),
        })?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("failed to write token file '{}'", self.path.display()))
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to remove token file '{}'", self.path.display())),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(str::to_string)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_means_anonymous() {
        assert!(!Session::with_token("   ").is_authenticated());
        assert!(matches!(
            Session::anonymous().require_token(),
            Err(ClientError::MissingToken)
        ));
        assert_eq!(Session::with_token(" abc ").token(), Some("abc"));
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", Session::with_token("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }

    #[tokio::test]
    async fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json"));

        assert_eq!(store.load().await.expect("load empty"), None);
        store.save("jwt-123").await.expect("save");
        let session = Session::from_store(&store).await.expect("session");
        assert_eq!(session.token(), Some("jwt-123"));

        store.clear().await.expect("clear");
        store.clear().await.expect("clear twice");
        assert!(!Session::from_store(&store)
            .await
            .expect("session")
            .is_authenticated());
    }

    #[tokio::test]
    async fn file_store_reports_corrupted_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").expect("write");
        let err = FileTokenStore::new(&path).load().await.expect_err("corrupted");
        assert!(err.to_string().contains("corrupted"));
    }
}
