//! Persistent storage for the backend bearer token

use crate::error::{ClientError, ClientResult};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const TOKEN_FILE: &str = "auth_token";

/// File-backed token store
///
/// A missing file means "not logged in". No locking: the CLI is the only
/// writer.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or the platform data directory
    ///
    /// # Errors
    ///
    /// Fails when no path is configured and the platform has no home directory.
    pub fn from_config(token_path: Option<&Path>) -> ClientResult<Self> {
        if let Some(path) = token_path {
            return Ok(Self::at(path));
        }

        let dirs = directories::ProjectDirs::from("com", "staycrm", "staycrm").ok_or_else(|| {
            ClientError::Configuration("cannot determine a data directory for the token".into())
        })?;
        Ok(Self::at(dirs.data_dir().join(TOKEN_FILE)))
    }

    /// Path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the token; `None` when absent or blank
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than "file not found".
    pub async fn load(&self) -> ClientResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                debug!(path = %self.path.display(), present = !token.is_empty(), "read auth token");
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist `token`, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token.trim()).await?;
        debug!(path = %self.path.display(), "stored auth token");
        Ok(())
    }

    /// Remove the stored token; a no-op when there is none
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than "file not found".
    pub async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
