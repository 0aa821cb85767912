use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Error;
use crate::token::Token;

const TOKEN_FILE: &str = "token.json";
const APPLICATION_DIR: &str = "aether";

/// Persists a single OAuth token as JSON on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.config/aether/token.json`, or `%APPDATA%\aether\token.json` on windows.
    pub fn default_location() -> Result<Self, Error> {
        let dir = if cfg!(target_os = "windows") {
            let app_data = std::env::var("APPDATA").map_err(|_| Error::NoHomeDirectoryFound)?;
            Path::new(app_data.as_str()).join(APPLICATION_DIR)
        } else {
            match home::home_dir() {
                Some(s) => s.join(".config").join(APPLICATION_DIR),
                None => return Err(Error::NoHomeDirectoryFound),
            }
        };
        Ok(Self::new(dir.join(TOKEN_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<Token>, Error> {
        match fs::read(&self.path).await {
            Ok(json) => Ok(Some(serde_json::from_slice(json.as_slice())?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    pub async fn save(&self, token: &Token) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_vec_pretty(token)?;
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).await.map_err(|e| self.io_error(e))?;
        // mode only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| self.io_error(e))?;
        }
        file.write_all(&json).await.map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;
        tracing::debug!("token saved to {}", self.path.display());
        Ok(())
    }

    fn io_error(&self, e: std::io::Error) -> Error {
        Error::TokenStoreIOError(self.path.display().to_string(), e)
    }
}
