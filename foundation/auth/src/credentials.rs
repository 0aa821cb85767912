use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::error::Error;
use crate::token::{AUTH_URL, TOKEN_URL};

/// One OAuth client registration as downloaded from the Google Cloud console.
#[derive(Deserialize, Clone, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    pub project_id: Option<String>,
    pub auth_uri: Option<String>,
    pub token_uri: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl ClientSecret {
    pub fn auth_uri(&self) -> &str {
        self.auth_uri.as_deref().unwrap_or(AUTH_URL)
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(TOKEN_URL)
    }
}

// Possible sensitive info in debug messages
#[cfg(not(test))]
impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecret")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// The `client_secret.json` file. Exactly one of `installed` and `web` is expected.
#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct ClientSecretsFile {
    pub installed: Option<ClientSecret>,
    pub web: Option<ClientSecret>,
}

impl ClientSecretsFile {
    pub async fn new_from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read(path)
            .await
            .map_err(|e| Error::ClientSecretsIOError(path.display().to_string(), e))?;
        Ok(serde_json::from_slice(json.as_slice())?)
    }

    pub fn new_from_str(str: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(str)?)
    }

    /// Returns the installed-application client, falling back to the web client.
    pub fn secret(&self) -> Result<&ClientSecret, Error> {
        self.installed
            .as_ref()
            .or(self.web.as_ref())
            .ok_or(Error::UnsupportedClientType)
    }
}

#[cfg(test)]
mod test {
    use crate::credentials::ClientSecretsFile;
    use crate::error::Error;
    use crate::token::TOKEN_URL;

    #[test]
    fn test_installed_client() {
        let json = r#"{
            "installed": {
                "client_id": "123.apps.googleusercontent.com",
                "project_id": "example",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_secret": "secret",
                "redirect_uris": ["http://localhost"]
            }
        }"#;
        let file = ClientSecretsFile::new_from_str(json).unwrap();
        let secret = file.secret().unwrap();
        assert_eq!(secret.client_id, "123.apps.googleusercontent.com");
        assert_eq!(secret.project_id.as_deref(), Some("example"));
        assert_eq!(secret.redirect_uris, vec!["http://localhost".to_string()]);
    }

    #[test]
    fn test_web_client_without_uris() {
        let json = r#"{"web": {"client_id": "abc", "client_secret": "def"}}"#;
        let file = ClientSecretsFile::new_from_str(json).unwrap();
        let secret = file.secret().unwrap();
        assert_eq!(secret.token_uri(), TOKEN_URL);
        assert!(secret.redirect_uris.is_empty());
    }

    #[test]
    fn test_unsupported_client() {
        let file = ClientSecretsFile::new_from_str("{}").unwrap();
        assert!(matches!(file.secret(), Err(Error::UnsupportedClientType)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = ClientSecretsFile::new_from_file("./does-not-exist/client_secret.json").await;
        assert!(matches!(result, Err(Error::ClientSecretsIOError(_, _))));
    }
}
