use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use token_source::{TokenSource, TokenSourceProvider};

use crate::credentials::ClientSecretsFile;
use crate::error::Error;
use crate::flow::AuthorizationCodeFlow;
use crate::token_source::authorized_user_token_source::UserAccountTokenSource;
use crate::token_source::reuse_token_source::ReuseTokenSource;
use crate::token_source::TokenSource as InternalTokenSource;
use crate::token_store::FileTokenStore;

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Space separated scopes granted to this token, as reported by the token endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expiry: Option<time::OffsetDateTime>,
}

// Possible sensitive info in debug messages
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl Token {
    pub fn value(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn valid(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }

    fn expired(&self) -> bool {
        match self.expiry {
            None => false,
            Some(s) => {
                let now = time::OffsetDateTime::now_utc();
                let exp = s + time::Duration::seconds(-10);
                now > exp
            }
        }
    }

    /// Whether every requested scope was granted to this token.
    /// Tokens without scope information are assumed to cover everything.
    pub fn covers(&self, scopes: &[&str]) -> bool {
        match &self.scope {
            None => true,
            Some(granted) => {
                let granted: Vec<&str> = granted.split_whitespace().collect();
                scopes.iter().all(|s| granted.contains(s))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config<'a> {
    scopes: Option<&'a [&'a str]>,
    token_store: Option<FileTokenStore>,
}

impl<'a> Config<'a> {
    pub fn scopes_to_string(&self, sep: &str) -> String {
        self.scopes.unwrap_or_default().join(sep)
    }

    pub fn with_scopes(mut self, value: &'a [&'a str]) -> Self {
        self.scopes = Some(value);
        self
    }

    pub fn with_token_store(mut self, value: FileTokenStore) -> Self {
        self.token_store = Some(value);
        self
    }
}

/// Provides bearer tokens for an installed OAuth application.
///
/// A cached token is read from the token store. When none is cached, or the cached one lacks a
/// refresh token or one of the requested scopes, the authorization code flow is run once and its
/// result stored.
pub struct DefaultTokenSourceProvider {
    ts: Arc<DefaultTokenSource>,
    pub project_id: Option<String>,
}

impl Debug for DefaultTokenSourceProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTokenSourceProvider")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl DefaultTokenSourceProvider {
    pub async fn new(config: Config<'_>, secrets: ClientSecretsFile) -> Result<Self, Error> {
        let secret = secrets.secret()?.clone();
        let store = match config.token_store.clone() {
            Some(store) => store,
            None => FileTokenStore::default_location()?,
        };
        let scopes = config.scopes.unwrap_or_default();

        let token = match store.load().await? {
            Some(token) if token.refresh_token.is_some() && token.covers(scopes) => {
                tracing::debug!("using cached token from {}", store.path().display());
                token
            }
            _ => {
                let flow = AuthorizationCodeFlow::new(secret.clone(), config.scopes_to_string(" "));
                let token = flow.authorize().await?;
                store.save(&token).await?;
                token
            }
        };

        let source = UserAccountTokenSource::new(&secret, &token, Some(store))?;
        Ok(Self::from_token_source(
            Box::new(ReuseTokenSource::new(Box::new(source), token)),
            secret.project_id,
        ))
    }

    pub(crate) fn from_token_source(inner: Box<dyn InternalTokenSource>, project_id: Option<String>) -> Self {
        Self {
            ts: Arc::new(DefaultTokenSource { inner: inner.into() }),
            project_id,
        }
    }
}

impl TokenSourceProvider for DefaultTokenSourceProvider {
    fn token_source(&self) -> Arc<dyn TokenSource> {
        self.ts.clone()
    }
}

#[derive(Debug, Clone)]
pub struct DefaultTokenSource {
    inner: Arc<dyn InternalTokenSource>,
}

#[async_trait]
impl TokenSource for DefaultTokenSource {
    async fn token(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let token = self.inner.token().await?;
        Ok(token.value())
    }
}
