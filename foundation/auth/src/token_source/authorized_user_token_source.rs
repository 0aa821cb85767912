use async_trait::async_trait;

use crate::credentials::ClientSecret;
use crate::error::Error;
use crate::token::Token;
use crate::token_source::{default_http_client, request_token, TokenSource};
use crate::token_store::FileTokenStore;

/// Exchanges a stored refresh token for fresh access tokens.
#[derive(Debug)]
pub struct UserAccountTokenSource {
    client_id: String,
    client_secret: String,
    token_url: String,
    refresh_token: String,
    scope: Option<String>,
    store: Option<FileTokenStore>,

    client: reqwest::Client,
}

impl UserAccountTokenSource {
    pub(crate) fn new(
        secret: &ClientSecret,
        token: &Token,
        store: Option<FileTokenStore>,
    ) -> Result<UserAccountTokenSource, Error> {
        let refresh_token = token.refresh_token.clone().ok_or(Error::RefreshTokenIsRequired)?;
        Ok(UserAccountTokenSource {
            client_id: secret.client_id.clone(),
            client_secret: secret.client_secret.clone(),
            token_url: secret.token_uri().to_string(),
            refresh_token,
            scope: token.scope.clone(),
            store,
            client: default_http_client(),
        })
    }
}

#[derive(serde::Serialize)]
struct RequestBody<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'a str,
    pub refresh_token: &'a str,
}

#[async_trait]
impl TokenSource for UserAccountTokenSource {
    async fn token(&self) -> Result<Token, Error> {
        let data = RequestBody {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            grant_type: "refresh_token",
            refresh_token: &self.refresh_token,
        };

        let it = request_token(&self.client, &self.token_url, &data).await?;
        let mut token = it.to_token(time::OffsetDateTime::now_utc());
        // The token endpoint only returns a refresh token when it rotates it.
        if token.refresh_token.is_none() {
            token.refresh_token = Some(self.refresh_token.clone());
        }
        if token.scope.is_none() {
            token.scope = self.scope.clone();
        }

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&token).await {
                tracing::warn!("failed to persist refreshed token: {e}");
            }
        }
        Ok(token)
    }
}
