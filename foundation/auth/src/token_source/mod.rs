pub mod authorized_user_token_source;
pub mod reuse_token_source;

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::token::Token;

#[async_trait]
pub trait TokenSource: Send + Sync + Debug {
    async fn token(&self) -> Result<Token, Error>;
}

pub(crate) fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}

#[derive(Clone, Deserialize)]
pub(crate) struct InternalToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

impl InternalToken {
    pub(crate) fn to_token(self, now: time::OffsetDateTime) -> Token {
        Token {
            access_token: self.access_token,
            token_type: self.token_type,
            refresh_token: self.refresh_token,
            scope: self.scope,
            expiry: self.expires_in.map(|s| now + time::Duration::seconds(s)),
        }
    }
}

/// Posts a form to a token endpoint and decodes the token response.
pub(crate) async fn request_token<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    token_url: &str,
    form: &T,
) -> Result<InternalToken, Error> {
    let response = client.post(token_url).form(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_else(|e| e.to_string());
        return Err(Error::TokenResponseError(status.as_u16(), text));
    }
    Ok(response.json::<InternalToken>().await?)
}
