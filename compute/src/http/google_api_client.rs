use std::sync::Arc;

use reqwest::Response;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use token_source::TokenSource;

use crate::http::error::{Error, ErrorWrapper};

/// Authenticated JSON transport for one Google API endpoint.
#[derive(Debug, Clone)]
pub struct GoogleApiClient {
    ts: Option<Arc<dyn TokenSource>>,
    endpoint: String,
    http: Client,
    debug: bool,
}

impl GoogleApiClient {
    pub(crate) fn new(ts: Option<Arc<dyn TokenSource>>, endpoint: &str, http: Client, debug: bool) -> Self {
        Self {
            ts,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
            debug,
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    async fn with_headers(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let builder = builder
            .header("X-Goog-Api-Client", "rust")
            .header(reqwest::header::USER_AGENT, "aether");
        Ok(match &self.ts {
            Some(ts) => {
                let token = ts.token().await.map_err(Error::TokenSource)?;
                builder.header(reqwest::header::AUTHORIZATION, token)
            }
            None => builder,
        })
    }

    pub async fn send<T>(&self, builder: RequestBuilder) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self.with_headers(builder).await?;
        let response = request.send().await?;
        let response = Self::check_response_status(response).await?;
        if self.debug {
            let text = response.text().await?;
            tracing::info!("{}", text);
            Ok(serde_json::from_str(text.as_str())?)
        } else {
            Ok(response.json().await?)
        }
    }

    /// Checks whether an HTTP response is successful and returns it, or returns an error.
    async fn check_response_status(response: Response) -> Result<Response, Error> {
        // Check the status code, returning the response if it is not an error.
        let error = match response.error_for_status_ref() {
            Ok(_) => return Ok(response),
            Err(error) => error,
        };

        // try to extract a response error, falling back to the status error if it can not be parsed.
        Err(response
            .json::<ErrorWrapper>()
            .await
            .map(|wrapper| Error::Response(wrapper.error))
            .unwrap_or(Error::HttpClient(error)))
    }
}
