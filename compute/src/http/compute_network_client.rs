use std::sync::Arc;

use crate::http::error::Error;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::networks;
use crate::http::networks::Network;
use crate::http::operations::Operation;

#[derive(Clone)]
pub struct ComputeNetworkClient {
    inner: Arc<GoogleApiClient>,
}

impl ComputeNetworkClient {
    pub fn new(inner: Arc<GoogleApiClient>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert(&self, project_id: &str, network: &Network) -> Result<Operation, Error> {
        let builder = networks::insert::build(self.inner.endpoint(), self.inner.http(), project_id, network);
        self.inner.send(builder).await
    }
}
