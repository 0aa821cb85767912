use std::sync::Arc;

use crate::http::error::Error;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::projects;
use crate::http::projects::get_iam_policy::GetIamPolicyRequest;
use crate::http::projects::set_iam_policy::SetIamPolicyRequest;
use crate::http::types::{GetPolicyOptions, Policy};

#[derive(Clone)]
pub struct ResourceManagerProjectClient {
    inner: Arc<GoogleApiClient>,
}

impl ResourceManagerProjectClient {
    pub fn new(inner: Arc<GoogleApiClient>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_iam_policy(&self, project_id: &str, options: &GetPolicyOptions) -> Result<Policy, Error> {
        let req = GetIamPolicyRequest {
            options: Some(options.clone()),
        };
        let builder = projects::get_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, &req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn set_iam_policy(&self, project_id: &str, policy: Policy) -> Result<Policy, Error> {
        let req = SetIamPolicyRequest {
            policy,
            update_mask: None,
        };
        let builder = projects::set_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, &req);
        self.inner.send(builder).await
    }
}
