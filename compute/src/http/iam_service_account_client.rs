use std::sync::Arc;

use crate::http::error::Error;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::service_accounts;
use crate::http::service_accounts::create::CreateServiceAccountRequest;
use crate::http::service_accounts::set_iam_policy::SetIamPolicyRequest;
use crate::http::service_accounts::ServiceAccount;
use crate::http::types::{GetPolicyOptions, Policy};

#[derive(Clone)]
pub struct IamServiceAccountClient {
    inner: Arc<GoogleApiClient>,
}

impl IamServiceAccountClient {
    pub fn new(inner: Arc<GoogleApiClient>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(&self, project_id: &str, req: &CreateServiceAccountRequest) -> Result<ServiceAccount, Error> {
        let builder = service_accounts::create::build(self.inner.endpoint(), self.inner.http(), project_id, req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_iam_policy(
        &self,
        project_id: &str,
        email: &str,
        options: &GetPolicyOptions,
    ) -> Result<Policy, Error> {
        let builder =
            service_accounts::get_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, email, options);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn set_iam_policy(&self, project_id: &str, email: &str, policy: Policy) -> Result<Policy, Error> {
        let req = SetIamPolicyRequest { policy };
        let builder =
            service_accounts::set_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, email, &req);
        self.inner.send(builder).await
    }
}
