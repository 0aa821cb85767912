use std::sync::Arc;

use crate::http::error::Error;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::instances;
use crate::http::instances::get_iam_policy::GetIamPolicyRequest;
use crate::http::instances::set_iam_policy::SetIamPolicyRequest;
use crate::http::instances::Instance;
use crate::http::operations::Operation;
use crate::http::types::{GetPolicyOptions, Policy};

#[derive(Clone)]
pub struct ComputeInstanceClient {
    inner: Arc<GoogleApiClient>,
}

impl ComputeInstanceClient {
    pub fn new(inner: Arc<GoogleApiClient>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert(&self, project_id: &str, zone: &str, instance: &Instance) -> Result<Operation, Error> {
        let builder = instances::insert::build(self.inner.endpoint(), self.inner.http(), project_id, zone, instance);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_iam_policy(
        &self,
        project_id: &str,
        zone: &str,
        resource: &str,
        options: &GetPolicyOptions,
    ) -> Result<Policy, Error> {
        let req = GetIamPolicyRequest::from(options);
        let builder =
            instances::get_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, zone, resource, &req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn set_iam_policy(
        &self,
        project_id: &str,
        zone: &str,
        resource: &str,
        policy: Policy,
    ) -> Result<Policy, Error> {
        let req = SetIamPolicyRequest { policy };
        let builder =
            instances::set_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, zone, resource, &req);
        self.inner.send(builder).await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::compute_instance_client::ComputeInstanceClient;
    use crate::http::google_api_client::test::create_client;
    use crate::http::instances::{Instance, ServiceAccount};
    use crate::http::types::{Binding, GetPolicyOptions, Policy};

    const INSTANCE_PATH: &str = "/projects/example/zones/europe-west6-a/instances";

    #[tokio::test]
    async fn test_insert() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INSTANCE_PATH))
            .and(body_json(json!({
                "name": "aether-009",
                "machineType": "zones/europe-west6-a/machineTypes/e2-standard-4",
                "serviceAccounts": [{
                    "email": "aether-009@example.iam.gserviceaccount.com",
                    "scopes": ["https://www.googleapis.com/auth/cloud-platform"]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "operation-3",
                "zone": "https://www.googleapis.com/compute/v1/projects/example/zones/europe-west6-a",
                "status": "PENDING"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ComputeInstanceClient::new(create_client(&server.uri()));
        let instance = Instance {
            name: "aether-009".to_string(),
            machine_type: "zones/europe-west6-a/machineTypes/e2-standard-4".to_string(),
            service_accounts: vec![ServiceAccount {
                email: "aether-009@example.iam.gserviceaccount.com".to_string(),
                scopes: vec!["https://www.googleapis.com/auth/cloud-platform".to_string()],
            }],
            ..Default::default()
        };
        let op = client.insert("example", "europe-west6-a", &instance).await.unwrap();
        assert_eq!(op.zone_name(), Some("europe-west6-a"));
    }

    #[tokio::test]
    async fn test_get_and_set_iam_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{INSTANCE_PATH}/aether-009/getIamPolicy")))
            .and(query_param("optionsRequestedPolicyVersion", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": 1,
                "etag": "BwX1"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{INSTANCE_PATH}/aether-009/setIamPolicy")))
            .and(body_json(json!({
                "policy": {
                    "version": 1,
                    "etag": "BwX1",
                    "bindings": [{"role": "roles/compute.instanceAdmin.v1", "members": ["user:owner@example.com"]}]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": 1,
                "etag": "BwX2",
                "bindings": [{"role": "roles/compute.instanceAdmin.v1", "members": ["user:owner@example.com"]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ComputeInstanceClient::new(create_client(&server.uri()));
        let options = GetPolicyOptions {
            requested_policy_version: Some(3),
        };
        let mut policy = client
            .get_iam_policy("example", "europe-west6-a", "aether-009", &options)
            .await
            .unwrap();
        assert!(policy.bindings.is_empty());
        policy.bindings.push(Binding {
            role: "roles/compute.instanceAdmin.v1".to_string(),
            members: vec!["user:owner@example.com".to_string()],
            condition: None,
        });
        let updated: Policy = client
            .set_iam_policy("example", "europe-west6-a", "aether-009", policy)
            .await
            .unwrap();
        assert_eq!(updated.etag.as_deref(), Some("BwX2"));
        assert_eq!(updated.bindings.len(), 1);
    }
}
