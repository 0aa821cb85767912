use std::sync::Arc;

use crate::http::error::Error;
use crate::http::firewalls;
use crate::http::firewalls::Firewall;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::operations::Operation;

#[derive(Clone)]
pub struct ComputeFirewallClient {
    inner: Arc<GoogleApiClient>,
}

impl ComputeFirewallClient {
    pub fn new(inner: Arc<GoogleApiClient>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert(&self, project_id: &str, firewall: &Firewall) -> Result<Operation, Error> {
        let builder = firewalls::insert::build(self.inner.endpoint(), self.inner.http(), project_id, firewall);
        self.inner.send(builder).await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::compute_firewall_client::ComputeFirewallClient;
    use crate::http::firewalls::{Allowed, Direction, Firewall};
    use crate::http::google_api_client::test::create_client;

    #[tokio::test]
    async fn test_insert() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/example/global/firewalls"))
            .and(body_json(json!({
                "name": "aether-009-net-allow-ssh",
                "network": "projects/example/global/networks/aether-009-net",
                "direction": "INGRESS",
                "priority": 65534,
                "sourceRanges": ["0.0.0.0/0"],
                "allowed": [{"IPProtocol": "tcp", "ports": ["22"]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "operation-2",
                "status": "DONE"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ComputeFirewallClient::new(create_client(&server.uri()));
        let firewall = Firewall {
            name: "aether-009-net-allow-ssh".to_string(),
            network: "projects/example/global/networks/aether-009-net".to_string(),
            direction: Some(Direction::Ingress),
            priority: Some(65534),
            source_ranges: vec!["0.0.0.0/0".to_string()],
            allowed: vec![Allowed {
                ip_protocol: "tcp".to_string(),
                ports: vec!["22".to_string()],
            }],
            ..Default::default()
        };
        let op = client.insert("example", &firewall).await.unwrap();
        assert!(op.is_done());
    }
}
