use std::sync::Arc;

use token_source::TokenSourceProvider;

use crate::error::Error;
use crate::http::compute_firewall_client::ComputeFirewallClient;
use crate::http::compute_instance_client::ComputeInstanceClient;
use crate::http::compute_network_client::ComputeNetworkClient;
use crate::http::compute_operation_client::ComputeOperationClient;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::iam_service_account_client::IamServiceAccountClient;
use crate::http::operations::Operation;
use crate::http::resource_manager_project_client::ResourceManagerProjectClient;
use crate::http::service_accounts::create::CreateServiceAccountRequest;
use crate::http::service_accounts::ServiceAccount;
use crate::http::types::Policy;
use crate::iam::{add_binding, InstancePolicy, Member, ProjectPolicy, RetrySetting, ServiceAccountPolicy};
use crate::resources::{network_for, FirewallRule, InstanceSpec};

/// OAuth scopes needed to manage networks, instances, service accounts and IAM policies.
pub const SCOPES: [&str; 7] = [
    "https://www.googleapis.com/auth/iam",
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/compute",
    "https://www.googleapis.com/auth/compute.readonly",
    "https://www.googleapis.com/auth/devstorage.full_control",
    "https://www.googleapis.com/auth/devstorage.read_only",
    "https://www.googleapis.com/auth/devstorage.read_write",
];

/// Scopes granted to the VM's own service account.
pub const INSTANCE_SCOPES: [&str; 6] = [
    "https://www.googleapis.com/auth/devstorage.read_only",
    "https://www.googleapis.com/auth/logging.write",
    "https://www.googleapis.com/auth/monitoring.write",
    "https://www.googleapis.com/auth/servicecontrol",
    "https://www.googleapis.com/auth/service.management.readonly",
    "https://www.googleapis.com/auth/trace.append",
];

#[derive(Debug)]
pub struct ClientConfig {
    pub http: Option<reqwest_middleware::ClientWithMiddleware>,
    pub compute_endpoint: String,
    pub iam_endpoint: String,
    pub resource_manager_endpoint: String,
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    pub project_id: String,
    pub zone: String,
    /// Scopes attached to the service account of created instances.
    pub instance_scopes: Vec<String>,
    /// Re-runs IAM policy updates that lost a concurrent write. Off when `None`.
    pub iam_retry: Option<RetrySetting>,
    /// Logs every response body.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            compute_endpoint: "https://compute.googleapis.com/compute/v1".to_string(),
            iam_endpoint: "https://iam.googleapis.com/v1".to_string(),
            resource_manager_endpoint: "https://cloudresourcemanager.googleapis.com/v3".to_string(),
            token_source_provider: None,
            project_id: String::new(),
            zone: String::new(),
            instance_scopes: INSTANCE_SCOPES.iter().map(|s| s.to_string()).collect(),
            iam_retry: None,
            debug: false,
        }
    }
}

impl ClientConfig {
    pub fn with_project(mut self, project_id: impl Into<String>, zone: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self.zone = zone.into();
        self
    }
}

#[cfg(feature = "auth")]
pub use aether_auth;

#[cfg(feature = "auth")]
impl ClientConfig {
    /// Authenticates as the user owning the OAuth client in `client_secrets`.
    ///
    /// A token cached in the default token store is reused. Otherwise the browser consent flow
    /// is started and its result is persisted for the next run.
    pub async fn with_auth(self, client_secrets: impl AsRef<std::path::Path>, scopes: &[&str]) -> Result<Self, Error> {
        let store = aether_auth::token_store::FileTokenStore::default_location()?;
        self.with_auth_store(client_secrets, scopes, store).await
    }

    pub async fn with_auth_store(
        mut self,
        client_secrets: impl AsRef<std::path::Path>,
        scopes: &[&str],
        store: aether_auth::token_store::FileTokenStore,
    ) -> Result<Self, Error> {
        let secrets = aether_auth::credentials::ClientSecretsFile::new_from_file(client_secrets).await?;
        let config = aether_auth::token::Config::default()
            .with_scopes(scopes)
            .with_token_store(store);
        let tsp = aether_auth::token::DefaultTokenSourceProvider::new(config, secrets).await?;
        if self.project_id.is_empty() {
            if let Some(project_id) = &tsp.project_id {
                self.project_id = project_id.clone();
            }
        }
        self.token_source_provider = Some(Box::new(tsp));
        Ok(self)
    }
}

/// Provisioning client bound to one project and zone.
pub struct Client {
    network_client: ComputeNetworkClient,
    firewall_client: ComputeFirewallClient,
    instance_client: ComputeInstanceClient,
    operation_client: ComputeOperationClient,
    service_account_client: IamServiceAccountClient,
    project_client: ResourceManagerProjectClient,
    project_id: String,
    zone: String,
    instance_scopes: Vec<String>,
    iam_retry: Option<RetrySetting>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        let ts = match config.token_source_provider {
            Some(tsp) => Some(tsp.token_source()),
            None => {
                tracing::trace!("Use anonymous access due to lack of token");
                None
            }
        };
        let http = config
            .http
            .unwrap_or_else(|| reqwest_middleware::ClientBuilder::new(reqwest::Client::default()).build());

        let compute = Arc::new(GoogleApiClient::new(
            ts.clone(),
            config.compute_endpoint.as_str(),
            http.clone(),
            config.debug,
        ));
        let iam = Arc::new(GoogleApiClient::new(
            ts.clone(),
            config.iam_endpoint.as_str(),
            http.clone(),
            config.debug,
        ));
        let resource_manager = Arc::new(GoogleApiClient::new(
            ts,
            config.resource_manager_endpoint.as_str(),
            http,
            config.debug,
        ));

        Self {
            network_client: ComputeNetworkClient::new(compute.clone()),
            firewall_client: ComputeFirewallClient::new(compute.clone()),
            instance_client: ComputeInstanceClient::new(compute.clone()),
            operation_client: ComputeOperationClient::new(compute),
            service_account_client: IamServiceAccountClient::new(iam),
            project_client: ResourceManagerProjectClient::new(resource_manager),
            project_id: config.project_id,
            zone: config.zone,
            instance_scopes: config.instance_scopes,
            iam_retry: config.iam_retry,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn network(&self) -> &ComputeNetworkClient {
        &self.network_client
    }

    pub fn firewall(&self) -> &ComputeFirewallClient {
        &self.firewall_client
    }

    pub fn instance(&self) -> &ComputeInstanceClient {
        &self.instance_client
    }

    pub fn operation(&self) -> &ComputeOperationClient {
        &self.operation_client
    }

    pub fn service_account(&self) -> &IamServiceAccountClient {
        &self.service_account_client
    }

    pub fn project(&self) -> &ResourceManagerProjectClient {
        &self.project_client
    }

    async fn wait(&self, resource: String, operation: Operation) -> Result<(), Error> {
        self.operation_client
            .wait_until_done(&self.project_id, operation)
            .await
            .map_err(|e| Error::Wait(resource, e))?;
        Ok(())
    }

    /// Creates an auto-mode VPC network and waits until it exists.
    pub async fn create_network(&self, name: &str) -> Result<(), Error> {
        let resource = format!("network {name}");
        let operation = self
            .network_client
            .insert(&self.project_id, &network_for(name))
            .await
            .map_err(|e| Error::Create(resource.clone(), e))?;
        self.wait(resource, operation).await
    }

    pub async fn create_firewall_rule(&self, network: &str, rule: &FirewallRule) -> Result<(), Error> {
        let firewall = rule.to_firewall(&self.project_id, network);
        let resource = format!("firewall {}", firewall.name);
        let operation = self
            .firewall_client
            .insert(&self.project_id, &firewall)
            .await
            .map_err(|e| Error::Create(resource.clone(), e))?;
        self.wait(resource, operation).await
    }

    pub async fn create_firewall_rule_allow_icmp_ingress(&self, network: &str) -> Result<(), Error> {
        self.create_firewall_rule(network, &FirewallRule::AllowIcmpIngress).await
    }

    pub async fn create_firewall_rule_allow_tcp_ingress(
        &self,
        network: &str,
        service_name: &str,
        port: u16,
    ) -> Result<(), Error> {
        self.create_firewall_rule(network, &FirewallRule::allow_tcp(service_name, port))
            .await
    }

    /// Creates a service account. The account is usable once this returns.
    pub async fn create_service_account(&self, account_id: &str, display_name: &str) -> Result<ServiceAccount, Error> {
        let req = CreateServiceAccountRequest {
            account_id: account_id.to_string(),
            service_account: ServiceAccount {
                display_name: Some(display_name.to_string()),
                ..Default::default()
            },
        };
        self.service_account_client
            .create(&self.project_id, &req)
            .await
            .map_err(|e| Error::Create(format!("service account {account_id}"), e))
    }

    /// Creates a VM in the client's zone and waits until the insert operation is done.
    pub async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), Error> {
        let instance = spec.to_instance(&self.project_id, &self.zone, &self.instance_scopes);
        let resource = format!("instance {}", spec.name);
        let operation = self
            .instance_client
            .insert(&self.project_id, &self.zone, &instance)
            .await
            .map_err(|e| Error::Create(resource.clone(), e))?;
        self.wait(resource, operation).await
    }

    pub async fn add_project_iam_binding(&self, role: &str, member: &Member) -> Result<Policy, Error> {
        let resource = ProjectPolicy {
            client: &self.project_client,
            project_id: &self.project_id,
        };
        add_binding(&resource, role, member, self.iam_retry.as_ref()).await
    }

    pub async fn add_service_account_iam_binding(
        &self,
        email: &str,
        role: &str,
        member: &Member,
    ) -> Result<Policy, Error> {
        let resource = ServiceAccountPolicy {
            client: &self.service_account_client,
            project_id: &self.project_id,
            email,
        };
        add_binding(&resource, role, member, self.iam_retry.as_ref()).await
    }

    pub async fn add_instance_iam_binding(&self, instance: &str, role: &str, member: &Member) -> Result<Policy, Error> {
        let resource = InstancePolicy {
            client: &self.instance_client,
            project_id: &self.project_id,
            zone: &self.zone,
            instance,
        };
        add_binding(&resource, role, member, self.iam_retry.as_ref()).await
    }
}
