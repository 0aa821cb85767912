use async_trait::async_trait;

use aether_compute::client::Client;
use aether_compute::error::Error;
use aether_compute::iam::Member;
use aether_compute::resources::{FirewallRule, InstanceSpec};

use crate::config::Config;

pub const ROLE_EDITOR: &str = "roles/editor";
pub const ROLE_COMPUTE_VIEWER: &str = "roles/compute.viewer";
pub const ROLE_SERVICE_ACCOUNT_USER: &str = "roles/iam.serviceAccountUser";
pub const ROLE_INSTANCE_ADMIN: &str = "roles/compute.instanceAdmin";
pub const ROLE_OS_ADMIN_LOGIN: &str = "roles/compute.osAdminLogin";

/// The provisioning calls a run is made of.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn create_network(&self, name: &str) -> Result<(), Error>;

    async fn create_firewall_rule(&self, network: &str, rule: &FirewallRule) -> Result<(), Error>;

    /// Returns the email of the created account.
    async fn create_service_account(&self, account_id: &str, display_name: &str) -> Result<String, Error>;

    async fn add_project_iam_binding(&self, role: &str, member: &Member) -> Result<(), Error>;

    async fn add_service_account_iam_binding(&self, email: &str, role: &str, member: &Member) -> Result<(), Error>;

    async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), Error>;

    async fn add_instance_iam_binding(&self, instance: &str, role: &str, member: &Member) -> Result<(), Error>;
}

#[async_trait]
impl Provisioner for Client {
    async fn create_network(&self, name: &str) -> Result<(), Error> {
        Client::create_network(self, name).await
    }

    async fn create_firewall_rule(&self, network: &str, rule: &FirewallRule) -> Result<(), Error> {
        Client::create_firewall_rule(self, network, rule).await
    }

    async fn create_service_account(&self, account_id: &str, display_name: &str) -> Result<String, Error> {
        let account = Client::create_service_account(self, account_id, display_name).await?;
        Ok(account
            .email
            .unwrap_or_else(|| format!("{}@{}.iam.gserviceaccount.com", account_id, self.project_id())))
    }

    async fn add_project_iam_binding(&self, role: &str, member: &Member) -> Result<(), Error> {
        Client::add_project_iam_binding(self, role, member).await.map(|_| ())
    }

    async fn add_service_account_iam_binding(&self, email: &str, role: &str, member: &Member) -> Result<(), Error> {
        Client::add_service_account_iam_binding(self, email, role, member)
            .await
            .map(|_| ())
    }

    async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), Error> {
        Client::create_instance(self, spec).await
    }

    async fn add_instance_iam_binding(&self, instance: &str, role: &str, member: &Member) -> Result<(), Error> {
        Client::add_instance_iam_binding(self, instance, role, member)
            .await
            .map(|_| ())
    }
}

/// Runs the full provisioning sequence, stopping at the first failure.
pub async fn run<P>(provisioner: &P, config: &Config) -> Result<(), Error>
where
    P: Provisioner + ?Sized,
{
    let instance = config.instance_name.as_str();
    let network = config.network();
    let owner = Member::user(&config.owner_email);

    tracing::info!("creating network {:?}", network);
    provisioner.create_network(&network).await?;

    tracing::info!("creating SSH firewall rule for network {:?}", network);
    provisioner
        .create_firewall_rule(&network, &FirewallRule::allow_tcp("ssh", 22))
        .await?;

    tracing::info!("creating ICMP firewall rule for network {:?}", network);
    provisioner
        .create_firewall_rule(&network, &FirewallRule::AllowIcmpIngress)
        .await?;

    tracing::info!("creating service account {:?}", instance);
    let email = provisioner
        .create_service_account(instance, &config.service_account_display_name())
        .await?;
    let service_account = Member::service_account(&email);

    tracing::info!("assigning {} to service account {:?}", ROLE_EDITOR, email);
    provisioner.add_project_iam_binding(ROLE_EDITOR, &service_account).await?;

    tracing::info!("assigning {} to {:?}", ROLE_COMPUTE_VIEWER, config.owner_email);
    provisioner.add_project_iam_binding(ROLE_COMPUTE_VIEWER, &owner).await?;

    tracing::info!("assigning service account access on {:?} to {:?}", email, config.owner_email);
    provisioner
        .add_service_account_iam_binding(&email, ROLE_SERVICE_ACCOUNT_USER, &owner)
        .await?;

    tracing::info!("creating instance {:?}", instance);
    let spec = InstanceSpec {
        name: instance.to_string(),
        source_image: config.source_image.clone(),
        machine_type: config.machine_type.clone(),
        network: network.clone(),
        service_account_email: email.clone(),
    };
    provisioner.create_instance(&spec).await?;

    tracing::info!("assigning instance admin role on {:?} to {:?}", instance, config.owner_email);
    provisioner
        .add_instance_iam_binding(instance, ROLE_INSTANCE_ADMIN, &owner)
        .await?;

    // Granted twice; the second call appends a duplicate binding.
    for _ in 0..2 {
        tracing::info!("assigning OS admin login role on {:?} to {:?}", instance, config.owner_email);
        provisioner
            .add_instance_iam_binding(instance, ROLE_OS_ADMIN_LOGIN, &owner)
            .await?;
    }

    tracing::info!("provisioned instance {:?}", instance);
    Ok(())
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use clap::Parser;

    use aether_compute::error::Error;
    use aether_compute::http::error::{Error as HttpError, ErrorResponse};
    use aether_compute::iam::Member;
    use aether_compute::resources::{FirewallRule, InstanceSpec};

    use crate::config::Config;
    use crate::provision::{run, Provisioner};

    #[ctor::ctor]
    fn init() {
        let _ = tracing_subscriber::fmt().with_env_filter("aether=trace").try_init();
    }

    /// Records every call and optionally fails the call at `fail_at`.
    #[derive(Default)]
    struct RecordingProvisioner {
        calls: Mutex<Vec<String>>,
        instances: Mutex<Vec<InstanceSpec>>,
        fail_at: Option<usize>,
    }

    impl RecordingProvisioner {
        fn record(&self, call: String) -> Result<(), Error> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(call.clone());
            if self.fail_at == Some(index) {
                return Err(Error::Create(
                    call,
                    HttpError::Response(ErrorResponse {
                        code: 403,
                        message: "Required 'compute.networks.create' permission".to_string(),
                        status: Some("PERMISSION_DENIED".to_string()),
                        errors: vec![],
                    }),
                ));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Provisioner for RecordingProvisioner {
        async fn create_network(&self, name: &str) -> Result<(), Error> {
            self.record(format!("network {name}"))
        }

        async fn create_firewall_rule(&self, network: &str, rule: &FirewallRule) -> Result<(), Error> {
            self.record(format!("firewall {}", rule.name(network)))
        }

        async fn create_service_account(&self, account_id: &str, display_name: &str) -> Result<String, Error> {
            self.record(format!("service account {account_id} ({display_name})"))?;
            Ok(format!("{account_id}@example.iam.gserviceaccount.com"))
        }

        async fn add_project_iam_binding(&self, role: &str, member: &Member) -> Result<(), Error> {
            self.record(format!("project {role} {member}"))
        }

        async fn add_service_account_iam_binding(&self, email: &str, role: &str, member: &Member) -> Result<(), Error> {
            self.record(format!("service account {email} {role} {member}"))
        }

        async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), Error> {
            self.instances.lock().unwrap().push(spec.clone());
            self.record(format!("instance {}", spec.name))
        }

        async fn add_instance_iam_binding(&self, instance: &str, role: &str, member: &Member) -> Result<(), Error> {
            self.record(format!("instance {instance} {role} {member}"))
        }
    }

    fn default_config() -> Config {
        Config::try_parse_from(["aether"]).unwrap()
    }

    #[tokio::test]
    async fn test_run_order() {
        let provisioner = RecordingProvisioner::default();
        run(&provisioner, &default_config()).await.unwrap();

        let sa = "aether-009@example.iam.gserviceaccount.com";
        assert_eq!(
            provisioner.calls(),
            vec![
                "network aether-009-net".to_string(),
                "firewall aether-009-net-allow-ssh".to_string(),
                "firewall aether-009-net-allow-icmp".to_string(),
                "service account aether-009 (aether-009's account)".to_string(),
                format!("project roles/editor serviceAccount:{sa}"),
                "project roles/compute.viewer user:owner@example.com".to_string(),
                format!("service account {sa} roles/iam.serviceAccountUser user:owner@example.com"),
                "instance aether-009".to_string(),
                "instance aether-009 roles/compute.instanceAdmin user:owner@example.com".to_string(),
                "instance aether-009 roles/compute.osAdminLogin user:owner@example.com".to_string(),
                "instance aether-009 roles/compute.osAdminLogin user:owner@example.com".to_string(),
            ]
        );

        let instances = provisioner.instances.lock().unwrap();
        assert_eq!(
            instances[0],
            InstanceSpec {
                name: "aether-009".to_string(),
                source_image: "projects/rocky-linux-cloud/global/images/family/rocky-linux-8".to_string(),
                machine_type: "e2-standard-4".to_string(),
                network: "aether-009-net".to_string(),
                service_account_email: sa.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_run_stops_at_network_failure() {
        let provisioner = RecordingProvisioner {
            fail_at: Some(0),
            ..Default::default()
        };
        let err = run(&provisioner, &default_config()).await.unwrap_err();
        assert!(matches!(err, Error::Create(ref name, _) if name == "network aether-009-net"));
        assert_eq!(provisioner.calls(), vec!["network aether-009-net".to_string()]);
        assert!(provisioner.instances.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_before_instance() {
        let provisioner = RecordingProvisioner {
            fail_at: Some(6),
            ..Default::default()
        };
        assert!(run(&provisioner, &default_config()).await.is_err());
        assert_eq!(provisioner.calls().len(), 7);
        assert!(provisioner.instances.lock().unwrap().is_empty());
    }
}
