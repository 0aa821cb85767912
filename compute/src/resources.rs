//! Descriptors for the resources a provisioning run creates.

use crate::http::firewalls::{Allowed, Direction, Firewall};
use crate::http::instances::{
    AccessConfig, AccessType, AttachedDisk, AttachedDiskInitializeParams, AttachedDiskType, Instance, Items, Metadata,
    NetworkInterface, NetworkTier, OnHostMaintenance, Scheduling, ServiceAccount, ShieldedInstanceConfig,
};
use crate::http::networks::{Network, NetworkRoutingConfig, RoutingMode};

pub const NETWORK_MTU: i32 = 1460;
pub const FIREWALL_PRIORITY: i32 = 65534;
pub const FIREWALL_SOURCE_RANGE: &str = "0.0.0.0/0";
pub const BOOT_DISK_SIZE_GB: i64 = 64;
pub const BOOT_DISK_TYPE: &str = "pd-balanced";

/// An auto-mode VPC network with regional routing.
pub fn network_for(name: &str) -> Network {
    Network {
        name: name.to_string(),
        auto_create_subnetworks: Some(true),
        mtu: Some(NETWORK_MTU),
        routing_config: Some(NetworkRoutingConfig {
            routing_mode: RoutingMode::Regional,
        }),
        ..Default::default()
    }
}

/// Partial URL of a global network, as referenced by firewalls and network interfaces.
pub fn network_url(project_id: &str, network: &str) -> String {
    format!("projects/{project_id}/global/networks/{network}")
}

/// An ingress rule open to any source address.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FirewallRule {
    AllowIcmpIngress,
    AllowTcpIngress { service_name: String, port: u16 },
}

impl FirewallRule {
    pub fn allow_tcp(service_name: impl Into<String>, port: u16) -> Self {
        FirewallRule::AllowTcpIngress {
            service_name: service_name.into(),
            port,
        }
    }

    /// `{network}-allow-icmp` or `{network}-allow-{service_name}`.
    pub fn name(&self, network: &str) -> String {
        match self {
            FirewallRule::AllowIcmpIngress => format!("{network}-allow-icmp"),
            FirewallRule::AllowTcpIngress { service_name, .. } => format!("{network}-allow-{service_name}"),
        }
    }

    fn allowed(&self) -> Allowed {
        match self {
            FirewallRule::AllowIcmpIngress => Allowed {
                ip_protocol: "icmp".to_string(),
                ports: vec![],
            },
            FirewallRule::AllowTcpIngress { port, .. } => Allowed {
                ip_protocol: "tcp".to_string(),
                ports: vec![port.to_string()],
            },
        }
    }

    pub fn to_firewall(&self, project_id: &str, network: &str) -> Firewall {
        Firewall {
            name: self.name(network),
            network: network_url(project_id, network),
            direction: Some(Direction::Ingress),
            priority: Some(FIREWALL_PRIORITY),
            source_ranges: vec![FIREWALL_SOURCE_RANGE.to_string()],
            allowed: vec![self.allowed()],
            ..Default::default()
        }
    }
}

/// Desired configuration of a single VM.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct InstanceSpec {
    pub name: String,
    /// Boot image, e.g. `projects/rocky-linux-cloud/global/images/family/rocky-linux-8`.
    pub source_image: String,
    /// Machine type name within the zone, e.g. `e2-standard-4`.
    pub machine_type: String,
    pub network: String,
    /// Email of the service account the VM runs as.
    pub service_account_email: String,
}

impl InstanceSpec {
    pub fn to_instance(&self, project_id: &str, zone: &str, scopes: &[String]) -> Instance {
        Instance {
            name: self.name.clone(),
            machine_type: format!("zones/{zone}/machineTypes/{}", self.machine_type),
            disks: vec![AttachedDisk {
                auto_delete: Some(true),
                boot: Some(true),
                device_name: Some(self.name.clone()),
                disk_type: Some(AttachedDiskType::Persistent),
                initialize_params: Some(AttachedDiskInitializeParams {
                    disk_size_gb: Some(BOOT_DISK_SIZE_GB),
                    disk_type: Some(format!("zones/{zone}/diskTypes/{BOOT_DISK_TYPE}")),
                    source_image: Some(self.source_image.clone()),
                }),
                ..Default::default()
            }],
            network_interfaces: vec![NetworkInterface {
                network: Some(network_url(project_id, &self.network)),
                access_configs: vec![AccessConfig {
                    name: Some("External NAT".to_string()),
                    access_type: Some(AccessType::OneToOneNat),
                    network_tier: Some(NetworkTier::Premium),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            metadata: Some(Metadata {
                items: vec![Items {
                    key: "enable-oslogin".to_string(),
                    value: Some("true".to_string()),
                }],
                ..Default::default()
            }),
            service_accounts: vec![ServiceAccount {
                email: self.service_account_email.clone(),
                scopes: scopes.to_vec(),
            }],
            scheduling: Some(Scheduling {
                on_host_maintenance: Some(OnHostMaintenance::Migrate),
                ..Default::default()
            }),
            shielded_instance_config: Some(ShieldedInstanceConfig {
                enable_integrity_monitoring: Some(true),
                enable_secure_boot: Some(false),
                enable_vtpm: Some(true),
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::resources::{network_for, FirewallRule, InstanceSpec};

    #[test]
    fn test_network() {
        let value = serde_json::to_value(network_for("aether-009-net")).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "aether-009-net",
                "autoCreateSubnetworks": true,
                "mtu": 1460,
                "routingConfig": {"routingMode": "REGIONAL"}
            })
        );
    }

    #[test]
    fn test_tcp_rule() {
        let rule = FirewallRule::allow_tcp("ssh", 22);
        let firewall = rule.to_firewall("example", "aether-009-net");
        assert_eq!(firewall.name, "aether-009-net-allow-ssh");
        assert_eq!(firewall.network, "projects/example/global/networks/aether-009-net");
        assert_eq!(firewall.priority, Some(65534));
        assert_eq!(firewall.source_ranges, vec!["0.0.0.0/0"]);
        assert_eq!(firewall.allowed.len(), 1);
        assert_eq!(firewall.allowed[0].ip_protocol, "tcp");
        assert_eq!(firewall.allowed[0].ports, vec!["22"]);
    }

    #[test]
    fn test_icmp_rule() {
        let firewall = FirewallRule::AllowIcmpIngress.to_firewall("example", "aether-009-net");
        assert_eq!(firewall.name, "aether-009-net-allow-icmp");
        let value = serde_json::to_value(&firewall).unwrap();
        assert_eq!(value["direction"], "INGRESS");
        assert_eq!(value["allowed"], json!([{"IPProtocol": "icmp"}]));
    }

    #[test]
    fn test_instance() {
        let spec = InstanceSpec {
            name: "aether-009".to_string(),
            source_image: "projects/rocky-linux-cloud/global/images/family/rocky-linux-8".to_string(),
            machine_type: "e2-standard-4".to_string(),
            network: "aether-009-net".to_string(),
            service_account_email: "aether-009@example.iam.gserviceaccount.com".to_string(),
        };
        let scopes = vec!["https://www.googleapis.com/auth/devstorage.read_only".to_string()];
        let value = serde_json::to_value(spec.to_instance("example", "europe-west6-a", &scopes)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "aether-009",
                "machineType": "zones/europe-west6-a/machineTypes/e2-standard-4",
                "disks": [{
                    "autoDelete": true,
                    "boot": true,
                    "deviceName": "aether-009",
                    "type": "PERSISTENT",
                    "initializeParams": {
                        "diskSizeGb": "64",
                        "diskType": "zones/europe-west6-a/diskTypes/pd-balanced",
                        "sourceImage": "projects/rocky-linux-cloud/global/images/family/rocky-linux-8"
                    }
                }],
                "networkInterfaces": [{
                    "network": "projects/example/global/networks/aether-009-net",
                    "accessConfigs": [{
                        "name": "External NAT",
                        "type": "ONE_TO_ONE_NAT",
                        "networkTier": "PREMIUM"
                    }]
                }],
                "metadata": {"items": [{"key": "enable-oslogin", "value": "true"}]},
                "serviceAccounts": [{
                    "email": "aether-009@example.iam.gserviceaccount.com",
                    "scopes": ["https://www.googleapis.com/auth/devstorage.read_only"]
                }],
                "scheduling": {"onHostMaintenance": "MIGRATE"},
                "shieldedInstanceConfig": {
                    "enableIntegrityMonitoring": true,
                    "enableSecureBoot": false,
                    "enableVtpm": true
                }
            })
        );
    }
}
