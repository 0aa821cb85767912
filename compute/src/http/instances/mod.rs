use std::collections::HashMap;

pub mod get_iam_policy;
pub mod insert;
pub mod set_iam_policy;

/// Represents a Compute Engine virtual machine instance.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// The name of the resource, provided by the client when initially creating the resource.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full or partial URL of the machine type resource to use for this instance, in the format:
    /// `zones/zone/machineTypes/machine-type`.
    pub machine_type: String,
    /// Array of disks associated with this instance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<AttachedDisk>,
    /// An array of network configurations for this instance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<NetworkInterface>,
    /// The metadata key/value pairs assigned to this instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// A list of service accounts, with their specified scopes, authorized for this instance.
    /// Only one service account per VM instance is supported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_accounts: Vec<ServiceAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<Scheduling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shielded_instance_config: Option<ShieldedInstanceConfig>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// An instance-attached disk resource.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDisk {
    /// Specifies whether the disk will be auto-deleted when the instance is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    /// Indicates that this is a boot disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<bool>,
    /// Specifies a unique device name, reflected into the `/dev/disk/by-id/google-*` tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DiskMode>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<AttachedDiskType>,
    /// Parameters for a new disk that will be created alongside the new instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialize_params: Option<AttachedDiskInitializeParams>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDiskInitializeParams {
    /// Specifies the size of the disk in base-2 GB. Encoded as a string in the JSON API.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::http::instances::int64_string"
    )]
    pub disk_size_gb: Option<i64>,
    /// Specifies the disk type to use to create the instance, as a URL or partial URL, e.g.
    /// `zones/us-central1-a/diskTypes/pd-balanced`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
    /// The source image to create this disk, e.g. `projects/debian-cloud/global/images/family/debian-12`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiskMode {
    ReadWrite,
    ReadOnly,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachedDiskType {
    Persistent,
    Scratch,
}

/// A metadata key/value entry.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Items>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
pub struct Items {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A network interface resource attached to an instance.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// URL of the VPC network resource for this instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnetwork: Option<String>,
    /// An array of configurations for this interface. Only `ONE_TO_ONE_NAT` is supported.
    /// If there are no access configs specified, the instance has no external internet access.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_configs: Vec<AccessConfig>,
    #[serde(rename = "networkIP", skip_serializing_if = "Option::is_none")]
    pub network_ip: Option<String>,
}

/// An access configuration attached to an instance's network interface.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub access_type: Option<AccessType>,
    /// This signifies the networking tier used for configuring this access configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_tier: Option<NetworkTier>,
    #[serde(rename = "natIP", skip_serializing_if = "Option::is_none")]
    pub nat_ip: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessType {
    OneToOneNat,
    DirectIpv6,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkTier {
    Premium,
    Standard,
}

/// Sets the scheduling options for an Instance.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
    /// Specifies whether the instance should be automatically restarted if it is terminated by
    /// Compute Engine (not terminated by a user).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_restart: Option<bool>,
    /// Defines the maintenance behavior for this instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_host_maintenance: Option<OnHostMaintenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preemptible: Option<bool>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnHostMaintenance {
    Migrate,
    Terminate,
}

/// A service account along with its specified scopes.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    /// Email address of the service account.
    pub email: String,
    /// The list of scopes to be made available for this service account.
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// A set of Shielded Instance options.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ShieldedInstanceConfig {
    /// Defines whether the instance has integrity monitoring enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_integrity_monitoring: Option<bool>,
    /// Defines whether the instance has Secure Boot enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secure_boot: Option<bool>,
    /// Defines whether the instance has the vTPM enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_vtpm: Option<bool>,
}

pub(crate) mod int64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => s.parse().map(Some).map_err(de::Error::custom),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| de::Error::custom("not an int64")),
            Some(Value::Null) | None => Ok(None),
            Some(_) => Err(de::Error::custom("Incorrect type")),
        }
    }
}
