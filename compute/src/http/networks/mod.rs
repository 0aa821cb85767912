pub mod insert;

/// Represents a VPC Network resource.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Name of the resource. Must be 1-63 characters long and match `[a-z]([-a-z0-9]*[a-z0-9])?`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Must be set to create a VPC network. If not set, a legacy network is created.
    ///
    /// When set to true, the VPC network is created in auto mode and one subnet is created
    /// in each region automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_create_subnetworks: Option<bool>,
    /// Maximum Transmission Unit in bytes. The minimum value is 1300 and the maximum value is 8896.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i32>,
    /// The network-level routing configuration for this network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_config: Option<NetworkRoutingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRoutingConfig {
    /// The network-wide routing mode to use.
    pub routing_mode: RoutingMode,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingMode {
    /// Cloud Routers only advertise routes with subnets of this network in the same region.
    #[default]
    Regional,
    Global,
}
