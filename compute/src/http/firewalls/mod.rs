pub mod insert;

/// Represents a Firewall Rule resource.
///
/// Firewall rules allow or deny ingress traffic to, and egress traffic from your instances.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Firewall {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL of the network resource for this firewall rule.
    /// For example `projects/myproject/global/networks/my-network`.
    pub network: String,
    /// Direction of traffic to which this firewall applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Priority for this rule. This is an integer between `0` and `65535`, both inclusive.
    /// Lower values indicate higher priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// If source ranges are specified, the firewall rule applies only to traffic that has a
    /// source IP address in these ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_ranges: Vec<String>,
    /// The list of ALLOW rules specified by this firewall.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<Allowed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
pub struct Allowed {
    /// The IP protocol to which this rule applies, e.g. `tcp`, `udp` or `icmp`.
    #[serde(rename = "IPProtocol")]
    pub ip_protocol: String,
    /// An optional list of ports to which this rule applies. Only valid for UDP or TCP.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Ingress,
    Egress,
}
