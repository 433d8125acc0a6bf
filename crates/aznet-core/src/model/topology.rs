//! Snapshot types - one immutable aggregate per collector run.

use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use super::id::ResourceId;

/// Complete network topology for one subscription/resource-group, captured at
/// one point in time. Immutable once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub subscription_id: String,
    pub resource_group: String,
    #[serde(default)]
    pub virtual_networks: Vec<VirtualNetwork>,
    #[serde(default)]
    pub security_groups: Vec<NetworkSecurityGroup>,
    #[serde(default)]
    pub route_tables: Vec<RouteTable>,
    #[serde(default)]
    pub nat_gateways: Vec<NatGateway>,
    #[serde(default)]
    pub vpn_gateways: Vec<VpnGateway>,
    #[serde(default)]
    pub app_gateways: Vec<ApplicationGateway>,
    #[serde(default)]
    pub firewalls: Vec<Firewall>,
    #[serde(default)]
    pub private_endpoints: Vec<PrivateEndpoint>,
    #[serde(default)]
    pub load_balancers: Vec<LoadBalancer>,
    /// Capture time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub captured_at_ms: u64,
}

impl Topology {
    /// Decode a snapshot from the collector's JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the snapshot back to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Iterate all subnets across all virtual networks, with their owning VNet.
    pub fn subnets(&self) -> impl Iterator<Item = (&VirtualNetwork, &Subnet)> {
        self.virtual_networks
            .iter()
            .flat_map(|vnet| vnet.subnets.iter().map(move |subnet| (vnet, subnet)))
    }
}

/// A virtual network with its subnets and peerings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetwork {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address_space: Vec<String>,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
    #[serde(default)]
    pub peerings: Vec<VnetPeering>,
}

/// A subnet within a virtual network.
///
/// The three infrastructure references are optional: absence means
/// "not configured", not an error. Presence does not guarantee the target
/// exists in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub address_prefix: String,
    /// NSG ID if associated.
    #[serde(default)]
    pub security_group: Option<ResourceId>,
    /// Route table ID if associated.
    #[serde(default)]
    pub route_table: Option<ResourceId>,
    /// NAT gateway ID if associated.
    #[serde(default)]
    pub nat_gateway: Option<ResourceId>,
}

/// A peering connection to another virtual network, possibly outside the
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnetPeering {
    pub id: ResourceId,
    pub name: String,
    pub remote_vnet: ResourceId,
    #[serde(default)]
    pub remote_vnet_name: String,
    /// Peering state as reported by the platform, e.g. "Connected".
    #[serde(default)]
    pub state: String,
}

/// A network security group and its rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityGroup {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rules: Vec<SecurityRule>,
}

/// A single security rule. Evaluation is priority-ordered: lower priority
/// evaluates first, first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRule {
    pub name: String,
    pub priority: i32,
    pub direction: RuleDirection,
    pub access: RuleAccess,
    #[serde(default)]
    pub protocol: String,
    /// Source address specification: a CIDR, a single address, or an
    /// any-token (`*`, `0.0.0.0/0`, `Internet`, `Any`).
    #[serde(default)]
    pub source_address: String,
    #[serde(default)]
    pub source_ports: String,
    #[serde(default)]
    pub destination_address: String,
    /// Destination port specification: a port, a hyphenated range, a
    /// comma-separated list, or `*`.
    #[serde(default)]
    pub destination_ports: String,
    #[serde(default)]
    pub description: String,
}

/// Traffic direction of a security rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDirection {
    Inbound,
    Outbound,
}

/// Allow/deny decision of a security rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAccess {
    Allow,
    Deny,
}

/// A route table with its routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A route within a route table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    #[serde(default)]
    pub address_prefix: String,
    pub next_hop: NextHopKind,
    /// Next-hop address for `VirtualAppliance` routes. Matched by value
    /// against firewall private IPs, never by identity.
    #[serde(default)]
    pub next_hop_ip: Option<String>,
}

/// Next-hop kind of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextHopKind {
    VirtualNetworkGateway,
    VnetLocal,
    Internet,
    VirtualAppliance,
    None,
}

/// A NAT gateway. May be shared by any number of subnets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGateway {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub public_ips: Vec<String>,
}

/// A VPN gateway attached to a virtual network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnGateway {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub vnet: ResourceId,
    #[serde(default)]
    pub sku: String,
}

/// An application gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGateway {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub subnet: Option<ResourceId>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub waf_enabled: bool,
}

/// A network firewall.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firewall {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub subnet: Option<ResourceId>,
    /// Private address inside its subnet; routes reference it by value.
    #[serde(default)]
    pub private_ip: String,
    #[serde(default)]
    pub public_ips: Vec<String>,
}

/// A private endpoint projecting a remote service into a subnet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateEndpoint {
    pub id: ResourceId,
    pub name: String,
    pub subnet: ResourceId,
    #[serde(default)]
    pub private_ip: String,
    /// Identifier of the service the endpoint connects to.
    #[serde(default)]
    pub target_service: ResourceId,
    /// Connection state as reported by the platform, e.g. "Approved".
    #[serde(default)]
    pub state: String,
}

/// A load balancer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sku: String,
    pub kind: LoadBalancerKind,
}

/// Whether a load balancer fronts public or internal traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerKind {
    Public,
    Internal,
}
