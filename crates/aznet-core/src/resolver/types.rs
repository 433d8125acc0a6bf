//! Canonical graph types.

use serde::{Deserialize, Serialize};

use crate::model::ResourceId;

/// Resource kind of a canonical node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    VirtualNetwork,
    Subnet,
    SecurityGroup,
    RouteTable,
    NatGateway,
    VpnGateway,
    ApplicationGateway,
    Firewall,
    PrivateEndpoint,
    LoadBalancer,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::VirtualNetwork => "virtual_network",
            Self::Subnet => "subnet",
            Self::SecurityGroup => "security_group",
            Self::RouteTable => "route_table",
            Self::NatGateway => "nat_gateway",
            Self::VpnGateway => "vpn_gateway",
            Self::ApplicationGateway => "application_gateway",
            Self::Firewall => "firewall",
            Self::PrivateEndpoint => "private_endpoint",
            Self::LoadBalancer => "load_balancer",
        }
    }
}

/// The single deduplicated representation of a resource identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalNode {
    pub id: ResourceId,
    /// Display label: the resource name when resolved, the identifier's
    /// trailing path segment otherwise.
    pub label: String,
    pub kind: NodeKind,
    /// False when the identifier was only ever seen as a reference target,
    /// never as a resource in the snapshot.
    pub resolved: bool,
}

/// Relation kind of an association edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// VNet contains subnet.
    Contains,
    /// Subnet is protected by an NSG.
    SecuredBy,
    /// Subnet routes through a route table.
    RoutedBy,
    /// Subnet egresses through a NAT gateway.
    EgressVia,
    /// Private endpoint lives in a subnet.
    EndpointIn,
    /// VNet is peered with another VNet.
    PeeredWith,
    /// Gateway serves a VNet.
    GatewayOf,
    /// Gateway or firewall sits in a subnet.
    AttachedTo,
}

impl Relation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::SecuredBy => "secured_by",
            Self::RoutedBy => "routed_by",
            Self::EgressVia => "egress_via",
            Self::EndpointIn => "endpoint_in",
            Self::PeeredWith => "peered_with",
            Self::GatewayOf => "gateway_of",
            Self::AttachedTo => "attached_to",
        }
    }
}
