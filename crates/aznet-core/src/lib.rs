//! aznet-core: snapshot model and canonical identity graph
//!
//! This crate provides the input-side components for aznet:
//! - Model: immutable topology snapshot types and JSON ingestion
//! - Resolver: canonical identity graph over string-ID references
//! - IP index: value-based next-hop-IP to firewall lookup

pub mod model;
pub mod resolver;

// Re-exports for convenience
pub use model::{
    ApplicationGateway, Firewall, LoadBalancer, LoadBalancerKind, NatGateway,
    NetworkSecurityGroup, NextHopKind, PrivateEndpoint, ResourceId, Route, RouteTable,
    RuleAccess, RuleDirection, SecurityRule, SnapshotError, Subnet, Topology, VirtualNetwork,
    VnetPeering, VpnGateway,
};
pub use resolver::{CanonicalGraph, CanonicalNode, Edge, FirewallIpIndex, NodeKind, Relation};
