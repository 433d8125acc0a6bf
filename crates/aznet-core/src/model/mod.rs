//! Topology snapshot model.
//!
//! The snapshot is produced by an external collector and is read-only for
//! every consumer: all analysis passes borrow it immutably and derive fresh
//! output per run.

pub mod id;
pub mod topology;

mod error;

pub use error::SnapshotError;
pub use id::ResourceId;
pub use topology::{
    ApplicationGateway, Firewall, LoadBalancer, LoadBalancerKind, NatGateway,
    NetworkSecurityGroup, NextHopKind, PrivateEndpoint, Route, RouteTable, RuleAccess,
    RuleDirection, SecurityRule, Subnet, Topology, VirtualNetwork, VnetPeering, VpnGateway,
};
