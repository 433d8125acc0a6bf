//! Topology size advisory.
//!
//! Rendering backends slow down sharply past a few hundred nodes. The
//! estimate lets callers warn (or switch to a text-only format) before
//! handing the description over.

use aznet_core::model::Topology;
use serde::{Deserialize, Serialize};

/// Estimated diagram size with advisory flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeEstimate {
    pub nodes: usize,
    pub edges: usize,
    pub large: bool,
    pub very_large: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SizeEstimate {
    pub fn of(topology: &Topology) -> Self {
        let subnets: usize = topology
            .virtual_networks
            .iter()
            .map(|v| v.subnets.len())
            .sum();
        let peerings: usize = topology
            .virtual_networks
            .iter()
            .map(|v| v.peerings.len())
            .sum();

        let nodes = topology.virtual_networks.len()
            + subnets
            + topology.security_groups.len()
            + topology.route_tables.len()
            + topology.load_balancers.len()
            + topology.app_gateways.len();
        let edges = subnets
            + peerings
            + topology.security_groups.len() * 2
            + topology.route_tables.len() * 2;

        let mut estimate = Self {
            nodes,
            edges,
            ..Default::default()
        };

        if nodes > 1000 || edges > 2000 {
            estimate.very_large = true;
            estimate.large = true;
            estimate.message = Some(format!(
                "Topology is very large ({nodes} nodes, {edges} edges); image rendering may take minutes and use significant memory. Consider a text-only output format."
            ));
        } else if nodes > 500 || edges > 1000 {
            estimate.large = true;
            estimate.message = Some(format!(
                "Topology is large ({nodes} nodes, {edges} edges); image rendering may be slow."
            ));
        }

        estimate
    }
}

#[cfg(test)]
mod tests {
    use aznet_core::model::{NetworkSecurityGroup, ResourceId};

    use super::*;

    #[test]
    fn small_topology_has_no_advisory() {
        let estimate = SizeEstimate::of(&Topology::default());
        assert_eq!(estimate.nodes, 0);
        assert!(!estimate.large);
        assert!(estimate.message.is_none());
    }

    #[test]
    fn many_resources_trip_the_large_flag() {
        let topology = Topology {
            security_groups: (0..600)
                .map(|i| NetworkSecurityGroup {
                    id: ResourceId::new(format!("/nsg/{i}")),
                    name: format!("nsg{i}"),
                    location: String::new(),
                    rules: Vec::new(),
                })
                .collect(),
            ..Default::default()
        };

        let estimate = SizeEstimate::of(&topology);
        assert!(estimate.large);
        assert!(estimate.message.is_some());
    }
}
