//! Value-based next-hop lookup.
//!
//! Routes name their next hop by IP address, not by identifier. This index
//! is the one place the model crosses from identity matching to value
//! matching, and it stays out of the canonical graph for that reason.

use rustc_hash::FxHashMap;

use crate::model::{ResourceId, Route, Topology};

/// Private IP -> firewall identifier lookup.
#[derive(Debug, Default)]
pub struct FirewallIpIndex {
    by_ip: FxHashMap<String, ResourceId>,
}

impl FirewallIpIndex {
    pub fn from_topology(topology: &Topology) -> Self {
        let mut by_ip = FxHashMap::default();
        for fw in &topology.firewalls {
            if !fw.private_ip.is_empty() {
                by_ip.insert(fw.private_ip.clone(), fw.id.clone());
            }
        }
        Self { by_ip }
    }

    pub fn is_empty(&self) -> bool {
        self.by_ip.is_empty()
    }

    /// The firewall whose private IP equals the route's next-hop address,
    /// if any.
    pub fn match_next_hop(&self, route: &Route) -> Option<&ResourceId> {
        route
            .next_hop_ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .and_then(|ip| self.by_ip.get(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Firewall, NextHopKind};

    fn route(next_hop_ip: Option<&str>) -> Route {
        Route {
            name: "r".into(),
            address_prefix: "0.0.0.0/0".into(),
            next_hop: NextHopKind::VirtualAppliance,
            next_hop_ip: next_hop_ip.map(str::to_string),
        }
    }

    #[test]
    fn matches_route_to_firewall_by_ip() {
        let topology = Topology {
            firewalls: vec![Firewall {
                id: ResourceId::new("/fw/fw1"),
                name: "fw1".into(),
                location: String::new(),
                subnet: None,
                private_ip: "10.0.1.4".into(),
                public_ips: Vec::new(),
            }],
            ..Default::default()
        };

        let index = FirewallIpIndex::from_topology(&topology);
        assert_eq!(
            index.match_next_hop(&route(Some("10.0.1.4"))),
            Some(&ResourceId::new("/fw/fw1")),
        );
        assert_eq!(index.match_next_hop(&route(Some("10.0.9.9"))), None);
        assert_eq!(index.match_next_hop(&route(None)), None);
    }
}
