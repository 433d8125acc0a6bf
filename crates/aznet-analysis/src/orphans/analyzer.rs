//! Orphan analyzer - one pass over subnets, then membership tests.
//!
//! The pass builds a used-identifier set per resource kind from the subnets'
//! optional references; a resource is orphaned iff its identifier is absent
//! from the matching set. Linear in (subnets + resources).

use aznet_core::model::{ResourceId, Topology};
use rustc_hash::FxHashSet;
use tracing::debug;

use super::types::OrphanedResources;

#[derive(Debug, Default)]
pub struct OrphanAnalyzer;

impl OrphanAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, topology: &Topology) -> OrphanedResources {
        let mut orphaned = OrphanedResources::default();

        let mut used_nsgs: FxHashSet<&ResourceId> = FxHashSet::default();
        let mut used_route_tables: FxHashSet<&ResourceId> = FxHashSet::default();
        let mut used_nat_gateways: FxHashSet<&ResourceId> = FxHashSet::default();

        for (vnet, subnet) in topology.subnets() {
            match &subnet.security_group {
                Some(nsg) => {
                    used_nsgs.insert(nsg);
                }
                None => orphaned
                    .subnets_without_nsg
                    .push(format!("{}/{}", vnet.name, subnet.name)),
            }
            match &subnet.route_table {
                Some(rt) => {
                    used_route_tables.insert(rt);
                }
                None => orphaned
                    .subnets_without_route_table
                    .push(format!("{}/{}", vnet.name, subnet.name)),
            }
            if let Some(nat) = &subnet.nat_gateway {
                used_nat_gateways.insert(nat);
            }
        }

        for nsg in &topology.security_groups {
            if !used_nsgs.contains(&nsg.id) {
                orphaned.unattached_nsgs.push(nsg.name.clone());
            }
        }
        for rt in &topology.route_tables {
            if !used_route_tables.contains(&rt.id) {
                orphaned.unused_route_tables.push(rt.name.clone());
            }
        }
        for nat in &topology.nat_gateways {
            if !used_nat_gateways.contains(&nat.id) {
                orphaned.unused_nat_gateways.push(nat.name.clone());
            }
        }

        debug!(
            unattached_nsgs = orphaned.unattached_nsgs.len(),
            unused_route_tables = orphaned.unused_route_tables.len(),
            unused_nat_gateways = orphaned.unused_nat_gateways.len(),
            "orphan scan complete"
        );
        orphaned
    }
}
