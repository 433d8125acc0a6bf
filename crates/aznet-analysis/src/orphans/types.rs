//! Orphan analysis result types.

use serde::{Deserialize, Serialize};

/// Resources of a kind normally referenced by some subnet, partitioned by
/// why they are unused, plus the subnets missing expected protection.
/// Subnet entries are `vnet-name/subnet-name`; resource entries are names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedResources {
    /// NSGs referenced by no subnet.
    pub unattached_nsgs: Vec<String>,
    /// Route tables referenced by no subnet.
    pub unused_route_tables: Vec<String>,
    /// NAT gateways referenced by no subnet.
    pub unused_nat_gateways: Vec<String>,
    /// Subnets with no NSG configured.
    pub subnets_without_nsg: Vec<String>,
    /// Subnets with no route table configured.
    pub subnets_without_route_table: Vec<String>,
}

impl OrphanedResources {
    pub fn is_empty(&self) -> bool {
        self.unattached_nsgs.is_empty()
            && self.unused_route_tables.is_empty()
            && self.unused_nat_gateways.is_empty()
            && self.subnets_without_nsg.is_empty()
            && self.subnets_without_route_table.is_empty()
    }
}
