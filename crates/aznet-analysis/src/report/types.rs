//! Report types.

use serde::{Deserialize, Serialize};

use crate::orphans::OrphanedResources;
use crate::security::Finding;

/// Resource counts for one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySummary {
    pub total_vnets: usize,
    pub total_subnets: usize,
    pub total_nsgs: usize,
    pub total_security_rules: usize,
    pub total_route_tables: usize,
    pub total_routes: usize,
    pub total_nat_gateways: usize,
    pub total_vpn_gateways: usize,
    pub total_app_gateways: usize,
    pub total_firewalls: usize,
    pub total_private_endpoints: usize,
    pub total_load_balancers: usize,
    pub vnet_peering_count: usize,
    /// Address spaces collected across all VNets.
    pub address_spaces: Vec<String>,
}

/// Everything one analysis run derives from a snapshot. Read-only data for
/// downstream report emitters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: TopologySummary,
    pub findings: Vec<Finding>,
    pub orphaned: OrphanedResources,
    pub recommendations: Vec<String>,
}
