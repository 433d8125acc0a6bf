//! Top-level analysis entry point.

use aznet_core::model::Topology;
use tracing::info;

use crate::orphans::{OrphanAnalyzer, OrphanedResources};
use crate::security::{Finding, SecurityClassifier, Severity};

use super::types::{AnalysisReport, TopologySummary};

/// Facts the recommendation table decides on.
struct ReportFacts {
    critical: usize,
    high: usize,
    unattached_nsgs: usize,
    subnets_without_nsg: usize,
    unused_route_tables: usize,
    vnets: usize,
    peerings: usize,
    private_endpoints: usize,
}

/// Fixed decision table: each entry fires on the facts alone, in order.
const RECOMMENDATIONS: &[(fn(&ReportFacts) -> bool, &str)] = &[
    (
        |f| f.critical > 0,
        "URGENT: Address critical security findings immediately to prevent potential breaches",
    ),
    (
        |f| f.high > 0,
        "Review and remediate high-severity security findings within 24-48 hours",
    ),
    (
        |f| f.unattached_nsgs > 0,
        "Consider removing unattached NSGs or attaching them to appropriate subnets",
    ),
    (
        |f| f.subnets_without_nsg > 0,
        "Attach NSGs to unprotected subnets to improve security posture",
    ),
    (
        |f| f.unused_route_tables > 0,
        "Remove unused route tables to reduce configuration complexity",
    ),
    (
        |f| f.vnets > 0 && f.peerings == 0,
        "Consider VNet peering for connectivity between virtual networks if needed",
    ),
    (
        |f| f.vnets > 0 && f.private_endpoints == 0,
        "Consider using private endpoints for secure access to platform services",
    ),
];

/// Runs every analysis pass over one snapshot and assembles the report.
#[derive(Debug, Default)]
pub struct TopologyAnalyzer {
    orphans: OrphanAnalyzer,
    security: SecurityClassifier,
}

impl TopologyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&self, topology: &Topology) -> AnalysisReport {
        let summary = summarize(topology);
        let findings = self.security.classify(topology);
        let orphaned = self.orphans.analyze(topology);
        let recommendations = recommend(&summary, &findings, &orphaned);

        info!(
            findings = findings.len(),
            recommendations = recommendations.len(),
            subnets = summary.total_subnets,
            "analysis complete"
        );

        AnalysisReport {
            summary,
            findings,
            orphaned,
            recommendations,
        }
    }
}

fn summarize(topology: &Topology) -> TopologySummary {
    let mut summary = TopologySummary {
        total_vnets: topology.virtual_networks.len(),
        total_nsgs: topology.security_groups.len(),
        total_route_tables: topology.route_tables.len(),
        total_nat_gateways: topology.nat_gateways.len(),
        total_vpn_gateways: topology.vpn_gateways.len(),
        total_app_gateways: topology.app_gateways.len(),
        total_firewalls: topology.firewalls.len(),
        total_private_endpoints: topology.private_endpoints.len(),
        total_load_balancers: topology.load_balancers.len(),
        ..Default::default()
    };

    for vnet in &topology.virtual_networks {
        summary.total_subnets += vnet.subnets.len();
        summary.vnet_peering_count += vnet.peerings.len();
        summary.address_spaces.extend(vnet.address_space.iter().cloned());
    }
    for nsg in &topology.security_groups {
        summary.total_security_rules += nsg.rules.len();
    }
    for rt in &topology.route_tables {
        summary.total_routes += rt.routes.len();
    }

    summary
}

fn recommend(
    summary: &TopologySummary,
    findings: &[Finding],
    orphaned: &OrphanedResources,
) -> Vec<String> {
    let facts = ReportFacts {
        critical: findings
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .count(),
        high: findings
            .iter()
            .filter(|f| f.severity == Severity::High)
            .count(),
        unattached_nsgs: orphaned.unattached_nsgs.len(),
        subnets_without_nsg: orphaned.subnets_without_nsg.len(),
        unused_route_tables: orphaned.unused_route_tables.len(),
        vnets: summary.total_vnets,
        peerings: summary.vnet_peering_count,
        private_endpoints: summary.total_private_endpoints,
    };

    RECOMMENDATIONS
        .iter()
        .filter(|(applies, _)| applies(&facts))
        .map(|(_, text)| text.to_string())
        .collect()
}
