//! Security classifier - rules, subnets, and gateways against the risk table.
//!
//! Finding order is stable: group order x rule order x check order, then
//! subnet checks, then gateway checks, so runs over the same snapshot are
//! reproducible.

use aznet_core::model::{RuleAccess, Topology};
use tracing::debug;

use super::rules::{is_large_subnet, RuleContext, RULE_CHECKS};
use super::types::{Finding, FindingCategory, Severity};

#[derive(Debug, Default)]
pub struct SecurityClassifier;

impl SecurityClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, topology: &Topology) -> Vec<Finding> {
        let mut findings = Vec::new();
        self.classify_rules(topology, &mut findings);
        self.classify_subnets(topology, &mut findings);
        self.classify_gateways(topology, &mut findings);

        debug!(findings = findings.len(), "security classification complete");
        findings
    }

    fn classify_rules(&self, topology: &Topology, findings: &mut Vec<Finding>) {
        for group in &topology.security_groups {
            for rule in &group.rules {
                // Deny rules cannot create exposure themselves.
                if rule.access != RuleAccess::Allow {
                    continue;
                }
                let ctx = RuleContext { group, rule };
                for check in RULE_CHECKS {
                    (check.run)(&ctx, findings);
                }
            }
        }
    }

    fn classify_subnets(&self, topology: &Topology, findings: &mut Vec<Finding>) {
        for (vnet, subnet) in topology.subnets() {
            if subnet.security_group.is_none() {
                findings.push(Finding {
                    severity: Severity::High,
                    category: FindingCategory::MissingProtection,
                    resource: format!("{}/{}", vnet.name, subnet.name),
                    resource_id: subnet.id.clone(),
                    rule: None,
                    description: format!(
                        "Subnet '{}' in VNet '{}' has no network security group attached",
                        subnet.name, vnet.name
                    ),
                    recommendation: "Attach an NSG to control inbound and outbound traffic"
                        .into(),
                });
            }
            if is_large_subnet(&subnet.address_prefix) {
                findings.push(Finding {
                    severity: Severity::Info,
                    category: FindingCategory::Configuration,
                    resource: format!("{}/{}", vnet.name, subnet.name),
                    resource_id: subnet.id.clone(),
                    rule: None,
                    description: format!(
                        "Subnet '{}' has a large address space ({})",
                        subnet.name, subnet.address_prefix
                    ),
                    recommendation:
                        "Consider smaller subnets for better network segmentation and security isolation"
                            .into(),
                });
            }
        }
    }

    fn classify_gateways(&self, topology: &Topology, findings: &mut Vec<Finding>) {
        for vpn in &topology.vpn_gateways {
            if vpn.sku.to_lowercase().contains("basic") {
                findings.push(Finding {
                    severity: Severity::Medium,
                    category: FindingCategory::Configuration,
                    resource: vpn.name.clone(),
                    resource_id: vpn.id.clone(),
                    rule: None,
                    description: format!(
                        "VPN gateway '{}' uses Basic SKU with limited security features",
                        vpn.name
                    ),
                    recommendation:
                        "Consider upgrading to VpnGw1 or higher for better performance and security features"
                            .into(),
                });
            }
        }
        for appgw in &topology.app_gateways {
            if !appgw.waf_enabled {
                findings.push(Finding {
                    severity: Severity::High,
                    category: FindingCategory::MissingProtection,
                    resource: appgw.name.clone(),
                    resource_id: appgw.id.clone(),
                    rule: None,
                    description: format!(
                        "Application gateway '{}' does not have WAF enabled",
                        appgw.name
                    ),
                    recommendation:
                        "Enable Web Application Firewall (WAF) to protect against common web vulnerabilities"
                            .into(),
                });
            }
        }
    }
}
