//! Classifier tests: determinism, category overlap, and per-resource checks.

use aznet_analysis::{Finding, FindingCategory, SecurityClassifier, Severity};
use aznet_core::model::{
    ApplicationGateway, NetworkSecurityGroup, ResourceId, RuleAccess, RuleDirection,
    SecurityRule, Subnet, Topology, VirtualNetwork, VpnGateway,
};

fn rule(name: &str, access: RuleAccess, source: &str, dest: &str, ports: &str) -> SecurityRule {
    SecurityRule {
        name: name.into(),
        priority: 300,
        direction: RuleDirection::Inbound,
        access,
        protocol: "Tcp".into(),
        source_address: source.into(),
        source_ports: "*".into(),
        destination_address: dest.into(),
        destination_ports: ports.into(),
        description: "documented".into(),
    }
}

fn nsg_with(rules: Vec<SecurityRule>) -> Topology {
    Topology {
        security_groups: vec![NetworkSecurityGroup {
            id: ResourceId::new("/nsg/web"),
            name: "web-nsg".into(),
            location: String::new(),
            rules,
        }],
        ..Default::default()
    }
}

fn classify(topology: &Topology) -> Vec<Finding> {
    SecurityClassifier::new().classify(topology)
}

#[test]
fn internet_exposed_ssh_is_always_critical() {
    let topology = nsg_with(vec![rule("allow-ssh", RuleAccess::Allow, "*", "10.0.1.0/24", "22")]);
    let findings = classify(&topology);

    let ssh: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical && f.description.contains("SSH"))
        .collect();
    assert!(!ssh.is_empty());
    assert_eq!(ssh[0].rule.as_deref(), Some("allow-ssh"));
    assert_eq!(ssh[0].category, FindingCategory::NetworkExposure);
}

#[test]
fn deny_rules_yield_no_findings() {
    let topology = nsg_with(vec![rule("deny-ssh", RuleAccess::Deny, "*", "*", "22")]);
    assert!(classify(&topology).is_empty());
}

#[test]
fn non_internet_source_does_not_trip_sensitive_ports() {
    let topology = nsg_with(vec![rule(
        "allow-internal-ssh",
        RuleAccess::Allow,
        "10.0.0.0/8",
        "10.0.1.0/24",
        "22",
    )]);
    assert!(classify(&topology)
        .iter()
        .all(|f| !f.description.contains("SSH")));
}

#[test]
fn wide_open_rule_yields_exactly_one_high_plus_independent_matches() {
    let topology = nsg_with(vec![rule("allow-all", RuleAccess::Allow, "*", "*", "*")]);
    let findings = classify(&topology);

    let wide_open: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::High && f.description.contains("any source"))
        .collect();
    assert_eq!(wide_open.len(), 1);

    // All-ports exposure fires independently; no cross-category dedup.
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Critical
            && f.description.contains("All ports are exposed")));
}

#[test]
fn comma_separated_ports_yield_one_finding_each() {
    let topology = nsg_with(vec![rule(
        "allow-mgmt",
        RuleAccess::Allow,
        "0.0.0.0/0",
        "10.0.1.0/24",
        "22,3389",
    )]);
    let findings = classify(&topology);

    assert!(findings.iter().any(|f| f.description.contains("SSH")));
    assert!(findings.iter().any(|f| f.description.contains("RDP")));
}

#[test]
fn early_wide_open_adds_priority_shadowing_finding() {
    let mut early = rule("allow-all-early", RuleAccess::Allow, "*", "*", "*");
    early.priority = 100;
    let topology = nsg_with(vec![early]);
    let findings = classify(&topology);

    assert!(findings.iter().any(|f| f.severity == Severity::Medium
        && f.description.contains("High priority (100)")));
}

#[test]
fn late_wide_open_has_no_priority_finding() {
    let topology = nsg_with(vec![rule("allow-all", RuleAccess::Allow, "*", "*", "*")]);
    assert!(classify(&topology)
        .iter()
        .all(|f| !f.description.contains("High priority")));
}

#[test]
fn wide_port_range_is_medium() {
    let topology = nsg_with(vec![rule(
        "allow-range",
        RuleAccess::Allow,
        "10.0.0.0/8",
        "10.0.1.0/24",
        "80-8080",
    )]);
    let findings = classify(&topology);

    assert!(findings.iter().any(|f| f.severity == Severity::Medium
        && f.description.contains("wide range of ports (80-8080)")));
}

#[test]
fn missing_description_is_low() {
    let mut undocumented = rule("allow-web", RuleAccess::Allow, "10.0.0.0/8", "10.0.1.0/24", "443");
    undocumented.description = String::new();
    let topology = nsg_with(vec![undocumented]);
    let findings = classify(&topology);

    assert!(findings.iter().any(|f| f.severity == Severity::Low
        && f.category == FindingCategory::Configuration
        && f.description.contains("has no description")));
}

#[test]
fn finding_order_follows_group_then_rule_order() {
    let topology = Topology {
        security_groups: vec![
            NetworkSecurityGroup {
                id: ResourceId::new("/nsg/a"),
                name: "nsg-a".into(),
                location: String::new(),
                rules: vec![rule("a-ssh", RuleAccess::Allow, "*", "10.0.0.0/24", "22")],
            },
            NetworkSecurityGroup {
                id: ResourceId::new("/nsg/b"),
                name: "nsg-b".into(),
                location: String::new(),
                rules: vec![rule("b-rdp", RuleAccess::Allow, "*", "10.0.0.0/24", "3389")],
            },
        ],
        ..Default::default()
    };

    let first = SecurityClassifier::new().classify(&topology);
    let second = SecurityClassifier::new().classify(&topology);
    let order: Vec<_> = first.iter().map(|f| f.resource.clone()).collect();
    assert_eq!(order.first().map(String::as_str), Some("nsg-a"));
    assert_eq!(order.last().map(String::as_str), Some("nsg-b"));
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.description, b.description);
    }
}

#[test]
fn unprotected_and_oversized_subnets_are_flagged() {
    let topology = Topology {
        virtual_networks: vec![VirtualNetwork {
            id: ResourceId::new("/v/1"),
            name: "vnet1".into(),
            location: String::new(),
            address_space: vec!["10.0.0.0/8".into()],
            subnets: vec![Subnet {
                id: ResourceId::new("/v/1/s/big"),
                name: "big".into(),
                address_prefix: "10.0.0.0/16".into(),
                security_group: None,
                route_table: None,
                nat_gateway: None,
            }],
            peerings: Vec::new(),
        }],
        ..Default::default()
    };
    let findings = classify(&topology);

    assert!(findings.iter().any(|f| f.severity == Severity::High
        && f.category == FindingCategory::MissingProtection
        && f.resource == "vnet1/big"));
    assert!(findings.iter().any(|f| f.severity == Severity::Info
        && f.description.contains("large address space (10.0.0.0/16)")));
}

#[test]
fn gateway_checks_cover_sku_and_waf() {
    let topology = Topology {
        vpn_gateways: vec![VpnGateway {
            id: ResourceId::new("/vpn/1"),
            name: "vpn-basic".into(),
            location: String::new(),
            vnet: ResourceId::new("/v/1"),
            sku: "Basic".into(),
        }],
        app_gateways: vec![
            ApplicationGateway {
                id: ResourceId::new("/agw/open"),
                name: "agw-open".into(),
                location: String::new(),
                subnet: None,
                sku: "Standard_v2".into(),
                waf_enabled: false,
            },
            ApplicationGateway {
                id: ResourceId::new("/agw/safe"),
                name: "agw-safe".into(),
                location: String::new(),
                subnet: None,
                sku: "WAF_v2".into(),
                waf_enabled: true,
            },
        ],
        ..Default::default()
    };
    let findings = classify(&topology);

    assert!(findings.iter().any(|f| f.severity == Severity::Medium
        && f.description.contains("Basic SKU")));
    assert!(findings.iter().any(|f| f.severity == Severity::High
        && f.resource == "agw-open"
        && f.description.contains("WAF")));
    assert!(findings.iter().all(|f| f.resource != "agw-safe"));
}
