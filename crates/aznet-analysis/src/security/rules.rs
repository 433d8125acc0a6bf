//! Rule risk table and predicates.
//!
//! Checks are an ordered table of independent entries so new checks compose
//! without touching existing ones. Each entry sees one (group, rule) pair
//! and appends zero or more findings; there is no cross-check deduplication.

use aznet_core::model::{NetworkSecurityGroup, SecurityRule};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::types::{Finding, FindingCategory, Severity};

/// Allow rules at priorities below this shadow a large tail of later rules.
pub(crate) const EARLY_PRIORITY_CEILING: i32 = 200;

/// One (group, rule) pair under evaluation.
pub(crate) struct RuleContext<'a> {
    pub group: &'a NetworkSecurityGroup,
    pub rule: &'a SecurityRule,
}

impl RuleContext<'_> {
    fn finding(
        &self,
        severity: Severity,
        category: FindingCategory,
        description: String,
        recommendation: impl Into<String>,
    ) -> Finding {
        Finding {
            severity,
            category,
            resource: self.group.name.clone(),
            resource_id: self.group.id.clone(),
            rule: Some(self.rule.name.clone()),
            description,
            recommendation: recommendation.into(),
        }
    }
}

/// One independent check over a rule.
pub(crate) struct RuleCheck {
    pub name: &'static str,
    pub run: fn(&RuleContext<'_>, &mut Vec<Finding>),
}

/// The fixed check table, in evaluation order.
pub(crate) const RULE_CHECKS: &[RuleCheck] = &[
    RuleCheck {
        name: "sensitive-ports",
        run: check_sensitive_ports,
    },
    RuleCheck {
        name: "all-ports-open",
        run: check_all_ports_open,
    },
    RuleCheck {
        name: "wide-open",
        run: check_wide_open,
    },
    RuleCheck {
        name: "wide-port-range",
        run: check_wide_port_range,
    },
    RuleCheck {
        name: "missing-description",
        run: check_missing_description,
    },
    RuleCheck {
        name: "early-wide-open",
        run: check_early_wide_open,
    },
];

struct PortRisk {
    service: &'static str,
    severity: Severity,
}

/// Services whose exposure to the internet is a known risk, by port.
static SENSITIVE_PORTS: Lazy<FxHashMap<&'static str, PortRisk>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    let mut risk = |port, service, severity| {
        table.insert(port, PortRisk { service, severity });
    };
    risk("22", "SSH", Severity::Critical);
    risk("3389", "RDP", Severity::Critical);
    risk("23", "Telnet", Severity::Critical);
    risk("21", "FTP", Severity::High);
    risk("445", "SMB", Severity::Critical);
    risk("1433", "SQL Server", Severity::Critical);
    risk("3306", "MySQL", Severity::Critical);
    risk("5432", "PostgreSQL", Severity::Critical);
    risk("27017", "MongoDB", Severity::Critical);
    risk("6379", "Redis", Severity::High);
    risk("9200", "Elasticsearch", Severity::High);
    table
});

fn check_sensitive_ports(ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
    if !is_internet_source(&ctx.rule.source_address) {
        return;
    }
    for token in port_tokens(&ctx.rule.destination_ports) {
        if let Some(risk) = SENSITIVE_PORTS.get(token) {
            out.push(ctx.finding(
                risk.severity,
                FindingCategory::NetworkExposure,
                format!(
                    "{} (port {}) is exposed to the internet via rule '{}'",
                    risk.service, token, ctx.rule.name
                ),
                format!(
                    "Restrict {} access to specific IP addresses or use a bastion host or VPN for remote access",
                    risk.service
                ),
            ));
        }
    }
}

fn check_all_ports_open(ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
    if is_internet_source(&ctx.rule.source_address) && is_any_ports(&ctx.rule.destination_ports) {
        out.push(ctx.finding(
            Severity::Critical,
            FindingCategory::NetworkExposure,
            format!(
                "All ports are exposed to the internet via rule '{}'",
                ctx.rule.name
            ),
            "Restrict to specific ports required for your application",
        ));
    }
}

fn check_wide_open(ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
    if is_wide_open(ctx.rule) {
        out.push(ctx.finding(
            Severity::High,
            FindingCategory::NsgRule,
            format!(
                "Rule '{}' allows traffic from any source to any destination on all ports",
                ctx.rule.name
            ),
            "Implement least-privilege access by restricting source, destination, and ports",
        ));
    }
}

fn check_wide_port_range(ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
    if is_wide_port_range(&ctx.rule.destination_ports) {
        out.push(ctx.finding(
            Severity::Medium,
            FindingCategory::NsgRule,
            format!(
                "Rule '{}' allows a wide range of ports ({})",
                ctx.rule.name, ctx.rule.destination_ports
            ),
            "Restrict to specific ports required for your application",
        ));
    }
}

fn check_missing_description(ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
    if ctx.rule.description.is_empty() {
        out.push(ctx.finding(
            Severity::Low,
            FindingCategory::Configuration,
            format!("Security rule '{}' has no description", ctx.rule.name),
            "Add descriptive comments to all security rules for better maintainability",
        ));
    }
}

fn check_early_wide_open(ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
    if ctx.rule.priority < EARLY_PRIORITY_CEILING && is_wide_open(ctx.rule) {
        out.push(ctx.finding(
            Severity::Medium,
            FindingCategory::NsgRule,
            format!(
                "High priority ({}) allow rule may override important deny rules",
                ctx.rule.priority
            ),
            "Review rule priority to ensure deny rules are not inadvertently bypassed",
        ));
    }
}

// Predicates

pub(crate) fn is_internet_source(source: &str) -> bool {
    matches!(source, "*" | "0.0.0.0/0" | "Internet" | "Any")
}

fn is_any_address(address: &str) -> bool {
    matches!(address, "*" | "0.0.0.0/0")
}

pub(crate) fn is_any_ports(ports: &str) -> bool {
    matches!(ports, "*" | "0-65535")
}

pub(crate) fn is_wide_open(rule: &SecurityRule) -> bool {
    is_internet_source(&rule.source_address)
        && is_any_address(&rule.destination_address)
        && is_any_ports(&rule.destination_ports)
}

/// Textual-length proxy for numeric range width: a single hyphenated range
/// longer than 5 characters counts as wide. Over- and under-reports relative
/// to exact port arithmetic ("80-8080" is wide, "1-999" is not); that
/// tradeoff is accepted policy, not a defect.
pub(crate) fn is_wide_port_range(ports: &str) -> bool {
    match ports.split_once('-') {
        Some((lo, hi)) if !lo.is_empty() && !hi.is_empty() && !hi.contains('-') => ports.len() > 5,
        _ => false,
    }
}

/// Address prefixes of /16 or shorter cover at least 65k addresses.
pub(crate) fn is_large_subnet(address_prefix: &str) -> bool {
    address_prefix
        .split_once('/')
        .and_then(|(_, bits)| bits.parse::<u8>().ok())
        .is_some_and(|bits| bits <= 16)
}

/// Split a destination port specification into lookup tokens: `*` stays
/// whole, comma lists split into entries, a hyphenated range stays one token.
pub(crate) fn port_tokens(ports: &str) -> SmallVec<[&str; 4]> {
    if ports.contains(',') {
        return ports
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();
    }
    let mut tokens = SmallVec::new();
    if !ports.is_empty() {
        tokens.push(ports);
    }
    tokens
}
