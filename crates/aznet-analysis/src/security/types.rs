//! Finding types.

use serde::{Deserialize, Serialize};

use aznet_core::model::ResourceId;

/// Severity of a finding, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }
}

/// What part of the configuration a finding concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// A risky security-group rule.
    NsgRule,
    /// A service reachable from the internet.
    NetworkExposure,
    /// A resource lacking an expected protective layer.
    MissingProtection,
    /// A maintainability or sizing concern.
    Configuration,
}

impl FindingCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NsgRule => "nsg_rule",
            Self::NetworkExposure => "network_exposure",
            Self::MissingProtection => "missing_protection",
            Self::Configuration => "configuration",
        }
    }
}

/// A single security/configuration observation. Derived data: findings are
/// never written back onto the resource they describe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    /// Name of the offending resource (NSG, subnet path, or gateway).
    pub resource: String,
    pub resource_id: ResourceId,
    /// Rule name when the finding concerns a single rule.
    #[serde(default)]
    pub rule: Option<String>,
    pub description: String,
    pub recommendation: String,
}
