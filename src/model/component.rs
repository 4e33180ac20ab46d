use super::{RiskLevel, Vulnerability};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `sbom-detail.json`: the full per-project component inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbomDetail {
    #[serde(default)]
    pub components: Vec<Component>,
}

/// One inventoried package. Fields match the scanner output; everything the
/// scanner may omit is defaulted so a sparse record still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub unique_id: Option<u64>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub ecosystem: Option<String>,
    #[serde(default)]
    pub licenses: Vec<LicenseRef>,
    #[serde(default)]
    pub hashes: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub external_references: Vec<String>,
    #[serde(rename = "type", default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub purl: String,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(default)]
    pub package_check: Vec<PackageCheck>,
}

impl Component {
    /// Risk level reported by the first package-check entry, if any.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.package_check
            .first()
            .and_then(|c| RiskLevel::parse(&c.risk_level))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseRef {
    #[serde(default)]
    pub license_name: String,
    #[serde(default)]
    pub license_url: Option<String>,
}

/// Malicious-package screening result attached to a component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageCheck {
    #[serde(rename = "Score", default)]
    pub score: Option<i64>,
    #[serde(rename = "Risk Level", default)]
    pub risk_level: String,
    #[serde(rename = "Typosquatting Suspected", default)]
    pub typosquatting_suspected: String,
    /// Reason -> penalty points. Null in the artifact when clean.
    #[serde(rename = "Warning Reasons", default)]
    pub warning_reasons: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_component_loads_with_defaults() {
        let detail: SbomDetail =
            serde_json::from_str(r#"{"components":[{"name":"flask","purl":"pkg:pypi/flask@1.1.2"}]}"#)
                .unwrap();
        let c = &detail.components[0];
        assert_eq!(c.name, "flask");
        assert!(c.vulnerabilities.is_empty());
        assert!(c.licenses.is_empty());
        assert_eq!(c.risk_level(), None);
    }

    #[test]
    fn package_check_risk_level_parses() {
        let c: Component = serde_json::from_str(
            r#"{"name":"x","package_check":[{"Score":35,"Risk Level":"Red","Typosquatting Suspected":"Yes","Warning Reasons":{"low downloads":"10"}}]}"#,
        )
        .unwrap();
        assert_eq!(c.risk_level(), Some(RiskLevel::Red));
        assert_eq!(c.package_check[0].score, Some(35));
    }
}
