use super::{RiskColor, Vulnerability};
use serde::{Deserialize, Serialize};

/// `dependency.json`: the merged graph artifact produced by the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyFile {
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
}

/// Source of truth for one graph node plus its outgoing edges.
///
/// Scanner output is not trusted to be well-formed: a missing risk color
/// defaults to Gray and missing lists default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyRecord {
    #[serde(rename = "ref", default)]
    pub coordinate: String,
    #[serde(default)]
    pub unique_id: Option<u64>,
    #[serde(rename = "riskColor", default)]
    pub risk_color: RiskColor,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(rename = "dependsOn", default)]
    pub depends_on: Vec<String>,
}

/// `sbom-cyclonedx.json`, reduced to the parts the graph view consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycloneDxSbom {
    #[serde(default)]
    pub dependencies: Vec<CycloneDxDependency>,
    #[serde(default)]
    pub vulnerabilities: Vec<CycloneDxVulnerability>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycloneDxDependency {
    #[serde(rename = "ref", default)]
    pub coordinate: String,
    #[serde(rename = "dependsOn", default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycloneDxVulnerability {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub references: Vec<CycloneDxReference>,
    #[serde(default)]
    pub affects: Vec<CycloneDxAffected>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycloneDxReference {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycloneDxAffected {
    #[serde(rename = "ref", default)]
    pub coordinate: String,
}

impl CycloneDxSbom {
    /// Project the CycloneDX shape onto dependency records: vulnerabilities
    /// are joined onto the packages they affect, and a package with at least
    /// one CVE is colored Orange (there is no reachability signal here).
    pub fn to_records(&self) -> Vec<DependencyRecord> {
        use std::collections::HashMap;

        let mut by_ref: HashMap<&str, Vec<Vulnerability>> = HashMap::new();
        for vuln in &self.vulnerabilities {
            for affected in &vuln.affects {
                by_ref
                    .entry(affected.coordinate.as_str())
                    .or_default()
                    .push(Vulnerability {
                        cve_id: vuln.id.clone(),
                        cve_link: vuln
                            .references
                            .first()
                            .map(|r| r.url.clone())
                            .unwrap_or_default(),
                        ..Vulnerability::default()
                    });
            }
        }

        self.dependencies
            .iter()
            .map(|dep| {
                let vulnerabilities = by_ref.get(dep.coordinate.as_str()).cloned().unwrap_or_default();
                let risk_color = if vulnerabilities.is_empty() {
                    RiskColor::Gray
                } else {
                    RiskColor::Orange
                };
                DependencyRecord {
                    coordinate: dep.coordinate.clone(),
                    unique_id: None,
                    risk_color,
                    vulnerabilities,
                    depends_on: dep.depends_on.clone(),
                }
            })
            .collect()
    }
}

/// Split a purl-style coordinate into display name and version.
///
/// `pkg:npm/%40esbuild/linux-x64@0.19.12` -> (`@esbuild/linux-x64`, `0.19.12`).
/// A coordinate without a version (or one whose only `@` starts a namespace)
/// keeps the whole remainder as the name.
pub fn split_coordinate(coordinate: &str) -> (String, Option<String>) {
    let decoded = urlencoding::decode(coordinate)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| coordinate.to_string());

    let remainder = match decoded.strip_prefix("pkg:") {
        Some(rest) => rest.split_once('/').map(|(_, r)| r).unwrap_or(rest),
        None => decoded.as_str(),
    };

    match remainder.rfind('@') {
        Some(at) if at > 0 => (
            remainder[..at].to_string(),
            Some(remainder[at + 1..].to_string()),
        ),
        _ => (remainder.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    #[test]
    fn coordinate_splits_name_and_version() {
        assert_eq!(
            split_coordinate("pkg:pypi/flask@1.1.2"),
            ("flask".to_string(), Some("1.1.2".to_string()))
        );
        assert_eq!(
            split_coordinate("pkg:npm/%40esbuild/linux-x64@0.19.12"),
            ("@esbuild/linux-x64".to_string(), Some("0.19.12".to_string()))
        );
        // Namespace-only '@' is not a version separator.
        assert_eq!(
            split_coordinate("@babel/core"),
            ("@babel/core".to_string(), None)
        );
    }

    #[test]
    fn record_defaults_cover_sparse_input() {
        let rec: DependencyRecord = serde_json::from_str(r#"{"ref":"pkg:npm/a@1.0.0"}"#).unwrap();
        assert_eq!(rec.risk_color, RiskColor::Gray);
        assert!(rec.vulnerabilities.is_empty());
        assert!(rec.depends_on.is_empty());
    }

    #[test]
    fn cyclonedx_join_marks_affected_packages() {
        let sbom: CycloneDxSbom = serde_json::from_str(
            r#"{
                "dependencies": [
                    {"ref": "pkg:npm/a@1.0.0", "dependsOn": ["pkg:npm/b@2.0.0"]},
                    {"ref": "pkg:npm/b@2.0.0"}
                ],
                "vulnerabilities": [
                    {"id": "CVE-2024-0001", "references": [{"url": "https://example.test/cve"}],
                     "affects": [{"ref": "pkg:npm/b@2.0.0"}]}
                ]
            }"#,
        )
        .unwrap();

        let records = sbom.to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].risk_color, RiskColor::Gray);
        assert_eq!(records[1].risk_color, RiskColor::Orange);
        assert_eq!(records[1].vulnerabilities[0].cve_id, "CVE-2024-0001");
        assert_eq!(records[1].vulnerabilities[0].severity(), Severity::Unknown);
    }
}
