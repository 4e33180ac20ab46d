use crate::model::{Component, ReachableEntry, Vulnerability};
use crate::style;
use serde::Serialize;
use std::collections::HashSet;

/// Normalize a package name for the join against reachability findings:
/// lowercase, with whitespace, hyphens, underscores, and dots stripped.
///
/// This is a best-effort fuzzy join across two independently produced
/// artifacts; distinct packages with the same normalized name will collide.
/// The reachability artifact carries no stronger identifier.
pub fn normalize_package_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A vulnerability attributed to its owning package, as listed in tables.
#[derive(Debug, Clone, Serialize)]
pub struct AttributedVulnerability {
    pub package_name: String,
    pub package_version: String,
    #[serde(flatten)]
    pub vulnerability: Vulnerability,
}

/// All of a project's vulnerabilities split by whether their package was
/// confirmed reachable from an entry point.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VulnPartition {
    pub reachable: Vec<AttributedVulnerability>,
    pub cve_only: Vec<AttributedVulnerability>,
}

/// Normalized names of all libraries the reachability pass confirmed.
pub fn reachable_name_set(entries: &[ReachableEntry]) -> HashSet<String> {
    entries
        .iter()
        .map(|e| normalize_package_name(&e.reachable_library))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Partition every (CVE, package) pair into reachable vs. cve-only.
///
/// Identity for the partition is `cve_id` plus package name, so one CVE
/// affecting two packages appears in both rows; repeats of the same pair
/// are collapsed.
pub fn partition_vulnerabilities(
    components: &[Component],
    reachable: &[ReachableEntry],
) -> VulnPartition {
    let reachable_names = reachable_name_set(reachable);
    let mut seen: HashSet<String> = HashSet::new();
    let mut partition = VulnPartition::default();

    for component in components {
        if component.name.is_empty() {
            style::warning(&format!(
                "Package name is missing for purl {:?}; skipping its vulnerabilities.",
                component.purl
            ));
            continue;
        }

        let normalized = normalize_package_name(&component.name);
        for vulnerability in &component.vulnerabilities {
            let key = format!("{}-{}", vulnerability.cve_id, component.name);
            if !seen.insert(key) {
                continue;
            }

            let attributed = AttributedVulnerability {
                package_name: component.name.clone(),
                package_version: component.version.clone(),
                vulnerability: vulnerability.clone(),
            };
            if reachable_names.contains(&normalized) {
                partition.reachable.push(attributed);
            } else {
                partition.cve_only.push(attributed);
            }
        }
    }

    partition
}
