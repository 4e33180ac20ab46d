use super::reachability::{AttributedVulnerability, VulnPartition};
use crate::model::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts per severity for one group of the summary chart.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SeverityCounts {
    counts: BTreeMap<Severity, u64>,
}

impl SeverityCounts {
    fn add(&mut self, severity: Severity) {
        *self.counts.entry(severity).or_insert(0) += 1;
    }

    pub fn get(&self, severity: Severity) -> u64 {
        self.counts.get(&severity).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Summary-chart tallies over a vulnerability partition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeverityRollup {
    pub reachable: SeverityCounts,
    pub unreachable: SeverityCounts,
    /// Distinct CVE ids across both groups.
    pub total_unique_cves: u64,
    pub reachable_unique_cves: u64,
}

/// Aggregate severity counts for the summary chart.
///
/// Counting dedups by `cve_id` alone: one CVE shared by several packages is
/// counted once per group. This answers "how many distinct vulnerabilities",
/// not "how exposed are we" - per-package exposure is undercounted, and the
/// tests pin that behavior down on purpose.
pub fn rollup(partition: &VulnPartition) -> SeverityRollup {
    let reachable_unique = dedup_by_cve(&partition.reachable);
    let unreachable_unique = dedup_by_cve(&partition.cve_only);

    let mut all: BTreeMap<&str, &AttributedVulnerability> = BTreeMap::new();
    for v in partition.reachable.iter().chain(&partition.cve_only) {
        all.insert(v.vulnerability.cve_id.as_str(), v);
    }

    let mut result = SeverityRollup {
        total_unique_cves: all.len() as u64,
        reachable_unique_cves: reachable_unique.len() as u64,
        ..SeverityRollup::default()
    };
    for v in reachable_unique.values() {
        result.reachable.add(v.vulnerability.severity());
    }
    for v in unreachable_unique.values() {
        result.unreachable.add(v.vulnerability.severity());
    }
    result
}

fn dedup_by_cve(
    vulnerabilities: &[AttributedVulnerability],
) -> BTreeMap<&str, &AttributedVulnerability> {
    let mut unique = BTreeMap::new();
    // Later entries overwrite earlier ones, like the insertion-order map
    // the chart was originally built on.
    for v in vulnerabilities {
        unique.insert(v.vulnerability.cve_id.as_str(), v);
    }
    unique
}
