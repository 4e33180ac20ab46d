use super::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `sbom-summary.json`: precomputed dashboard totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbomSummary {
    #[serde(default)]
    pub vuln_sum: VulnSummary,
    /// License name -> usage count, plus the special `usedlicense` total.
    #[serde(default)]
    pub license_sum: BTreeMap<String, u64>,
}

impl SbomSummary {
    /// Distinct licenses in use, excluding the `usedlicense` total key.
    pub fn license_counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.license_sum
            .iter()
            .filter(|(k, _)| k.as_str() != "usedlicense")
            .map(|(k, v)| (k.as_str(), *v))
    }

    pub fn used_license_total(&self) -> u64 {
        self.license_sum.get("usedlicense").copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VulnSummary {
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub unknown: u64,
    #[serde(default)]
    pub total: u64,
}

/// `packagecheck-summary.json`: malicious-component screening rollup.
///
/// Beyond the fixed `RiskLevelCounts`, the artifact carries one
/// `<ecosystem>_ScoreGroups` object per scanned ecosystem; those land in
/// `score_groups` via the flatten below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageCheckSummary {
    #[serde(rename = "RiskLevelCounts", default)]
    pub risk_level_counts: BTreeMap<String, u64>,
    /// `<ecosystem>_ScoreGroups` -> risk level key -> score bucket -> count.
    #[serde(flatten, default)]
    pub score_groups: BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>>,
}

impl PackageCheckSummary {
    /// The "Total Libraries" tile: sum of all risk-level counts.
    pub fn total_libraries(&self) -> u64 {
        self.risk_level_counts.values().sum()
    }

    pub fn count(&self, level: RiskLevel) -> u64 {
        self.risk_level_counts.get(level.key()).copied().unwrap_or(0)
    }

    /// Ecosystems enumerated from the `*_ScoreGroups` keys, sorted by key.
    pub fn ecosystems(&self) -> Vec<String> {
        self.score_groups
            .keys()
            .filter_map(|k| k.strip_suffix("_ScoreGroups"))
            .map(str::to_string)
            .collect()
    }

    /// Per-ecosystem risk counts: each level's score-group buckets summed.
    pub fn ecosystem_risk_counts(&self, ecosystem: &str) -> BTreeMap<RiskLevel, u64> {
        let mut counts: BTreeMap<RiskLevel, u64> =
            RiskLevel::ALL.iter().map(|l| (*l, 0)).collect();

        let key = format!("{}_ScoreGroups", ecosystem);
        if let Some(groups) = self.score_groups.get(&key) {
            for level in RiskLevel::ALL {
                if let Some(buckets) = groups.get(level.key()) {
                    counts.insert(level, buckets.values().sum());
                }
            }
        }
        counts
    }
}
