mod component;
mod dependency;
mod project;
mod severity;
mod summary;
mod vulnerability;

pub use component::{Component, LicenseRef, PackageCheck, SbomDetail};
pub use dependency::{
    CycloneDxDependency, CycloneDxSbom, CycloneDxVulnerability, DependencyFile, DependencyRecord,
    split_coordinate,
};
pub use project::{DirectoryManifest, Project, group_projects};
pub use severity::{RiskColor, RiskLevel, Severity};
pub use summary::{PackageCheckSummary, SbomSummary, VulnSummary};
pub use vulnerability::{ReachableEntry, Score, Vulnerability};
