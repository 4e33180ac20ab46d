mod aggregate;
mod engine;
mod graph;
mod inventory;
mod layout;
mod reachability;
mod tree;

pub use aggregate::{SeverityCounts, SeverityRollup, rollup};
pub use engine::{Filter, GraphView, SelectionClosure};
pub use graph::{DependencyGraph, GraphNode};
pub use inventory::{DependencyLink, link_dependencies};
pub use reachability::{
    AttributedVulnerability, VulnPartition, normalize_package_name, partition_vulnerabilities,
    reachable_name_set,
};
pub use tree::{DependencyTreeNode, project_tree};

use crate::artifact::{ArtifactError, ProjectLoader};
use crate::model::{DependencyRecord, PackageCheckSummary, SbomSummary};
use crate::style;
use serde::Serialize;

/// Everything the terminal reports and the dashboard summary view need for
/// one project, assembled in a single pass over its artifacts.
#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub project: String,
    pub component_count: usize,
    pub summary: SbomSummary,
    pub package_check: Option<PackageCheckSummary>,
    pub partition: VulnPartition,
    pub rollup: SeverityRollup,
    pub node_count: usize,
    pub edge_count: usize,
    pub dropped_edges: Vec<(String, String)>,
}

/// Dependency records for a project, preferring the merged `dependency.json`
/// and falling back to the raw CycloneDX SBOM when it is not published.
pub fn load_dependency_records(
    loader: &ProjectLoader,
    project: &str,
) -> Result<Vec<DependencyRecord>, ArtifactError> {
    match loader.dependencies(project) {
        Ok(records) => Ok(records),
        Err(primary) => {
            style::warning(&format!(
                "No merged dependency artifact for {}: {}. Falling back to the CycloneDX SBOM.",
                project, primary
            ));
            Ok(loader.cyclonedx(project)?.to_records())
        }
    }
}

/// Load and analyze one project end to end.
pub fn analyze(loader: &ProjectLoader, project: &str) -> Result<ProjectReport, ArtifactError> {
    let ((detail, summary), (records, package_check)) = rayon::join(
        || (loader.detail(project), loader.summary(project)),
        || {
            (
                load_dependency_records(loader, project),
                loader.package_check(project),
            )
        },
    );
    let detail = detail?;
    let summary = summary?;
    let records = records?;

    // Screening data is optional the same way reachability is.
    let package_check = match package_check {
        Ok(pc) => Some(pc),
        Err(e) => {
            style::warning(&format!(
                "No package-check summary for {}: {}.",
                project, e
            ));
            None
        }
    };

    let reachable = loader.reachable(project);
    let partition = partition_vulnerabilities(&detail.components, &reachable);
    let rollup = rollup(&partition);

    let graph = DependencyGraph::build(&records);
    Ok(ProjectReport {
        project: project.to_string(),
        component_count: detail.components.len(),
        summary,
        package_check,
        partition,
        rollup,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        dropped_edges: graph.dropped_edges().to_vec(),
    })
}
