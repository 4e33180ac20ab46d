use super::{ArtifactError, ArtifactSource};
use crate::license::{self, LicenseRisk};
use crate::model::{
    CycloneDxSbom, DependencyFile, DependencyRecord, DirectoryManifest, PackageCheckSummary,
    Project, ReachableEntry, SbomDetail, SbomSummary,
};
use crate::style;
use serde::de::DeserializeOwned;

/// Typed access to the artifact set of one results root.
pub struct ProjectLoader<'a> {
    source: &'a dyn ArtifactSource,
}

impl<'a> ProjectLoader<'a> {
    pub fn new(source: &'a dyn ArtifactSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a dyn ArtifactSource {
        self.source
    }

    fn load_json<T: DeserializeOwned>(
        &self,
        project: Option<&str>,
        artifact: &str,
    ) -> Result<T, ArtifactError> {
        let bytes = self.source.fetch(project, artifact)?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
            artifact: artifact.to_string(),
            source,
        })
    }

    /// The global project manifest, malformed entries discarded with a warning.
    pub fn projects(&self) -> Result<Vec<Project>, ArtifactError> {
        let manifest: DirectoryManifest = self.load_json(None, super::DIRECTORY_MANIFEST)?;
        Ok(Project::parse_manifest(&manifest))
    }

    pub fn detail(&self, project: &str) -> Result<SbomDetail, ArtifactError> {
        self.load_json(Some(project), super::SBOM_DETAIL)
    }

    pub fn summary(&self, project: &str) -> Result<SbomSummary, ArtifactError> {
        self.load_json(Some(project), super::SBOM_SUMMARY)
    }

    /// The merged graph artifact, the primary dependency-graph input.
    pub fn dependencies(&self, project: &str) -> Result<Vec<DependencyRecord>, ArtifactError> {
        let file: DependencyFile = self.load_json(Some(project), super::DEPENDENCY)?;
        Ok(file.dependencies)
    }

    /// The CycloneDX variant, used when `dependency.json` is not published.
    pub fn cyclonedx(&self, project: &str) -> Result<CycloneDxSbom, ArtifactError> {
        self.load_json(Some(project), super::SBOM_CYCLONEDX)
    }

    /// Reachability findings are optional: a project analyzed without the
    /// reachability pass degrades to an empty list with a warning.
    pub fn reachable(&self, project: &str) -> Vec<ReachableEntry> {
        match self.load_json::<Vec<ReachableEntry>>(Some(project), super::REACHABLE) {
            Ok(entries) => entries,
            Err(e) => {
                style::warning(&format!(
                    "No reachability data for {}: {}. Treating all vulnerabilities as unreachable.",
                    project, e
                ));
                Vec::new()
            }
        }
    }

    pub fn package_check(&self, project: &str) -> Result<PackageCheckSummary, ArtifactError> {
        self.load_json(Some(project), super::PACKAGE_CHECK_SUMMARY)
    }

    /// The global license risk spreadsheet.
    pub fn license_risks(&self) -> Result<Vec<LicenseRisk>, ArtifactError> {
        let bytes = self.source.fetch(None, super::LICENSE_RISK_SHEET)?;
        license::parse_risk_sheet(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DirectorySource;
    use crate::fs::mock::MockFs;
    use std::sync::Arc;

    fn loader_with(files: Vec<(&'static str, &'static str)>) -> DirectorySource {
        DirectorySource::with_fs("/r", Arc::new(MockFs::with_files(files)))
    }

    #[test]
    fn missing_reachability_degrades_to_empty() {
        let source = loader_with(vec![]);
        let loader = ProjectLoader::new(&source);
        assert!(loader.reachable("p").is_empty());
    }

    #[test]
    fn dependency_file_unwraps_to_records() {
        let source = loader_with(vec![(
            "/r/p/dependency.json",
            r#"{"dependencies":[{"ref":"pkg:npm/a@1.0.0","dependsOn":[]}]}"#,
        )]);
        let loader = ProjectLoader::new(&source);
        let records = loader.dependencies("p").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coordinate, "pkg:npm/a@1.0.0");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let source = loader_with(vec![("/r/p/sbom-detail.json", "not json")]);
        let loader = ProjectLoader::new(&source);
        assert!(matches!(
            loader.detail("p"),
            Err(ArtifactError::Parse { .. })
        ));
    }
}
