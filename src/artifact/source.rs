use super::ArtifactError;
use crate::fs::{FileSystem, default_fs};
use std::path::PathBuf;
use std::sync::Arc;

/// Where artifacts come from. Per-project files live under a `<projectId>/`
/// path segment; global files (the directory manifest, the license sheet)
/// live at the root.
pub trait ArtifactSource: Send + Sync {
    fn fetch(&self, project: Option<&str>, artifact: &str) -> Result<Vec<u8>, ArtifactError>;

    /// Human-readable origin for diagnostics.
    fn describe(&self) -> String;
}

/// Results directory on the local filesystem.
pub struct DirectorySource {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: Arc::new(*default_fs()),
        }
    }

    #[cfg(test)]
    pub fn with_fs(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    fn resolve(&self, project: Option<&str>, artifact: &str) -> PathBuf {
        match project {
            Some(p) => self.root.join(p).join(artifact),
            None => self.root.join(artifact),
        }
    }
}

impl ArtifactSource for DirectorySource {
    fn fetch(&self, project: Option<&str>, artifact: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.resolve(project, artifact);
        self.fs.read(&path).map_err(|source| ArtifactError::Io {
            artifact: path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Static file server, the deployment shape the pipeline publishes to.
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, project: Option<&str>, artifact: &str) -> String {
        match project {
            Some(p) => format!("{}/{}/{}", self.base_url, p, artifact),
            None => format!("{}/{}", self.base_url, artifact),
        }
    }
}

impl ArtifactSource for HttpSource {
    fn fetch(&self, project: Option<&str>, artifact: &str) -> Result<Vec<u8>, ArtifactError> {
        let url = self.url(project, artifact);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ArtifactError::Http {
                artifact: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ArtifactError::Status {
                artifact: url,
                status: response.status().as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| ArtifactError::Http {
                artifact: url,
                source,
            })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn directory_source_resolves_project_and_global_paths() {
        let fs = Arc::new(MockFs::with_files([
            ("/results/proj_a/dependency.json", r#"{"dependencies":[]}"#),
            ("/results/public_directories.json", r#"{"directories":[]}"#),
        ]));
        let source = DirectorySource::with_fs("/results", fs);

        assert!(source.fetch(Some("proj_a"), "dependency.json").is_ok());
        assert!(source.fetch(None, "public_directories.json").is_ok());

        let missing = source.fetch(Some("proj_a"), "missing.json");
        assert!(matches!(missing, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn http_source_builds_per_project_urls() {
        let source = HttpSource::new("http://localhost:8000/");
        assert_eq!(
            source.url(Some("2024-01-01_09-00-00_demo"), "sbom-detail.json"),
            "http://localhost:8000/2024-01-01_09-00-00_demo/sbom-detail.json"
        );
        assert_eq!(
            source.url(None, "public_directories.json"),
            "http://localhost:8000/public_directories.json"
        );
    }
}
