//! Fetching of the static artifacts the scanning pipeline leaves behind,
//! either from a results directory on disk or from a base URL.

mod loader;
mod source;

pub use loader::ProjectLoader;
pub use source::{ArtifactSource, DirectorySource, HttpSource};

use thiserror::Error;

pub const SBOM_DETAIL: &str = "sbom-detail.json";
pub const SBOM_SUMMARY: &str = "sbom-summary.json";
pub const SBOM_CYCLONEDX: &str = "sbom-cyclonedx.json";
pub const DEPENDENCY: &str = "dependency.json";
pub const REACHABLE: &str = "reachable.json";
pub const PACKAGE_CHECK_SUMMARY: &str = "packagecheck-summary.json";
pub const DIRECTORY_MANIFEST: &str = "public_directories.json";
pub const LICENSE_RISK_SHEET: &str = "license_list_with_risk_scores.xlsx";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {artifact}: {source}")]
    Io {
        artifact: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch {artifact}: {source}")]
    Http {
        artifact: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fetching {artifact} returned HTTP {status}")]
    Status { artifact: String, status: u16 },
    #[error("Failed to parse {artifact}: {source}")]
    Parse {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read spreadsheet {artifact}: {message}")]
    Spreadsheet { artifact: String, message: String },
}
