use super::Severity;
use serde::{Deserialize, Serialize};

/// One CVE as reported against a single package. The same CVE id showing up
/// against two different packages is two distinct instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vulnerability {
    #[serde(default)]
    pub cve_id: String,
    /// Raw severity string from the scanner; classify with [`Vulnerability::severity`].
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub vector: String,
    #[serde(default)]
    pub cve_link: String,
}

impl Vulnerability {
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.severity)
    }
}

/// CVSS score: some scanners emit a number, others a string like "7.5" or "N/A".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl Default for Score {
    fn default() -> Self {
        Score::Text(String::new())
    }
}

impl Score {
    /// Numeric value if one can be extracted.
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Number(n) => Some(*n),
            Score::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{}", n),
            Score::Text(s) if s.is_empty() => write!(f, "N/A"),
            Score::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Entry of the optional `reachable.json` artifact: a library call confirmed
/// reachable from an entry point by the external analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachableEntry {
    #[serde(rename = "sink-function", default)]
    pub sink_function: String,
    #[serde(rename = "reachable-library", default)]
    pub reachable_library: String,
    #[serde(rename = "library-function", default)]
    pub library_function: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_number_or_string() {
        let v: Vulnerability =
            serde_json::from_str(r#"{"cve_id":"CVE-1","severity":"High","score":7.5}"#).unwrap();
        assert_eq!(v.score.value(), Some(7.5));

        let v: Vulnerability =
            serde_json::from_str(r#"{"cve_id":"CVE-2","severity":"Low","score":"3.1"}"#).unwrap();
        assert_eq!(v.score.value(), Some(3.1));

        let v: Vulnerability =
            serde_json::from_str(r#"{"cve_id":"CVE-3","severity":"Low","score":"N/A"}"#).unwrap();
        assert_eq!(v.score.value(), None);
    }

    #[test]
    fn missing_fields_default() {
        let v: Vulnerability = serde_json::from_str(r#"{"cve_id":"CVE-9"}"#).unwrap();
        assert_eq!(v.severity(), Severity::Unknown);
        assert_eq!(v.score.to_string(), "N/A");
    }
}
