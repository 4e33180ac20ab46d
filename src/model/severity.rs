use serde::{Deserialize, Serialize};

/// CVE severity bucket. Parsed case-insensitively; anything unrecognized
/// lands in `Unknown` rather than failing the load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// All severities in display order (worst first).
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Unknown,
    ];

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        }
    }

    /// Hex color used consistently by the terminal legend and the dashboard.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Critical => "#C0392B",
            Severity::High => "#E74C3C",
            Severity::Medium => "#F39C12",
            Severity::Low => "#F1C40F",
            Severity::Unknown => "#95A5A6",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Risk color attached to a dependency record by the merge step of the
/// pipeline: Red = confirmed reachable, Orange = carries CVEs, Gray = neither.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskColor {
    Red,
    Orange,
    #[default]
    Gray,
}

impl RiskColor {
    /// CSS class the dashboard applies to the node, if any.
    pub fn node_class(&self) -> Option<&'static str> {
        match self {
            RiskColor::Red => Some("reachable"),
            RiskColor::Orange => Some("cve"),
            RiskColor::Gray => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskColor::Red => "#E74C3C",
            RiskColor::Orange => "#F39C12",
            RiskColor::Gray => "#1ABC9C",
        }
    }
}

/// Malicious-package risk bucket from the package-check artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Red,
    Yellow,
    Green,
    NotAvailable,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Red,
        RiskLevel::Yellow,
        RiskLevel::Green,
        RiskLevel::NotAvailable,
    ];

    /// Key as it appears in `RiskLevelCounts` and score-group objects.
    pub fn key(&self) -> &'static str {
        match self {
            RiskLevel::Red => "Red",
            RiskLevel::Yellow => "Yellow",
            RiskLevel::Green => "Green",
            RiskLevel::NotAvailable => "N/A",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(RiskLevel::Red),
            "yellow" => Some(RiskLevel::Yellow),
            "green" => Some(RiskLevel::Green),
            "n/a" | "na" => Some(RiskLevel::NotAvailable),
            _ => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Red => "#E74C3C",
            RiskLevel::Yellow => "#F1C40F",
            RiskLevel::Green => "#2ECC71",
            RiskLevel::NotAvailable => "#95A5A6",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::parse("critical"), Severity::Critical);
        assert_eq!(Severity::parse("Critical"), Severity::Critical);
    }

    #[test]
    fn unrecognized_severity_is_unknown() {
        assert_eq!(Severity::parse("n/a"), Severity::Unknown);
        assert_eq!(Severity::parse(""), Severity::Unknown);
        assert_eq!(Severity::parse("MODERATE"), Severity::Unknown);
    }

    #[test]
    fn risk_color_node_classes() {
        assert_eq!(RiskColor::Red.node_class(), Some("reachable"));
        assert_eq!(RiskColor::Orange.node_class(), Some("cve"));
        assert_eq!(RiskColor::Gray.node_class(), None);
    }
}
