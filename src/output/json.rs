use crate::analysis::ProjectReport;
use crate::output::OutputFormatter;
use std::io::Write;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, report: &ProjectReport, writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{SeverityRollup, VulnPartition};
    use crate::model::SbomSummary;

    #[test]
    fn produces_valid_json() {
        let report = ProjectReport {
            project: "demo".to_string(),
            component_count: 1,
            summary: SbomSummary::default(),
            package_check: None,
            partition: VulnPartition::default(),
            rollup: SeverityRollup::default(),
            node_count: 1,
            edge_count: 0,
            dropped_edges: Vec::new(),
        };
        let mut buf = Vec::new();
        JsonOutput::new().format(&report, &mut buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["project"], "demo");
        assert_eq!(parsed["node_count"], 1);
    }
}
