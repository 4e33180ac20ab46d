use crate::analysis::{AttributedVulnerability, ProjectReport};
use crate::model::{RiskLevel, Severity};
use crate::output::OutputFormatter;
use std::io::Write;

pub struct MarkdownOutput {
    /// Cap on rows per vulnerability table; `None` prints everything.
    pub limit: Option<usize>,
}

impl MarkdownOutput {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    fn write_vuln_table<W: Write>(
        &self,
        writer: &mut W,
        rows: &[AttributedVulnerability],
    ) -> std::io::Result<()> {
        if rows.is_empty() {
            writeln!(writer, "None.\n")?;
            return Ok(());
        }

        writeln!(writer, "| CVE | Severity | Score | Package | Version |")?;
        writeln!(writer, "|-----|----------|-------|---------|---------|")?;
        let shown = self.limit.unwrap_or(rows.len()).min(rows.len());
        for row in &rows[..shown] {
            // No advisory URL means the id is shown as plain text.
            let cve = if row.vulnerability.cve_link.is_empty() {
                row.vulnerability.cve_id.clone()
            } else {
                format!("[{}]({})", row.vulnerability.cve_id, row.vulnerability.cve_link)
            };
            writeln!(
                writer,
                "| {} | {} | {} | {} | {} |",
                cve,
                row.vulnerability.severity(),
                row.vulnerability.score,
                row.package_name,
                row.package_version
            )?;
        }
        if shown < rows.len() {
            writeln!(writer, "\n_... and {} more._", rows.len() - shown)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, report: &ProjectReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# SBOM Analysis: {}\n", report.project)?;

        writeln!(writer, "## Overview\n")?;
        writeln!(writer, "- Components: {}", report.component_count)?;
        writeln!(
            writer,
            "- Dependency graph: {} nodes, {} edges",
            report.node_count, report.edge_count
        )?;
        if !report.dropped_edges.is_empty() {
            writeln!(
                writer,
                "- Dropped {} edge(s) pointing at unknown components",
                report.dropped_edges.len()
            )?;
        }
        writeln!(
            writer,
            "- Distinct CVEs: {} ({} reachable)",
            report.rollup.total_unique_cves, report.rollup.reachable_unique_cves
        )?;
        writeln!(
            writer,
            "- Licenses in use: {}\n",
            report.summary.used_license_total()
        )?;

        writeln!(writer, "## Vulnerabilities by Severity\n")?;
        writeln!(writer, "| Severity | Reachable | CVE only |")?;
        writeln!(writer, "|----------|-----------|----------|")?;
        for severity in Severity::ALL {
            writeln!(
                writer,
                "| {} | {} | {} |",
                severity,
                report.rollup.reachable.get(severity),
                report.rollup.unreachable.get(severity)
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "## Reachable Vulnerabilities\n")?;
        self.write_vuln_table(writer, &report.partition.reachable)?;

        writeln!(writer, "## Unreachable Vulnerabilities\n")?;
        self.write_vuln_table(writer, &report.partition.cve_only)?;

        if let Some(ref check) = report.package_check {
            writeln!(writer, "## Package Check\n")?;
            writeln!(writer, "- Total libraries: {}", check.total_libraries())?;
            for level in RiskLevel::ALL {
                writeln!(writer, "- {}: {}", level, check.count(level))?;
            }
            let ecosystems = check.ecosystems();
            if !ecosystems.is_empty() {
                writeln!(writer, "- Ecosystems: {}", ecosystems.join(", "))?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "## License Usage\n")?;
        let mut licenses: Vec<_> = report.summary.license_counts().collect();
        if licenses.is_empty() {
            writeln!(writer, "No license data.\n")?;
        } else {
            licenses.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            writeln!(writer, "| License | Components |")?;
            writeln!(writer, "|---------|------------|")?;
            for (name, count) in licenses {
                writeln!(writer, "| {} | {} |", name, count)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
