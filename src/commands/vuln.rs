use crate::analysis::{self, AttributedVulnerability};
use crate::artifact::ProjectLoader;
use crate::cli::VulnArgs;
use crate::model::Severity;
use crate::style;

use super::{CommandContext, emit_markdown};

pub fn cmd_vuln(args: VulnArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let severity = args.severity.as_deref().map(Severity::parse);

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let report = match analysis::analyze(&loader, &args.project) {
        Ok(report) => report,
        Err(e) => {
            style::error(&format!("Failed to analyze {}: {}", args.project, e));
            return 1;
        }
    };

    let keep = |v: &&AttributedVulnerability| -> bool {
        if let Some(wanted) = severity {
            if v.vulnerability.severity() != wanted {
                return false;
            }
        }
        if let Some(min) = args.min_score {
            match v.vulnerability.score.value() {
                Some(score) if score >= min => {}
                _ => return false,
            }
        }
        true
    };

    let mut md = format!("# Vulnerabilities: {}\n\n", args.project);
    md.push_str(&section(
        "Reachable",
        report.partition.reachable.iter().filter(&keep),
    ));
    if !args.reachable_only {
        md.push_str(&section(
            "CVE only",
            report.partition.cve_only.iter().filter(&keep),
        ));
    }

    emit_markdown(&md)
}

fn section<'a>(title: &str, rows: impl Iterator<Item = &'a AttributedVulnerability>) -> String {
    let mut md = format!("## {}\n\n", title);
    let mut any = false;
    for row in rows {
        if !any {
            md.push_str("| CVE | Severity | Score | Package | Version |\n");
            md.push_str("|-----|----------|-------|---------|---------|\n");
            any = true;
        }
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.vulnerability.cve_id,
            row.vulnerability.severity(),
            row.vulnerability.score,
            row.package_name,
            row.package_version
        ));
    }
    if !any {
        md.push_str("None.\n");
    }
    md.push('\n');
    md
}
