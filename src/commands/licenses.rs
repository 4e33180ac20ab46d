use crate::artifact::ProjectLoader;
use crate::cli::LicensesArgs;
use crate::license;
use crate::style;

use super::{CommandContext, emit_markdown};

pub fn cmd_licenses(args: LicensesArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let summary = match loader.summary(&args.project) {
        Ok(summary) => summary,
        Err(e) => {
            style::error(&format!(
                "Failed to load summary for {}: {}",
                args.project, e
            ));
            return 1;
        }
    };

    // The risk sheet is global and optional; the table degrades to usage
    // counts without it.
    let risks = match loader.license_risks() {
        Ok(risks) => risks,
        Err(e) => {
            style::warning(&format!("No license risk sheet: {}", e));
            Vec::new()
        }
    };

    let mut rows: Vec<(&str, u64)> = summary.license_counts().collect();
    if rows.is_empty() {
        style::warning(&format!("No license data for {}", args.project));
        return 0;
    }
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut md = format!("# Licenses: {}\n\n", args.project);
    md.push_str(&format!(
        "Components with license data: **{}**\n\n",
        summary.used_license_total()
    ));
    md.push_str("| License | Components | Risk score |\n");
    md.push_str("|---------|------------|------------|\n");
    for (name, count) in rows {
        let score = license::find_license(&risks, name)
            .and_then(|l| l.risk_score)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!("| {} | {} | {} |\n", name, count, score));
    }
    md.push('\n');

    emit_markdown(&md)
}
