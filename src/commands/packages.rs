use crate::artifact::ProjectLoader;
use crate::cli::PackagesArgs;
use crate::model::RiskLevel;
use crate::style;

use super::{CommandContext, emit_markdown};

pub fn cmd_packages(args: PackagesArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let check = match loader.package_check(&args.project) {
        Ok(check) => check,
        Err(e) => {
            style::error(&format!(
                "Failed to load package check for {}: {}",
                args.project, e
            ));
            return 1;
        }
    };

    let wanted_level = match &args.risk_level {
        Some(raw) => match RiskLevel::parse(raw) {
            Some(level) => Some(level),
            None => {
                style::error(&format!(
                    "Unknown risk level '{}'. Expected red, yellow, green, or n/a.",
                    raw
                ));
                return 1;
            }
        },
        None => None,
    };

    let mut md = format!("# Package Check: {}\n\n", args.project);
    md.push_str(&format!(
        "Total libraries: **{}**\n\n",
        check.total_libraries()
    ));
    md.push_str("| Risk level | Libraries |\n|------------|-----------|\n");
    for level in RiskLevel::ALL {
        if wanted_level.is_some_and(|w| w != level) {
            continue;
        }
        md.push_str(&format!("| {} | {} |\n", level, check.count(level)));
    }
    md.push('\n');

    let ecosystems = check.ecosystems();
    let selected: Vec<&String> = match &args.ecosystem {
        Some(wanted) => {
            let found: Vec<&String> = ecosystems.iter().filter(|e| *e == wanted).collect();
            if found.is_empty() {
                style::error(&format!(
                    "Unknown ecosystem '{}'. Available: {}",
                    wanted,
                    ecosystems.join(", ")
                ));
                return 1;
            }
            found
        }
        None => ecosystems.iter().collect(),
    };

    for ecosystem in selected {
        md.push_str(&format!("## {}\n\n", ecosystem));
        md.push_str("| Risk level | Libraries |\n|------------|-----------|\n");
        for (level, count) in check.ecosystem_risk_counts(ecosystem) {
            if wanted_level.is_some_and(|w| w != level) {
                continue;
            }
            md.push_str(&format!("| {} | {} |\n", level, count));
        }
        md.push('\n');
    }

    emit_markdown(&md)
}
