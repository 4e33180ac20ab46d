use crate::analysis::{self, DependencyGraph, link_dependencies};
use crate::artifact::ProjectLoader;
use crate::cli::ComponentsArgs;
use crate::model::{Component, RiskLevel};
use crate::style;

use super::{CommandContext, emit_markdown};

pub fn cmd_components(args: ComponentsArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let detail = match loader.detail(&args.project) {
        Ok(detail) => detail,
        Err(e) => {
            style::error(&format!(
                "Failed to load components for {}: {}",
                args.project, e
            ));
            return 1;
        }
    };

    if let Some(wanted) = &args.package {
        let Some(component) = find_component(&detail.components, wanted) else {
            style::error(&format!("No component matching '{}'.", wanted));
            style::hint("Pass a purl, name@version, or name from `sbomscope components`.");
            return 1;
        };
        let records = match analysis::load_dependency_records(&loader, &args.project) {
            Ok(records) => records,
            Err(e) => {
                style::error(&format!(
                    "Failed to load dependencies for {}: {}",
                    args.project, e
                ));
                return 1;
            }
        };
        let graph = DependencyGraph::build(&records);
        return emit_markdown(&render_detail(component, &graph));
    }

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

    let rows: Vec<&Component> = detail
        .components
        .iter()
        .filter(|c| {
            args.ecosystem
                .as_deref()
                .is_none_or(|wanted| c.ecosystem.as_deref() == Some(wanted))
        })
        .filter(|c| wanted_level.is_none() || c.risk_level() == wanted_level)
        .collect();

    emit_markdown(&render_list(&args.project, &rows, detail.components.len()))
}

/// Match by purl first, then name@version, then bare name.
fn find_component<'a>(components: &'a [Component], wanted: &str) -> Option<&'a Component> {
    components
        .iter()
        .find(|c| c.purl == wanted)
        .or_else(|| {
            components
                .iter()
                .find(|c| format!("{}@{}", c.name, c.version) == wanted)
        })
        .or_else(|| components.iter().find(|c| c.name == wanted))
}

fn license_names(component: &Component) -> String {
    if component.licenses.is_empty() {
        return "-".to_string();
    }
    component
        .licenses
        .iter()
        .map(|l| l.license_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_list(project: &str, rows: &[&Component], total: usize) -> String {
    let mut md = format!("# Components: {}\n\n", project);
    md.push_str(&format!("Showing {} of {} components\n\n", rows.len(), total));
    md.push_str("| Name | Version | Ecosystem | Licenses | Risk | CVEs |\n");
    md.push_str("|------|---------|-----------|----------|------|------|\n");
    for c in rows {
        let risk = c
            .risk_level()
            .map(|l| l.key().to_string())
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            c.name,
            c.version,
            c.ecosystem.as_deref().unwrap_or("-"),
            license_names(c),
            risk,
            c.vulnerabilities.len()
        ));
    }
    md.push('\n');
    md
}

fn render_detail(component: &Component, graph: &DependencyGraph) -> String {
    let mut md = format!("# {}@{}\n\n", component.name, component.version);
    if !component.purl.is_empty() {
        md.push_str(&format!("- Purl: `{}`\n", component.purl));
    }
    if let Some(ecosystem) = &component.ecosystem {
        md.push_str(&format!("- Ecosystem: {}\n", ecosystem));
    }
    if let Some(kind) = &component.component_type {
        md.push_str(&format!("- Type: {}\n", kind));
    }
    md.push_str(&format!("- Licenses: {}\n", license_names(component)));
    if let Some(hashes) = &component.hashes {
        md.push_str(&format!("- Hashes: {}\n", hashes));
    }
    md.push('\n');

    if !component.package_check.is_empty() {
        md.push_str("## Package Check\n\n");
        for check in &component.package_check {
            let score = check
                .score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "- Risk level: {} (score {}, typosquatting: {})\n",
                check.risk_level, score, check.typosquatting_suspected
            ));
            if let Some(reasons) = &check.warning_reasons {
                for (reason, points) in reasons {
                    md.push_str(&format!("  - {}: {}\n", reason, points));
                }
            }
        }
        md.push('\n');
    }

    if !component.vulnerabilities.is_empty() {
        md.push_str("## Vulnerabilities\n\n");
        md.push_str("| CVE | Severity | Score |\n|-----|----------|-------|\n");
        for v in &component.vulnerabilities {
            let cve = if v.cve_link.is_empty() {
                v.cve_id.clone()
            } else {
                format!("[{}]({})", v.cve_id, v.cve_link)
            };
            md.push_str(&format!("| {} | {} | {} |\n", cve, v.severity(), v.score));
        }
        md.push('\n');
    }

    if !component.dependencies.is_empty() {
        md.push_str("## Depends on\n\n");
        for link in link_dependencies(component, graph) {
            // An unresolved coordinate is listed without a record link.
            match link.unique_id {
                Some(id) => {
                    md.push_str(&format!("- [{}](#component-{})\n", link.coordinate, id))
                }
                None => md.push_str(&format!("- {}\n", link.coordinate)),
            }
        }
        md.push('\n');
    }

    if !component.external_references.is_empty() {
        md.push_str("## References\n\n");
        for reference in &component.external_references {
            md.push_str(&format!("- {}\n", reference));
        }
        md.push('\n');
    }

    md
}
