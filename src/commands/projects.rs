use crate::artifact::ProjectLoader;
use crate::cli::ProjectsArgs;
use crate::model::group_projects;
use crate::style;

use super::{CommandContext, emit_markdown};

pub fn cmd_projects(args: ProjectsArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let loader = ProjectLoader::new(ctx.source.as_ref());
    let projects = match loader.projects() {
        Ok(p) => p,
        Err(e) => {
            style::error(&format!("Failed to load project manifest: {}", e));
            return 1;
        }
    };

    if projects.is_empty() {
        style::warning(&format!(
            "No projects found at {}",
            ctx.source.describe()
        ));
        return 0;
    }

    let mut md = String::from("# Projects\n\n");
    for (name, runs) in group_projects(&projects) {
        md.push_str(&format!("## {}\n\n", name));
        for run in runs {
            md.push_str(&format!("- {} {} (`{}`)\n", run.date, run.time, run.id));
        }
        md.push('\n');
    }

    emit_markdown(&md)
}
