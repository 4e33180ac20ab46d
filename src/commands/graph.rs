use crate::analysis::{self, DependencyGraph, GraphView};
use crate::artifact::ProjectLoader;
use crate::cli::GraphArgs;
use crate::graph::{AppState, GraphData, generate_static_html};
use crate::style;

use super::CommandContext;

pub fn cmd_graph(args: GraphArgs) -> i32 {
    let ctx = match CommandContext::new(&args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    if let Some(export_path) = &args.export {
        let Some(project) = &args.project else {
            style::error("--export needs --project <run id>");
            return 1;
        };

        let loader = ProjectLoader::new(ctx.source.as_ref());
        let records = match analysis::load_dependency_records(&loader, project) {
            Ok(records) => records,
            Err(e) => {
                style::error(&format!("Failed to load dependencies for {}: {}", project, e));
                return 1;
            }
        };

        let view = GraphView::new(DependencyGraph::build(&records), ctx.config.ui.node_spacing);
        let html = generate_static_html(&GraphData::from_view(project, &view));
        if let Err(e) = std::fs::write(export_path, html) {
            style::error(&format!("Failed to write export file: {}", e));
            return 1;
        }
        style::success(&format!("Graph exported to: {}", style::path(export_path)));
        return 0;
    }

    let port = args.port.unwrap_or(ctx.config.serve.port);
    let open_browser = !args.no_open && ctx.config.serve.open_browser;

    let state = AppState::new(ctx.source, ctx.config, ctx.config_dir);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            style::error(&format!("Failed to create tokio runtime: {}", e));
            return 1;
        }
    };

    if let Err(e) = rt.block_on(crate::graph::serve(state, port, open_browser)) {
        style::error(&format!("Server failed: {}", e));
        return 1;
    }

    0
}
