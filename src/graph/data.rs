use crate::analysis::GraphView;
use serde::Serialize;

/// Graph payload in the shape the embedded dashboard renders directly:
/// positions are computed server side, the browser only draws.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebLink>,
    pub metadata: GraphMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebNode {
    pub id: String,
    pub label: String,
    pub version: Option<String>,
    /// CSS class for risk coloring, absent for unflagged nodes.
    pub class: Option<&'static str>,
    pub vulnerability_count: usize,
    pub highlighted: bool,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebLink {
    pub source: String,
    pub target: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphMetadata {
    pub project: String,
    pub total_nodes: usize,
    pub total_links: usize,
    pub visible_nodes: usize,
    pub visible_links: usize,
    pub spacing: u32,
    pub selected: Option<String>,
}

impl GraphData {
    /// Snapshot the view's visible, laid-out subgraph.
    pub fn from_view(project: &str, view: &GraphView) -> Self {
        let graph = view.graph();

        let nodes: Vec<WebNode> = view
            .visible_nodes()
            .map(|idx| {
                let node = graph.node(idx);
                let (x, y) = view.position(idx).unwrap_or((0.0, 0.0));
                WebNode {
                    id: node.coordinate.clone(),
                    label: node.label.clone(),
                    version: node.version.clone(),
                    class: node.node_class(),
                    vulnerability_count: node.vulnerabilities.len(),
                    highlighted: view.is_highlighted(&node.coordinate),
                    x,
                    y,
                }
            })
            .collect();

        let links: Vec<WebLink> = view
            .visible_edges()
            .filter_map(|edge| {
                let (a, b) = graph.edge_endpoints(edge)?;
                Some(WebLink {
                    source: graph.node(a).coordinate.clone(),
                    target: graph.node(b).coordinate.clone(),
                    highlighted: view.is_highlighted_edge(edge),
                })
            })
            .collect();

        let metadata = GraphMetadata {
            project: project.to_string(),
            total_nodes: graph.node_count(),
            total_links: graph.edge_count(),
            visible_nodes: nodes.len(),
            visible_links: links.len(),
            spacing: view.spacing(),
            selected: view.selected().map(str::to_string),
        };

        GraphData {
            nodes,
            links,
            metadata,
        }
    }
}

/// Render the standalone HTML export with the graph payload inlined.
pub fn generate_static_html(data: &GraphData) -> String {
    let payload = serde_json::to_string(data).unwrap_or_else(|_| "null".to_string());
    super::assets::EXPORT_HTML.replace("/*__GRAPH_DATA__*/", &payload)
}
