use super::{DependencyGraph, layout};
use crate::style;
use petgraph::Direction;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Visibility predicate applied to the graph. Filtering never deletes data;
/// reapplying the same filter is idempotent because visibility is recomputed
/// from scratch every time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Case-insensitive substring match on node labels. Empty shows all.
    pub query: String,
    /// Show only nodes carrying at least one vulnerability.
    pub vulnerable_only: bool,
}

/// Result of a node selection: the node itself plus its transitive upstream
/// (dependents) and downstream (dependencies) neighborhoods.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionClosure {
    pub selected: String,
    pub upstream: Vec<String>,
    pub downstream: Vec<String>,
}

/// Interactive state over a built [`DependencyGraph`]: selection/highlight,
/// filtering, and the positions of the current layout.
pub struct GraphView {
    graph: DependencyGraph,
    filter: Filter,
    spacing: u32,
    selected: Option<NodeIndex>,
    highlighted_nodes: HashSet<NodeIndex>,
    highlighted_edges: HashSet<EdgeIndex>,
    hidden_nodes: HashSet<NodeIndex>,
    hidden_edges: HashSet<EdgeIndex>,
    positions: HashMap<NodeIndex, (f32, f32)>,
}

impl GraphView {
    pub fn new(graph: DependencyGraph, spacing: u32) -> Self {
        let mut view = Self {
            graph,
            filter: Filter::default(),
            spacing,
            selected: None,
            highlighted_nodes: HashSet::new(),
            highlighted_edges: HashSet::new(),
            hidden_nodes: HashSet::new(),
            hidden_edges: HashSet::new(),
            positions: HashMap::new(),
        };
        view.relayout();
        view
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Select a node: highlight it, its upstream and downstream closures,
    /// and the edges connecting them. Highlighting is exclusive; whatever
    /// was highlighted before is cleared first.
    pub fn select(&mut self, coordinate: &str) -> Option<SelectionClosure> {
        let start = self.graph.index_of(coordinate)?;

        self.clear_highlight();
        self.selected = Some(start);
        self.highlighted_nodes.insert(start);

        let (up_nodes, up_edges) = closure(&self.graph, start, Direction::Incoming);
        let (down_nodes, down_edges) = closure(&self.graph, start, Direction::Outgoing);

        self.highlighted_nodes.extend(&up_nodes);
        self.highlighted_nodes.extend(&down_nodes);
        self.highlighted_edges.extend(&up_edges);
        self.highlighted_edges.extend(&down_edges);

        Some(SelectionClosure {
            selected: coordinate.to_string(),
            upstream: self.coordinates(&up_nodes),
            downstream: self.coordinates(&down_nodes),
        })
    }

    pub fn clear_selection(&mut self) {
        self.clear_highlight();
    }

    fn clear_highlight(&mut self) {
        self.selected = None;
        self.highlighted_nodes.clear();
        self.highlighted_edges.clear();
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
        self.apply_filter();
    }

    pub fn set_vulnerable_only(&mut self, vulnerable_only: bool) {
        self.filter.vulnerable_only = vulnerable_only;
        self.apply_filter();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.apply_filter();
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
        self.relayout();
    }

    /// Recompute visibility from the current filter, then lay out the
    /// visible subgraph. An edge is visible iff both endpoints are.
    fn apply_filter(&mut self) {
        self.hidden_nodes.clear();
        self.hidden_edges.clear();

        let query = self.filter.query.trim().to_lowercase();
        for idx in self.graph.node_indices().collect::<Vec<_>>() {
            let node = self.graph.node(idx);
            let matches_query =
                query.is_empty() || node.label.to_lowercase().contains(&query);
            let matches_vulnerable = !self.filter.vulnerable_only || node.is_vulnerable();
            if !(matches_query && matches_vulnerable) {
                self.hidden_nodes.insert(idx);
            }
        }

        for edge in self.graph.graph().edge_references() {
            if self.hidden_nodes.contains(&edge.source())
                || self.hidden_nodes.contains(&edge.target())
            {
                self.hidden_edges.insert(edge.id());
            }
        }

        self.relayout();
    }

    /// Lay out the currently visible subgraph. A degenerate layout run is
    /// caught and logged; the view then carries no positions and the
    /// frontend falls back to its empty state.
    fn relayout(&mut self) {
        let nodes: Vec<NodeIndex> = self.visible_nodes().collect();
        let edges: Vec<(NodeIndex, NodeIndex)> = self
            .visible_edges()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .collect();

        let options = layout::LayoutOptions::for_view(nodes.len(), self.spacing);
        match layout::run(&nodes, &edges, options) {
            Ok(positions) => self.positions = positions,
            Err(e) => {
                style::warning(&format!("Layout failed: {}", e));
                self.positions.clear();
            }
        }
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|idx| !self.hidden_nodes.contains(idx))
    }

    pub fn visible_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .graph()
            .edge_indices()
            .filter(|idx| !self.hidden_edges.contains(idx))
    }

    pub fn is_highlighted(&self, coordinate: &str) -> bool {
        self.graph
            .index_of(coordinate)
            .is_some_and(|idx| self.highlighted_nodes.contains(&idx))
    }

    pub fn is_highlighted_edge(&self, edge: EdgeIndex) -> bool {
        self.highlighted_edges.contains(&edge)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .map(|idx| self.graph.node(idx).coordinate.as_str())
    }

    pub fn position(&self, idx: NodeIndex) -> Option<(f32, f32)> {
        self.positions.get(&idx).copied()
    }

    fn coordinates(&self, nodes: &HashSet<NodeIndex>) -> Vec<String> {
        let mut list: Vec<String> = nodes
            .iter()
            .map(|&idx| self.graph.node(idx).coordinate.clone())
            .collect();
        list.sort();
        list
    }
}

/// Transitive closure from `start` in the given direction, with the edges
/// walked along the way. DFS with a per-call visited set, so cycles cannot
/// recurse forever. The start node itself is not part of the closure.
fn closure(
    graph: &DependencyGraph,
    start: NodeIndex,
    direction: Direction,
) -> (HashSet<NodeIndex>, HashSet<EdgeIndex>) {
    let mut nodes = HashSet::new();
    let mut edges = HashSet::new();
    let mut stack = vec![start];
    let mut visited = HashSet::from([start]);

    while let Some(current) = stack.pop() {
        for edge in graph.graph().edges_directed(current, direction) {
            edges.insert(edge.id());
            let next = match direction {
                Direction::Incoming => edge.source(),
                Direction::Outgoing => edge.target(),
            };
            if visited.insert(next) {
                nodes.insert(next);
                stack.push(next);
            }
        }
    }

    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyRecord, Vulnerability};

    fn record(coordinate: &str, depends_on: &[&str], vulnerable: bool) -> DependencyRecord {
        DependencyRecord {
            coordinate: coordinate.to_string(),
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
            vulnerabilities: if vulnerable {
                vec![Vulnerability {
                    cve_id: format!("CVE-{}", coordinate),
                    severity: "High".to_string(),
                    ..Vulnerability::default()
                }]
            } else {
                Vec::new()
            },
            ..DependencyRecord::default()
        }
    }

    fn chain_view() -> GraphView {
        // a -> b -> c
        let records = vec![
            record("a@1", &["b@1"], false),
            record("b@1", &["c@1"], true),
            record("c@1", &[], false),
        ];
        GraphView::new(DependencyGraph::build(&records), 100)
    }

    #[test]
    fn selection_highlights_both_closures() {
        let mut view = chain_view();
        let closure = view.select("a@1").unwrap();

        assert!(closure.upstream.is_empty());
        assert_eq!(closure.downstream, vec!["b@1", "c@1"]);
        assert!(view.is_highlighted("a@1"));
        assert!(view.is_highlighted("b@1"));
        assert!(view.is_highlighted("c@1"));
    }

    #[test]
    fn highlight_is_exclusive_between_selections() {
        let mut view = chain_view();
        view.select("a@1").unwrap();
        let closure = view.select("c@1").unwrap();

        // c has no downstream; its upstream is {a, b}.
        assert_eq!(closure.upstream, vec!["a@1", "b@1"]);
        assert!(closure.downstream.is_empty());
        assert_eq!(view.selected(), Some("c@1"));
    }

    #[test]
    fn selecting_middle_node_clears_unrelated_highlight() {
        // a -> b, c isolated: selecting b then c must unhighlight a and b.
        let records = vec![
            record("a@1", &["b@1"], false),
            record("b@1", &[], false),
            record("c@1", &[], false),
        ];
        let mut view = GraphView::new(DependencyGraph::build(&records), 100);

        view.select("b@1").unwrap();
        assert!(view.is_highlighted("a@1"));

        view.select("c@1").unwrap();
        assert!(!view.is_highlighted("a@1"));
        assert!(!view.is_highlighted("b@1"));
        assert!(view.is_highlighted("c@1"));
    }

    #[test]
    fn cyclic_selection_terminates() {
        let records = vec![
            record("a@1", &["b@1"], false),
            record("b@1", &["a@1"], false),
        ];
        let mut view = GraphView::new(DependencyGraph::build(&records), 100);
        let closure = view.select("a@1").unwrap();
        assert_eq!(closure.downstream, vec!["b@1"]);
        assert_eq!(closure.upstream, vec!["b@1"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let mut view = chain_view();
        view.set_query("b");
        let first: Vec<_> = view.visible_nodes().collect();
        view.set_query("b");
        let second: Vec<_> = view.visible_nodes().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn query_match_is_case_insensitive_substring() {
        let mut view = chain_view();
        view.set_query("B");
        let visible: Vec<_> = view
            .visible_nodes()
            .map(|idx| view.graph().node(idx).label.clone())
            .collect();
        assert_eq!(visible, vec!["b"]);
    }

    #[test]
    fn edges_hide_with_either_endpoint() {
        let mut view = chain_view();
        view.set_query("b");
        assert_eq!(view.visible_edges().count(), 0);

        view.set_query("");
        assert_eq!(view.visible_edges().count(), 2);
    }

    #[test]
    fn vulnerable_only_filter_keeps_vulnerable_nodes() {
        let mut view = chain_view();
        view.set_vulnerable_only(true);
        let visible: Vec<_> = view
            .visible_nodes()
            .map(|idx| view.graph().node(idx).label.clone())
            .collect();
        assert_eq!(visible, vec!["b"]);
    }

    #[test]
    fn filtered_view_still_gets_positions() {
        let mut view = chain_view();
        view.set_query("b");
        let visible: Vec<_> = view.visible_nodes().collect();
        assert!(view.position(visible[0]).is_some());
    }

    #[test]
    fn empty_filter_result_clears_positions() {
        let mut view = chain_view();
        view.set_query("zzz");
        assert_eq!(view.visible_nodes().count(), 0);
        assert!(view.graph().node_indices().all(|idx| view.position(idx).is_none()));
    }
}
