use crate::model::{DependencyRecord, RiskColor, Vulnerability, split_coordinate};
use crate::style;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use std::collections::HashMap;

/// One rendered package: display fields derived from the record's coordinate
/// plus the vulnerability list carried along for the sidebar and filters.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub coordinate: String,
    pub label: String,
    pub version: Option<String>,
    pub unique_id: Option<u64>,
    pub risk_color: RiskColor,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl GraphNode {
    fn from_record(record: &DependencyRecord) -> Self {
        let (label, version) = split_coordinate(&record.coordinate);
        GraphNode {
            coordinate: record.coordinate.clone(),
            label,
            version,
            unique_id: record.unique_id,
            risk_color: record.risk_color,
            vulnerabilities: record.vulnerabilities.clone(),
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }

    /// CSS class the dashboard applies, if any.
    pub fn node_class(&self) -> Option<&'static str> {
        self.risk_color.node_class()
    }
}

/// The dependency graph of one project, keyed by package coordinate.
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, ()>,
    node_indices: HashMap<String, NodeIndex>,
    dropped_edges: Vec<(String, String)>,
}

impl DependencyGraph {
    /// Build from the flat record list.
    ///
    /// Duplicate coordinates are expected from malformed scanner output;
    /// the last record for a coordinate wins. Edges whose target coordinate
    /// never appears as a record are dropped with a warning, not an error.
    pub fn build(records: &[DependencyRecord]) -> Self {
        // Last write wins, first-seen position kept.
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut deduped: Vec<&DependencyRecord> = Vec::new();
        for record in records {
            match slots.get(record.coordinate.as_str()) {
                Some(&slot) => deduped[slot] = record,
                None => {
                    slots.insert(record.coordinate.as_str(), deduped.len());
                    deduped.push(record);
                }
            }
        }

        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        for record in &deduped {
            let idx = graph.add_node(GraphNode::from_record(record));
            node_indices.insert(record.coordinate.clone(), idx);
        }

        let mut dropped_edges = Vec::new();
        for record in &deduped {
            let from = node_indices[&record.coordinate];
            for target in &record.depends_on {
                match node_indices.get(target) {
                    Some(&to) => {
                        graph.add_edge(from, to, ());
                    }
                    None => {
                        style::warning(&format!(
                            "Target node does not exist: {}. Skipping edge from {}.",
                            target, record.coordinate
                        ));
                        dropped_edges.push((record.coordinate.clone(), target.clone()));
                    }
                }
            }
        }

        Self {
            graph,
            node_indices,
            dropped_edges,
        }
    }

    pub fn graph(&self) -> &DiGraph<GraphNode, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges skipped because their target coordinate was absent.
    pub fn dropped_edges(&self) -> &[(String, String)] {
        &self.dropped_edges
    }

    pub fn index_of(&self, coordinate: &str) -> Option<NodeIndex> {
        self.node_indices.get(coordinate).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    pub fn find(&self, coordinate: &str) -> Option<&GraphNode> {
        self.index_of(coordinate).map(|idx| &self.graph[idx])
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    /// Outgoing neighbors in `dependsOn` insertion order.
    ///
    /// petgraph iterates a node's edges newest-first, so the collected list
    /// is reversed to restore insertion order.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        targets.reverse();
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(coordinate: &str, depends_on: &[&str]) -> DependencyRecord {
        DependencyRecord {
            coordinate: coordinate.to_string(),
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
            ..DependencyRecord::default()
        }
    }

    #[test]
    fn node_count_equals_distinct_coordinates() {
        let records = vec![
            record("pkg:npm/a@1.0.0", &["pkg:npm/b@1.0.0"]),
            record("pkg:npm/b@1.0.0", &[]),
            record("pkg:npm/a@1.0.0", &[]),
        ];
        let graph = DependencyGraph::build(&records);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn duplicate_coordinate_last_record_wins() {
        let first = record("pkg:npm/a@1.0.0", &["pkg:npm/b@1.0.0"]);
        let mut second = record("pkg:npm/a@1.0.0", &[]);
        second.risk_color = RiskColor::Red;
        let records = vec![first, record("pkg:npm/b@1.0.0", &[]), second];

        let graph = DependencyGraph::build(&records);
        let node = graph.find("pkg:npm/a@1.0.0").unwrap();
        assert_eq!(node.risk_color, RiskColor::Red);
        // The winning record has no dependsOn entries.
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn dangling_edge_is_dropped_not_fatal() {
        let records = vec![record("pkg:npm/a@1.0.0", &["pkg:npm/x@0.0.1"])];
        let graph = DependencyGraph::build(&records);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(
            graph.dropped_edges(),
            &[("pkg:npm/a@1.0.0".to_string(), "pkg:npm/x@0.0.1".to_string())]
        );
    }

    #[test]
    fn dependencies_preserve_insertion_order() {
        let records = vec![
            record("pkg:npm/a@1.0.0", &["pkg:npm/b@1.0.0", "pkg:npm/c@1.0.0"]),
            record("pkg:npm/b@1.0.0", &[]),
            record("pkg:npm/c@1.0.0", &[]),
        ];
        let graph = DependencyGraph::build(&records);
        let a = graph.index_of("pkg:npm/a@1.0.0").unwrap();
        let labels: Vec<_> = graph
            .dependencies_of(a)
            .into_iter()
            .map(|idx| graph.node(idx).label.clone())
            .collect();
        assert_eq!(labels, vec!["b", "c"]);
    }
}
