use super::DependencyGraph;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashSet;

/// A rooted, finite projection of the (possibly cyclic) dependency graph,
/// as shown in the selection sidebar.
///
/// `children` is absent for a leaf, never an empty list, so the presentation
/// layer can tell a leaf from a pruned branch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DependencyTreeNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DependencyTreeNode>>,
}

/// Project the subtree reachable from `root` by following outgoing edges.
///
/// A single visited set covers the whole walk: the first visit of a node
/// wins, and any later path reaching the same node is pruned. This keeps the
/// result finite on cyclic graphs and shows each package at most once.
pub fn project_tree(graph: &DependencyGraph, root: &str) -> Option<DependencyTreeNode> {
    let start = graph.index_of(root)?;
    let mut visited = HashSet::new();
    walk(graph, start, &mut visited)
}

fn walk(
    graph: &DependencyGraph,
    current: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
) -> Option<DependencyTreeNode> {
    if !visited.insert(current) {
        return None;
    }

    let children: Vec<DependencyTreeNode> = graph
        .dependencies_of(current)
        .into_iter()
        .filter_map(|child| walk(graph, child, visited))
        .collect();

    let node = graph.node(current);
    Some(DependencyTreeNode {
        id: node.coordinate.clone(),
        label: node.label.clone(),
        version: node.version.clone(),
        children: if children.is_empty() {
            None
        } else {
            Some(children)
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DependencyRecord;

    fn graph(records: &[(&str, &[&str])]) -> DependencyGraph {
        let records: Vec<DependencyRecord> = records
            .iter()
            .map(|(coordinate, depends_on)| DependencyRecord {
                coordinate: coordinate.to_string(),
                depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
                ..DependencyRecord::default()
            })
            .collect();
        DependencyGraph::build(&records)
    }

    #[test]
    fn cycle_is_pruned_at_first_revisit() {
        let g = graph(&[
            ("pkg:npm/a@1.0.0", &["pkg:npm/b@1.0.0"]),
            ("pkg:npm/b@1.0.0", &["pkg:npm/a@1.0.0"]),
        ]);
        let tree = project_tree(&g, "pkg:npm/a@1.0.0").unwrap();

        assert_eq!(tree.id, "pkg:npm/a@1.0.0");
        let children = tree.children.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "pkg:npm/b@1.0.0");
        // B's back-edge to A must be pruned, not represented.
        assert!(children[0].children.is_none());
    }

    #[test]
    fn diamond_shows_shared_node_once() {
        let g = graph(&[
            ("a@1", &["b@1", "c@1"]),
            ("b@1", &["d@1"]),
            ("c@1", &["d@1"]),
            ("d@1", &[]),
        ]);
        let tree = project_tree(&g, "a@1").unwrap();
        let children = tree.children.unwrap();
        assert_eq!(children.len(), 2);
        // d attaches at its first discovery point (under b); c becomes a leaf.
        assert!(children[0].children.is_some());
        assert!(children[1].children.is_none());
    }

    #[test]
    fn no_id_repeats_on_any_root_to_leaf_path() {
        let g = graph(&[
            ("a@1", &["b@1"]),
            ("b@1", &["c@1"]),
            ("c@1", &["a@1", "b@1"]),
        ]);
        let tree = project_tree(&g, "a@1").unwrap();

        fn check(node: &DependencyTreeNode, path: &mut Vec<String>) {
            assert!(!path.contains(&node.id), "cycle in projected tree");
            path.push(node.id.clone());
            for child in node.children.iter().flatten() {
                check(child, path);
            }
            path.pop();
        }
        check(&tree, &mut Vec::new());
    }

    #[test]
    fn missing_root_yields_none() {
        let g = graph(&[("a@1", &[])]);
        assert!(project_tree(&g, "nope@0").is_none());
    }

    #[test]
    fn leaf_serializes_without_children_key() {
        let g = graph(&[("a@1", &[])]);
        let tree = project_tree(&g, "a@1").unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert!(json.get("children").is_none());
    }
}
