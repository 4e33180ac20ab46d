use super::DependencyGraph;
use crate::model::Component;
use serde::Serialize;

/// One dependency row of a component detail view.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyLink {
    pub coordinate: String,
    /// Inventory id of the dependency. `None` when the coordinate does not
    /// resolve to a record with an id; callers render plain text instead of
    /// a link.
    pub unique_id: Option<u64>,
}

/// Cross-reference a component's dependency coordinates against the graph,
/// resolving each to the inventory id of the record it names.
pub fn link_dependencies(component: &Component, graph: &DependencyGraph) -> Vec<DependencyLink> {
    component
        .dependencies
        .iter()
        .map(|coordinate| DependencyLink {
            coordinate: coordinate.clone(),
            unique_id: graph.find(coordinate).and_then(|node| node.unique_id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DependencyRecord;

    #[test]
    fn dependencies_resolve_to_inventory_ids() {
        let records = vec![
            DependencyRecord {
                coordinate: "pkg:npm/app@1.0.0".to_string(),
                unique_id: Some(1),
                depends_on: vec!["pkg:npm/left-pad@1.3.0".to_string()],
                ..DependencyRecord::default()
            },
            DependencyRecord {
                coordinate: "pkg:npm/left-pad@1.3.0".to_string(),
                unique_id: Some(2),
                ..DependencyRecord::default()
            },
        ];
        let graph = DependencyGraph::build(&records);

        let component = Component {
            name: "app".to_string(),
            dependencies: vec![
                "pkg:npm/left-pad@1.3.0".to_string(),
                "pkg:npm/ghost@0.0.1".to_string(),
            ],
            ..Component::default()
        };

        let links = link_dependencies(&component, &graph);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].unique_id, Some(2));
        // Coordinates outside the graph stay unlinked.
        assert_eq!(links[1].coordinate, "pkg:npm/ghost@0.0.1");
        assert_eq!(links[1].unique_id, None);
    }

    #[test]
    fn record_without_an_id_stays_unlinked() {
        let records = vec![DependencyRecord {
            coordinate: "pkg:npm/left-pad@1.3.0".to_string(),
            unique_id: None,
            ..DependencyRecord::default()
        }];
        let graph = DependencyGraph::build(&records);
        let component = Component {
            name: "app".to_string(),
            dependencies: vec!["pkg:npm/left-pad@1.3.0".to_string()],
            ..Component::default()
        };
        assert_eq!(link_dependencies(&component, &graph)[0].unique_id, None);
    }
}
