use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashMap;
use std::f32::consts::TAU;
use thiserror::Error;

/// Fixed simulation budget. The cap is a constant, not adaptive: layout cost
/// stays bounded no matter how the filter changes the visible set.
pub const LAYOUT_ITERATIONS: u32 = 1000;
const TIME_STEP: f32 = 0.035;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no visible nodes to lay out")]
    EmptyGraph,
}

/// Force parameters scaled with the visible node count and the user's
/// spacing preference, matching the dashboard's slider semantics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutOptions {
    pub repulsion: f64,
    pub ideal_edge_length: f64,
    pub iterations: u32,
}

impl LayoutOptions {
    pub fn for_view(visible_nodes: usize, spacing: u32) -> Self {
        let n = visible_nodes as f64;
        let spacing = f64::from(spacing);
        Self {
            repulsion: 8000.0 + n * spacing,
            ideal_edge_length: 50.0 + n * (spacing / 100.0),
            iterations: LAYOUT_ITERATIONS,
        }
    }
}

/// Run a bounded force-directed layout over the visible subgraph.
///
/// Nodes start on a circle (deterministic given the same visible set), then
/// the simulation steps a fixed number of times. Positions are centered on
/// the origin; the frontend applies its own viewport transform.
pub fn run(
    nodes: &[NodeIndex],
    edges: &[(NodeIndex, NodeIndex)],
    options: LayoutOptions,
) -> Result<HashMap<NodeIndex, (f32, f32)>, LayoutError> {
    if nodes.is_empty() {
        return Err(LayoutError::EmptyGraph);
    }

    let mut simulation: ForceGraph<NodeIndex, ()> = ForceGraph::new(SimulationParameters {
        force_charge: (options.repulsion / 50.0) as f32,
        force_spring: (2.5 / options.ideal_edge_length) as f32,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let radius = (options.ideal_edge_length as f32) * (nodes.len() as f32).sqrt();
    let mut sim_indices = HashMap::new();
    for (i, &node) in nodes.iter().enumerate() {
        let angle = (i as f32) * TAU / (nodes.len() as f32);
        let idx = simulation.add_node(NodeData {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
            mass: 10.0,
            is_anchor: false,
            user_data: node,
        });
        sim_indices.insert(node, idx);
    }

    for (source, target) in edges {
        if let (Some(&a), Some(&b)) = (sim_indices.get(source), sim_indices.get(target)) {
            simulation.add_edge(a, b, EdgeData::default());
        }
    }

    for _ in 0..options.iterations {
        simulation.update(TIME_STEP);
    }

    let mut positions = HashMap::new();
    simulation.visit_nodes(|node| {
        positions.insert(node.data.user_data, (node.x(), node.y()));
    });
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_scale_with_count_and_spacing() {
        let opts = LayoutOptions::for_view(10, 100);
        assert_eq!(opts.repulsion, 9000.0);
        assert_eq!(opts.ideal_edge_length, 60.0);
        assert_eq!(opts.iterations, LAYOUT_ITERATIONS);

        let wider = LayoutOptions::for_view(10, 200);
        assert!(wider.repulsion > opts.repulsion);
        assert!(wider.ideal_edge_length > opts.ideal_edge_length);
    }

    #[test]
    fn empty_visible_set_is_an_error() {
        let result = run(&[], &[], LayoutOptions::for_view(0, 100));
        assert!(matches!(result, Err(LayoutError::EmptyGraph)));
    }

    #[test]
    fn every_visible_node_gets_a_position() {
        let nodes: Vec<NodeIndex> = (0..4).map(NodeIndex::new).collect();
        let edges = vec![(nodes[0], nodes[1]), (nodes[1], nodes[2])];
        let positions = run(&nodes, &edges, LayoutOptions::for_view(4, 100)).unwrap();
        assert_eq!(positions.len(), 4);
        for (x, y) in positions.values() {
            assert!(x.is_finite() && y.is_finite());
        }
    }

    #[test]
    fn connected_nodes_end_up_separated() {
        let nodes: Vec<NodeIndex> = (0..2).map(NodeIndex::new).collect();
        let positions = run(
            &nodes,
            &[(nodes[0], nodes[1])],
            LayoutOptions::for_view(2, 100),
        )
        .unwrap();
        let (ax, ay) = positions[&nodes[0]];
        let (bx, by) = positions[&nodes[1]];
        let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
        assert!(distance > 1.0, "nodes collapsed to {}", distance);
    }
}
