mod coordinates;
mod partition;
mod ranking;
mod satellite;
pub(crate) mod types;
pub use partition::{Partition, SatelliteLink, partition};
pub use types::*;
use coordinates::*;
use ranking::*;
use satellite::*;

use crate::config::LayoutConfig;
use crate::ir::{Direction, Edge, FamilyDocument, Node, Position};
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Computes a fresh layout. Every input node gets a placement; the call never
/// fails and keeps no state between invocations.
pub fn compute_layout(
    nodes: &[Node],
    edges: &[Edge],
    direction: Direction,
    config: &LayoutConfig,
) -> LayoutResult {
    let split = partition(nodes, edges);
    let (source_side, target_side) = direction.sides();

    let mut graph = LayerGraph::new(&split.hierarchy_nodes, &split.hierarchy_edges);
    graph.remove_cycles();
    graph.assign_ranks();
    let mut rank_nodes = graph.layers();
    graph.order_layers(&mut rank_nodes, config.passes());
    debug!(
        "ranked {} node(s) into {} rank(s)",
        graph.nodes.len(),
        rank_nodes.len()
    );

    let step = config.satellite_step(direction);
    let footprints: Vec<f32> = graph
        .nodes
        .iter()
        .map(|node| {
            config.order_extent(direction) + step * split.satellite_count(node.id) as f32
        })
        .collect();
    let positions = assign_coordinates(&rank_nodes, &footprints, direction, config);

    let mut placed: BTreeMap<String, NodePlacement> = BTreeMap::new();
    let mut anchors: HashMap<&str, Position> = HashMap::new();
    for (node, position) in graph.nodes.iter().zip(&positions) {
        anchors.insert(node.id, *position);
        placed.insert(
            node.id.to_string(),
            NodePlacement {
                x: position.x,
                y: position.y,
                placement: Placement::Ranked {
                    rank: node.rank,
                    order: node.order,
                },
                source_side,
                target_side,
            },
        );
    }

    for (satellite, link) in &split.satellites {
        let (position, placement) = place_satellite(satellite, *link, &anchors, direction, config);
        placed.insert(
            satellite.to_string(),
            NodePlacement {
                x: position.x,
                y: position.y,
                placement,
                source_side,
                target_side,
            },
        );
    }

    let (width, height) = bounds(&placed, direction, config);
    LayoutResult {
        direction,
        nodes: placed,
        width,
        height,
    }
}

/// Lays out `nodes` and returns them with new positions and connection sides;
/// every other field, and every edge, is passed through untouched.
pub fn layout(
    nodes: &[Node],
    edges: &[Edge],
    direction: Direction,
    config: &LayoutConfig,
) -> (Vec<Node>, Vec<Edge>) {
    let result = compute_layout(nodes, edges, direction, config);
    let mut nodes = nodes.to_vec();
    apply_layout(&mut nodes, &result);
    (nodes, edges.to_vec())
}

pub fn apply_layout(nodes: &mut [Node], result: &LayoutResult) {
    let (source_side, target_side) = result.direction.sides();
    for node in nodes {
        match result.nodes.get(&node.id) {
            Some(placed) => node.position = placed.position(),
            None => node.position = Position::ORIGIN,
        }
        node.source_position = Some(source_side);
        node.target_position = Some(target_side);
    }
}

/// Lays out a whole document, using its stored direction when `direction` is `None`.
pub fn layout_document(
    document: &FamilyDocument,
    direction: Option<Direction>,
    config: &LayoutConfig,
) -> (FamilyDocument, LayoutResult) {
    let direction = direction.or(document.direction).unwrap_or_default();
    let result = compute_layout(&document.nodes, &document.edges, direction, config);
    let mut out = document.clone();
    out.direction = Some(direction);
    apply_layout(&mut out.nodes, &result);
    (out, result)
}

fn bounds(
    nodes: &BTreeMap<String, NodePlacement>,
    direction: Direction,
    config: &LayoutConfig,
) -> (f32, f32) {
    let spacing = config.spacing(direction);
    let mut max_x: f32 = 0.0;
    let mut max_y: f32 = 0.0;
    for node in nodes.values() {
        max_x = max_x.max(node.x + config.node_width);
        max_y = max_y.max(node.y + config.node_height);
    }
    (max_x + spacing.margin_x, max_y + spacing.margin_y)
}
