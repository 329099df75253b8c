use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;

use crate::ir::{Edge, EdgeKind, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatelliteLink<'a> {
    pub anchor: &'a str,
    /// 1-based position among the anchor's partners.
    pub slot: usize,
}

/// Nodes and edges split for the two placement passes.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Unique ids in input order, satellites excluded.
    pub hierarchy_nodes: Vec<&'a str>,
    /// Parent to child pairs, input order, both ends in `hierarchy_nodes`.
    pub hierarchy_edges: Vec<(&'a str, &'a str)>,
    pub satellites: BTreeMap<&'a str, SatelliteLink<'a>>,
    satellite_counts: HashMap<&'a str, usize>,
}

impl<'a> Partition<'a> {
    pub fn anchor_of(&self, satellite: &str) -> Option<SatelliteLink<'a>> {
        self.satellites.get(satellite).copied()
    }

    /// Number of partners placed beside `anchor`.
    pub fn satellite_count(&self, anchor: &str) -> usize {
        self.satellite_counts.get(anchor).copied().unwrap_or(0)
    }
}

pub fn partition<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> Partition<'a> {
    let known: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

    let mut satellites: BTreeMap<&str, SatelliteLink> = BTreeMap::new();
    let mut satellite_counts: HashMap<&str, usize> = HashMap::new();
    for edge in edges.iter().filter(|edge| edge.kind == EdgeKind::Pairing) {
        let (anchor, target) = (edge.source.as_str(), edge.target.as_str());
        if anchor == target || !known.contains(target) {
            debug!("ignoring pairing edge '{}'", edge.id);
            continue;
        }
        if satellites.contains_key(target) {
            debug!(
                "pairing edge '{}' ignored: '{}' already has an anchor",
                edge.id, target
            );
            continue;
        }
        let count = satellite_counts.entry(anchor).or_insert(0);
        *count += 1;
        satellites.insert(
            target,
            SatelliteLink {
                anchor,
                slot: *count,
            },
        );
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let hierarchy_nodes: Vec<&str> = nodes
        .iter()
        .map(|node| node.id.as_str())
        .filter(|id| !satellites.contains_key(id) && seen.insert(*id))
        .collect();

    let hierarchy_edges: Vec<(&str, &str)> = edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Hierarchy)
        .filter(|edge| seen.contains(edge.source.as_str()) && seen.contains(edge.target.as_str()))
        .map(|edge| (edge.source.as_str(), edge.target.as_str()))
        .collect();

    debug!(
        "partition: {} hierarchy nodes, {} hierarchy edges, {} satellites",
        hierarchy_nodes.len(),
        hierarchy_edges.len(),
        satellites.len()
    );

    Partition {
        hierarchy_nodes,
        hierarchy_edges,
        satellites,
        satellite_counts,
    }
}
