use std::collections::BTreeMap;

use crate::ir::{Direction, Position, Side};

/// Which pass produced a node's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Placed by the layered hierarchy engine.
    Ranked { rank: usize, order: usize },
    /// Offset from the partner anchoring the couple; `slot` is 1 for the first partner.
    Satellite { anchor: String, slot: usize },
    /// Could not be placed; sits at the origin.
    Fallback,
}

impl Placement {
    pub fn rank(&self) -> Option<usize> {
        match self {
            Self::Ranked { rank, .. } => Some(*rank),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ranked { .. } => "ranked",
            Self::Satellite { .. } => "satellite",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodePlacement {
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    pub placement: Placement,
    pub source_side: Side,
    pub target_side: Side,
}

impl NodePlacement {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub direction: Direction,
    pub nodes: BTreeMap<String, NodePlacement>,
    pub width: f32,
    pub height: f32,
}

impl LayoutResult {
    pub fn get(&self, id: &str) -> Option<&NodePlacement> {
        self.nodes.get(id)
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.nodes.get(id).map(NodePlacement::position)
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.nodes.get(id).and_then(|node| node.placement.rank())
    }
}
