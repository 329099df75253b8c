//! Editing model for a single family tree.
//!
//! Every structural change re-runs the layout so the stored positions always
//! match the current graph, the way the editor relays out after each action.

use log::debug;

use crate::config::LayoutConfig;
use crate::ir::{Direction, Edge, EdgeKind, FamilyDocument, Node, NodeData};
use crate::layout::{LayoutResult, apply_layout, compute_layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Parent,
    Child,
    Spouse,
}

#[derive(Debug, Clone)]
pub struct FamilyTree {
    document: FamilyDocument,
    direction: Direction,
    config: LayoutConfig,
    next_id: usize,
    last_layout: Option<LayoutResult>,
}

impl FamilyTree {
    pub fn new(config: LayoutConfig) -> Self {
        Self::from_document(FamilyDocument::default(), config)
    }

    /// Wraps an existing document and lays it out once.
    pub fn from_document(document: FamilyDocument, config: LayoutConfig) -> Self {
        let direction = document.direction.unwrap_or_default();
        let next_id = document
            .nodes
            .iter()
            .map(|node| node.id.as_str())
            .chain(document.edges.iter().map(|edge| edge.id.as_str()))
            .filter_map(generated_counter)
            .max()
            .and_then(|max| max.checked_add(1))
            .unwrap_or(1);
        let mut tree = Self {
            document,
            direction,
            config,
            next_id,
            last_layout: None,
        };
        tree.relayout();
        tree
    }

    pub fn document(&self) -> &FamilyDocument {
        &self.document
    }

    pub fn into_document(self) -> FamilyDocument {
        self.document
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_layout(&self) -> Option<&LayoutResult> {
        self.last_layout.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.document.node(id)
    }

    pub fn add_person(&mut self, data: NodeData) -> String {
        let id = self.fresh_id("n");
        self.document.nodes.push(Node::new(id.clone(), data));
        self.relayout();
        id
    }

    /// Adds a new person related to `of`. Returns `None` when `of` is unknown.
    pub fn add_relative(&mut self, of: &str, relation: Relation, data: NodeData) -> Option<String> {
        self.node(of)?;
        let id = self.fresh_id("n");
        let edge_id = self.fresh_id("e");
        let edge = match relation {
            Relation::Parent => Edge::hierarchy(edge_id, id.clone(), of),
            Relation::Child => Edge::hierarchy(edge_id, of, id.clone()),
            // The existing person stays the anchor of the couple.
            Relation::Spouse => Edge::pairing(edge_id, of, id.clone()),
        };
        debug!("adding {relation:?} '{id}' to '{of}'");
        self.document.nodes.push(Node::new(id.clone(), data));
        self.document.edges.push(edge);
        self.relayout();
        Some(id)
    }

    /// Connects two existing people. Returns `None` when either is unknown.
    pub fn connect(&mut self, source: &str, target: &str, kind: EdgeKind) -> Option<String> {
        self.node(source)?;
        self.node(target)?;
        let edge_id = self.fresh_id("e");
        self.document
            .edges
            .push(Edge::new(edge_id.clone(), source, target, kind));
        self.relayout();
        Some(edge_id)
    }

    /// Removes a person and every edge touching them.
    pub fn remove_person(&mut self, id: &str) -> bool {
        let before = self.document.nodes.len();
        self.document.nodes.retain(|node| node.id != id);
        if self.document.nodes.len() == before {
            return false;
        }
        self.document.edges.retain(|edge| !edge.touches(id));
        self.relayout();
        true
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.document.edges.len();
        self.document.edges.retain(|edge| edge.id != id);
        if self.document.edges.len() == before {
            return false;
        }
        self.relayout();
        true
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.document.direction = Some(direction);
        self.relayout();
    }

    pub fn relayout(&mut self) -> &LayoutResult {
        let result = compute_layout(
            &self.document.nodes,
            &self.document.edges,
            self.direction,
            &self.config,
        );
        apply_layout(&mut self.document.nodes, &result);
        self.last_layout.insert(result)
    }

    /// Next `{prefix}{counter}` id not already taken by a node or an edge.
    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{prefix}{}", self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            let taken = self.document.nodes.iter().any(|node| node.id == id)
                || self.document.edges.iter().any(|edge| edge.id == id);
            if !taken {
                return id;
            }
        }
    }
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Counter behind an id this module generated (`n12`, `e7`).
fn generated_counter(id: &str) -> Option<usize> {
    let digits = id.strip_prefix('n').or_else(|| id.strip_prefix('e'))?;
    digits.parse().ok()
}
