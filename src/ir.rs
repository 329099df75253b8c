use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "TB", alias = "TD")]
    Vertical,
    #[serde(alias = "LR")]
    Horizontal,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "vertical" | "TB" | "TD" => Some(Self::Vertical),
            "horizontal" | "LR" => Some(Self::Horizontal),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Handle sides used for connection points: (source, target).
    pub fn sides(self) -> (Side, Side) {
        match self {
            Self::Vertical => (Side::Bottom, Side::Top),
            Self::Horizontal => (Side::Right, Side::Left),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Person payload. Layout never reads it; unknown fields survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Side>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position: Position::ORIGIN,
            data,
            source_position: None,
            target_position: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent to child; the source is the parent.
    #[default]
    #[serde(alias = "parent", alias = "child")]
    Hierarchy,
    /// Spouse or partner; the source anchors the couple.
    #[serde(alias = "spouse", alias = "partner")]
    Pairing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: EdgeKind,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            edge_type: None,
            animated: false,
            label: None,
            style: None,
            extra: Map::new(),
        }
    }

    pub fn hierarchy(
        id: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self::new(id, parent, child, EdgeKind::Hierarchy)
    }

    pub fn pairing(
        id: impl Into<String>,
        anchor: impl Into<String>,
        partner: impl Into<String>,
    ) -> Self {
        Self::new(id, anchor, partner, EdgeKind::Pairing)
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid family document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A structural problem in a document. Layout tolerates all of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    DuplicateNode { id: String },
    DanglingEdge { edge: String, endpoint: String },
    DuplicatePairingTarget { edge: String, target: String },
    SelfLoop { edge: String },
}

impl fmt::Display for DocumentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNode { id } => write!(f, "node id '{id}' appears more than once"),
            Self::DanglingEdge { edge, endpoint } => {
                write!(f, "edge '{edge}' references unknown node '{endpoint}'")
            }
            Self::DuplicatePairingTarget { edge, target } => write!(
                f,
                "pairing edge '{edge}' targets '{target}', which already has a partner anchor"
            ),
            Self::SelfLoop { edge } => write!(f, "edge '{edge}' connects a node to itself"),
        }
    }
}

/// The node/edge list stored per family by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl FamilyDocument {
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn validate(&self) -> Vec<DocumentIssue> {
        let mut issues = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                issues.push(DocumentIssue::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut paired_targets: HashMap<&str, &str> = HashMap::new();
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    issues.push(DocumentIssue::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
            if edge.source == edge.target {
                issues.push(DocumentIssue::SelfLoop {
                    edge: edge.id.clone(),
                });
                continue;
            }
            if edge.kind == EdgeKind::Pairing
                && paired_targets
                    .insert(edge.target.as_str(), edge.id.as_str())
                    .is_some()
            {
                issues.push(DocumentIssue::DuplicatePairingTarget {
                    edge: edge.id.clone(),
                    target: edge.target.clone(),
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_editor_document() {
        let input = r#"{
            "name": "Lovelace",
            "nodes": [
                { "id": "1", "position": { "x": 5, "y": 7 }, "type": "person",
                  "data": { "name": "Ada", "spouseLink": "https://example.org", "age": 36 } },
                { "id": "2", "data": { "name": "William" } }
            ],
            "edges": [
                { "id": "e1", "source": "1", "target": "2", "kind": "spouse", "type": "smoothstep" }
            ]
        }"#;
        let doc = FamilyDocument::from_json(input).unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0].position, Position::new(5.0, 7.0));
        assert_eq!(doc.nodes[0].data.spouse_link.as_deref(), Some("https://example.org"));
        assert_eq!(doc.nodes[0].data.extra.get("age"), Some(&Value::from(36)));
        assert_eq!(doc.nodes[0].extra.get("type"), Some(&Value::from("person")));
        assert_eq!(doc.edges[0].kind, EdgeKind::Pairing);
        assert_eq!(doc.edges[0].edge_type.as_deref(), Some("smoothstep"));

        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("\"spouseLink\""));
        assert!(json.contains("\"age\": 36"));
        assert_eq!(FamilyDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn edge_kind_defaults_to_hierarchy() {
        let edge: Edge = serde_json::from_str(r#"{"id":"e","source":"a","target":"b"}"#).unwrap();
        assert_eq!(edge.kind, EdgeKind::Hierarchy);
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(Direction::from_token("LR"), Some(Direction::Horizontal));
        assert_eq!(Direction::from_token("vertical"), Some(Direction::Vertical));
        assert_eq!(Direction::from_token("diagonal"), None);
        let parsed: Direction = serde_json::from_str("\"TB\"").unwrap();
        assert_eq!(parsed, Direction::Vertical);
        assert_eq!(Direction::Vertical.toggled(), Direction::Horizontal);
    }

    #[test]
    fn reports_structural_issues() {
        let doc = FamilyDocument {
            nodes: vec![
                Node::new("a", NodeData::named("A")),
                Node::new("b", NodeData::named("B")),
                Node::new("a", NodeData::named("A again")),
            ],
            edges: vec![
                Edge::hierarchy("e1", "a", "ghost"),
                Edge::pairing("e2", "a", "b"),
                Edge::pairing("e3", "a", "b"),
                Edge::hierarchy("e4", "b", "b"),
            ],
            ..FamilyDocument::default()
        };
        let issues = doc.validate();
        assert!(issues.contains(&DocumentIssue::DuplicateNode { id: "a".into() }));
        assert!(issues.contains(&DocumentIssue::DanglingEdge {
            edge: "e1".into(),
            endpoint: "ghost".into()
        }));
        assert!(issues.contains(&DocumentIssue::DuplicatePairingTarget {
            edge: "e3".into(),
            target: "b".into()
        }));
        assert!(issues.contains(&DocumentIssue::SelfLoop { edge: "e4".into() }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = FamilyDocument::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }
}
