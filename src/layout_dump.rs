use crate::ir::Side;
use crate::layout::{LayoutResult, Placement};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub direction: String,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub placement: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    pub source_side: Side,
    pub target_side: Side,
}

impl LayoutDump {
    pub fn from_layout(layout: &LayoutResult) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|(id, node)| {
                let (rank, order, anchor) = match &node.placement {
                    Placement::Ranked { rank, order } => (Some(*rank), Some(*order), None),
                    Placement::Satellite { anchor, .. } => (None, None, Some(anchor.clone())),
                    Placement::Fallback => (None, None, None),
                };
                NodeDump {
                    id: id.clone(),
                    x: node.x,
                    y: node.y,
                    placement: node.placement.label(),
                    rank,
                    order,
                    anchor,
                    source_side: node.source_side,
                    target_side: node.target_side,
                }
            })
            .collect();

        Self {
            direction: layout.direction.to_string(),
            width: layout.width,
            height: layout.height,
            nodes,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, layout: &LayoutResult) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
