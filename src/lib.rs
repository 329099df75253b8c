#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod tree;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RankAlign, SpacingConfig, load_config, parse_config};
pub use ir::{
    Direction, DocumentError, DocumentIssue, Edge, EdgeKind, FamilyDocument, Node, NodeData,
    Position, Side,
};
pub use layout::{
    LayoutResult, NodePlacement, Placement, apply_layout, compute_layout, layout, layout_document,
};
pub use tree::{FamilyTree, Relation};
