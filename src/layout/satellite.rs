use std::collections::HashMap;

use log::warn;

use crate::config::LayoutConfig;
use crate::ir::{Direction, Position};

use super::partition::SatelliteLink;
use super::types::Placement;

/// Positions a partner beside its anchor: to the right when generations run
/// top-down, below when they run left-right. Without a placed anchor the
/// partner falls back to the origin.
pub(super) fn place_satellite(
    satellite: &str,
    link: SatelliteLink<'_>,
    anchors: &HashMap<&str, Position>,
    direction: Direction,
    config: &LayoutConfig,
) -> (Position, Placement) {
    let Some(anchor) = anchors.get(link.anchor) else {
        warn!(
            "partner '{}' has no placed anchor '{}', using origin",
            satellite, link.anchor
        );
        return (Position::ORIGIN, Placement::Fallback);
    };
    let offset = config.satellite_step(direction) * link.slot as f32;
    let position = match direction {
        Direction::Vertical => Position::new(anchor.x + offset, anchor.y),
        Direction::Horizontal => Position::new(anchor.x, anchor.y + offset),
    };
    (
        position,
        Placement::Satellite {
            anchor: link.anchor.to_string(),
            slot: link.slot,
        },
    )
}
