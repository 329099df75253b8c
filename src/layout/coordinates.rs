use crate::config::{LayoutConfig, RankAlign};
use crate::ir::{Direction, Position};

/// Converts rank/order buckets to top-left positions, indexed like the arena.
///
/// `footprints[idx]` is the space a node claims along the order axis: its own
/// extent plus any partner slots reserved beside it.
pub(super) fn assign_coordinates(
    rank_nodes: &[Vec<usize>],
    footprints: &[f32],
    direction: Direction,
    config: &LayoutConfig,
) -> Vec<Position> {
    let spacing = config.spacing(direction);
    let rank_extent = config.rank_extent(direction);
    let order_extent = config.order_extent(direction);
    let (order_margin, rank_margin) = if direction.is_horizontal() {
        (spacing.margin_y, spacing.margin_x)
    } else {
        (spacing.margin_x, spacing.margin_y)
    };

    let span = |bucket: &[usize]| -> f32 {
        let total: f32 = bucket.iter().map(|&idx| footprints[idx]).sum();
        total + spacing.node_spacing * bucket.len().saturating_sub(1) as f32
    };
    let widest = rank_nodes
        .iter()
        .map(|bucket| span(bucket.as_slice()))
        .fold(0.0_f32, f32::max);

    let mut positions = vec![Position::ORIGIN; footprints.len()];
    for (rank, bucket) in rank_nodes.iter().enumerate() {
        let offset = match config.rank_align {
            RankAlign::Start => 0.0,
            RankAlign::Center => (widest - span(bucket.as_slice())) / 2.0,
        };
        let rank_center =
            rank_margin + rank as f32 * (rank_extent + spacing.rank_spacing) + rank_extent / 2.0;
        let mut cursor = order_margin + offset;
        for &idx in bucket {
            let order_center = cursor + order_extent / 2.0;
            // Report the top-left corner rather than the center.
            let (main, cross) = (rank_center - rank_extent / 2.0, order_center - order_extent / 2.0);
            positions[idx] = if direction.is_horizontal() {
                Position::new(main, cross)
            } else {
                Position::new(cross, main)
            };
            cursor += footprints[idx] + spacing.node_spacing;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_ranks_grow_downward() {
        let config = LayoutConfig::default();
        let positions = assign_coordinates(
            &[vec![0], vec![1, 2]],
            &[172.0, 172.0, 172.0],
            Direction::Vertical,
            &config,
        );
        assert_eq!(positions[0], Position::new(20.0, 20.0));
        assert_eq!(positions[1], Position::new(20.0, 20.0 + 72.0 + 80.0));
        assert_eq!(positions[2], Position::new(20.0 + 172.0 + 50.0, 20.0 + 72.0 + 80.0));
    }

    #[test]
    fn horizontal_swaps_axes() {
        let config = LayoutConfig::default();
        let positions = assign_coordinates(
            &[vec![0, 1], vec![2]],
            &[72.0, 72.0, 72.0],
            Direction::Horizontal,
            &config,
        );
        assert_eq!(positions[0], Position::new(40.0, 40.0));
        assert_eq!(positions[1], Position::new(40.0, 40.0 + 72.0 + 80.0));
        assert_eq!(positions[2], Position::new(40.0 + 172.0 + 150.0, 40.0));
    }

    #[test]
    fn centered_ranks_share_a_midline() {
        let config = LayoutConfig {
            rank_align: RankAlign::Center,
            ..LayoutConfig::default()
        };
        let positions = assign_coordinates(
            &[vec![0], vec![1, 2]],
            &[172.0, 172.0, 172.0],
            Direction::Vertical,
            &config,
        );
        let parent_mid = positions[0].x + 86.0;
        let children_mid = (positions[1].x + positions[2].x + 172.0) / 2.0;
        assert_eq!(parent_mid, children_mid);
    }

    #[test]
    fn reserved_partner_slot_pushes_next_sibling() {
        let config = LayoutConfig::default();
        let wide = 172.0 + config.satellite_step(Direction::Vertical);
        let positions =
            assign_coordinates(&[vec![0, 1]], &[wide, 172.0], Direction::Vertical, &config);
        assert_eq!(positions[1].x, 20.0 + wide + 50.0);
    }
}
