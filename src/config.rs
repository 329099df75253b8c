use crate::ir::Direction;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling on crossing-reduction sweeps, whatever the config asks for.
pub const MAX_ORDER_PASSES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankAlign {
    /// Each rank starts at the margin.
    #[default]
    Start,
    /// Each rank is centered against the widest rank.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingConfig {
    /// Gap between neighbours within a rank.
    pub node_spacing: f32,
    /// Gap between consecutive ranks.
    pub rank_spacing: f32,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl SpacingConfig {
    pub fn vertical() -> Self {
        Self {
            node_spacing: 50.0,
            rank_spacing: 80.0,
            margin_x: 20.0,
            margin_y: 20.0,
        }
    }

    pub fn horizontal() -> Self {
        Self {
            node_spacing: 80.0,
            rank_spacing: 150.0,
            margin_x: 40.0,
            margin_y: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Gap between a partner and the person anchoring the couple.
    pub spouse_gap: f32,
    pub order_passes: usize,
    pub rank_align: RankAlign,
    pub vertical: SpacingConfig,
    pub horizontal: SpacingConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 172.0,
            node_height: 72.0,
            spouse_gap: 30.0,
            order_passes: 4,
            rank_align: RankAlign::Start,
            vertical: SpacingConfig::vertical(),
            horizontal: SpacingConfig::horizontal(),
        }
    }
}

impl LayoutConfig {
    pub fn spacing(&self, direction: Direction) -> &SpacingConfig {
        match direction {
            Direction::Vertical => &self.vertical,
            Direction::Horizontal => &self.horizontal,
        }
    }

    pub fn passes(&self) -> usize {
        self.order_passes.clamp(1, MAX_ORDER_PASSES)
    }

    /// Node extent along the rank axis (across generations).
    pub fn rank_extent(&self, direction: Direction) -> f32 {
        if direction.is_horizontal() {
            self.node_width
        } else {
            self.node_height
        }
    }

    /// Node extent along the order axis (across siblings).
    pub fn order_extent(&self, direction: Direction) -> f32 {
        if direction.is_horizontal() {
            self.node_height
        } else {
            self.node_width
        }
    }

    /// Distance from an anchor to its first partner along the order axis.
    pub fn satellite_step(&self, direction: Direction) -> f32 {
        self.order_extent(direction) + self.spouse_gap
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub direction: Direction,
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpacingConfigFile {
    node_spacing: Option<f32>,
    rank_spacing: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
}

impl SpacingConfigFile {
    fn apply(self, target: &mut SpacingConfig) {
        if let Some(v) = self.node_spacing {
            target.node_spacing = v;
        }
        if let Some(v) = self.rank_spacing {
            target.rank_spacing = v;
        }
        if let Some(v) = self.margin_x {
            target.margin_x = v;
        }
        if let Some(v) = self.margin_y {
            target.margin_y = v;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    direction: Option<Direction>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    spouse_gap: Option<f32>,
    order_passes: Option<usize>,
    rank_align: Option<RankAlign>,
    vertical: Option<SpacingConfigFile>,
    horizontal: Option<SpacingConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a camelCase config; anything absent keeps its default. JSON5 is
/// accepted when strict JSON fails.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid layout config: {json_err}"))?,
    };

    let mut config = Config::default();
    if let Some(direction) = parsed.direction {
        config.direction = direction;
    }
    let layout = &mut config.layout;
    if let Some(v) = parsed.node_width {
        layout.node_width = v.max(1.0);
    }
    if let Some(v) = parsed.node_height {
        layout.node_height = v.max(1.0);
    }
    if let Some(v) = parsed.spouse_gap {
        layout.spouse_gap = v;
    }
    if let Some(v) = parsed.order_passes {
        layout.order_passes = v;
    }
    if let Some(v) = parsed.rank_align {
        layout.rank_align = v;
    }
    if let Some(v) = parsed.vertical {
        v.apply(&mut layout.vertical);
    }
    if let Some(v) = parsed.horizontal {
        v.apply(&mut layout.horizontal);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_spacing_is_wider() {
        let config = LayoutConfig::default();
        assert!(config.horizontal.node_spacing > config.vertical.node_spacing);
        assert!(config.horizontal.rank_spacing > config.vertical.rank_spacing);
        assert_eq!(config.satellite_step(Direction::Vertical), 172.0 + 30.0);
        assert_eq!(config.satellite_step(Direction::Horizontal), 72.0 + 30.0);
    }

    #[test]
    fn partial_overrides_keep_defaults() {
        let config = parse_config(
            r#"{ "direction": "horizontal", "nodeWidth": 200, "vertical": { "rankSpacing": 120 } }"#,
        )
        .unwrap();
        assert_eq!(config.direction, Direction::Horizontal);
        assert_eq!(config.layout.node_width, 200.0);
        assert_eq!(config.layout.node_height, 72.0);
        assert_eq!(config.layout.vertical.rank_spacing, 120.0);
        assert_eq!(config.layout.vertical.node_spacing, 50.0);
    }

    #[test]
    fn accepts_json5() {
        let config = parse_config("{ spouseGap: 12, rankAlign: 'center', // trailing\n }").unwrap();
        assert_eq!(config.layout.spouse_gap, 12.0);
        assert_eq!(config.layout.rank_align, RankAlign::Center);
    }

    #[test]
    fn serialized_layout_reads_back_as_config_file() {
        let layout = LayoutConfig {
            node_width: 150.0,
            order_passes: 6,
            rank_align: RankAlign::Center,
            horizontal: SpacingConfig {
                margin_x: 12.0,
                ..SpacingConfig::horizontal()
            },
            ..LayoutConfig::default()
        };
        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.contains("\"nodeWidth\":150.0"));
        assert!(json.contains("\"rankAlign\":\"center\""));
        assert!(json.contains("\"marginX\":12.0"));
        assert_eq!(parse_config(&json).unwrap().layout, layout);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_config("not a config").is_err());
    }

    #[test]
    fn order_passes_are_bounded() {
        let mut config = LayoutConfig::default();
        config.order_passes = 0;
        assert_eq!(config.passes(), 1);
        config.order_passes = 10_000;
        assert_eq!(config.passes(), MAX_ORDER_PASSES);
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.direction, Direction::Vertical);
        assert_eq!(config.layout.spouse_gap, 30.0);
        assert_eq!(config.layout.rank_align, RankAlign::Start);
    }
}
