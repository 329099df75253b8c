use family_tree_layout::{Direction, FamilyDocument, LayoutConfig, layout_document};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    direction: Option<Direction>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    spouse_gap: Option<f32>,
}

fn build_layout_config(options: &LayoutOptions) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    if let Some(width) = options.node_width {
        config.node_width = width.max(1.0);
    }
    if let Some(height) = options.node_height {
        config.node_height = height.max(1.0);
    }
    if let Some(gap) = options.spouse_gap {
        config.spouse_gap = gap;
    }
    config
}

fn layout_json(document_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<LayoutOptions>(raw).map_err(|err| err.to_string())?,
        None => LayoutOptions::default(),
    };
    let document = FamilyDocument::from_json(document_json).map_err(|err| err.to_string())?;
    let config = build_layout_config(&options);
    let (laid_out, _) = layout_document(&document, options.direction, &config);
    laid_out.to_json_pretty().map_err(|err| err.to_string())
}

/// Lays out a `{ nodes, edges }` document and returns it with updated positions.
#[wasm_bindgen]
pub fn layout_family_tree(document_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json(document_json, options_json.as_deref()).map_err(|err| JsValue::from_str(&err))
}
