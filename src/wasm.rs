//! WASM bindings for the argmap-core library.
//!
//! Everything exposed to JavaScript via wasm-bindgen lives here. The handle
//! owns one [`ArgumentMap`]; the frontend calls a mutation, then pulls a fresh
//! [`MapOutput`] snapshot to render.

use std::fmt::Display;

use log::error;
use wasm_bindgen::prelude::*;

use crate::error::MapError;
use crate::layout::LayoutConfig;
use crate::map::ArgumentMap;
use crate::model::{Polarity, SeedTree, Vote};
use crate::output::MapOutput;

#[cfg(target_family = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    // Fails only when a logger is already installed, which then gets the warning.
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::warn!("console logger not installed: {}", err);
    }
}

fn to_js<E: Display>(err: E) -> JsValue {
    error!("{}", err);
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct ArgumentMapHandle {
    map: ArgumentMap,
}

#[wasm_bindgen]
impl ArgumentMapHandle {
    /// A map holding the built-in starter debate.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ArgumentMapHandle, JsValue> {
        let map = ArgumentMap::starter(LayoutConfig::default()).map_err(to_js)?;
        Ok(Self { map })
    }

    /// Load a seed tree from JSON, optionally overriding layout constants.
    #[wasm_bindgen(js_name = fromSeed)]
    pub fn from_seed(
        seed_json: &str,
        config_json: Option<String>,
    ) -> Result<ArgumentMapHandle, JsValue> {
        let seed = SeedTree::from_json(seed_json).map_err(to_js)?;
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(json).map_err(|e| to_js(MapError::ConfigDecode(e)))?
            }
            _ => LayoutConfig::default(),
        };
        let map = ArgumentMap::from_seed(seed, config).map_err(to_js)?;
        Ok(Self { map })
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        MapOutput::from_map(&self.map).to_json().map_err(to_js)
    }

    /// Returns the new node id, or nothing if the parent is unknown.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(
        &mut self,
        parent_id: &str,
        polarity: &str,
    ) -> Result<Option<String>, JsValue> {
        let polarity: Polarity = polarity.parse().map_err(to_js)?;
        Ok(self.map.add_child(parent_id, polarity).map(|id| id.to_string()))
    }

    #[wasm_bindgen(js_name = commitEdit)]
    pub fn commit_edit(&mut self, node_id: &str, text: &str) -> bool {
        self.map.commit_edit(node_id, text)
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self, node_id: &str) -> bool {
        self.map.cancel_edit(node_id)
    }

    #[wasm_bindgen(js_name = beginEdit)]
    pub fn begin_edit(&mut self, node_id: &str) -> bool {
        self.map.begin_edit(node_id)
    }

    /// True when drafts were discarded and the viewport may need refitting.
    #[wasm_bindgen(js_name = selectNode)]
    pub fn select_node(&mut self, node_id: &str) -> bool {
        self.map.select_node(node_id)
    }

    pub fn vote(&mut self, node_id: &str, direction: &str) -> Result<bool, JsValue> {
        let vote: Vote = direction.parse().map_err(to_js)?;
        Ok(self.map.vote(node_id, vote))
    }

    #[wasm_bindgen(js_name = toggleDiscussion)]
    pub fn toggle_discussion(&mut self, node_id: &str) -> bool {
        self.map.toggle_discussion(node_id)
    }

    #[wasm_bindgen(js_name = closeAllDiscussions)]
    pub fn close_all_discussions(&mut self) -> bool {
        self.map.close_all_discussions()
    }

    #[wasm_bindgen(js_name = addComment)]
    pub fn add_comment(&mut self, node_id: &str, text: &str) -> bool {
        let timestamp = js_sys::Date::now() as u64;
        self.map.add_comment(node_id, text, timestamp)
    }

    /// Returns how many rebalancer pushes were applied.
    pub fn relayout(&mut self) -> usize {
        self.map.relayout().moves
    }

    #[wasm_bindgen(js_name = checkInvariants)]
    pub fn check_invariants(&self) -> Result<(), JsValue> {
        self.map.check_invariants().map_err(to_js)
    }
}
