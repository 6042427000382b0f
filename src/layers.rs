//! Exploration layer state machine.
//!
//! Single source of truth for where the user is drilled into: a root
//! selection plus up to `max_layers` ordered layers beneath it. Selecting at
//! layer i invalidates everything deeper than i; changing the root
//! invalidates everything. Generated batches are memoized per
//! `(layer, parent)` so re-reads of the same node are stable.
//!
//! Every mutating operation appends a `ChangeEvent` to an internal queue
//! that the presentation layer drains after each call; the machine itself
//! never reaches out to ambient global state.
//!
//! No operation returns an error. Out-of-range indices and empty ids
//! degrade to no-ops; missing parents are legitimate empty states.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category};
use crate::config::Config;
use crate::content;
use crate::logging;
use crate::seed;
use crate::tiles::{self, ExplorationTile, TileRequest};

/// Sentinel id stored when a free-text query replaces a predefined tile.
pub const CUSTOM_QUERY_ID: &str = "custom-query";

/// Active selection in one layer slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Tile(String),
    CustomQuery,
}

impl Selection {
    /// Identifier as seen by seeds and cache keys.
    pub fn id(&self) -> &str {
        match self {
            Selection::Tile(id) => id,
            Selection::CustomQuery => CUSTOM_QUERY_ID,
        }
    }
}

/// State transitions, drained by the presentation layer via `drain_events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChangeEvent {
    RootSelected { id: String },
    RootCleared,
    TileSelected { layer: usize, id: String },
    TileDeselected { layer: usize },
    /// `layer` is `None` for the root slot.
    CustomQuerySelected { layer: Option<usize> },
    LayerShown { layer: usize },
    LayerHidden { layer: usize },
    Reset,
}

/// Owned per-session exploration state.
#[derive(Debug)]
pub struct ExplorationLayers {
    max_layers: usize,
    tiles_per_batch: usize,
    default_category: Category,

    visible: Vec<bool>,
    active: Vec<Option<Selection>>,
    custom_queries: Vec<Option<String>>,

    root_selection: Option<String>,
    root_custom_query: Option<String>,
    /// Category and color resolved once when the root is selected.
    root_category: Option<Category>,
    root_color: Option<String>,

    cache: HashMap<String, Vec<ExplorationTile>>,
    events: Vec<ChangeEvent>,
}

impl Default for ExplorationLayers {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ExplorationLayers {
    pub fn new(cfg: &Config) -> Self {
        Self {
            max_layers: cfg.max_layers,
            tiles_per_batch: cfg.tiles_per_batch,
            default_category: cfg.default_category,
            visible: vec![false; cfg.max_layers],
            active: vec![None; cfg.max_layers],
            custom_queries: vec![None; cfg.max_layers],
            root_selection: None,
            root_custom_query: None,
            root_category: None,
            root_color: None,
            cache: HashMap::new(),
            events: Vec::new(),
        }
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    pub fn visible_layers(&self) -> &[bool] {
        &self.visible
    }

    pub fn active_selections(&self) -> &[Option<Selection>] {
        &self.active
    }

    /// Active selection id at a layer, `custom-query` for free-text slots.
    pub fn active_tile_at(&self, layer: usize) -> Option<&str> {
        self.active.get(layer).and_then(|s| s.as_ref()).map(Selection::id)
    }

    pub fn root_selection(&self) -> Option<&str> {
        self.root_selection.as_deref()
    }

    pub fn root_category(&self) -> Option<Category> {
        self.root_category
    }

    /// Free-text query at a layer; `None` layer denotes the root slot.
    pub fn custom_query_at(&self, layer: Option<usize>) -> Option<&str> {
        match layer {
            None => self.root_custom_query.as_deref(),
            Some(i) => self.custom_queries.get(i).and_then(|q| q.as_deref()),
        }
    }

    /// Whether the slot currently holds a free-text selection with a payload.
    pub fn is_custom_query_selected(&self, layer: Option<usize>) -> bool {
        match layer {
            None => {
                self.root_selection.as_deref() == Some(CUSTOM_QUERY_ID)
                    && self.root_custom_query.is_some()
            }
            Some(i) => {
                matches!(self.active.get(i), Some(Some(Selection::CustomQuery)))
                    && matches!(self.custom_queries.get(i), Some(Some(_)))
            }
        }
    }

    /// Drain the change events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Short digest of the selection state, for log correlation.
    pub fn state_digest(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(1 + self.max_layers * 2);
        parts.push(self.root_selection.clone().unwrap_or_else(|| "none".into()));
        for slot in &self.active {
            parts.push(slot.as_ref().map(|s| s.id().to_string()).unwrap_or_else(|| "none".into()));
        }
        for v in &self.visible {
            parts.push(if *v { "1" } else { "0" }.into());
        }
        let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
        seed::digest(&refs)
    }

    // =========================================================================
    // Root selection
    // =========================================================================

    /// Select a root tile; selecting the current root again deselects it.
    pub fn select_root(&mut self, id: &str) {
        if id.is_empty() {
            return;
        }
        if self.root_selection.as_deref() == Some(id) {
            self.root_selection = None;
            self.root_custom_query = None;
            self.root_category = None;
            self.root_color = None;
            self.active.fill(None);
            self.visible.fill(false);
            self.cache.clear();
            self.events.push(ChangeEvent::RootCleared);
        } else {
            self.root_selection = Some(id.to_string());
            self.root_custom_query = None;
            match content::root_tile(id) {
                Some(tile) => {
                    self.root_category = Some(tile.category);
                    self.root_color = Some(tile.color.clone());
                }
                None => {
                    // Unknown roots still explore, under the default category
                    // and without color inheritance.
                    self.root_category = Some(self.default_category);
                    self.root_color = None;
                }
            }
            // Root change invalidates every descendant; only layer 0 opens.
            self.active.fill(None);
            self.visible.fill(false);
            if !self.visible.is_empty() {
                self.visible[0] = true;
            }
            self.cache.clear();
            self.events.push(ChangeEvent::RootSelected { id: id.to_string() });
        }
        logging::log_selection(-1, self.root_selection.as_deref().unwrap_or("none"), &self.state_digest());
    }

    /// Replace the root selection with a free-text query.
    pub fn select_root_custom_query(&mut self, query: &str) {
        self.root_custom_query = Some(query.to_string());
        self.root_selection = Some(CUSTOM_QUERY_ID.to_string());
        self.root_category = Some(self.default_category);
        self.root_color = None;
        self.active.fill(None);
        self.custom_queries.fill(None);
        self.visible.fill(false);
        if !self.visible.is_empty() {
            self.visible[0] = true;
        }
        self.cache.clear();
        self.events.push(ChangeEvent::CustomQuerySelected { layer: None });
        logging::log_selection(-1, CUSTOM_QUERY_ID, &self.state_digest());
    }

    // =========================================================================
    // Layer selection
    // =========================================================================

    /// Select a tile at a layer; selecting the active tile again deselects
    /// it. Either way every deeper layer's selection is cleared and layers
    /// beyond the immediate next one are hidden. The immediate next layer is
    /// NOT shown automatically; callers opt in via `show_layer`.
    pub fn select_tile(&mut self, id: &str, layer: usize) {
        if id.is_empty() || layer >= self.max_layers {
            return;
        }
        let selected = Selection::Tile(id.to_string());
        if self.active[layer] == Some(selected.clone()) {
            self.active[layer] = None;
            self.clear_deeper_selections(layer);
            self.events.push(ChangeEvent::TileDeselected { layer });
        } else {
            self.active[layer] = Some(selected);
            self.clear_deeper_selections(layer);
            self.events.push(ChangeEvent::TileSelected { layer, id: id.to_string() });
        }
        self.cap_visibility(layer);
        logging::log_selection(layer as i64, self.active_tile_at(layer).unwrap_or("none"), &self.state_digest());
    }

    /// Store a free-text query as the selection at a layer. Cascades exactly
    /// like `select_tile`.
    pub fn select_custom_query(&mut self, query: &str, layer: usize) {
        if layer >= self.max_layers {
            return;
        }
        self.custom_queries[layer] = Some(query.to_string());
        for q in self.custom_queries.iter_mut().skip(layer + 1) {
            *q = None;
        }
        self.active[layer] = Some(Selection::CustomQuery);
        self.clear_deeper_selections(layer);
        self.cap_visibility(layer);
        self.events.push(ChangeEvent::CustomQuerySelected { layer: Some(layer) });
        logging::log_selection(layer as i64, CUSTOM_QUERY_ID, &self.state_digest());
    }

    fn clear_deeper_selections(&mut self, layer: usize) {
        for slot in self.active.iter_mut().skip(layer + 1) {
            *slot = None;
        }
    }

    /// Only the immediate next layer may remain visible after a selection at
    /// `layer`; anything deeper collapses.
    fn cap_visibility(&mut self, layer: usize) {
        for v in self.visible.iter_mut().skip(layer + 2) {
            *v = false;
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub fn show_layer(&mut self, layer: usize) {
        if layer >= self.max_layers {
            return;
        }
        self.visible[layer] = true;
        self.events.push(ChangeEvent::LayerShown { layer });
    }

    /// Hide a layer and collapse everything beneath it, selections included.
    pub fn hide_layer(&mut self, layer: usize) {
        if layer >= self.max_layers {
            return;
        }
        for i in layer..self.max_layers {
            self.visible[i] = false;
            self.active[i] = None;
        }
        self.events.push(ChangeEvent::LayerHidden { layer });
    }

    /// Clear the whole session back to its initial state.
    pub fn reset(&mut self) {
        self.visible.fill(false);
        self.active.fill(None);
        self.custom_queries.fill(None);
        self.root_selection = None;
        self.root_custom_query = None;
        self.root_category = None;
        self.root_color = None;
        self.cache.clear();
        self.events.push(ChangeEvent::Reset);
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    /// Tiles for a layer, generated on first read and memoized.
    ///
    /// Layer 0 depends only on the root selection; deeper layers depend on
    /// the selection one layer up. A missing parent is an empty state, not
    /// an error.
    pub fn tiles_for_layer(&mut self, layer: usize) -> Vec<ExplorationTile> {
        if layer >= self.max_layers {
            return Vec::new();
        }

        let (parent_id, category, level, prefix) = if layer == 0 {
            let root_id = match &self.root_selection {
                Some(id) => id.clone(),
                None => return Vec::new(),
            };
            let category = self.root_category.unwrap_or(self.default_category);
            // Layer 0 sits one tier below the authored root row.
            (root_id, category, 2, "Detailed".to_string())
        } else {
            let parent = match &self.active[layer - 1] {
                Some(sel) => sel.clone(),
                None => return Vec::new(),
            };
            let category = match &parent {
                Selection::Tile(id) => self.cached_tile_category(id),
                Selection::CustomQuery => None,
            }
            .or(self.root_category)
            .unwrap_or(self.default_category);
            (
                parent.id().to_string(),
                category,
                layer as u32 + 1,
                catalog::depth_prefix(layer),
            )
        };

        let cache_key = format!("layer-{}-{}", layer, parent_id);
        if let Some(cached) = self.cache.get(&cache_key) {
            logging::log_cache_hit(&cache_key);
            return cached.clone();
        }

        let batch = tiles::generate(&TileRequest {
            category,
            level,
            count: self.tiles_per_batch,
            prefix,
            parent_id,
            parent_color: self.root_color.clone(),
        });
        logging::log_generation(&cache_key, category.as_str(), batch.len());
        self.cache.insert(cache_key, batch.clone());
        batch
    }

    /// Category of a previously generated tile, looked up by id. Tiles carry
    /// their category explicitly, so no id parsing happens here.
    fn cached_tile_category(&self, tile_id: &str) -> Option<Category> {
        self.cache
            .values()
            .flat_map(|batch| batch.iter())
            .find(|t| t.id == tile_id)
            .map(|t| t.category)
    }

    /// First layer eligible to be shown next, scanning shallow to deep:
    /// a hidden layer 0 that would have tiles; any other hidden layer (an
    /// empty-state placeholder is allowed); or the hidden successor of a
    /// visible layer. `None` when every layer is exhausted.
    pub fn next_expandable_layer(&mut self) -> Option<usize> {
        for i in 0..self.max_layers {
            if !self.visible[i] {
                if i == 0 {
                    if !self.tiles_for_layer(0).is_empty() {
                        return Some(0);
                    }
                } else {
                    return Some(i);
                }
            } else if i + 1 < self.max_layers && !self.visible[i + 1] {
                return Some(i + 1);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ExplorationLayers {
        ExplorationLayers::default()
    }

    #[test]
    fn fresh_machine_is_empty() {
        let mut m = machine();
        assert!(m.visible_layers().iter().all(|v| !v));
        assert!(m.root_selection().is_none());
        assert!(m.tiles_for_layer(0).is_empty());
        assert_eq!(m.next_expandable_layer(), Some(1));
    }

    #[test]
    fn selecting_root_opens_only_layer_zero() {
        let mut m = machine();
        m.select_root("revenue");
        assert_eq!(m.root_selection(), Some("revenue"));
        assert_eq!(m.visible_layers(), &[true, false, false, false, false, false]);
        assert_eq!(m.root_category(), Some(Category::Revenue));
    }

    #[test]
    fn reselecting_root_toggles_off() {
        let mut m = machine();
        m.select_root("inventory");
        m.select_root("inventory");
        assert!(m.root_selection().is_none());
        assert!(m.visible_layers().iter().all(|v| !v));
        assert!(m.tiles_for_layer(0).is_empty());
    }

    #[test]
    fn root_change_clears_descendant_selections() {
        let mut m = machine();
        m.select_root("revenue");
        let first = m.tiles_for_layer(0)[0].id.clone();
        m.select_tile(&first, 0);
        m.select_root("shipments");
        assert!(m.active_selections().iter().all(|s| s.is_none()));
        assert_eq!(m.root_selection(), Some("shipments"));
        assert_eq!(m.root_category(), Some(Category::Shipping));
    }

    #[test]
    fn unknown_root_uses_default_category() {
        let mut m = machine();
        m.select_root("made-up-root");
        assert_eq!(m.root_category(), Some(Category::Revenue));
        assert_eq!(m.tiles_for_layer(0).len(), 4);
    }

    #[test]
    fn tile_selection_cascades_and_caps_visibility() {
        let mut m = machine();
        m.select_root("revenue");
        m.select_tile("a", 1);
        m.select_tile("b", 3);
        m.show_layer(4);
        m.show_layer(5);
        m.select_tile("c", 1);
        for i in 2..6 {
            assert!(m.active_tile_at(i).is_none(), "layer {}", i);
        }
        // Layers beyond 2 collapse; layers up to 2 keep their flags.
        assert!(!m.visible_layers()[3]);
        assert!(!m.visible_layers()[4]);
        assert!(!m.visible_layers()[5]);
    }

    #[test]
    fn tile_toggle_returns_slot_to_none() {
        let mut m = machine();
        m.select_root("revenue");
        m.select_tile("x", 2);
        assert_eq!(m.active_tile_at(2), Some("x"));
        m.select_tile("x", 2);
        assert!(m.active_tile_at(2).is_none());
    }

    #[test]
    fn out_of_range_operations_are_no_ops() {
        let mut m = machine();
        m.select_tile("x", 99);
        m.select_custom_query("q", 99);
        m.show_layer(99);
        m.hide_layer(99);
        assert!(m.tiles_for_layer(99).is_empty());
        assert!(m.active_selections().iter().all(|s| s.is_none()));
    }

    #[test]
    fn hide_layer_collapses_everything_beneath() {
        let mut m = machine();
        m.select_root("delivery");
        m.show_layer(1);
        m.show_layer(2);
        m.select_tile("t", 1);
        m.select_tile("u", 2);
        m.hide_layer(1);
        for i in 1..6 {
            assert!(!m.visible_layers()[i]);
            assert!(m.active_tile_at(i).is_none());
        }
        assert!(m.visible_layers()[0]);
    }

    #[test]
    fn layer_zero_tiles_are_scoped_to_the_root() {
        let mut m = machine();
        m.select_root("revenue");
        let tiles = m.tiles_for_layer(0);
        assert_eq!(tiles.len(), 4);
        for t in &tiles {
            assert!(t.id.starts_with("revenue-"), "{}", t.id);
            assert_eq!(t.color, "#22c55e");
        }
    }

    #[test]
    fn layer_zero_ignores_layer_zero_selection() {
        let mut m = machine();
        m.select_root("revenue");
        let before = m.tiles_for_layer(0);
        m.select_tile(&before[0].id.clone(), 0);
        assert_eq!(before, m.tiles_for_layer(0));
    }

    #[test]
    fn deeper_layers_need_a_parent() {
        let mut m = machine();
        m.select_root("revenue");
        assert!(m.tiles_for_layer(1).is_empty());
        let parent = m.tiles_for_layer(0)[0].id.clone();
        m.select_tile(&parent, 0);
        let children = m.tiles_for_layer(1);
        assert_eq!(children.len(), 4);
        for c in &children {
            assert!(c.id.starts_with(&parent), "{} under {}", c.id, parent);
        }
    }

    #[test]
    fn child_tiles_inherit_parent_category_without_parsing() {
        let mut m = machine();
        m.select_root("shipments");
        let parent = m.tiles_for_layer(0)[0].clone();
        assert_eq!(parent.category, Category::Shipping);
        m.select_tile(&parent.id, 0);
        for child in m.tiles_for_layer(1) {
            assert_eq!(child.category, Category::Shipping);
        }
    }

    #[test]
    fn repeated_reads_hit_the_cache() {
        let mut m = machine();
        m.select_root("inventory");
        let a = m.tiles_for_layer(0);
        let b = m.tiles_for_layer(0);
        assert_eq!(a, b);
        assert_eq!(m.cache.len(), 1);
    }

    #[test]
    fn custom_query_cascades_like_a_tile() {
        let mut m = machine();
        m.select_root("revenue");
        m.select_tile("deep", 3);
        m.select_custom_query("foo", 2);
        assert!(m.is_custom_query_selected(Some(2)));
        assert_eq!(m.custom_query_at(Some(2)), Some("foo"));
        assert_eq!(m.active_tile_at(2), Some(CUSTOM_QUERY_ID));
        for i in 3..6 {
            assert!(m.active_tile_at(i).is_none());
        }
    }

    #[test]
    fn custom_query_parent_generates_under_default_category() {
        let mut m = machine();
        m.select_root("shipments");
        m.select_custom_query("fleet anomalies", 0);
        let children = m.tiles_for_layer(1);
        assert_eq!(children.len(), 4);
        for c in &children {
            assert!(c.id.starts_with("custom-query-"), "{}", c.id);
            // Custom queries carry no category, so batches fall back to the
            // root's category.
            assert_eq!(c.category, Category::Shipping);
        }
    }

    #[test]
    fn root_custom_query_behaves_like_a_root_selection() {
        let mut m = machine();
        m.select_root("revenue");
        m.select_tile("x", 0);
        m.select_root_custom_query("q3 anomalies");
        assert_eq!(m.root_selection(), Some(CUSTOM_QUERY_ID));
        assert!(m.is_custom_query_selected(None));
        assert_eq!(m.custom_query_at(None), Some("q3 anomalies"));
        assert!(m.active_selections().iter().all(|s| s.is_none()));
        assert_eq!(m.visible_layers(), &[true, false, false, false, false, false]);
        let tiles = m.tiles_for_layer(0);
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].category, Category::Revenue);
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut m = machine();
        m.select_root("delivery");
        m.select_custom_query("q", 1);
        m.show_layer(2);
        m.reset();
        assert!(m.root_selection().is_none());
        assert!(m.visible_layers().iter().all(|v| !v));
        assert!(m.active_selections().iter().all(|s| s.is_none()));
        assert!(m.custom_query_at(Some(1)).is_none());
        assert_eq!(m.cache.len(), 0);
    }

    #[test]
    fn next_expandable_prefers_the_successor_of_a_visible_layer() {
        let mut m = machine();
        m.select_root("revenue");
        let first = m.tiles_for_layer(0)[0].id.clone();
        m.select_tile(&first, 0);
        assert_eq!(m.next_expandable_layer(), Some(1));
        m.show_layer(1);
        assert_eq!(m.next_expandable_layer(), Some(2));
    }

    #[test]
    fn next_expandable_returns_none_when_all_layers_open() {
        let mut m = machine();
        m.select_root("revenue");
        for i in 0..6 {
            m.show_layer(i);
        }
        assert_eq!(m.next_expandable_layer(), None);
    }

    #[test]
    fn events_record_each_transition() {
        let mut m = machine();
        m.select_root("revenue");
        m.select_tile("t", 0);
        m.select_tile("t", 0);
        m.show_layer(1);
        m.hide_layer(1);
        m.reset();
        let events = m.drain_events();
        assert_eq!(
            events,
            vec![
                ChangeEvent::RootSelected { id: "revenue".into() },
                ChangeEvent::TileSelected { layer: 0, id: "t".into() },
                ChangeEvent::TileDeselected { layer: 0 },
                ChangeEvent::LayerShown { layer: 1 },
                ChangeEvent::LayerHidden { layer: 1 },
                ChangeEvent::Reset,
            ]
        );
        assert!(m.drain_events().is_empty());
    }

    #[test]
    fn state_digest_tracks_selection_changes() {
        let mut m = machine();
        let empty = m.state_digest();
        m.select_root("revenue");
        let with_root = m.state_digest();
        assert_ne!(empty, with_root);
        m.select_root("revenue");
        assert_eq!(m.state_digest(), empty);
    }
}
