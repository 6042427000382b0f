//! Deterministic drill-down exploration engine for a logistics analytics
//! dashboard.
//!
//! Two halves: a pure seeded tile generator (`tiles` over `seed` and
//! `catalog`) that fabricates plausible metric tiles from identifiers alone,
//! and an exploration state machine (`layers`) tracking root selection,
//! per-layer selections, visibility, and a memoizing tile cache. Around them
//! sit authored starting content (`content`), the dynamic insights panel
//! (`insights`), the session breadcrumb trail (`trail`), and SQLite-backed
//! favorites (`favorites`).

pub mod catalog;
pub mod config;
pub mod content;
pub mod favorites;
pub mod insights;
pub mod layers;
pub mod logging;
pub mod seed;
pub mod tiles;
pub mod trail;
