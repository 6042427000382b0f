//! Environment-driven configuration.

use crate::catalog::Category;

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of drill-down layers beneath the root.
    pub max_layers: usize,
    /// Tiles produced per generated batch.
    pub tiles_per_batch: usize,
    /// Category used when a selection carries no resolvable category
    /// (custom queries, unknown root ids).
    pub default_category: Category,
    /// Delay before the insights panel recomputes after a state change.
    pub insights_debounce_ms: u64,
    /// SQLite database path for favorite insights.
    pub favorites_db: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_layers: 6,
            tiles_per_batch: 4,
            default_category: Category::Revenue,
            insights_debounce_ms: 800,
            favorites_db: "./favorites.sqlite".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_layers: std::env::var("MAX_LAYERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_layers),
            tiles_per_batch: std::env::var("TILES_PER_BATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tiles_per_batch),
            default_category: std::env::var("DEFAULT_CATEGORY")
                .ok()
                .and_then(|v| Category::parse(&v))
                .unwrap_or(defaults.default_category),
            insights_debounce_ms: std::env::var("INSIGHTS_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.insights_debounce_ms),
            favorites_db: std::env::var("FAVORITES_DB")
                .unwrap_or(defaults.favorites_db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = Config::default();
        assert_eq!(cfg.max_layers, 6);
        assert_eq!(cfg.tiles_per_batch, 4);
        assert_eq!(cfg.default_category, Category::Revenue);
        assert_eq!(cfg.insights_debounce_ms, 800);
    }

    // Exercises every env var in one test so parallel test runs never race
    // on the shared process environment.
    #[test]
    fn from_env_falls_back_on_garbage_and_honors_valid_values() {
        std::env::set_var("MAX_LAYERS", "not-a-number");
        std::env::set_var("TILES_PER_BATCH", "-4");
        std::env::set_var("DEFAULT_CATEGORY", "bogus");
        std::env::set_var("INSIGHTS_DEBOUNCE_MS", "");
        std::env::set_var("FAVORITES_DB", "/tmp/alt.sqlite");

        let cfg = Config::from_env();
        let defaults = Config::default();
        assert_eq!(cfg.max_layers, defaults.max_layers);
        assert_eq!(cfg.tiles_per_batch, defaults.tiles_per_batch);
        assert_eq!(cfg.default_category, defaults.default_category);
        assert_eq!(cfg.insights_debounce_ms, defaults.insights_debounce_ms);
        assert_eq!(cfg.favorites_db, "/tmp/alt.sqlite");

        std::env::set_var("MAX_LAYERS", "8");
        std::env::set_var("DEFAULT_CATEGORY", "inventory");
        let cfg = Config::from_env();
        assert_eq!(cfg.max_layers, 8);
        assert_eq!(cfg.default_category, Category::Inventory);

        for var in [
            "MAX_LAYERS",
            "TILES_PER_BATCH",
            "DEFAULT_CATEGORY",
            "INSIGHTS_DEBOUNCE_MS",
            "FAVORITES_DB",
        ] {
            std::env::remove_var(var);
        }
    }
}
