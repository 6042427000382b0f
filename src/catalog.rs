//! Static category tables: terms, palettes, magnitudes, depth prefixes.
//!
//! All values here are authored content, not configuration. The generator
//! derives everything else from these tables plus a seed.

use serde::{Deserialize, Serialize};

/// Metric categories the exploration hierarchy is organized around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Revenue,
    Shipping,
    Inventory,
    Performance,
    Customers,
    Operations,
}

pub const ALL_CATEGORIES: [Category; 6] = [
    Category::Revenue,
    Category::Shipping,
    Category::Inventory,
    Category::Performance,
    Category::Customers,
    Category::Operations,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Revenue => "revenue",
            Category::Shipping => "shipping",
            Category::Inventory => "inventory",
            Category::Performance => "performance",
            Category::Customers => "customers",
            Category::Operations => "operations",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        ALL_CATEGORIES.iter().copied().find(|c| c.as_str() == s)
    }

    /// Candidate metric terms for this category.
    pub fn terms(&self) -> &'static [&'static str] {
        match self {
            Category::Revenue => &[
                "Revenue", "Sales", "Income", "Profit", "Earnings", "Growth", "ROI", "Margin",
                "Turnover", "Yield", "Returns", "Gains",
            ],
            Category::Shipping => &[
                "Shipping", "Delivery", "Transport", "Logistics", "Routes", "Carriers",
                "Tracking", "Freight", "Distribution", "Transit", "Dispatch", "Fulfillment",
            ],
            Category::Inventory => &[
                "Inventory", "Stock", "Warehouse", "Storage", "Products", "SKU", "Turnover",
                "Supplies", "Assets", "Holdings", "Reserves", "Materials",
            ],
            Category::Performance => &[
                "Performance", "Metrics", "KPI", "Analytics", "Efficiency", "Quality", "Speed",
                "Productivity", "Output", "Throughput", "Excellence", "Optimization",
            ],
            Category::Customers => &[
                "Customers", "Users", "Retention", "Satisfaction", "Acquisition", "Support",
                "Engagement", "Loyalty", "Experience", "Feedback", "Relations", "Service",
            ],
            Category::Operations => &[
                "Operations", "Process", "Workflow", "Automation", "Tasks", "Resources",
                "Procedures", "Systems", "Management", "Coordination", "Execution", "Control",
            ],
        }
    }

    /// Canonical color inherited by the first tile of an uncolored batch.
    pub fn base_color(&self) -> &'static str {
        match self {
            Category::Revenue => "#22c55e",
            Category::Shipping => "#8b5cf6",
            Category::Inventory => "#f59e0b",
            Category::Performance => "#06b6d4",
            Category::Customers => "#ef4444",
            Category::Operations => "#3b82f6",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ICONS: [&str; 20] = [
    "AttachMoney", "LocalShipping", "Inventory", "Speed", "TrendingUp",
    "LocationOn", "Category", "Assessment", "CheckCircle", "Route",
    "Refresh", "Warning", "ReportProblem", "Timeline", "Analytics",
    "BarChart", "PieChart", "ShowChart", "TrendingDown", "AccountBalance",
];

pub const COLORS: [&str; 15] = [
    "#22c55e", "#8b5cf6", "#f59e0b", "#06b6d4", "#ef4444",
    "#3b82f6", "#f97316", "#84cc16", "#ec4899", "#6366f1",
    "#10b981", "#f59e0b", "#14b8a6", "#8b5cf6", "#f43f5e",
];

pub const DESCRIPTIONS: [&str; 8] = [
    "Key performance indicator tracking business success",
    "Critical metric for operational efficiency",
    "Strategic measurement for growth analysis",
    "Essential data point for decision making",
    "Important benchmark for performance review",
    "Advanced analytics for strategic insights",
    "Real-time monitoring of business health",
    "Comprehensive view of operational metrics",
];

/// Per-depth base magnitudes, one row of four per level. Deeper levels get
/// proportionally smaller bases so values never cluster across depths.
const LEVEL_BASE_VALUES: [[f64; 4]; 6] = [
    [1_200_000.0, 950_000.0, 1_100_000.0, 850_000.0], // level 1, root tier
    [120_000.0, 95_000.0, 110_000.0, 85_000.0],       // level 2
    [12_000.0, 9_500.0, 11_000.0, 8_500.0],           // level 3
    [1_200.0, 950.0, 1_100.0, 850.0],                 // level 4
    [120.0, 95.0, 110.0, 85.0],                       // level 5
    [12.0, 9.5, 11.0, 8.5],                           // level 6
];

const FALLBACK_BASE_VALUES: [f64; 4] = [1_000.0, 800.0, 900.0, 700.0];

/// Base magnitude row for a depth. Levels outside 1..=6 get the fallback row.
pub fn base_values(level: u32) -> &'static [f64; 4] {
    match level {
        1..=6 => &LEVEL_BASE_VALUES[(level - 1) as usize],
        _ => &FALLBACK_BASE_VALUES,
    }
}

const DEPTH_PREFIXES: [&str; 7] = [
    "", "Detailed", "Advanced", "Deep", "Granular", "Micro", "Ultra",
];

/// Label prefix for a layer index; beyond the authored list falls back to a
/// generic depth label.
pub fn depth_prefix(layer_index: usize) -> String {
    match DEPTH_PREFIXES.get(layer_index) {
        Some(p) => (*p).to_string(),
        None => format!("Level {}", layer_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_twelve_terms() {
        for c in ALL_CATEGORIES {
            assert_eq!(c.terms().len(), 12, "{}", c);
        }
    }

    #[test]
    fn parse_round_trips() {
        for c in ALL_CATEGORIES {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
        assert_eq!(Category::parse("shipments"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn default_category_is_revenue() {
        assert_eq!(Category::default(), Category::Revenue);
    }

    #[test]
    fn base_values_shrink_with_depth() {
        for level in 1..6 {
            assert!(base_values(level)[0] > base_values(level + 1)[0]);
        }
        assert_eq!(base_values(0), &FALLBACK_BASE_VALUES);
        assert_eq!(base_values(7), &FALLBACK_BASE_VALUES);
    }

    #[test]
    fn depth_prefix_falls_back_past_the_list() {
        assert_eq!(depth_prefix(0), "");
        assert_eq!(depth_prefix(1), "Detailed");
        assert_eq!(depth_prefix(6), "Ultra");
        assert_eq!(depth_prefix(7), "Level 7");
    }
}
