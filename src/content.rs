//! Hand-authored exploration seed content.
//!
//! The root level and its four branches are fixed editorial content, not
//! generated. The root tiles double as the registry the layer machine uses
//! to resolve a root selection's category and inherited color.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::Category;
use crate::insights::{Insight, InsightKind};
use crate::tiles::{EnhancedContent, ExplorationTile, Status, TableRow};

/// Fixed left/right insight pair attached to an authored level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInsights {
    pub left: Insight,
    pub right: Insight,
}

/// A named node in the static hierarchy: authored tiles plus two insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationLevel {
    pub tiles: Vec<ExplorationTile>,
    pub insights: LevelInsights,
}

fn authored_tile(
    id: &str,
    category: Category,
    title: &str,
    value: &str,
    change: &str,
    is_positive: bool,
    icon: &str,
    color: &str,
) -> ExplorationTile {
    ExplorationTile {
        id: id.to_string(),
        category,
        title: title.to_string(),
        value: value.to_string(),
        change: change.to_string(),
        is_positive,
        icon: icon.to_string(),
        color: color.to_string(),
        description: None,
        secondary_value: None,
        status: None,
        last_updated: None,
        enhanced_content: None,
    }
}

fn root_level() -> ExplorationLevel {
    let mut revenue = authored_tile(
        "revenue",
        Category::Revenue,
        "Monthly Revenue",
        "$847,265.00",
        "+4.85%",
        true,
        "AttachMoney",
        "#22c55e",
    );
    revenue.description =
        Some("Total revenue generated this month across all channels".to_string());
    revenue.secondary_value = Some("Target: $900K".to_string());
    revenue.status = Some(Status::Good);
    revenue.last_updated = Some("2h ago".to_string());
    revenue.enhanced_content = Some(EnhancedContent::Text {
        text: "Revenue performance has been consistently strong this quarter, driven by \
               increased customer acquisition and higher average order values. Our growth \
               strategy is working effectively."
            .to_string(),
        bullets: vec![
            "Online sales increased by 12% month-over-month".to_string(),
            "New customer acquisition up 18%".to_string(),
            "Average order value improved by 8%".to_string(),
            "Customer retention rate at 94%".to_string(),
        ],
    });

    let mut shipments = authored_tile(
        "shipments",
        Category::Shipping,
        "Active Shipments",
        "2,847",
        "+2.02%",
        true,
        "LocalShipping",
        "#8b5cf6",
    );
    shipments.description = Some("Currently active shipments in transit worldwide".to_string());
    shipments.secondary_value = Some("Target: 3,000".to_string());
    shipments.status = Some(Status::Warning);
    shipments.last_updated = Some("1h ago".to_string());
    shipments.enhanced_content = Some(EnhancedContent::Table {
        rows: vec![
            TableRow { label: "In Transit".into(), value: "2,247".into(), color: "#22c55e".into() },
            TableRow { label: "Processing".into(), value: "387".into(), color: "#f59e0b".into() },
            TableRow { label: "Delayed".into(), value: "213".into(), color: "#ef4444".into() },
            TableRow { label: "Next Day".into(), value: "1,890".into(), color: "#06b6d4".into() },
            TableRow { label: "International".into(), value: "357".into(), color: "#8b5cf6".into() },
        ],
    });

    let mut inventory = authored_tile(
        "inventory",
        Category::Inventory,
        "Inventory Value",
        "$1,285,420",
        "+3.74%",
        true,
        "Inventory",
        "#f59e0b",
    );
    inventory.description =
        Some("Total value of current inventory across all locations".to_string());
    inventory.secondary_value = Some("Target: $1.2M".to_string());
    inventory.status = Some(Status::Good);
    inventory.last_updated = Some("30m ago".to_string());
    inventory.enhanced_content = Some(EnhancedContent::Chart {
        title: "Inventory Trends (Last 7 Days)".to_string(),
        chart_type: "line".to_string(),
        values: vec![1200.0, 1150.0, 1180.0, 1220.0, 1250.0, 1280.0, 1285.0],
        labels: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    });

    let mut delivery = authored_tile(
        "delivery",
        Category::Performance,
        "Avg Delivery Time",
        "2.4 days",
        "-1.24%",
        true,
        "Speed",
        "#06b6d4",
    );
    delivery.description = Some("Average time from order to customer delivery".to_string());
    delivery.secondary_value = Some("Target: 2.0 days".to_string());
    delivery.status = Some(Status::Warning);
    delivery.last_updated = Some("45m ago".to_string());
    delivery.enhanced_content = Some(EnhancedContent::Chart {
        title: "Delivery Performance by Region".to_string(),
        chart_type: "bar".to_string(),
        values: vec![2.1, 2.8, 1.9, 2.6, 2.3, 2.0, 2.4],
        labels: ["NA", "EU", "AS", "SA", "AF", "OC", "AVG"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    });

    ExplorationLevel {
        tiles: vec![revenue, shipments, inventory, delivery],
        insights: LevelInsights {
            left: Insight::new(
                "Activity Breakdown",
                InsightKind::Chart,
                json!({
                    "type": "donut",
                    "values": [35, 25, 20, 20],
                    "labels": ["Shipments", "Warehousing", "Last Mile", "Returns"],
                    "colors": ["#22c55e", "#8b5cf6", "#f59e0b", "#ef4444"],
                }),
            ),
            right: Insight::new(
                "Monthly Operations",
                InsightKind::Chart,
                json!({
                    "type": "bar",
                    "values": [85, 92, 78, 95, 88, 75, 100],
                    "labels": ["Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
                }),
            ),
        },
    }
}

fn revenue_branch() -> ExplorationLevel {
    ExplorationLevel {
        tiles: vec![
            authored_tile("revenue-trends", Category::Revenue, "Revenue Trends", "+15.2%", "Growth Rate", true, "TrendingUp", "#22c55e"),
            authored_tile("revenue-regions", Category::Revenue, "Regional Revenue", "12 Regions", "Top: North America", true, "LocationOn", "#22c55e"),
            authored_tile("revenue-products", Category::Revenue, "Product Revenue", "247 Products", "Electronics leading", true, "Category", "#22c55e"),
            authored_tile("revenue-forecast", Category::Revenue, "Revenue Forecast", "$1.2M", "Next month projection", true, "Assessment", "#22c55e"),
        ],
        insights: LevelInsights {
            left: Insight::new(
                "Revenue Growth Pattern",
                InsightKind::Chart,
                json!({
                    "type": "line",
                    "values": [620, 732, 701, 734, 1090, 1130, 1210, 1180, 1340, 1450, 1320, 1520],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
                }),
            ),
            right: Insight::new(
                "Revenue Composition",
                InsightKind::Metric,
                json!({
                    "primary": "$298.45",
                    "label": "Average Order Value",
                    "breakdown": [
                        { "label": "Product Sales", "value": "75%", "color": "#22c55e" },
                        { "label": "Shipping Fees", "value": "15%", "color": "#8b5cf6" },
                        { "label": "Other", "value": "10%", "color": "#f59e0b" },
                    ],
                }),
            ),
        },
    }
}

fn shipments_branch() -> ExplorationLevel {
    ExplorationLevel {
        tiles: vec![
            authored_tile("shipment-status", Category::Shipping, "Shipment Status", "94.2%", "On-time delivery", true, "CheckCircle", "#8b5cf6"),
            authored_tile("shipment-routes", Category::Shipping, "Active Routes", "156", "12 new this month", true, "Route", "#8b5cf6"),
            authored_tile("shipment-carriers", Category::Shipping, "Carrier Performance", "8 Partners", "FedEx leading 99.1%", true, "LocalShipping", "#8b5cf6"),
            authored_tile("shipment-costs", Category::Shipping, "Shipping Costs", "$127,450", "-3.2% vs last month", true, "AttachMoney", "#8b5cf6"),
        ],
        insights: LevelInsights {
            left: Insight::new(
                "Delivery Performance",
                InsightKind::Chart,
                json!({
                    "type": "gauge",
                    "value": 94.2,
                    "max": 100,
                    "label": "On-time Delivery Rate",
                }),
            ),
            right: Insight::new(
                "Shipment Volume Trends",
                InsightKind::Chart,
                json!({
                    "type": "area",
                    "values": [1200, 1450, 1380, 1620, 1780, 1650, 1890],
                    "labels": ["Week 1", "Week 2", "Week 3", "Week 4", "Week 5", "Week 6", "Week 7"],
                }),
            ),
        },
    }
}

fn inventory_branch() -> ExplorationLevel {
    ExplorationLevel {
        tiles: vec![
            authored_tile("inventory-levels", Category::Inventory, "Stock Levels", "89.3%", "Optimal range", true, "Inventory", "#f59e0b"),
            authored_tile("inventory-turnover", Category::Inventory, "Inventory Turnover", "6.8x", "Annual rate", true, "Refresh", "#f59e0b"),
            authored_tile("inventory-categories", Category::Inventory, "Product Categories", "24", "Electronics 42%", true, "Category", "#f59e0b"),
            authored_tile("inventory-alerts", Category::Inventory, "Stock Alerts", "7", "Low stock items", false, "Warning", "#f59e0b"),
        ],
        insights: LevelInsights {
            left: Insight::new(
                "Inventory Distribution",
                InsightKind::Chart,
                json!({
                    "type": "treemap",
                    "data": [
                        { "name": "Electronics", "value": 42, "color": "#22c55e" },
                        { "name": "Clothing", "value": 28, "color": "#8b5cf6" },
                        { "name": "Home & Garden", "value": 18, "color": "#f59e0b" },
                        { "name": "Sports", "value": 12, "color": "#06b6d4" },
                    ],
                }),
            ),
            right: Insight::new(
                "Stock Movement",
                InsightKind::Metric,
                json!({
                    "primary": "2,847",
                    "label": "Items in Stock",
                    "breakdown": [
                        { "label": "High Stock", "value": "1,890", "color": "#22c55e" },
                        { "label": "Medium Stock", "value": "745", "color": "#f59e0b" },
                        { "label": "Low Stock", "value": "212", "color": "#ef4444" },
                    ],
                }),
            ),
        },
    }
}

fn delivery_branch() -> ExplorationLevel {
    ExplorationLevel {
        tiles: vec![
            authored_tile("delivery-performance", Category::Performance, "Delivery Performance", "96.8%", "Success rate", true, "CheckCircle", "#06b6d4"),
            authored_tile("delivery-speed", Category::Performance, "Delivery Speed", "2.1 days", "Average time", true, "Speed", "#06b6d4"),
            authored_tile("delivery-zones", Category::Performance, "Delivery Zones", "47", "Coverage areas", true, "LocationOn", "#06b6d4"),
            authored_tile("delivery-issues", Category::Performance, "Delivery Issues", "23", "This month", false, "ReportProblem", "#06b6d4"),
        ],
        insights: LevelInsights {
            left: Insight::new(
                "Delivery Time Distribution",
                InsightKind::Chart,
                json!({
                    "type": "histogram",
                    "values": [15, 35, 28, 18, 4],
                    "labels": ["1 day", "2 days", "3 days", "4 days", "5+ days"],
                }),
            ),
            right: Insight::new(
                "Route Efficiency",
                InsightKind::Metric,
                json!({
                    "primary": "87.3%",
                    "label": "Route Optimization",
                    "breakdown": [
                        { "label": "Optimal Routes", "value": "89%", "color": "#22c55e" },
                        { "label": "Good Routes", "value": "8%", "color": "#f59e0b" },
                        { "label": "Poor Routes", "value": "3%", "color": "#ef4444" },
                    ],
                }),
            ),
        },
    }
}

struct Tree {
    root: ExplorationLevel,
    revenue: ExplorationLevel,
    shipments: ExplorationLevel,
    inventory: ExplorationLevel,
    delivery: ExplorationLevel,
}

fn tree() -> &'static Tree {
    static TREE: OnceLock<Tree> = OnceLock::new();
    TREE.get_or_init(|| Tree {
        root: root_level(),
        revenue: revenue_branch(),
        shipments: shipments_branch(),
        inventory: inventory_branch(),
        delivery: delivery_branch(),
    })
}

/// The authored root level: four top-level metric tiles plus insights.
pub fn root() -> &'static ExplorationLevel {
    &tree().root
}

/// Look up an authored level by exploration path. Empty path or an unknown
/// key resolves to the root level.
pub fn level(path: &[&str]) -> &'static ExplorationLevel {
    let t = tree();
    match path.last() {
        None => &t.root,
        Some(&"revenue") => &t.revenue,
        Some(&"shipments") => &t.shipments,
        Some(&"inventory") => &t.inventory,
        Some(&"delivery") => &t.delivery,
        Some(_) => &t.root,
    }
}

/// Resolve a root selection id to its explicit category and canonical color.
pub fn root_tile(id: &str) -> Option<&'static ExplorationTile> {
    root().tiles.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_four_tiles_with_explicit_categories() {
        let tiles = &root().tiles;
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].category, Category::Revenue);
        assert_eq!(tiles[1].category, Category::Shipping);
        assert_eq!(tiles[2].category, Category::Inventory);
        assert_eq!(tiles[3].category, Category::Performance);
    }

    #[test]
    fn root_tile_colors_match_category_base_colors() {
        for tile in &root().tiles {
            assert_eq!(tile.color, tile.category.base_color(), "{}", tile.id);
        }
    }

    #[test]
    fn unknown_paths_fall_back_to_root() {
        assert_eq!(level(&[]), root());
        assert_eq!(level(&["nonsense"]), root());
        assert_eq!(level(&["revenue"]).tiles[0].id, "revenue-trends");
        assert_eq!(level(&["delivery"]).tiles[1].id, "delivery-speed");
    }

    #[test]
    fn root_tile_lookup() {
        assert!(root_tile("shipments").is_some());
        assert!(root_tile("custom-query").is_none());
        assert_eq!(root_tile("delivery").unwrap().category, Category::Performance);
    }
}
