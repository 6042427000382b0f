//! Deterministic exploration-tile generator.
//!
//! `generate` is a pure function of its request: every field of every tile
//! is derived from seeded hashes of the request parameters, so the same
//! request always yields a byte-identical batch. The layer state machine
//! relies on this for its memoization cache and for stable re-renders.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category, COLORS, DESCRIPTIONS, ICONS};
use crate::seed;

// =============================================================================
// Types
// =============================================================================

/// Traffic-light health of a metric, weighted roughly 60/20/20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Good => "Good",
            Status::Warning => "Warning",
            Status::Critical => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::Good => "#22c55e",
            Status::Warning => "#f59e0b",
            Status::Critical => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub value: String,
    pub color: String,
}

/// Auxiliary structured payload attached to the first three tiles of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnhancedContent {
    Text { text: String, bullets: Vec<String> },
    Table { rows: Vec<TableRow> },
    Chart {
        title: String,
        chart_type: String,
        values: Vec<f64>,
        labels: Vec<String>,
    },
}

/// One generated node in the exploration hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationTile {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub value: String,
    pub change: String,
    pub is_positive: bool,
    pub icon: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_content: Option<EnhancedContent>,
}

/// Inputs scoping one generated batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRequest {
    pub category: Category,
    /// Depth tier, 1 = root. Selects the base-magnitude row.
    pub level: u32,
    pub count: usize,
    /// Depth-dependent label prefix, empty at the root.
    pub prefix: String,
    /// Identifier of the selection this batch hangs under; folded into the
    /// seed so sibling batches under different parents never collide.
    pub parent_id: String,
    /// When present, every tile in the batch inherits this color.
    pub parent_color: Option<String>,
}

impl Default for TileRequest {
    fn default() -> Self {
        Self {
            category: Category::default(),
            level: 1,
            count: 4,
            prefix: String::new(),
            parent_id: String::new(),
            parent_color: None,
        }
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Generate a batch of exploration tiles. Pure and deterministic: identical
/// requests return identical batches. `count == 0` yields an empty vec.
pub fn generate(req: &TileRequest) -> Vec<ExplorationTile> {
    let terms = req.category.terms();
    let mut tiles = Vec::with_capacity(req.count);

    let batch_seed = if req.parent_id.is_empty() {
        format!("root-{}-{}", req.category, req.level)
    } else {
        format!("{}-{}-{}-{}", req.parent_id, req.category, req.level, req.prefix)
    };

    // Five pre-drawn randoms per tile: value, change, change variance, icon,
    // color. Remaining draws are keyed by discriminator suffixes below.
    let randoms = seed::unit_seq(&batch_seed, req.count * 5);

    let base_row = catalog::base_values(req.level);

    for i in 0..req.count {
        let term = *seed::pick(&format!("{}-term-{}", batch_seed, i), terms);
        let base_value = *base_row.get(i).unwrap_or(&base_row[0]);

        let tile_variance = seed::unit(&format!("{}-variance-{}", batch_seed, i));
        let position_multiplier = 0.7 + tile_variance * 0.6;
        let random_multiplier = randoms[i * 5];
        let uniqueness_boost =
            seed::unit(&format!("{}-unique-{}-{}", batch_seed, i, term)) * 0.4;

        let value = (random_multiplier * base_value * position_multiplier
            * (1.0 + uniqueness_boost))
            .floor()
            + base_value * 0.05;

        let change_random = randoms[i * 5 + 1];
        let change_variance = randoms[i * 5 + 2] * 0.5;
        let change_value = (change_random - 0.5) * 20.0 * (1.0 + change_variance);
        let is_positive = change_value > 0.0;
        let change = format!(
            "{}{:.2}%",
            if is_positive { "+" } else { "" },
            change_value
        );

        let icon = ICONS[seed::index_from(randoms[i * 5 + 3], ICONS.len())];
        let color = match &req.parent_color {
            Some(c) => c.clone(),
            None if i == 0 => req.category.base_color().to_string(),
            None => COLORS[seed::index_from(randoms[i * 5 + 4], COLORS.len())].to_string(),
        };

        let description =
            DESCRIPTIONS[seed::index_from(tile_variance, DESCRIPTIONS.len())].to_string();

        let status = status_for(&format!("{}-status-{}", batch_seed, i));

        let formatted_value = format_value(req.category, term, value);
        let secondary_value =
            format_target(req.category, term, value, tile_variance, change_value, is_positive);

        let hours_ago =
            (seed::unit(&format!("{}-time-{}", batch_seed, i)) * 48.0).floor() as u64;
        let last_updated = relative_time(hours_ago);

        let id = if req.parent_id.is_empty() {
            format!("{}-{}-{}", req.category, term.to_lowercase(), i)
        } else {
            format!("{}-{}-{}", req.parent_id, term.to_lowercase(), i)
        };

        let title = if req.prefix.is_empty() {
            term.to_string()
        } else {
            format!("{} {}", req.prefix, term)
        };

        let enhanced_content = enhanced_content(
            i,
            term,
            &formatted_value,
            &secondary_value,
            &change,
            change_value,
            is_positive,
            status,
            &last_updated,
            &color,
            tile_variance,
        );

        tiles.push(ExplorationTile {
            id,
            category: req.category,
            title,
            value: formatted_value,
            change,
            is_positive,
            icon: icon.to_string(),
            color,
            description: Some(description),
            secondary_value: Some(secondary_value),
            status: Some(status),
            last_updated: Some(last_updated),
            enhanced_content,
        });
    }

    tiles
}

fn status_for(status_seed: &str) -> Status {
    // Weighted table: three good slots, one warning, one critical.
    const WEIGHTED: [Status; 5] = [
        Status::Good,
        Status::Good,
        Status::Good,
        Status::Warning,
        Status::Critical,
    ];
    *seed::pick(status_seed, &WEIGHTED)
}

fn is_duration_term(term: &str) -> bool {
    term.contains("Time") || term.contains("Speed")
}

fn is_ratio_term(term: &str) -> bool {
    term.contains("Rate") || term.contains("Efficiency")
}

/// Format a raw magnitude by category/term convention.
fn format_value(category: Category, term: &str, value: f64) -> String {
    if category == Category::Revenue && value > 1000.0 {
        format!("${:.1}K", value / 1000.0)
    } else if category == Category::Revenue {
        format!("${}", trim_fraction(value))
    } else if is_duration_term(term) {
        format!("{:.1} days", value / 1000.0)
    } else if is_ratio_term(term) {
        format!("{:.1}%", (value / 1000.0).min(99.9))
    } else {
        group_thousands((value / 100.0).floor())
    }
}

/// Target annotation shown under the main value.
fn format_target(
    category: Category,
    term: &str,
    value: f64,
    tile_variance: f64,
    change_value: f64,
    is_positive: bool,
) -> String {
    let target_multiplier = 1.05 + tile_variance * 0.1;
    if category == Category::Revenue {
        format!("Target: ${}K", (value * target_multiplier / 1000.0).floor())
    } else if is_duration_term(term) {
        format!("Target: {:.1} days", value / 1000.0 * 0.9)
    } else if is_ratio_term(term) {
        format!(
            "Target: {:.1}%",
            (value / 1000.0 * target_multiplier).min(100.0)
        )
    } else {
        format!(
            "vs Target: {}{}%",
            if is_positive { "+" } else { "" },
            change_value.floor()
        )
    }
}

/// Up to three decimals, trailing zeros dropped. Small revenue values keep
/// their cents instead of being truncated to a whole figure.
fn trim_fraction(n: f64) -> String {
    let s = format!("{:.3}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn relative_time(hours_ago: u64) -> String {
    if hours_ago == 0 {
        "Just now".to_string()
    } else if hours_ago < 24 {
        format!("{}h ago", hours_ago)
    } else {
        format!("{}d ago", hours_ago / 24)
    }
}

/// Group the integer part of `n` with comma separators; drops any fraction.
fn group_thousands(n: f64) -> String {
    let whole = n.trunc() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[allow(clippy::too_many_arguments)]
fn enhanced_content(
    ordinal: usize,
    term: &str,
    formatted_value: &str,
    secondary_value: &str,
    change: &str,
    change_value: f64,
    is_positive: bool,
    status: Status,
    last_updated: &str,
    color: &str,
    tile_variance: f64,
) -> Option<EnhancedContent> {
    let magnitude = change_value.abs();
    match ordinal {
        0 => Some(EnhancedContent::Text {
            text: format!(
                "This {} metric represents a critical performance indicator for your \
                 business operations. The current trend shows {} momentum with {:.1}% variance.",
                term.to_lowercase(),
                if is_positive { "positive" } else { "negative" },
                magnitude
            ),
            bullets: vec![
                format!(
                    "Current performance: {} expectations by {:.1}%",
                    if is_positive { "Above" } else { "Below" },
                    magnitude
                ),
                format!(
                    "Trend analysis: {} trending {}",
                    if is_positive { "Improvement" } else { "Decline" },
                    if magnitude > 5.0 { "strongly" } else { "moderately" }
                ),
                format!(
                    "Impact level: {} priority for immediate action",
                    match status {
                        Status::Good => "High",
                        Status::Warning => "Medium",
                        Status::Critical => "Low",
                    }
                ),
                format!(
                    "Forecast: {}",
                    if is_positive {
                        "Continued growth expected"
                    } else {
                        "Intervention recommended"
                    }
                ),
            ],
        }),
        1 => Some(EnhancedContent::Table {
            rows: vec![
                TableRow {
                    label: "Current".to_string(),
                    value: formatted_value.to_string(),
                    color: color.to_string(),
                },
                TableRow {
                    label: "Target".to_string(),
                    value: secondary_value
                        .split_once(": ")
                        .map(|(_, v)| v.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                    color: "#06b6d4".to_string(),
                },
                TableRow {
                    label: "Change".to_string(),
                    value: change.to_string(),
                    color: if is_positive { "#22c55e" } else { "#ef4444" }.to_string(),
                },
                TableRow {
                    label: "Status".to_string(),
                    value: status.label().to_string(),
                    color: status.color().to_string(),
                },
                TableRow {
                    label: "Updated".to_string(),
                    value: last_updated.to_string(),
                    color: "#6b7280".to_string(),
                },
            ],
        }),
        2 => Some(EnhancedContent::Chart {
            title: "Performance Trend".to_string(),
            chart_type: if tile_variance > 0.5 { "bar" } else { "line" }.to_string(),
            values: [0.8, 0.9, 1.0, 1.1, 1.0, 0.95, 1.0]
                .iter()
                .map(|v| v * magnitude + tile_variance * 5.0)
                .collect(),
            labels: (1..=7).map(|w| format!("W{}", w)).collect(),
        }),
        _ => None,
    }
}
