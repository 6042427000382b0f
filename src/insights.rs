//! Dynamic insight panels derived from the exploration state.
//!
//! The four-quadrant insight set shown next to the tile grid is picked from
//! an authored pool, keyed by a hash of the full exploration state, so the
//! same drill-down path always surfaces the same panels. Recomputation is
//! gated by a fixed-delay debouncer; the panel is display-only and carries
//! no correctness obligation.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::layers::Selection;
use crate::seed;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    Chart,
    Metric,
    AiText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub kind: InsightKind,
    pub data: Value,
}

impl Insight {
    pub fn new(title: &str, kind: InsightKind, data: Value) -> Self {
        Self { title: title.to_string(), kind, data }
    }
}

/// The four panels around the exploration grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub top_left: Insight,
    pub top_right: Insight,
    pub bottom_left: Insight,
    pub bottom_right: Insight,
}

// =============================================================================
// Authored pool
// =============================================================================

fn chart(title: &str, data: Value) -> Insight {
    Insight::new(title, InsightKind::Chart, data)
}

fn metric(title: &str, data: Value) -> Insight {
    Insight::new(title, InsightKind::Metric, data)
}

fn ai_text(title: &str, lines: &[&str]) -> Insight {
    Insight::new(title, InsightKind::AiText, json!({ "insights": lines }))
}

fn build_pool() -> Vec<InsightSet> {
    vec![
        // Performance analytics
        InsightSet {
            top_left: chart(
                "Performance Trends",
                json!({
                    "type": "bar",
                    "values": [85, 92, 78, 95, 88, 75, 100],
                    "labels": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                }),
            ),
            top_right: metric(
                "Key Performance Metrics",
                json!({
                    "primary": "94.2%",
                    "label": "Overall Efficiency",
                    "breakdown": [
                        { "label": "Processing Speed", "value": "97%", "color": "#22c55e" },
                        { "label": "Accuracy Rate", "value": "94%", "color": "#06b6d4" },
                        { "label": "Customer Satisfaction", "value": "91%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "AI Performance Analysis",
                &[
                    "Performance peaked on Thursday with 95% efficiency, indicating optimal resource allocation during mid-week operations.",
                    "The 25% dip on Saturday suggests opportunity for weekend process optimization.",
                    "Current trend shows 12% improvement over last month, driven by enhanced processing speed protocols.",
                    "Recommend maintaining Thursday operational patterns for consistent high performance.",
                ],
            ),
            bottom_right: chart(
                "Efficiency Distribution",
                json!({
                    "type": "donut",
                    "values": [45, 35, 15, 5],
                    "labels": ["Optimal", "Good", "Average", "Poor"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
        },
        // Regional analytics
        InsightSet {
            top_left: chart(
                "Regional Distribution",
                json!({
                    "type": "donut",
                    "values": [35, 28, 18, 12, 7],
                    "labels": ["North America", "Europe", "Asia Pacific", "Latin America", "Other"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#8b5cf6", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Market Penetration",
                json!({
                    "primary": "$2.4M",
                    "label": "Total Market Value",
                    "breakdown": [
                        { "label": "Primary Markets", "value": "$1.8M", "color": "#22c55e" },
                        { "label": "Secondary Markets", "value": "$450K", "color": "#06b6d4" },
                        { "label": "Emerging Markets", "value": "$150K", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Regional Growth Opportunities",
                &[
                    "North America shows strong 35% market share with potential for 15% growth in Q4.",
                    "Asia Pacific presents the highest growth opportunity with 28% untapped market potential.",
                    "Europe maintains steady performance but could benefit from localized product offerings.",
                    "Latin America shows emerging demand patterns that align with our core competencies.",
                ],
            ),
            bottom_right: chart(
                "Market Trends",
                json!({
                    "type": "bar",
                    "values": [120, 135, 118, 142, 158, 145, 165],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Customer behavior
        InsightSet {
            top_left: chart(
                "Customer Engagement",
                json!({
                    "type": "donut",
                    "values": [40, 30, 20, 10],
                    "labels": ["Highly Engaged", "Moderately Engaged", "Low Engagement", "Inactive"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Customer Metrics",
                json!({
                    "primary": "12,847",
                    "label": "Active Customers",
                    "breakdown": [
                        { "label": "New Customers", "value": "2,156", "color": "#22c55e" },
                        { "label": "Returning Customers", "value": "8,934", "color": "#06b6d4" },
                        { "label": "VIP Customers", "value": "1,757", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Customer Behavior Insights",
                &[
                    "Highly engaged customers show 65% higher lifetime value and 40% better retention rates.",
                    "New customer acquisition cost decreased by 18% through optimized onboarding processes.",
                    "VIP customers represent 14% of base but contribute 38% of total revenue.",
                    "Customer engagement scores correlate strongly with seasonal purchasing patterns.",
                ],
            ),
            bottom_right: chart(
                "Engagement Timeline",
                json!({
                    "type": "bar",
                    "values": [68, 72, 65, 78, 82, 75, 85],
                    "labels": ["Week 1", "Week 2", "Week 3", "Week 4", "Week 5", "Week 6", "Week 7"],
                }),
            ),
        },
        // Quality analysis
        InsightSet {
            top_left: chart(
                "Quality Distribution",
                json!({
                    "type": "donut",
                    "values": [65, 25, 8, 2],
                    "labels": ["Excellent", "Good", "Average", "Poor"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Quality Score",
                json!({
                    "primary": "4.2/5.0",
                    "label": "Average Quality Rating",
                    "breakdown": [
                        { "label": "5-Star Ratings", "value": "45%", "color": "#22c55e" },
                        { "label": "4-Star Ratings", "value": "35%", "color": "#06b6d4" },
                        { "label": "3-Star Ratings", "value": "15%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Quality Improvement Recommendations",
                &[
                    "Quality scores improved 12% after implementing automated quality checkpoints.",
                    "Poor ratings (2%) mainly stem from delivery issues rather than product quality.",
                    "Excellent ratings correlate with products processed during optimal capacity windows.",
                    "Recommendation: Focus on consistency training for 8% average-rated processes.",
                ],
            ),
            bottom_right: chart(
                "Quality Trends",
                json!({
                    "type": "bar",
                    "values": [3.8, 4.0, 3.9, 4.1, 4.3, 4.2, 4.4],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Cost efficiency
        InsightSet {
            top_left: chart(
                "Cost Breakdown",
                json!({
                    "type": "bar",
                    "values": [45, 25, 15, 10, 5],
                    "labels": ["Operations", "Labor", "Materials", "Transport", "Other"],
                }),
            ),
            top_right: metric(
                "Cost Efficiency",
                json!({
                    "primary": "$3.24",
                    "label": "Cost per Unit",
                    "breakdown": [
                        { "label": "Direct Costs", "value": "$2.45", "color": "#22c55e" },
                        { "label": "Indirect Costs", "value": "$0.59", "color": "#06b6d4" },
                        { "label": "Overhead", "value": "$0.20", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Cost Optimization Analysis",
                &[
                    "Operations costs dominate at 45% but show 8% reduction potential through automation.",
                    "Labor costs stable but could benefit from cross-training initiatives.",
                    "Material costs fluctuate seasonally - hedging strategies could reduce volatility by 12%.",
                    "Transport optimization could yield $0.15 per unit savings with route consolidation.",
                ],
            ),
            bottom_right: chart(
                "Cost Trends",
                json!({
                    "type": "bar",
                    "values": [3.45, 3.38, 3.52, 3.24, 3.18, 3.31, 3.15],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Risk assessment
        InsightSet {
            top_left: chart(
                "Risk Assessment",
                json!({
                    "type": "donut",
                    "values": [60, 25, 10, 5],
                    "labels": ["Low Risk", "Medium Risk", "High Risk", "Critical Risk"],
                    "colors": ["#22c55e", "#f59e0b", "#ff6b35", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Risk Factors",
                json!({
                    "primary": "2.3/10",
                    "label": "Risk Score",
                    "breakdown": [
                        { "label": "Operational Risk", "value": "1.8", "color": "#22c55e" },
                        { "label": "Financial Risk", "value": "2.1", "color": "#f59e0b" },
                        { "label": "Market Risk", "value": "3.2", "color": "#ff6b35" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Risk Mitigation Strategy",
                &[
                    "Overall risk profile is low with 60% of operations in low-risk category.",
                    "Market risk elevated due to seasonal demand fluctuations - diversification recommended.",
                    "Financial risk well-managed with strong cash flow and reserve ratios.",
                    "Operational risk decreased 15% through improved process standardization.",
                ],
            ),
            bottom_right: chart(
                "Risk Timeline",
                json!({
                    "type": "bar",
                    "values": [2.8, 2.5, 2.7, 2.3, 2.1, 2.4, 2.0],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Innovation pipeline
        InsightSet {
            top_left: chart(
                "Innovation Pipeline",
                json!({
                    "type": "bar",
                    "values": [25, 35, 20, 15, 5],
                    "labels": ["Concept", "Development", "Testing", "Launch", "Scale"],
                }),
            ),
            top_right: metric(
                "Innovation Metrics",
                json!({
                    "primary": "23",
                    "label": "Active Projects",
                    "breakdown": [
                        { "label": "High Priority", "value": "8", "color": "#22c55e" },
                        { "label": "Medium Priority", "value": "12", "color": "#06b6d4" },
                        { "label": "Low Priority", "value": "3", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Innovation Intelligence",
                &[
                    "Development stage shows highest concentration with 35% of projects progressing well.",
                    "Success rate from concept to launch improved to 68% with new validation frameworks.",
                    "High-priority projects have 85% faster time-to-market than medium priority.",
                    "Innovation pipeline generates 22% of new revenue streams annually.",
                ],
            ),
            bottom_right: chart(
                "Project Success Rate",
                json!({
                    "type": "bar",
                    "values": [45, 52, 48, 65, 68, 61, 72],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Time-based analysis
        InsightSet {
            top_left: chart(
                "Hourly Activity Pattern",
                json!({
                    "type": "bar",
                    "values": [15, 25, 45, 65, 85, 95, 88, 75, 60, 40, 30, 20],
                    "labels": ["6AM", "7AM", "8AM", "9AM", "10AM", "11AM", "12PM", "1PM", "2PM", "3PM", "4PM", "5PM"],
                }),
            ),
            top_right: metric(
                "Peak Performance Hours",
                json!({
                    "primary": "11:00 AM",
                    "label": "Peak Activity Time",
                    "breakdown": [
                        { "label": "Morning Peak", "value": "9-11 AM", "color": "#22c55e" },
                        { "label": "Afternoon Peak", "value": "1-3 PM", "color": "#06b6d4" },
                        { "label": "Evening Activity", "value": "4-6 PM", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Temporal Efficiency Analysis",
                &[
                    "Peak efficiency occurs at 11 AM with 95% capacity utilization.",
                    "Morning ramp-up takes 3 hours to reach optimal performance levels.",
                    "Afternoon performance maintains 75% of peak with gradual decline.",
                    "Opportunity to extend peak hours through staggered scheduling could increase daily output by 12%.",
                ],
            ),
            bottom_right: chart(
                "Weekly Pattern",
                json!({
                    "type": "bar",
                    "values": [78, 85, 92, 88, 82, 65, 45],
                    "labels": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                }),
            ),
        },
        // Supply chain intelligence
        InsightSet {
            top_left: chart(
                "Supply Chain Health",
                json!({
                    "type": "donut",
                    "values": [55, 30, 12, 3],
                    "labels": ["Optimal", "Good", "Needs Attention", "Critical"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Supply Metrics",
                json!({
                    "primary": "96.8%",
                    "label": "Supply Reliability",
                    "breakdown": [
                        { "label": "On-time Delivery", "value": "97.2%", "color": "#22c55e" },
                        { "label": "Quality Compliance", "value": "98.5%", "color": "#06b6d4" },
                        { "label": "Inventory Accuracy", "value": "94.7%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Supply Chain Optimization",
                &[
                    "Supply chain reliability at 96.8% exceeds industry benchmark by 4.2%.",
                    "Critical suppliers (3%) require immediate attention to prevent disruptions.",
                    "Inventory accuracy improvements could reduce carrying costs by $180K annually.",
                    "Diversification across 15 suppliers reduces single-point-of-failure risk.",
                ],
            ),
            bottom_right: chart(
                "Supplier Performance",
                json!({
                    "type": "bar",
                    "values": [94, 96, 93, 97, 98, 95, 99],
                    "labels": ["Supplier A", "Supplier B", "Supplier C", "Supplier D", "Supplier E", "Supplier F", "Supplier G"],
                }),
            ),
        },
        // Digital transformation
        InsightSet {
            top_left: chart(
                "Digital Adoption",
                json!({
                    "type": "donut",
                    "values": [42, 35, 18, 5],
                    "labels": ["Fully Digital", "Partially Digital", "Traditional", "Legacy"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Digital Metrics",
                json!({
                    "primary": "77%",
                    "label": "Digital Maturity",
                    "breakdown": [
                        { "label": "Process Automation", "value": "82%", "color": "#22c55e" },
                        { "label": "Data Integration", "value": "75%", "color": "#06b6d4" },
                        { "label": "AI Implementation", "value": "65%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Digital Strategy Insights",
                &[
                    "Digital maturity at 77% positions organization in top quartile of industry.",
                    "Process automation yields 25% efficiency gains and 18% cost reduction.",
                    "Legacy systems (5%) create bottlenecks - modernization could unlock 12% productivity.",
                    "AI implementation shows 65% adoption with strong ROI in predictive analytics.",
                ],
            ),
            bottom_right: chart(
                "Adoption Timeline",
                json!({
                    "type": "bar",
                    "values": [45, 52, 58, 65, 71, 75, 77],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Sustainability metrics
        InsightSet {
            top_left: chart(
                "Sustainability Score",
                json!({
                    "type": "donut",
                    "values": [48, 32, 15, 5],
                    "labels": ["Excellent", "Good", "Improving", "Needs Work"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Environmental Impact",
                json!({
                    "primary": "68%",
                    "label": "Carbon Reduction",
                    "breakdown": [
                        { "label": "Energy Efficiency", "value": "72%", "color": "#22c55e" },
                        { "label": "Waste Reduction", "value": "65%", "color": "#06b6d4" },
                        { "label": "Sustainable Materials", "value": "58%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Sustainability Strategy",
                &[
                    "Carbon footprint reduced 68% through renewable energy adoption and efficiency programs.",
                    "Waste reduction initiatives save $340K annually while improving environmental impact.",
                    "Sustainable materials usage at 58% with target of 75% by year-end.",
                    "Energy efficiency improvements contribute 72% to overall sustainability score.",
                ],
            ),
            bottom_right: chart(
                "Green Initiatives ROI",
                json!({
                    "type": "bar",
                    "values": [120, 145, 168, 195, 225, 248, 275],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Competitive analysis
        InsightSet {
            top_left: chart(
                "Market Position",
                json!({
                    "type": "donut",
                    "values": [28, 22, 18, 15, 17],
                    "labels": ["Our Company", "Competitor A", "Competitor B", "Competitor C", "Others"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#8b5cf6", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Competitive Metrics",
                json!({
                    "primary": "28%",
                    "label": "Market Share",
                    "breakdown": [
                        { "label": "Price Competitiveness", "value": "92%", "color": "#22c55e" },
                        { "label": "Quality Rating", "value": "95%", "color": "#06b6d4" },
                        { "label": "Brand Recognition", "value": "78%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Competitive Intelligence",
                &[
                    "Market leadership at 28% share with strong competitive moat in quality and service.",
                    "Price competitiveness at 92% while maintaining premium positioning.",
                    "Brand recognition opportunity exists - 78% vs industry leaders at 85%.",
                    "Quality rating advantage of 95% vs competitors average of 87% drives customer loyalty.",
                ],
            ),
            bottom_right: chart(
                "Share Trajectory",
                json!({
                    "type": "bar",
                    "values": [24, 25, 26, 27, 27, 28, 29],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Workforce analytics
        InsightSet {
            top_left: chart(
                "Team Performance",
                json!({
                    "type": "donut",
                    "values": [35, 40, 20, 5],
                    "labels": ["High Performers", "Solid Contributors", "Developing", "Needs Support"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Workforce Metrics",
                json!({
                    "primary": "87%",
                    "label": "Employee Satisfaction",
                    "breakdown": [
                        { "label": "Engagement Score", "value": "89%", "color": "#22c55e" },
                        { "label": "Retention Rate", "value": "92%", "color": "#06b6d4" },
                        { "label": "Skill Development", "value": "78%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Workforce Development Strategy",
                &[
                    "High performer concentration at 35% drives exceptional team productivity.",
                    "Employee satisfaction at 87% correlates with 92% retention rate.",
                    "Skill development programs show 78% participation with measurable impact.",
                    "Targeted support for 5% struggling employees could improve overall performance by 8%.",
                ],
            ),
            bottom_right: chart(
                "Productivity Trends",
                json!({
                    "type": "bar",
                    "values": [82, 85, 87, 89, 91, 88, 93],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Financial health
        InsightSet {
            top_left: chart(
                "Revenue Composition",
                json!({
                    "type": "donut",
                    "values": [45, 30, 15, 10],
                    "labels": ["Core Products", "Services", "Subscriptions", "Other"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#8b5cf6"],
                }),
            ),
            top_right: metric(
                "Financial Health",
                json!({
                    "primary": "24%",
                    "label": "Profit Margin",
                    "breakdown": [
                        { "label": "Gross Margin", "value": "67%", "color": "#22c55e" },
                        { "label": "Operating Margin", "value": "31%", "color": "#06b6d4" },
                        { "label": "Net Margin", "value": "24%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Financial Performance Analysis",
                &[
                    "Profit margin at 24% exceeds industry average of 18% through operational efficiency.",
                    "Core products dominate revenue at 45% but services show highest growth potential.",
                    "Subscription revenue at 15% provides stable recurring income foundation.",
                    "Gross margin strength at 67% indicates pricing power and cost management success.",
                ],
            ),
            bottom_right: chart(
                "Revenue Growth",
                json!({
                    "type": "bar",
                    "values": [2.1, 2.3, 2.4, 2.7, 2.9, 2.8, 3.1],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
        // Technology infrastructure
        InsightSet {
            top_left: chart(
                "System Performance",
                json!({
                    "type": "donut",
                    "values": [60, 25, 12, 3],
                    "labels": ["Excellent", "Good", "Needs Improvement", "Critical"],
                    "colors": ["#22c55e", "#06b6d4", "#f59e0b", "#ef4444"],
                }),
            ),
            top_right: metric(
                "Tech Metrics",
                json!({
                    "primary": "99.7%",
                    "label": "System Uptime",
                    "breakdown": [
                        { "label": "Response Time", "value": "0.8s", "color": "#22c55e" },
                        { "label": "Error Rate", "value": "0.3%", "color": "#06b6d4" },
                        { "label": "Security Score", "value": "95%", "color": "#f59e0b" },
                    ],
                }),
            ),
            bottom_left: ai_text(
                "Technology Infrastructure Assessment",
                &[
                    "System uptime at 99.7% exceeds SLA requirements and industry standards.",
                    "Response time of 0.8s provides excellent user experience across all platforms.",
                    "Security posture strong at 95% with continuous monitoring and threat detection.",
                    "Critical systems (3%) require immediate attention to prevent potential outages.",
                ],
            ),
            bottom_right: chart(
                "Performance Timeline",
                json!({
                    "type": "bar",
                    "values": [99.2, 99.4, 99.6, 99.5, 99.8, 99.7, 99.9],
                    "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
                }),
            ),
        },
    ]
}

fn pool() -> &'static [InsightSet] {
    static POOL: OnceLock<Vec<InsightSet>> = OnceLock::new();
    POOL.get_or_init(build_pool)
}

// =============================================================================
// Selection
// =============================================================================

/// Join the exploration state into a stable key string.
fn state_key(
    root: Option<&str>,
    active: &[Option<Selection>],
    visible: &[bool],
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(1 + active.len() + visible.len());
    parts.push(root.unwrap_or("none").to_string());
    for slot in active {
        parts.push(match slot {
            Some(Selection::Tile(id)) => id.clone(),
            Some(Selection::CustomQuery) => "custom-query".to_string(),
            None => "none".to_string(),
        });
    }
    for v in visible {
        parts.push(if *v { "1" } else { "0" }.to_string());
    }
    parts.join("-")
}

/// Deterministically pick an insight set for the exploration state.
pub fn select(
    root: Option<&str>,
    active: &[Option<Selection>],
    visible: &[bool],
) -> &'static InsightSet {
    let key = state_key(root, active, visible);
    let sets = pool();
    &sets[seed::index(&key, sets.len())]
}

/// Contextual one-line subtitle for the exploration header.
pub fn subtitle(
    root: Option<&str>,
    active: &[Option<Selection>],
    visible: &[bool],
) -> String {
    let root_id = match root {
        None => {
            return "Choose a metric from the first row to begin exploring detailed insights"
                .to_string()
        }
        Some(r) => r,
    };

    let visible_count = visible.iter().filter(|v| **v).count();
    let selected_count = active.iter().filter(|s| s.is_some()).count();
    // Only the first hyphen becomes a space: "custom-query" reads as
    // "custom query" while longer generated ids keep their tail intact.
    let root_label = root_id.replacen('-', " ", 1);

    if visible_count == 0 {
        format!("Selected {} - Click + to explore deeper metrics", root_label)
    } else if selected_count == 0 {
        format!("Viewing {} details - Select tiles to focus analysis", root_label)
    } else {
        format!(
            "Exploring {} levels deep - Insights update with each selection",
            selected_count + 1
        )
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Fixed-delay gate for recomputing the insights panel.
///
/// Every state change marks the gate dirty and pushes the deadline out by
/// the full delay; the panel recomputes once the caller observes `ready`.
/// Time is injected so tests never sleep.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Record a state change at `now`; supersedes any pending deadline.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn ready(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(d) if now >= d)
    }

    /// Consume the pending deadline if it has elapsed. Returns true when the
    /// caller should recompute.
    pub fn take(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_deterministic() {
        let active = vec![Some(Selection::Tile("revenue-sales-0".to_string())), None];
        let visible = vec![true, false];
        let a = select(Some("revenue"), &active, &visible);
        let b = select(Some("revenue"), &active, &visible);
        assert_eq!(a, b);
    }

    #[test]
    fn state_key_tracks_every_component() {
        let base = state_key(Some("revenue"), &[None, None], &[true, false]);
        assert_eq!(base, "revenue-none-none-1-0");
        let with_tile = state_key(
            Some("revenue"),
            &[Some(Selection::Tile("t".to_string())), None],
            &[true, false],
        );
        assert_eq!(with_tile, "revenue-t-none-1-0");
        let with_query = state_key(
            Some("revenue"),
            &[Some(Selection::CustomQuery), None],
            &[true, false],
        );
        assert_eq!(with_query, "revenue-custom-query-none-1-0");
    }

    #[test]
    fn subtitle_branches() {
        assert!(subtitle(None, &[], &[]).starts_with("Choose a metric"));
        let s = subtitle(Some("custom-query"), &[None], &[false]);
        assert_eq!(s, "Selected custom query - Click + to explore deeper metrics");
        let s = subtitle(Some("revenue-growth-0"), &[None], &[false]);
        assert_eq!(s, "Selected revenue growth-0 - Click + to explore deeper metrics");
        let s = subtitle(Some("revenue"), &[None], &[true]);
        assert!(s.starts_with("Viewing revenue details"));
        let s = subtitle(
            Some("revenue"),
            &[Some(Selection::Tile("t".to_string())), None],
            &[true, true],
        );
        assert!(s.starts_with("Exploring 2 levels deep"));
    }

    #[test]
    fn pool_carries_all_fifteen_authored_sets() {
        let sets = pool();
        assert_eq!(sets.len(), 15);
        for set in sets {
            assert!(matches!(set.bottom_left.kind, InsightKind::AiText));
            assert!(matches!(set.top_right.kind, InsightKind::Metric));
        }
        assert_eq!(sets[6].top_left.title, "Innovation Pipeline");
        assert_eq!(sets[14].top_right.title, "Tech Metrics");
    }

    #[test]
    fn debouncer_waits_out_the_delay() {
        let mut d = Debouncer::new(Duration::from_millis(800));
        let t0 = Instant::now();
        assert!(!d.take(t0));
        d.mark_dirty(t0);
        assert!(d.is_pending());
        assert!(!d.take(t0 + Duration::from_millis(799)));
        assert!(d.take(t0 + Duration::from_millis(800)));
        assert!(!d.is_pending());
    }

    #[test]
    fn later_marks_supersede_earlier_deadlines() {
        let mut d = Debouncer::new(Duration::from_millis(800));
        let t0 = Instant::now();
        d.mark_dirty(t0);
        d.mark_dirty(t0 + Duration::from_millis(500));
        assert!(!d.take(t0 + Duration::from_millis(900)));
        assert!(d.take(t0 + Duration::from_millis(1300)));
    }
}
