//! Dump a generated tile batch as JSON for inspection.
//!
//! Usage: tiles <category> [level] [count] [prefix] [parent_id]
//!
//! Example: tiles shipping 3 4 Advanced shipments-fleet-0

use anyhow::{anyhow, Result};

use drilldown::catalog::Category;
use drilldown::tiles::{generate, TileRequest};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let category_arg = args
        .first()
        .ok_or_else(|| anyhow!("usage: tiles <category> [level] [count] [prefix] [parent_id]"))?;
    let category = Category::parse(category_arg)
        .ok_or_else(|| anyhow!("unknown category: {}", category_arg))?;

    let level: u32 = match args.get(1) {
        Some(v) => v.parse()?,
        None => 2,
    };
    let count: usize = match args.get(2) {
        Some(v) => v.parse()?,
        None => 4,
    };
    let prefix = args.get(3).cloned().unwrap_or_else(|| "Detailed".to_string());
    let parent_id = args.get(4).cloned().unwrap_or_default();

    let batch = generate(&TileRequest {
        category,
        level,
        count,
        prefix,
        parent_id,
        parent_color: None,
    });
    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}
