//! Scripted scroll through a two-level nested list.
//!
//! Builds 35 rows where row `i` holds `(i % 10) + 2i + 5` nested rows, then scrolls down
//! in fixed steps. After every layout pass a fake renderer measures each rendered row and
//! reports it back, the way a real rendering layer would. Prints the resolved frames.
//!
//! Run with: cargo run --example nested_scroll
//! Trace output goes to the configured log file; set `RUST_LOG=rowcache=trace` for more.

use rowcache::config::{load_config_with_precedence, merge_config};
use rowcache::list::{ListFrame, NestedList};
use rowcache::logging;
use rowcache::registry::{HierarchyConfig, PerLevel};
use serde_json::{json, Value};
use std::error::Error;

const VIEWPORT: f64 = 600.0;
const SCROLL_STEPS: [f64; 6] = [0.0, 250.0, 900.0, 2_400.0, 6_000.0, 12_000.0];
const ROW_HEADER: f64 = 32.0;
const MAX_SETTLE_PASSES: usize = 20;

fn demo_data() -> Value {
    let rows: Vec<Value> = (0..35)
        .map(|i| {
            let items: Vec<Value> = (0..(i % 10) + 2 * i + 5)
                .map(|j| json!({ "text": format!("Item {}", j) }))
                .collect();
            json!({ "title": format!("Row {}", i), "items": items })
        })
        .collect();
    Value::Array(rows)
}

/// Deterministic stand-in for a real measurement: item heights vary with their index.
fn item_height(index: usize) -> f64 {
    18.0 + ((index * 13) % 5) as f64 * 4.0
}

fn row_height(list: &NestedList<&str>, frame: &ListFrame, index: usize) -> f64 {
    list.registry()
        .get(&frame.path.child(index))
        .map_or(ROW_HEADER, |nested| ROW_HEADER + nested.total_height())
}

/// Lay rows out in flow from each list's leading spacer and report unmeasured ones.
fn measure(list: &mut NestedList<&str>, frames: &[ListFrame]) -> usize {
    let mut reported = 0;
    for frame in frames {
        let mut offset = frame.rows.first().map_or(0.0, |row| row.start_pos);
        for row in &frame.rows {
            let height = if frame.level == 0 {
                row_height(list, frame, row.index)
            } else {
                item_height(row.index)
            };
            if !row.measured {
                list.report_measurement(&frame.path, row.index, offset, height);
                reported += 1;
            }
            offset += height;
        }
    }
    reported
}

fn print_frames(scroll: f64, frames: &[ListFrame], passes: usize) {
    println!("scroll {:>7} ({} passes)", scroll, passes);
    for frame in frames {
        let indent = "  ".repeat(frame.level + 1);
        println!(
            "{}{} rows {} at {:.0} (content {:.0})",
            indent, frame.path, frame.window, frame.parent_offset, frame.container_height
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = merge_config(load_config_with_precedence(None)?);
    config.validate()?;
    if let Err(e) = logging::init_from_config(&config) {
        eprintln!("Logging disabled: {}", e);
    }

    let hierarchy = HierarchyConfig::new(2, "items")
        .with_resolved(&config)
        .with_estimated_row_heights(PerLevel::Levels(vec![60.0, 20.0]));
    let mut list = NestedList::new(
        &demo_data(),
        vec!["row", "item"],
        hierarchy,
        config.overscan_ratio,
    )?;

    for scroll in SCROLL_STEPS {
        let mut passes = 0;
        let mut frames = list.layout(scroll, Some(VIEWPORT));
        while passes < MAX_SETTLE_PASSES {
            passes += 1;
            let reported = measure(&mut list, &frames);
            let flagged = list.settle();
            frames = list.layout(scroll, Some(VIEWPORT));
            if reported == 0 && flagged.is_empty() {
                break;
            }
        }
        print_frames(scroll, &frames, passes);
    }

    let root = list.registry().root();
    if let Some(cache) = list.registry().cache(root) {
        println!(
            "root: {} of {} rows measured, content height {:.0}",
            cache.measured_count(),
            cache.len(),
            cache.total_height()
        );
    }
    Ok(())
}
