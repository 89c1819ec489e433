//! Per-day summaries for the listing view.

use anyhow::{bail, Result};
use serde_json::Value;
use shared::{DayRecord, DaySummary};
use tracing::warn;

/// Every slot in a time block covers five minutes
pub const MINUTES_PER_SLOT: i64 = 5;

/// Summarise one stored document. A document that can't be read is reported
/// with zero counts instead of failing the whole listing.
pub fn summarize_stored_day(date: &str, contents: &str) -> DaySummary {
    match try_summarize(date, contents) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Could not summarise record for {}: {}", date, e);
            DaySummary::unreadable(date)
        }
    }
}

fn try_summarize(date: &str, contents: &str) -> Result<DaySummary> {
    let record: DayRecord = serde_json::from_str(contents)?;

    let blocks: &[Value] = match record.time_blocks() {
        None | Some(Value::Null) => &[],
        Some(Value::Array(blocks)) => blocks,
        Some(other) => bail!("timeBlocks is not an array: {}", other),
    };

    let total_minutes = blocks
        .iter()
        .map(block_minutes)
        .fold(0i64, i64::saturating_add);

    Ok(DaySummary {
        date: date.to_string(),
        block_count: blocks.len(),
        total_minutes,
        last_modified: record.last_modified().map(str::to_string),
    })
}

/// Minutes covered by an inclusive `startBlock..=endBlock` range.
///
/// Bounds are not validated, so a reversed range yields a negative value.
/// Blocks without integer bounds cover nothing.
pub fn block_minutes(block: &Value) -> i64 {
    let start = block.get("startBlock").and_then(Value::as_i64);
    let end = block.get("endBlock").and_then(Value::as_i64);

    match (start, end) {
        (Some(start), Some(end)) => end
            .saturating_sub(start)
            .saturating_add(1)
            .saturating_mul(MINUTES_PER_SLOT),
        _ => 0,
    }
}
