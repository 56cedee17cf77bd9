use crate::capture::CapturedEvent;
use chrono::{DateTime, Utc};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use core_types::Header;
use std::collections::BTreeMap;

/// Per-variant statistics of a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSummary {
    /// Variant name, or the raw tag when it is not a known `UnionId`.
    pub variant: String,
    pub count: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
}

/// Groups `events` by union tag, ordered by tag value.
pub fn summarize(events: &[CapturedEvent]) -> Vec<VariantSummary> {
    let mut by_tag: BTreeMap<(Option<i128>, String), VariantSummary> = BTreeMap::new();
    for captured in events {
        let header = captured.event.header.as_ref();
        let time = header.and_then(Header::transact_timestamp);
        let key = classify(header);
        let entry = by_tag.entry(key.clone()).or_insert_with(|| VariantSummary {
            variant: key.1,
            count: 0,
            first: None,
            last: None,
        });
        entry.count += 1;
        if let Some(time) = time {
            entry.first = Some(entry.first.map_or(time, |first| first.min(time)));
            entry.last = Some(entry.last.map_or(time, |last| last.max(time)));
        }
    }
    by_tag.into_values().collect()
}

/// Sort key and display name of an event's tag. Integer tags sort by value,
/// anything else ahead of them by name.
fn classify(header: Option<&Header>) -> (Option<i128>, String) {
    let Some(header) = header else {
        return (None, "(no header)".to_string());
    };
    let Some(raw) = header.union_id.as_ref() else {
        return (None, "(no tag)".to_string());
    };
    let order = raw
        .as_i64()
        .map(i128::from)
        .or_else(|| raw.as_u64().map(i128::from));
    let name = match header.union_id() {
        Some(union_id) => union_id.to_string(),
        None => format!("unknown({raw})"),
    };
    (order, name)
}

pub fn render(summaries: &[VariantSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Variant", "Events", "First transact time", "Last transact time"]);
    for summary in summaries {
        table.add_row(vec![
            summary.variant.clone(),
            summary.count.to_string(),
            format_time(summary.first),
            format_time(summary.last),
        ]);
    }
    table
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.to_rfc3339())
}
