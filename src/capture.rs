//! Reading of captured feed files: one host-shaped JSON event per line.

use anyhow::Context;
use events::RawEvent;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An event read from a capture, with the line it came from.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub line: usize,
    pub event: RawEvent,
}

/// Reads every non-blank line of the capture at `path`.
pub fn read_capture(path: &Path) -> anyhow::Result<Vec<CapturedEvent>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open capture {}", path.display()))?;
    parse_capture(BufReader::new(file))
}

pub fn parse_capture(reader: impl BufRead) -> anyhow::Result<Vec<CapturedEvent>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let event: RawEvent = serde_json::from_str(&line)
            .with_context(|| format!("Line {line_number} is not a valid event"))?;
        events.push(CapturedEvent {
            line: line_number,
            event,
        });
    }
    tracing::debug!(events = events.len(), "Capture parsed.");
    Ok(events)
}
