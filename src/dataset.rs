//! Assembly of the full visualization dataset from one snapshot of raw rows.
//!
//! Every call rebuilds the dataset from scratch; nothing is cached between
//! refreshes.

use crate::aggregate::aggregate_ports;
use crate::geo::GeoResolver;
use crate::parser::{parse_rows, ParseReport};
use crate::stats::bunker_saved_stats;
use crate::trails::{build_trails, MAX_TRAILS};
use crate::types::ArVisualizationData;
use serde_json::Value;

/// Pick the row array out of either response shape the feed is known to use:
/// a bare array, or an object carrying the rows under `ports`.
pub fn extract_rows(input: &Value) -> Option<&[Value]> {
    match input {
        Value::Array(rows) => Some(rows.as_slice()),
        Value::Object(map) => map.get("ports").and_then(Value::as_array).map(Vec::as_slice),
        _ => None,
    }
}

/// Assemble against the bundled geo tables with the default trail cap.
pub fn assemble(input: &Value) -> ArVisualizationData {
    assemble_with(input, GeoResolver::builtin(), MAX_TRAILS).0
}

/// Assemble and also return the parse report, for callers that want to
/// monitor how many rows were dropped and why.
pub fn assemble_with(
    input: &Value,
    geo: &GeoResolver,
    max_trails: usize,
) -> (ArVisualizationData, ParseReport) {
    let Some(raw_rows) = extract_rows(input) else {
        tracing::warn!("Input is neither a row array nor an object with a `ports` array");
        return (ArVisualizationData::default(), ParseReport::default());
    };

    let (rows, report) = parse_rows(raw_rows);
    if report.dropped_rows() > 0 {
        tracing::info!(
            "Parsed {} of {} rows ({} dropped: {:?})",
            report.parsed_rows,
            report.total_rows,
            report.dropped_rows(),
            report.dropped
        );
    }
    if rows.is_empty() {
        return (ArVisualizationData::default(), report);
    }

    let data = ArVisualizationData {
        ports: aggregate_ports(&rows, geo),
        trails: build_trails(&rows, geo, max_trails),
        bunker_saved_stats: bunker_saved_stats(&rows),
    };
    tracing::debug!(
        "Assembled {} ports and {} trails from {} rows",
        data.ports.len(),
        data.trails.len(),
        rows.len()
    );
    (data, report)
}
