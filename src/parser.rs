use crate::types::{fields, ArrivalAccuracy, ParsedRow};
use crate::util::{parse_btr_timestamp, parse_f64_lenient, parse_text};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a raw row was left out of the dataset.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RejectReason {
    #[error("row is not a key-value record")]
    NotARecord,
    #[error("row has no business unit")]
    MissingBusinessUnit,
    #[error("business unit is blank")]
    BlankBusinessUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub total_rows: usize,
    pub parsed_rows: usize,
    pub dropped: BTreeMap<RejectReason, usize>,
}

impl ParseReport {
    pub fn dropped_rows(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Turn one raw record into a [`ParsedRow`].
///
/// Only the business unit is required. Every other field degrades to `None`
/// (or [`ArrivalAccuracy::Unknown`]) when it is missing or unreadable.
pub fn parse_row(raw: &Value, index: usize) -> Result<ParsedRow, RejectReason> {
    let record = raw.as_object().ok_or(RejectReason::NotARecord)?;

    let business_unit = match record.get(fields::BUSINESS_UNIT) {
        Some(Value::String(s)) => s.trim().to_uppercase(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(RejectReason::MissingBusinessUnit),
    };
    if business_unit.is_empty() {
        return Err(RejectReason::BlankBusinessUnit);
    }

    let number = |key: &str| parse_f64_lenient(record.get(key));
    let port_code = |key: &str| parse_text(record.get(key)).map(|s| s.to_uppercase());

    Ok(ParsedRow {
        index,
        business_unit,
        vessel: parse_text(record.get(fields::VESSEL)),
        rotation_id: parse_text(record.get(fields::ROTATION)),
        origin_code: port_code(fields::ORIGIN),
        destination_code: port_code(fields::DESTINATION),
        arrival_accuracy: parse_accuracy(record),
        assured_port_time_ratio: number(fields::ASSURED_PORT_TIME),
        berth_time_hours: number(fields::BERTH_TIME),
        bunker_saved_usd: number(fields::BUNKER_SAVED),
        carbon_abatement_tonnes: number(fields::CARBON_ABATEMENT),
        arrival_variance_hours: number(fields::ARRIVAL_VARIANCE),
        wait_time_hours: number(fields::WAIT_TIME),
        final_arrival_timestamp: record
            .get(fields::FINAL_BTR)
            .and_then(Value::as_str)
            .and_then(parse_btr_timestamp),
    })
}

fn parse_accuracy(record: &Map<String, Value>) -> ArrivalAccuracy {
    match record
        .get(fields::ARRIVAL_ACCURACY)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_uppercase())
        .as_deref()
    {
        Some("Y") => ArrivalAccuracy::OnTime,
        Some("N") => ArrivalAccuracy::Late,
        _ => ArrivalAccuracy::Unknown,
    }
}

/// Parse a whole batch, keeping source order and counting drops per reason.
pub fn parse_rows(rows: &[Value]) -> (Vec<ParsedRow>, ParseReport) {
    let mut report = ParseReport {
        total_rows: rows.len(),
        ..ParseReport::default()
    };
    let mut parsed = Vec::with_capacity(rows.len());

    for (index, raw) in rows.iter().enumerate() {
        match parse_row(raw, index) {
            Ok(row) => parsed.push(row),
            Err(reason) => {
                tracing::debug!("Dropping row {}: {}", index, reason);
                *report.dropped.entry(reason).or_insert(0) += 1;
            }
        }
    }

    report.parsed_rows = parsed.len();
    (parsed, report)
}
