// Utility helpers for lenient value parsing and display formatting.
//
// This module centralizes all the "dirty" JSON/number/date handling so the
// rest of the code can assume clean, typed values.
use chrono::{DateTime, NaiveDate, Utc};
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// Parse a JSON value into a finite `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports.
///
/// - Numbers pass through when finite.
/// - Strings are trimmed and have thousands separators (`","`) stripped.
/// - Anything that does not end up as a finite number yields `None`, so a
///   `NaN` can never leak into the aggregates.
pub fn parse_f64_lenient(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim().replace(',', "");
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Read an optional free-text field. Blank strings count as absent.
pub fn parse_text(v: Option<&Value>) -> Option<String> {
    let s = match v? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Parse a final BTR stamp in `DD-MM-YY[ H:MM]` form into epoch milliseconds.
///
/// The year is `2000 + YY` and a missing time part means midnight. Stamps are
/// read as UTC. Any segment that is not an integer, or a date that does not
/// exist on the calendar, yields `None`.
///
/// Out-of-range parts such as `31-02-25` or `24:00` are rejected rather than
/// rolled over into the next month or day.
pub fn parse_btr_timestamp(s: &str) -> Option<i64> {
    let mut parts = s.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next();

    let mut date = date_part.split('-');
    let day = date.next()?.parse::<u32>().ok()?;
    let month = date.next()?.parse::<u32>().ok()?;
    let year = date.next()?.parse::<i32>().ok()?;
    if date.next().is_some() {
        return None;
    }

    let (hour, minute) = match time_part {
        Some(t) => {
            let mut hm = t.split(':');
            let h = hm.next()?.parse::<u32>().ok()?;
            let m = hm.next()?.parse::<u32>().ok()?;
            (h, m)
        }
        None => (0, 0),
    };

    let dt = NaiveDate::from_ymd_opt(2000 + year, month, day)?.and_hms_opt(hour, minute, 0)?;
    Some(dt.and_utc().timestamp_millis())
}

pub fn clamp_or_zero(v: Option<f64>, min: f64, max: f64) -> f64 {
    match v {
        Some(n) if n.is_finite() => n.clamp(min, max),
        _ => 0.0,
    }
}

/// Render an epoch-millisecond stamp back in the feed's `DD-MM-YY HH:MM` form.
pub fn format_timestamp(ms: Option<i64>) -> String {
    ms.and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%d-%m-%y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Past `u128` the digits are left ungrouped rather than dropped.
    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
