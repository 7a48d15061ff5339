use crate::geo::GeoResolver;
use crate::types::{ParsedRow, PortDatum};
use crate::util::clamp_or_zero;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const MAX_BERTH_HOURS: f64 = 80.0;
pub const MAX_CARBON_TONNES: f64 = 0.5;

/// Collapse parsed rows into one [`PortDatum`] per placeable business unit.
///
/// The representative row of a unit is the one with the latest final BTR; a
/// row without a timestamp only wins when no row of that unit has one, and
/// ties keep the row seen first. Output is sorted by display name,
/// case-insensitive.
pub fn aggregate_ports(rows: &[ParsedRow], geo: &GeoResolver) -> Vec<PortDatum> {
    struct Acc<'a> {
        latest: &'a ParsedRow,
        samples: usize,
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Acc> = HashMap::new();
    for r in rows {
        match groups.get_mut(r.business_unit.as_str()) {
            Some(acc) => {
                acc.samples += 1;
                if is_newer(r.final_arrival_timestamp, acc.latest.final_arrival_timestamp) {
                    acc.latest = r;
                }
            }
            None => {
                order.push(&r.business_unit);
                groups.insert(&r.business_unit, Acc { latest: r, samples: 1 });
            }
        }
    }

    let mut ports: Vec<PortDatum> = order
        .into_iter()
        .filter_map(|unit| {
            let acc = groups.get(unit)?;
            let Some(geo_point) = geo.resolve_business_unit(unit) else {
                tracing::debug!("No coordinates for business unit {}, skipping", unit);
                return None;
            };
            let r = acc.latest;
            Some(PortDatum {
                id: unit.to_string(),
                name: geo_point.display_name.clone(),
                code: geo_point.code.clone(),
                lat: geo_point.lat,
                lng: geo_point.lng,
                arrival_accuracy: r.arrival_accuracy,
                assured_port_time_ratio: clamp_or_zero(r.assured_port_time_ratio, 0.0, 1.0),
                berth_time_hours: clamp_or_zero(r.berth_time_hours, 0.0, MAX_BERTH_HOURS),
                bunker_saved_usd: clamp_or_zero(r.bunker_saved_usd, 0.0, f64::INFINITY),
                carbon_abatement_tonnes: clamp_or_zero(
                    r.carbon_abatement_tonnes,
                    0.0,
                    MAX_CARBON_TONNES,
                ),
                arrival_variance_hours: clamp_or_zero(
                    r.arrival_variance_hours,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                ),
                wait_time_hours: clamp_or_zero(r.wait_time_hours, 0.0, f64::INFINITY),
                latest_vessel: r.vessel.clone(),
                latest_rotation: r.rotation_id.clone(),
                sample_count: acc.samples,
                last_updated: r.final_arrival_timestamp,
            })
        })
        .collect();

    ports.sort_by_cached_key(|p| (p.name.to_lowercase(), p.id.clone()));
    ports
}

/// Strictly-later comparison where a missing stamp sorts before any stamp.
fn is_newer(candidate: Option<i64>, current: Option<i64>) -> bool {
    compare_timestamps(candidate, current) == Ordering::Greater
}

pub(crate) fn compare_timestamps(a: Option<i64>, b: Option<i64>) -> Ordering {
    // `None < Some(_)` already treats a missing stamp as negative infinity.
    a.cmp(&b)
}
