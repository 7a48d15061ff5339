use crate::aggregate::{compare_timestamps, MAX_CARBON_TONNES};
use crate::geo::GeoResolver;
use crate::types::{ParsedRow, VesselTrail};
use crate::util::clamp_or_zero;

/// Upper bound on trails handed to the renderer.
pub const MAX_TRAILS: usize = 120;

/// Build origin -> destination movements, newest first, keeping at most
/// `max_count` of them. Rows whose endpoints do not both resolve are skipped
/// and do not count toward the cap.
pub fn build_trails(rows: &[ParsedRow], geo: &GeoResolver, max_count: usize) -> Vec<VesselTrail> {
    let mut ordered: Vec<&ParsedRow> = rows.iter().collect();
    // Stable, so equal stamps keep source order.
    ordered.sort_by(|a, b| compare_timestamps(b.final_arrival_timestamp, a.final_arrival_timestamp));

    ordered
        .into_iter()
        .filter_map(|r| {
            let origin = geo.resolve_port(r.origin_code.as_deref()?)?;
            let destination = geo.resolve_port(r.destination_code.as_deref()?)?;
            Some(VesselTrail {
                id: trail_id(r),
                origin: origin.clone(),
                destination: destination.clone(),
                arrival_accuracy: r.arrival_accuracy,
                bunker_saved_usd: clamp_or_zero(r.bunker_saved_usd, 0.0, f64::INFINITY),
                carbon_abatement_tonnes: clamp_or_zero(
                    r.carbon_abatement_tonnes,
                    0.0,
                    MAX_CARBON_TONNES,
                ),
            })
        })
        .take(max_count)
        .collect()
}

fn trail_id(r: &ParsedRow) -> String {
    let key = r
        .rotation_id
        .as_deref()
        .or(r.vessel.as_deref())
        .unwrap_or(&r.business_unit);
    format!("{}-{}", key, r.index)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::types::{ArrivalAccuracy, GeoPoint};
    use std::collections::HashSet;

    fn geo() -> GeoResolver {
        let point = |code: &str| GeoPoint {
            code: code.to_string(),
            display_name: code.to_string(),
            lat: 0.0,
            lng: 0.0,
        };
        GeoResolver::new(vec![point("SGSIN"), point("KRPUS")], vec![])
    }

    fn trail_row(index: usize, ts: Option<i64>, from: &str, to: &str) -> ParsedRow {
        ParsedRow {
            index,
            business_unit: "SINGAPORE".to_string(),
            vessel: None,
            rotation_id: None,
            origin_code: Some(from.to_string()),
            destination_code: Some(to.to_string()),
            arrival_accuracy: ArrivalAccuracy::OnTime,
            assured_port_time_ratio: None,
            berth_time_hours: None,
            bunker_saved_usd: Some(500.0),
            carbon_abatement_tonnes: Some(0.9),
            arrival_variance_hours: None,
            wait_time_hours: None,
            final_arrival_timestamp: ts,
        }
    }

    #[test]
    fn test_newest_first_and_undated_last() {
        // ---
        let rows = vec![
            trail_row(0, None, "SGSIN", "KRPUS"),
            trail_row(1, Some(10), "SGSIN", "KRPUS"),
            trail_row(2, Some(30), "KRPUS", "SGSIN"),
        ];
        let ids: Vec<String> = build_trails(&rows, &geo(), MAX_TRAILS)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["SINGAPORE-2", "SINGAPORE-1", "SINGAPORE-0"]);
    }

    #[test]
    fn test_unresolved_endpoints_skipped() {
        // ---
        let mut missing = trail_row(2, Some(50), "SGSIN", "KRPUS");
        missing.destination_code = None;
        let rows = vec![
            trail_row(0, Some(99), "SGSIN", "NOWHERE"),
            trail_row(1, Some(10), "SGSIN", "KRPUS"),
            missing,
        ];
        let trails = build_trails(&rows, &geo(), 1);
        assert_eq!(trails.len(), 1);
        assert_eq!(trails[0].id, "SINGAPORE-1");
        assert_eq!(trails[0].origin.code, "SGSIN");
        assert_eq!(trails[0].destination.code, "KRPUS");
    }

    #[test]
    fn test_cap_keeps_most_recent() {
        // ---
        let rows: Vec<ParsedRow> = (0..300)
            .map(|i| trail_row(i, Some(i as i64), "SGSIN", "KRPUS"))
            .collect();
        let trails = build_trails(&rows, &geo(), MAX_TRAILS);
        assert_eq!(trails.len(), MAX_TRAILS);
        let kept: HashSet<String> = trails.into_iter().map(|t| t.id).collect();
        for i in 180..300 {
            assert!(kept.contains(&format!("SINGAPORE-{}", i)));
        }
    }

    #[test]
    fn test_ids_unique_and_metrics_clamped() {
        // ---
        let mut a = trail_row(0, Some(1), "SGSIN", "KRPUS");
        a.rotation_id = Some("R1".to_string());
        a.vessel = Some("ANNA".to_string());
        let mut b = trail_row(1, Some(1), "SGSIN", "KRPUS");
        b.vessel = Some("ANNA".to_string());
        let mut c = trail_row(2, Some(1), "SGSIN", "KRPUS");
        c.vessel = Some("ANNA".to_string());

        let trails = build_trails(&[a, b, c], &geo(), MAX_TRAILS);
        let ids: Vec<&str> = trails.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["R1-0", "ANNA-1", "ANNA-2"]);
        assert_eq!(trails[0].carbon_abatement_tonnes, 0.5);
        assert_eq!(trails[0].bunker_saved_usd, 500.0);
        assert_eq!(trails[0].arrival_accuracy, ArrivalAccuracy::OnTime);
    }
}
