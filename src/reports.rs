use crate::types::{ArVisualizationData, MarkerRow, PortSummaryRow};
use crate::util::{format_int, format_number, format_timestamp};
use crate::visualization::{
    marker_color, marker_size, metric_range, MetricRange, PortMetric, VisualizationMode,
};
use serde::Serialize;

/// One display row per port, in the dataset's port order.
pub fn port_summary(data: &ArVisualizationData) -> Vec<PortSummaryRow> {
    data.ports
        .iter()
        .map(|p| PortSummaryRow {
            port: p.name.clone(),
            code: p.code.clone(),
            samples: format_int(p.sample_count),
            latest_vessel: p.latest_vessel.clone().unwrap_or_else(|| "-".to_string()),
            arrival_accuracy: p.arrival_accuracy.as_str().to_string(),
            assured_port_time: format!("{}%", format_number(p.assured_port_time_ratio * 100.0, 1)),
            berth_hours: format_number(p.berth_time_hours, 1),
            bunker_saved: format_number(p.bunker_saved_usd, 2),
            last_updated: format_timestamp(p.last_updated),
        })
        .collect()
}

/// Marker encoding of every port under `mode`.
///
/// The sustainability overlay scales bunker savings against the dataset's
/// p90 so a single outlier cannot flatten the other ports; the other modes
/// scale against the min/max of their metric across ports.
pub fn marker_encodings(data: &ArVisualizationData, mode: VisualizationMode) -> Vec<MarkerRow> {
    let metric = mode.primary_metric();
    let stats = &data.bunker_saved_stats;
    let range = match mode {
        VisualizationMode::SustainabilityOverlay => MetricRange {
            min: 0.0,
            max: stats.p90,
        },
        _ => metric_range(&data.ports, metric),
    };

    data.ports
        .iter()
        .map(|p| {
            let value = metric.value(p);
            let intensity = match mode {
                VisualizationMode::SustainabilityOverlay => stats.normalize(value),
                _ => range.position(value),
            };
            MarkerRow {
                port: p.name.clone(),
                metric: metric.label().to_string(),
                value: metric.format(value),
                intensity: format_number(intensity, 2),
                color: marker_color(&range, value, metric.higher_is_better()).to_string(),
                size_px: format_number(marker_size(&range, value), 1),
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub total_ports: usize,
    pub total_trails: usize,
    pub total_samples: usize,
    pub bunker_saved_median: f64,
    pub bunker_saved_p90: f64,
    pub berth_hours_min: f64,
    pub berth_hours_max: f64,
}

pub fn generate_summary(data: &ArVisualizationData) -> DatasetSummary {
    let berth = metric_range(&data.ports, PortMetric::BerthTimeHours);
    DatasetSummary {
        total_ports: data.ports.len(),
        total_trails: data.trails.len(),
        total_samples: data.ports.iter().map(|p| p.sample_count).sum(),
        bunker_saved_median: data.bunker_saved_stats.median,
        bunker_saved_p90: data.bunker_saved_stats.p90,
        berth_hours_min: berth.min,
        berth_hours_max: berth.max,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::dataset::assemble;
    use serde_json::json;

    #[test]
    fn test_port_summary_rows() {
        // ---
        let data = assemble(&json!([
            {"BU": "BUSAN", "Vessel": "MSC ANNA", "Bunker Saved (USD)": "12,000",
             "Assured Port Time Achieved (%)": 0.925, "Final BTR (Local Time)": "01-03-25 10:00",
             "Arrival Accuracy (Final BTR)": "Y"},
            {"BU": "ANTWERP"}
        ]));
        let rows = port_summary(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].port, "Antwerp");
        assert_eq!(rows[0].latest_vessel, "-");
        assert_eq!(rows[0].last_updated, "-");
        assert_eq!(rows[1].port, "Busan");
        assert_eq!(rows[1].bunker_saved, "12,000.00");
        assert_eq!(rows[1].assured_port_time, "92.5%");
        assert_eq!(rows[1].arrival_accuracy, "onTime");
        assert_eq!(rows[1].last_updated, "01-03-25 10:00");
    }

    #[test]
    fn test_marker_encodings_heatmap() {
        // ---
        let data = assemble(&json!([
            {"BU": "BUSAN", "Assured Port Time Achieved (%)": 0.9},
            {"BU": "JAKARTA", "Assured Port Time Achieved (%)": 0.5}
        ]));
        let rows = marker_encodings(&data, VisualizationMode::GlobalPerfHeatmap);
        assert_eq!(rows.len(), 2);
        // Higher assured time is better, so the top port is green and largest.
        assert_eq!(rows[0].port, "Busan");
        assert_eq!(rows[0].metric, "Assured Port Time");
        assert_eq!(rows[0].value, "90.0%");
        assert_eq!(rows[0].color, "rgba(0, 200, 83, 0.85)");
        assert_eq!(rows[0].size_px, "20.0");
        assert_eq!(rows[1].color, "rgba(255, 61, 0, 0.85)");
        assert_eq!(rows[1].size_px, "8.0");
    }

    #[test]
    fn test_marker_encodings_sustainability_uses_p90() {
        // ---
        let data = assemble(&json!([
            {"BU": "BUSAN", "Bunker Saved (USD)": 1000},
            {"BU": "JAKARTA", "Bunker Saved (USD)": 3000}
        ]));
        // p90 of [1000, 3000] is 2800.
        let rows = marker_encodings(&data, VisualizationMode::SustainabilityOverlay);
        assert_eq!(rows[0].port, "Busan");
        assert_eq!(rows[0].intensity, "0.36");
        assert_eq!(rows[1].intensity, "1.00");
        assert_eq!(rows[1].size_px, "20.0");
    }

    #[test]
    fn test_marker_encodings_flat_range() {
        // ---
        let data = assemble(&json!([{"BU": "BUSAN"}, {"BU": "JAKARTA"}]));
        for row in marker_encodings(&data, VisualizationMode::VesselTrails) {
            assert_eq!(row.color, "rgba(0, 200, 83, 0.85)");
            assert_eq!(row.size_px, "12.0");
            assert_eq!(row.intensity, "0.00");
        }
    }

    #[test]
    fn test_summary() {
        // ---
        let data = assemble(&json!([
            {"BU": "BUSAN", "Berth Time (hours): ATU - ATB": 12},
            {"BU": "BUSAN", "Berth Time (hours): ATU - ATB": 30},
            {"BU": "JAKARTA", "Berth Time (hours): ATU - ATB": 20, "From": "IDJKT", "To": "SGSIN"}
        ]));
        let summary = generate_summary(&data);
        assert_eq!(summary.total_ports, 2);
        assert_eq!(summary.total_trails, 1);
        assert_eq!(summary.total_samples, 3);
        assert_eq!(summary.berth_hours_min, 12.0);
        assert_eq!(summary.berth_hours_max, 20.0);
        assert_eq!(summary.bunker_saved_p90, 1.0);
    }
}
