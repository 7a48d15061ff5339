// Visualization modes offered by the globe and the per-metric scaling ranges
// the marker encodings are built from.
use crate::types::PortDatum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualizationMode {
    GlobalPerfHeatmap,
    SustainabilityOverlay,
    VesselTrails,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 3] = [
        VisualizationMode::GlobalPerfHeatmap,
        VisualizationMode::SustainabilityOverlay,
        VisualizationMode::VesselTrails,
    ];

    /// Port metric that drives marker colour and size in this mode.
    pub fn primary_metric(self) -> PortMetric {
        match self {
            VisualizationMode::GlobalPerfHeatmap => PortMetric::AssuredPortTimeRatio,
            VisualizationMode::SustainabilityOverlay => PortMetric::BunkerSavedUsd,
            VisualizationMode::VesselTrails => PortMetric::SampleCount,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisualizationMode::GlobalPerfHeatmap => "Global Performance Heatmap",
            VisualizationMode::SustainabilityOverlay => "Sustainability Overlay",
            VisualizationMode::VesselTrails => "Vessel Journey Trails",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeOption {
    pub value: VisualizationMode,
    pub label: &'static str,
}

/// Selector entries, in display order.
pub fn mode_options() -> Vec<ModeOption> {
    VisualizationMode::ALL
        .iter()
        .map(|&value| ModeOption {
            value,
            label: value.label(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortMetric {
    AssuredPortTimeRatio,
    BerthTimeHours,
    BunkerSavedUsd,
    CarbonAbatementTonnes,
    ArrivalVarianceHours,
    WaitTimeHours,
    SampleCount,
}

impl PortMetric {
    pub const ALL: [PortMetric; 7] = [
        PortMetric::AssuredPortTimeRatio,
        PortMetric::BerthTimeHours,
        PortMetric::BunkerSavedUsd,
        PortMetric::CarbonAbatementTonnes,
        PortMetric::ArrivalVarianceHours,
        PortMetric::WaitTimeHours,
        PortMetric::SampleCount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PortMetric::AssuredPortTimeRatio => "Assured Port Time",
            PortMetric::BerthTimeHours => "Berth Time",
            PortMetric::BunkerSavedUsd => "Bunker Savings",
            PortMetric::CarbonAbatementTonnes => "Carbon Abatement",
            PortMetric::ArrivalVarianceHours => "Arrival Variance",
            PortMetric::WaitTimeHours => "Wait Time",
            PortMetric::SampleCount => "Port Calls",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PortMetric::AssuredPortTimeRatio => "Share of port time meeting the service commitment",
            PortMetric::BerthTimeHours => "Time the latest vessel spent at berth",
            PortMetric::BunkerSavedUsd => "Fuel cost savings in USD",
            PortMetric::CarbonAbatementTonnes => "CO2 emissions prevented in tonnes",
            PortMetric::ArrivalVarianceHours => "Arrival offset against the final BTR",
            PortMetric::WaitTimeHours => "Wait between BTR and berthing",
            PortMetric::SampleCount => "Number of vessel visits in the snapshot",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            PortMetric::AssuredPortTimeRatio => "%",
            PortMetric::BerthTimeHours
            | PortMetric::ArrivalVarianceHours
            | PortMetric::WaitTimeHours => "hours",
            PortMetric::BunkerSavedUsd => "USD",
            PortMetric::CarbonAbatementTonnes => "tonnes",
            PortMetric::SampleCount => "calls",
        }
    }

    /// Whether a larger value is the better outcome; such metrics run the
    /// colour ramp in reverse so good ports stay green.
    pub fn higher_is_better(self) -> bool {
        matches!(
            self,
            PortMetric::AssuredPortTimeRatio
                | PortMetric::BunkerSavedUsd
                | PortMetric::CarbonAbatementTonnes
                | PortMetric::SampleCount
        )
    }

    pub fn format(self, value: f64) -> String {
        match self {
            PortMetric::AssuredPortTimeRatio => format!("{:.1}%", value * 100.0),
            PortMetric::BerthTimeHours
            | PortMetric::ArrivalVarianceHours
            | PortMetric::WaitTimeHours => format!("{:.1}h", value),
            PortMetric::BunkerSavedUsd => format!("${:.0}K", value / 1000.0),
            PortMetric::CarbonAbatementTonnes => format!("{:.3} t", value),
            PortMetric::SampleCount => format!("{:.0}", value),
        }
    }

    pub fn value(self, port: &PortDatum) -> f64 {
        match self {
            PortMetric::AssuredPortTimeRatio => port.assured_port_time_ratio,
            PortMetric::BerthTimeHours => port.berth_time_hours,
            PortMetric::BunkerSavedUsd => port.bunker_saved_usd,
            PortMetric::CarbonAbatementTonnes => port.carbon_abatement_tonnes,
            PortMetric::ArrivalVarianceHours => port.arrival_variance_hours,
            PortMetric::WaitTimeHours => port.wait_time_hours,
            PortMetric::SampleCount => port.sample_count as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn is_flat(&self) -> bool {
        (self.max - self.min).abs() < f64::EPSILON
    }

    /// Position of `value` inside the range, `0` when the range is flat.
    pub fn position(&self, value: f64) -> f64 {
        if self.is_flat() || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

// Ramp ends: green for the good end, red for the bad end.
const START_COLOR: (f64, f64, f64) = (0.0, 200.0, 83.0);
const END_COLOR: (f64, f64, f64) = (255.0, 61.0, 0.0);
const MARKER_ALPHA: f64 = 0.85;

pub const MIN_MARKER_SIZE: f64 = 8.0;
pub const MAX_MARKER_SIZE: f64 = 20.0;
pub const FLAT_MARKER_SIZE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn lerp_channel(start: f64, end: f64, ratio: f64) -> u8 {
    (start + (end - start) * ratio).round().clamp(0.0, 255.0) as u8
}

/// Green-to-red marker colour for `value` within `range`.
///
/// A flat range always gives the start colour. With `reverse` the ramp is
/// flipped, for metrics where higher is better.
pub fn marker_color(range: &MetricRange, value: f64, reverse: bool) -> MarkerColor {
    if range.is_flat() {
        return MarkerColor {
            r: START_COLOR.0 as u8,
            g: START_COLOR.1 as u8,
            b: START_COLOR.2 as u8,
            a: MARKER_ALPHA,
        };
    }
    let mut ratio = range.position(value);
    if reverse {
        ratio = 1.0 - ratio;
    }
    MarkerColor {
        r: lerp_channel(START_COLOR.0, END_COLOR.0, ratio),
        g: lerp_channel(START_COLOR.1, END_COLOR.1, ratio),
        b: lerp_channel(START_COLOR.2, END_COLOR.2, ratio),
        a: MARKER_ALPHA,
    }
}

/// Marker diameter in pixels, between 8 and 20; 12 for a flat range.
pub fn marker_size(range: &MetricRange, value: f64) -> f64 {
    if range.is_flat() {
        return FLAT_MARKER_SIZE;
    }
    MIN_MARKER_SIZE + range.position(value) * (MAX_MARKER_SIZE - MIN_MARKER_SIZE)
}

pub fn metric_range(ports: &[PortDatum], metric: PortMetric) -> MetricRange {
    let mut values = ports.iter().map(|p| metric.value(p));
    let Some(first) = values.next() else {
        return MetricRange::default();
    };
    values.fold(MetricRange { min: first, max: first }, |acc, v| MetricRange {
        min: acc.min.min(v),
        max: acc.max.max(v),
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::types::ArrivalAccuracy;

    fn port(berth: f64, samples: usize) -> PortDatum {
        PortDatum {
            id: "BUSAN".to_string(),
            name: "Busan".to_string(),
            code: "KRPUS".to_string(),
            lat: 0.0,
            lng: 0.0,
            arrival_accuracy: ArrivalAccuracy::Unknown,
            assured_port_time_ratio: 0.0,
            berth_time_hours: berth,
            bunker_saved_usd: 0.0,
            carbon_abatement_tonnes: 0.0,
            arrival_variance_hours: 0.0,
            wait_time_hours: 0.0,
            latest_vessel: None,
            latest_rotation: None,
            sample_count: samples,
            last_updated: None,
        }
    }

    #[test]
    fn test_mode_options() {
        // ---
        let options = mode_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, VisualizationMode::GlobalPerfHeatmap);
        assert_eq!(options[2].label, "Vessel Journey Trails");
        assert_eq!(
            serde_json::to_string(&VisualizationMode::SustainabilityOverlay).unwrap(),
            "\"SUSTAINABILITY_OVERLAY\""
        );
    }

    #[test]
    fn test_metric_range() {
        // ---
        let ports = vec![port(14.0, 3), port(9.5, 10), port(20.0, 1)];
        assert_eq!(
            metric_range(&ports, PortMetric::BerthTimeHours),
            MetricRange { min: 9.5, max: 20.0 }
        );
        assert_eq!(
            metric_range(&ports, PortMetric::SampleCount),
            MetricRange { min: 1.0, max: 10.0 }
        );
        assert_eq!(metric_range(&[], PortMetric::BerthTimeHours), MetricRange::default());
    }

    #[test]
    fn test_primary_metric_per_mode() {
        // ---
        assert_eq!(
            VisualizationMode::GlobalPerfHeatmap.primary_metric(),
            PortMetric::AssuredPortTimeRatio
        );
        assert_eq!(
            VisualizationMode::SustainabilityOverlay.primary_metric(),
            PortMetric::BunkerSavedUsd
        );
    }

    #[test]
    fn test_metric_metadata() {
        // ---
        for metric in PortMetric::ALL {
            assert!(!metric.label().is_empty());
            assert!(!metric.description().is_empty());
            assert!(!metric.unit().is_empty());
        }
        assert!(PortMetric::AssuredPortTimeRatio.higher_is_better());
        assert!(!PortMetric::BerthTimeHours.higher_is_better());
        assert_eq!(PortMetric::AssuredPortTimeRatio.format(0.925), "92.5%");
        assert_eq!(PortMetric::BunkerSavedUsd.format(1_250_000.0), "$1250K");
        assert_eq!(PortMetric::BerthTimeHours.format(14.24), "14.2h");
        assert_eq!(PortMetric::SampleCount.format(85.0), "85");
    }

    #[test]
    fn test_marker_color_ramp() {
        // ---
        let range = MetricRange { min: 10.0, max: 20.0 };
        assert_eq!(marker_color(&range, 10.0, false).to_string(), "rgba(0, 200, 83, 0.85)");
        assert_eq!(marker_color(&range, 20.0, false).to_string(), "rgba(255, 61, 0, 0.85)");
        assert_eq!(marker_color(&range, 20.0, true).to_string(), "rgba(0, 200, 83, 0.85)");

        let mid = marker_color(&range, 15.0, false);
        assert_eq!((mid.r, mid.g, mid.b), (128, 131, 42));
    }

    #[test]
    fn test_marker_color_flat_range() {
        // ---
        let flat = MetricRange { min: 5.0, max: 5.0 };
        let expected = "rgba(0, 200, 83, 0.85)";
        assert_eq!(marker_color(&flat, 5.0, false).to_string(), expected);
        assert_eq!(marker_color(&flat, 5.0, true).to_string(), expected);
    }

    #[test]
    fn test_marker_size() {
        // ---
        let range = MetricRange { min: 0.0, max: 100.0 };
        assert_eq!(marker_size(&range, 0.0), 8.0);
        assert_eq!(marker_size(&range, 50.0), 14.0);
        assert_eq!(marker_size(&range, 100.0), 20.0);
        assert_eq!(marker_size(&range, 400.0), 20.0);
        assert_eq!(marker_size(&MetricRange { min: 3.0, max: 3.0 }, 3.0), 12.0);
    }

    #[test]
    fn test_range_position() {
        // ---
        let range = MetricRange { min: 10.0, max: 20.0 };
        assert_eq!(range.position(15.0), 0.5);
        assert_eq!(range.position(30.0), 1.0);
        assert_eq!(MetricRange { min: 4.0, max: 4.0 }.position(4.0), 0.0);
    }
}
