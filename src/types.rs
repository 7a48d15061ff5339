use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Raw column names of the port performance feed.
///
/// These are the only place the punctuation-heavy source keys appear; every
/// other module works with [`ParsedRow`].
pub mod fields {
    pub const BUSINESS_UNIT: &str = "BU";
    pub const VESSEL: &str = "Vessel";
    pub const ROTATION: &str = "Rotation No.";
    pub const ORIGIN: &str = "From";
    pub const DESTINATION: &str = "To";
    pub const ARRIVAL_ACCURACY: &str = "Arrival Accuracy (Final BTR)";
    pub const FINAL_BTR: &str = "Final BTR (Local Time)";
    pub const ASSURED_PORT_TIME: &str = "Assured Port Time Achieved (%)";
    pub const BERTH_TIME: &str = "Berth Time (hours): ATU - ATB";
    pub const BUNKER_SAVED: &str = "Bunker Saved (USD)";
    pub const CARBON_ABATEMENT: &str = "Carbon Abatement (Tonnes)";
    pub const ARRIVAL_VARIANCE: &str = "Arrival Variance (within 4h target)";
    pub const WAIT_TIME: &str = "Wait Time (Hours): ATB-BTR";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrivalAccuracy {
    OnTime,
    Late,
    Unknown,
}

impl ArrivalAccuracy {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrivalAccuracy::OnTime => "onTime",
            ArrivalAccuracy::Late => "late",
            ArrivalAccuracy::Unknown => "unknown",
        }
    }
}

/// One typed record of the feed. Built once per raw row and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub index: usize,
    pub business_unit: String,
    pub vessel: Option<String>,
    pub rotation_id: Option<String>,
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    pub arrival_accuracy: ArrivalAccuracy,
    pub assured_port_time_ratio: Option<f64>,
    pub berth_time_hours: Option<f64>,
    pub bunker_saved_usd: Option<f64>,
    pub carbon_abatement_tonnes: Option<f64>,
    pub arrival_variance_hours: Option<f64>,
    pub wait_time_hours: Option<f64>,
    /// Epoch milliseconds of the final BTR.
    pub final_arrival_timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub code: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDatum {
    pub id: String,
    pub name: String,
    pub code: String,
    pub lat: f64,
    pub lng: f64,
    pub arrival_accuracy: ArrivalAccuracy,
    pub assured_port_time_ratio: f64,
    pub berth_time_hours: f64,
    pub bunker_saved_usd: f64,
    pub carbon_abatement_tonnes: f64,
    pub arrival_variance_hours: f64,
    pub wait_time_hours: f64,
    pub latest_vessel: Option<String>,
    pub latest_rotation: Option<String>,
    pub sample_count: usize,
    pub last_updated: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselTrail {
    pub id: String,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub arrival_accuracy: ArrivalAccuracy,
    pub bunker_saved_usd: f64,
    pub carbon_abatement_tonnes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BunkerSavedStats {
    pub median: f64,
    pub p90: f64,
}

impl Default for BunkerSavedStats {
    fn default() -> Self {
        BunkerSavedStats {
            median: 0.0,
            p90: 1.0,
        }
    }
}

/// Everything the renderers need for one refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArVisualizationData {
    pub ports: Vec<PortDatum>,
    pub trails: Vec<VesselTrail>,
    pub bunker_saved_stats: BunkerSavedStats,
}

impl ArVisualizationData {
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.trails.is_empty()
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PortSummaryRow {
    #[serde(rename = "Port")]
    #[tabled(rename = "Port")]
    pub port: String,
    #[serde(rename = "Code")]
    #[tabled(rename = "Code")]
    pub code: String,
    #[serde(rename = "Samples")]
    #[tabled(rename = "Samples")]
    pub samples: String,
    #[serde(rename = "LatestVessel")]
    #[tabled(rename = "LatestVessel")]
    pub latest_vessel: String,
    #[serde(rename = "ArrivalAccuracy")]
    #[tabled(rename = "ArrivalAccuracy")]
    pub arrival_accuracy: String,
    #[serde(rename = "AssuredPortTime")]
    #[tabled(rename = "AssuredPortTime")]
    pub assured_port_time: String,
    #[serde(rename = "BerthHours")]
    #[tabled(rename = "BerthHours")]
    pub berth_hours: String,
    #[serde(rename = "BunkerSavedUSD")]
    #[tabled(rename = "BunkerSavedUSD")]
    pub bunker_saved: String,
    #[serde(rename = "LastUpdated")]
    #[tabled(rename = "LastUpdated")]
    pub last_updated: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MarkerRow {
    #[serde(rename = "Port")]
    #[tabled(rename = "Port")]
    pub port: String,
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
    #[serde(rename = "Intensity")]
    #[tabled(rename = "Intensity")]
    pub intensity: String,
    #[serde(rename = "Color")]
    #[tabled(rename = "Color")]
    pub color: String,
    #[serde(rename = "SizePx")]
    #[tabled(rename = "SizePx")]
    pub size_px: String,
}
