//! Port performance data pipeline.
//!
//! Raw vessel/port records go through [`parser`], then [`aggregate`],
//! [`stats`] and [`trails`], and come out of [`dataset`] as one
//! [`ArVisualizationData`] ready for rendering.
pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod geo;
pub mod loader;
pub mod output;
pub mod parser;
pub mod reports;
pub mod stats;
pub mod trails;
pub mod types;
pub mod util;
pub mod visualization;

pub use dataset::{assemble, assemble_with};
pub use geo::GeoResolver;
pub use parser::{parse_row, ParseReport, RejectReason};
pub use types::{
    ArVisualizationData, ArrivalAccuracy, BunkerSavedStats, GeoPoint, ParsedRow, PortDatum,
    VesselTrail,
};
