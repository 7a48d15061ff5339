//! Runtime configuration for the `port_kpi` binary.
//!
//! All values come from environment variables (a `.env` file is loaded by
//! the caller), so `env::var` calls stay in this one module.
use std::env;

use anyhow::{anyhow, Result};

use crate::trails::MAX_TRAILS;

/// Parse an optional unsigned environment variable with a default value.
macro_rules! parse_env_usize {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ---
    /// Reference data file, `.json` or `.csv`.
    pub data_path: String,

    /// Directory the generated files are written to.
    pub output_dir: String,

    /// Trail cap passed to the assembler.
    pub max_trails: usize,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `PORT_KPI_DATA_PATH` – input file (default: `data/reference-sample-data.json`)
/// - `PORT_KPI_OUTPUT_DIR` – output directory (default: `.`)
/// - `PORT_KPI_MAX_TRAILS` – trail cap (default: 120)
pub fn load_from_env() -> Result<Config> {
    // ---
    let data_path = env::var("PORT_KPI_DATA_PATH")
        .unwrap_or_else(|_| "data/reference-sample-data.json".to_string());
    let output_dir = env::var("PORT_KPI_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
    let max_trails = parse_env_usize!("PORT_KPI_MAX_TRAILS", MAX_TRAILS);

    Ok(Config {
        data_path,
        output_dir,
        max_trails,
    })
}

impl Config {
    pub fn output_path(&self, file_name: &str) -> String {
        std::path::Path::new(&self.output_dir)
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }

    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  PORT_KPI_DATA_PATH  : {}", self.data_path);
        tracing::info!("  PORT_KPI_OUTPUT_DIR : {}", self.output_dir);
        tracing::info!("  PORT_KPI_MAX_TRAILS : {}", self.max_trails);
    }
}
