// Entry point and high-level CLI flow.
//
// - Option [1] loads the reference data file and assembles the
//   visualization dataset, printing parse diagnostics.
// - Option [2] writes the dataset JSON and a per-port CSV summary.
// - After generating outputs, the user can choose to go back to the
//   selection menu or exit.
use std::env;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use once_cell::sync::Lazy;
use tracing_subscriber::filter::EnvFilter;

use port_kpi::config::{self, Config};
use port_kpi::{
    dataset, loader, output, reports, util, visualization, ArVisualizationData, GeoResolver,
};

// Simple in-memory app state so we only load the file once but can
// generate outputs multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<ArVisualizationData>,
}

/// Returns `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Output Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the reference data and assemble the dataset.
fn handle_load(cfg: &Config) {
    let input = match loader::load_rows(&cfg.data_path) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to load {}: {:#}", cfg.data_path, e);
            eprintln!("Failed to load file: {:#}\n", e);
            return;
        }
    };

    let (data, report) = dataset::assemble_with(&input, GeoResolver::builtin(), cfg.max_trails);
    println!(
        "Processing dataset... ({} rows read, {} usable)",
        util::format_int(report.total_rows),
        util::format_int(report.parsed_rows)
    );
    if report.dropped_rows() > 0 {
        println!(
            "Note: {} rows skipped due to validation errors.",
            util::format_int(report.dropped_rows())
        );
        for (reason, count) in &report.dropped {
            println!("  - {}: {}", reason, util::format_int(*count));
        }
    }
    if data.is_empty() {
        println!("Warning: no ports or trails could be placed from this file.");
    }
    println!();

    match APP_STATE.lock() {
        Ok(mut state) => state.data = Some(data),
        Err(e) => tracing::error!("App state poisoned: {}", e),
    }
}

/// Handle option [2]: write the dataset and per-port summary.
fn handle_generate(cfg: &Config) {
    let data = APP_STATE.lock().ok().and_then(|state| state.data.clone());
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the file first (option 1).\n");
        return;
    };

    println!("Generating outputs...\n");

    if let Err(e) = std::fs::create_dir_all(&cfg.output_dir) {
        tracing::error!("Cannot create output directory {}: {}", cfg.output_dir, e);
    }

    let dataset_file = cfg.output_path("ar_visualization.json");
    let dataset_written = match output::write_json(&dataset_file, &data) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Write error for {}: {:#}", dataset_file, e);
            false
        }
    };

    let rows = reports::port_summary(&data);
    let summary_file = cfg.output_path("port_summary.csv");
    println!("Port Performance Summary");
    println!("(Latest record per business unit)\n");
    output::preview_table_rows(&rows, 5);
    match output::write_csv(&summary_file, &rows) {
        Ok(()) => println!("(Full table exported to {})\n", summary_file),
        Err(e) => {
            tracing::error!("Write error for {}: {:#}", summary_file, e);
            println!("(Export to {} failed)\n", summary_file);
        }
    }

    for option in visualization::mode_options() {
        let markers = reports::marker_encodings(&data, option.value);
        println!("Markers: {}", option.label);
        output::preview_table_rows(&markers, 5);
    }

    let summary = reports::generate_summary(&data);
    if dataset_written {
        println!("Dataset Stats ({}):", dataset_file);
    } else {
        println!("Dataset Stats (export to {} failed):", dataset_file);
    }
    println!(
        "{{\"ports\": {}, \"trails\": {}, \"bunker_median\": {}, \"bunker_p90\": {}}}\n",
        util::format_int(summary.total_ports),
        util::format_int(summary.total_trails),
        util::format_number(summary.bunker_saved_median, 2),
        util::format_number(summary.bunker_saved_p90, 2)
    );
}

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    loop {
        println!("Port KPI Visualization Data:");
        println!("[1] Load the file");
        println!("[2] Generate Outputs\n");
        let Some(choice) = read_choice() else {
            println!("Exiting the program.");
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&cfg),
            "2" => {
                println!();
                handle_generate(&cfg);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
    Ok(())
}

/// Install the global tracing subscriber.
///
/// Level comes from `RUST_LOG`, else `PORT_KPI_LOG_LEVEL` (default `info`).
/// Colour follows `FORCE_COLOR` when set, otherwise TTY detection on stderr.
fn init_tracing() {
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => io::stderr().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("PORT_KPI_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "info",
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .with_writer(io::stderr)
        .compact()
        .init();
}
