//! Structured export of run results
//!
//! A fixed-width results table for the terminal, plus CSV and JSON exports
//! carrying the same records and the per-customer wait-time series for chart
//! tooling (pandas, matplotlib).

use crate::RunResult;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;

const HEADERS: [&str; 8] = [
    "Scenario",
    "Number of Servers",
    "Average Service Time",
    "Inter-arrival Mean",
    "Total Customers Handled",
    "Average Wait Time",
    "Average Queue Length",
    "Utilization %",
];

/// One row of the per-scenario summary, flattened for tabular output.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub scenario: String,
    pub server_count: usize,
    pub mean_service_time: f64,
    pub mean_inter_arrival_time: f64,
    pub customers_handled: usize,
    pub mean_wait_time: f64,
    pub mean_queue_length: f64,
    pub utilization_pct: f64,
}

impl From<&RunResult> for SummaryRow {
    fn from(result: &RunResult) -> SummaryRow {
        SummaryRow {
            scenario: result.scenario.name.clone(),
            server_count: result.scenario.server_count,
            mean_service_time: result.scenario.mean_service_time,
            mean_inter_arrival_time: result.scenario.mean_inter_arrival_time,
            customers_handled: result.customers_handled,
            mean_wait_time: result.mean_wait_time,
            mean_queue_length: result.mean_queue_length,
            utilization_pct: result.utilization_pct,
        }
    }
}

/// Top-level document for the JSON export: run metadata plus the summary
/// rows, enough to reproduce the run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub horizon: f64,
    pub results: Vec<SummaryRow>,
}

/// Render the results as a fixed-width table, one row per scenario.
pub fn render_table(results: &[RunResult]) -> String {
    let rows: Vec<[String; 8]> = results
        .iter()
        .map(|result| {
            [
                result.scenario.name.clone(),
                result.scenario.server_count.to_string(),
                format!("{:.1}", result.scenario.mean_service_time),
                format!("{:.1}", result.scenario.mean_inter_arrival_time),
                result.customers_handled.to_string(),
                format!("{:.2}", result.mean_wait_time),
                format!("{:.2}", result.mean_queue_length),
                format!("{:.2}", result.utilization_pct),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|header| header.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, row: &[String; 8], widths: &[usize]) {
    for (i, (cell, &width)) in row.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        if i == 0 {
            out.push_str(&format!("{cell:<width$}"));
        } else {
            out.push_str(&format!("{cell:>width$}"));
        }
    }
    out.push('\n');
}

/// Write the per-scenario summary rows to CSV.
pub fn write_summary_csv<P: AsRef<Path>>(
    results: &[RunResult],
    path: P,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for result in results {
        wtr.serialize(SummaryRow::from(result))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every completed customer's wait time, one row per customer, for the
/// wait-time-over-customers chart.
pub fn write_wait_times_csv<P: AsRef<Path>>(
    results: &[RunResult],
    path: P,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["scenario", "customer", "wait_time"])?;
    for result in results {
        for (i, wait_time) in result.wait_times.iter().enumerate() {
            wtr.write_record(&[
                result.scenario.name.clone(),
                (i + 1).to_string(),
                wait_time.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write the JSON run summary with seed and horizon metadata.
pub fn write_summary_json<P: AsRef<Path>>(
    results: &[RunResult],
    seed: u64,
    horizon: f64,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let summary = RunSummary {
        seed,
        horizon,
        results: results.iter().map(SummaryRow::from).collect(),
    };
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write all exports into a directory.
///
/// Creates:
/// - summary.csv
/// - wait_times.csv
/// - summary.json
pub fn write_all<P: AsRef<Path>>(
    results: &[RunResult],
    seed: u64,
    horizon: f64,
    dir: P,
) -> Result<(), Box<dyn Error>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    write_summary_csv(results, dir.join("summary.csv"))?;
    write_wait_times_csv(results, dir.join("wait_times.csv"))?;
    write_summary_json(results, seed, horizon, dir.join("summary.json"))?;

    Ok(())
}
