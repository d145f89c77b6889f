//! ATM Queue Simulation - Main Run
//!
//! Runs the three stock scenarios against a shared horizon and seed, prints
//! the results table, and exports the chart data.

use atm_queue::{Scenario, report, runner};

const RANDOM_SEED: u64 = 42;
/// Simulation horizon in minutes (3 hours)
const SIM_TIME: f64 = 180.0;
const OUTPUT_DIR: &str = "results";

fn main() {
    println!("=== ATM Queue Simulation ===\n");

    let scenarios = vec![
        Scenario::new("Base Case", 1, 3.0, 4.0),
        Scenario::new("Increased ATMs", 2, 3.0, 4.0),
        Scenario::new("More Customers", 2, 3.0, 3.0),
    ];

    println!("Configuration:");
    println!("  Scenarios: {}", scenarios.len());
    println!("  Horizon: {} minutes", SIM_TIME);
    println!("  Seed: {}\n", RANDOM_SEED);

    let mut results = Vec::new();
    for (scenario, outcome) in scenarios
        .iter()
        .zip(runner::run_scenarios(&scenarios, SIM_TIME, RANDOM_SEED))
    {
        match outcome {
            Ok(result) => {
                println!(
                    "Ran '{}': {} customers handled, mean wait {:.2} minutes",
                    scenario.name, result.customers_handled, result.mean_wait_time
                );
                results.push(result);
            }
            Err(err) => eprintln!("Skipping: {}", err),
        }
    }

    println!("\n{}", report::render_table(&results));

    match report::write_all(&results, RANDOM_SEED, SIM_TIME, OUTPUT_DIR) {
        Ok(()) => println!("Exported results to {}/", OUTPUT_DIR),
        Err(err) => eprintln!("Failed to export results: {}", err),
    }
}
