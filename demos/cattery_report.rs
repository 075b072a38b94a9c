//! Cattery Report
//!
//! This example runs the elitist breeding simulation and prints the
//! per-generation statistics as a table, followed by a small batch summary.
//!
//! Pass a path to a JSON configuration file to override the defaults.

use cattery::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Cattery Breeding Simulation ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimulationConfig {
            total_trait_count: 200,
            fitness_trait_indices: (0..100).collect(),
            total_simulation_runs: 20,
            fitness_percentiles: vec![10, 50, 90],
            ..SimulationConfig::default()
        },
    };

    let engine = SimulationEngine::elitist(config)?;
    let report = engine.run(&mut RngSource::seeded(42))?;

    print_report(&report);
    println!("\n{}", report.summary());

    println!("\n--- Batch of {} runs ---\n", engine.config().total_simulation_runs);
    let summary = BatchRunner::new(&engine, 1000).run()?;
    for (g, (fitness, quotient)) in summary
        .mean_average_fitness()
        .iter()
        .zip(summary.mean_quotient())
        .enumerate()
    {
        println!(
            "Gen {:>3}: runs={:>5}  mean fitness={:>8.4}  mean quotient={:>7.2}",
            g, summary.runs_per_generation[g], fitness, quotient
        );
    }
    println!(
        "\nExtinctions: {} of {} ({:.1}%)",
        summary.extinctions,
        summary.runs,
        summary.extinction_rate() * 100.0
    );

    Ok(())
}

fn print_report(report: &SimulationReport) {
    let percentile_labels: Vec<u8> = report.config.fitness_percentiles.clone();

    print!(
        "{:>4} | {:>5} | {:>9} | {:>9} | {:>9} | {:>9} | {:>8}",
        "Gen", "Size", "Avg", "StdDev", "Min", "Max", "Quotient"
    );
    for p in &percentile_labels {
        print!(" | {:>8}", format!("P{p}"));
    }
    println!();
    println!("{}", "-".repeat(72 + 11 * percentile_labels.len()));

    for stats in &report.generations {
        print!(
            "{:>4} | {:>5} | {:>9.4} | {:>9.4} | {:>9.4} | {:>9.4} | {:>8.2}",
            stats.generation,
            stats.population_size,
            stats.average_fitness,
            stats.fitness_std_dev,
            stats.min_fitness,
            stats.max_fitness,
            stats.average_fitness_quotient
        );
        for p in &percentile_labels {
            match stats.percentiles.get(p) {
                Some(value) => print!(" | {:>8.4}", value),
                None => print!(" | {:>8}", "-"),
            }
        }
        println!();
    }
}
