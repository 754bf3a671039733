//! Grover Search Walkthrough
//!
//! Features:
//! - Theoretical analysis for a target
//! - Step-by-step probability trace
//! - Shot-based search with measurement histogram
//! - Gate-level circuit diagram
//!
//! Usage:
//!   cargo run --example grover_search -- 101
//!   cargo run --example grover_search -- 1010 4000

use anyhow::{Context, Result};
use grover_sim::prelude::*;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let target = args.next().unwrap_or_else(|| "101".to_string());
    let shots: u64 = match args.next() {
        Some(raw) => raw.parse().context("shots must be an integer")?,
        None => 1000,
    };

    let engine = GroverEngine::from_env()?;
    println!("=== Grover Search for |{}⟩ ===", target);
    println!("{}", engine.config());

    // ========================================================================
    // 1. Analysis
    // ========================================================================
    let report = engine.analyze(&target)?;
    println!("\n[Analysis]");
    println!("  Search space:       {}", report.analysis.search_space_size);
    println!("  Optimal iterations: {}", report.analysis.optimal_iterations);
    println!("  Success (theory):   {:.1}%", report.analysis.theoretical_success_rate);
    println!("  Advantage:          {}", report.performance_comparison.advantage);

    // ========================================================================
    // 2. Trace
    // ========================================================================
    let trace = engine.trace_iterations(&target)?;
    println!("\n[Trace]");
    for step in &trace.steps {
        println!(
            "  round {:>2} {:<22} P(target) = {:.4}",
            step.iteration_number, step.step_name, step.target_probability
        );
    }
    println!("  Final amplification: {:.2}x", trace.final_amplification);

    // ========================================================================
    // 3. Shots
    // ========================================================================
    let result = engine.simulate_shots(&target, shots)?;
    println!("\n[Measurements] {}", result);
    for (bits, count) in &result.measurements {
        let bar = "#".repeat((count * 50 / result.shots) as usize);
        let marker = if *bits == result.target_state { " <" } else { "" };
        println!("  {} {:>6} {}{}", bits, count, bar, marker);
    }

    // ========================================================================
    // 4. Circuit
    // ========================================================================
    let info = engine.circuit_info(&target)?;
    println!(
        "\n[Circuit] depth {}, {} gates",
        info.circuit_info.circuit_depth, info.circuit_info.total_gates
    );
    println!("{}", info.circuit_diagram);

    Ok(())
}
