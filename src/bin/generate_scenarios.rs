//! Synthetic scenario generator
//!
//! Clones every scenario of an input table and perturbs demand, capacity and
//! option caps with controlled random variation, so the planner can be run
//! against larger portfolios.
//!
//! Usage:
//!   cargo run --release --bin generate_scenarios -- [OPTIONS]
//!
//! Options:
//!   --copies <N>          Synthetic scenarios per original (default: 3)
//!   --demand-jitter <F>   Max relative demand variation (default: 0.15)
//!   --capacity-jitter <F> Max relative capacity variation (default: 0.10)
//!   --cap-jitter <F>      Max relative variation of option caps (default: 0.25)
//!   --seed <N>            Random seed for reproducibility (optional)
//!   --include-original <BOOL>  Copy input scenarios to the output (default: true)
//!   --output <PATH>       Output CSV path (default: data/synthetic_inputs.csv)

use anyhow::{Context, Result};
use clap::Parser;
use csv::WriterBuilder;
use intervention_planner::{models::ScenarioRecord, scenarios, Scenario};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "generate_scenarios")]
#[command(about = "Generate synthetic disruption scenarios with controlled variation")]
struct Args {
    /// Synthetic scenarios generated per original
    #[arg(long, default_value = "3")]
    copies: usize,

    /// Maximum relative demand variation (0.0 - 1.0)
    #[arg(long, default_value = "0.15")]
    demand_jitter: f64,

    /// Maximum relative capacity variation (0.0 - 1.0)
    #[arg(long, default_value = "0.10")]
    capacity_jitter: f64,

    /// Maximum relative variation of overtime hours and unit caps (0.0 - 1.0)
    #[arg(long, default_value = "0.25")]
    cap_jitter: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Input CSV path
    #[arg(long, default_value = "data/sample_inputs.csv")]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "data/synthetic_inputs.csv")]
    output: PathBuf,

    /// Include original scenarios in output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    include_original: bool,
}

/// Scale a value by a random factor in `[1 - pct, 1 + pct]`, never below 0
fn jitter(value: f64, pct: f64, rng: &mut impl Rng) -> f64 {
    if pct <= 0.0 {
        return value;
    }
    let factor = 1.0 + rng.gen_range(-pct..=pct);
    (value * factor).max(0.0).round()
}

fn jitter_cap(cap: Option<f64>, pct: f64, rng: &mut impl Rng) -> Option<f64> {
    cap.map(|c| if c < 0.0 { c } else { jitter(c, pct, rng) })
}

/// Generate a synthetic scenario from an original
fn generate_synthetic(original: &Scenario, copy: usize, args: &Args, rng: &mut impl Rng) -> Scenario {
    Scenario {
        scenario_id: format!("{}_S{:02}", original.scenario_id, copy + 1),
        forecast_demand_units: jitter(original.forecast_demand_units, args.demand_jitter, rng),
        available_capacity_units: jitter(
            original.available_capacity_units,
            args.capacity_jitter,
            rng,
        ),
        max_ot_hours: jitter(original.max_ot_hours, args.cap_jitter, rng),
        max_temp_units: jitter_cap(original.max_temp_units, args.cap_jitter, rng),
        max_reroute_units: jitter_cap(original.max_reroute_units, args.cap_jitter, rng),
        max_outsource_units: jitter_cap(original.max_outsource_units, args.cap_jitter, rng),
        ..original.clone()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    println!("🔧 Synthetic Scenario Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Input:            {}", args.input.display());
    println!("Output:           {}", args.output.display());
    println!("Copies:           {}", args.copies);
    println!("Demand jitter:    ±{:.1}%", args.demand_jitter * 100.0);
    println!("Capacity jitter:  ±{:.1}%", args.capacity_jitter * 100.0);
    println!("Cap jitter:       ±{:.1}%", args.cap_jitter * 100.0);
    println!("Include original: {}", args.include_original);
    if let Some(seed) = args.seed {
        println!("Random seed:      {}", seed);
    }
    println!();

    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let originals = scenarios::load_inputs(&args.input)?;

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(&args.output)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;

    let mut total_written = 0;
    let mut synthetic_written = 0;

    for original in &originals {
        if args.include_original {
            writer.serialize(ScenarioRecord::from(original))?;
            total_written += 1;
        }

        for copy in 0..args.copies {
            let synthetic = generate_synthetic(original, copy, &args, &mut rng);
            writer.serialize(ScenarioRecord::from(&synthetic))?;
            total_written += 1;
            synthetic_written += 1;
        }
    }

    writer.flush()?;
    info!("Wrote {} scenarios to {:?}", total_written, args.output);

    println!("\n✅ Generation complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Original scenarios:  {:>6}", if args.include_original { originals.len() } else { 0 });
    println!("Synthetic scenarios: {:>6}", synthetic_written);
    println!("Total written:       {:>6}", total_written);
    println!("Output file:         {}", args.output.display());

    Ok(())
}
