//! Scenario loading and option simulation

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::models::{Scenario, ScenarioRecord, ScoredOption};
use crate::options::InterventionOption;

/// Load raw scenario inputs from a CSV file
pub fn load_inputs(path: impl AsRef<Path>) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    info!("Reading scenarios from {:?}", path);

    let file = std::fs::File::open(path)
        .with_context(|| format!("Missing input file: {}", path.display()))?;
    let scenarios = read_inputs(file)
        .with_context(|| format!("Failed to parse scenarios from {}", path.display()))?;

    info!("Parsed {} scenarios", scenarios.len());
    Ok(scenarios)
}

/// Parse scenario records from any reader with a header row
pub fn read_inputs<R: Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut scenarios = Vec::new();
    for (i, record) in reader.deserialize::<ScenarioRecord>().enumerate() {
        let record = record.with_context(|| format!("Malformed scenario on data row {}", i + 1))?;
        scenarios.push(record.to_scenario());
    }

    Ok(scenarios)
}

/// Shortfall before mitigation, never negative
pub fn gap_units(s: &Scenario) -> f64 {
    (s.forecast_demand_units - s.available_capacity_units).max(0.0)
}

/// Unmet units the fill-rate target still tolerates
pub fn max_allowed_unmet_units(s: &Scenario) -> f64 {
    s.forecast_demand_units * (1.0 - s.sla_target_fill_rate)
}

/// Expand each scenario into one row per option with recovered and unmet units
pub fn simulate_options(scenarios: &[Scenario]) -> Vec<ScoredOption<'_>> {
    let rows: Vec<ScoredOption<'_>> = scenarios
        .iter()
        .flat_map(|scenario| {
            let gap = gap_units(scenario);
            let allowed = max_allowed_unmet_units(scenario);

            InterventionOption::ALL.into_iter().map(move |option| {
                let recovered = option.recoverable_units(scenario, gap);
                ScoredOption {
                    scenario,
                    option,
                    gap_units: gap,
                    max_allowed_unmet_units: allowed,
                    recovered_units: recovered,
                    unmet_units: (gap - recovered).max(0.0),
                    feasible: false,
                    sla_met: false,
                    intervention_cost: 0.0,
                    service_cost: 0.0,
                    total_cost: 0.0,
                    ot_hours_used: 0.0,
                    baseline_total_cost: None,
                    premium_cap_total_cost: None,
                    rank: None,
                    explanation: None,
                }
            })
        })
        .collect();

    debug!("Simulated {} option rows for {} scenarios", rows.len(), scenarios.len());
    rows
}
