//! Mitigation options evaluated for every scenario
//!
//! Each variant owns its full behavior: how many units it can recover, when
//! it may be used at all, what it costs and how it is described.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionOption {
    DoNothing,
    Overtime,
    TempLabor,
    Reroute,
    Outsource,
}

impl InterventionOption {
    /// Evaluation order; also the input order used for stable tie-breaks.
    pub const ALL: [InterventionOption; 5] = [
        InterventionOption::DoNothing,
        InterventionOption::Overtime,
        InterventionOption::TempLabor,
        InterventionOption::Reroute,
        InterventionOption::Outsource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionOption::DoNothing => "do_nothing",
            InterventionOption::Overtime => "overtime",
            InterventionOption::TempLabor => "temp_labor",
            InterventionOption::Reroute => "reroute",
            InterventionOption::Outsource => "outsource",
        }
    }

    /// Units this option could recover before clamping to the gap
    fn capacity_units(&self, s: &Scenario) -> f64 {
        match self {
            InterventionOption::DoNothing => 0.0,
            InterventionOption::Overtime => s.max_ot_hours * s.ot_units_per_hour,
            InterventionOption::TempLabor => s.max_temp_units.unwrap_or(0.0),
            InterventionOption::Reroute => s.max_reroute_units.unwrap_or(0.0),
            InterventionOption::Outsource => s.max_outsource_units.unwrap_or(0.0),
        }
    }

    /// Recovered units, always within `[0, gap_units]`
    pub fn recoverable_units(&self, s: &Scenario, gap_units: f64) -> f64 {
        self.capacity_units(s).max(0.0).min(gap_units)
    }

    /// Whether the option's resource parameters permit using it at all.
    /// A cap that was never supplied fails its test.
    pub fn is_feasible(&self, s: &Scenario) -> bool {
        match self {
            InterventionOption::DoNothing => true,
            InterventionOption::Overtime => s.max_ot_hours > 0.0 && s.ot_units_per_hour > 0.0,
            InterventionOption::TempLabor => s.max_temp_units.is_some_and(|cap| cap >= 0.0),
            InterventionOption::Reroute => s.max_reroute_units.is_some_and(|cap| cap >= 0.0),
            InterventionOption::Outsource => s.max_outsource_units.is_some_and(|cap| cap >= 0.0),
        }
    }

    /// Overtime hours needed for `recovered_units`; 0 for other options or
    /// when the hourly rate is not positive.
    pub fn ot_hours_used(&self, s: &Scenario, recovered_units: f64) -> f64 {
        match self {
            InterventionOption::Overtime if s.ot_units_per_hour > 0.0 => {
                recovered_units / s.ot_units_per_hour
            }
            _ => 0.0,
        }
    }

    pub fn intervention_cost(&self, s: &Scenario, recovered_units: f64) -> f64 {
        match self {
            InterventionOption::DoNothing => 0.0,
            InterventionOption::Overtime => {
                self.ot_hours_used(s, recovered_units) * s.ot_cost_per_hour
            }
            InterventionOption::TempLabor => recovered_units * s.temp_cost_per_unit,
            InterventionOption::Reroute => recovered_units * s.reroute_cost_per_unit,
            InterventionOption::Outsource => recovered_units * s.outsourcing_cost_per_unit,
        }
    }

    /// One-sentence rationale shown next to the option in reports
    pub fn explain(&self, recovered_units: f64, unmet_units: f64, ot_hours_used: f64) -> String {
        let recovered = whole_units(recovered_units);
        match self {
            InterventionOption::DoNothing => {
                format!("No action taken; {} units unmet.", whole_units(unmet_units))
            }
            InterventionOption::Overtime => format!(
                "Overtime recovers {} units (~{:.1} OT hours).",
                recovered,
                finite_or_zero(ot_hours_used)
            ),
            InterventionOption::TempLabor => format!("Temp labor recovers {} units.", recovered),
            InterventionOption::Reroute => format!("Rerouting recovers {} units.", recovered),
            InterventionOption::Outsource => format!("Outsourcing recovers {} units.", recovered),
        }
    }
}

impl fmt::Display for InterventionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn whole_units(v: f64) -> i64 {
    finite_or_zero(v).round_ties_even() as i64
}
