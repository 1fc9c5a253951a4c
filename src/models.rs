use serde::{Deserialize, Serialize};

use crate::options::InterventionOption;

/// Raw record from CSV ingestion
///
/// Every numeric column is optional: blank cells, unparseable cells and
/// missing columns all deserialize to `None` and are resolved in
/// [`ScenarioRecord::to_scenario`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScenarioRecord {
    pub scenario_id: String,
    #[serde(default)]
    pub site_id: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub forecast_demand_units: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub available_capacity_units: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sla_target_fill_rate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub max_ot_hours: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ot_units_per_hour: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ot_cost_per_hour: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub max_temp_units: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub temp_cost_per_unit: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub max_reroute_units: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub reroute_cost_per_unit: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub max_outsource_units: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub outsourcing_cost_per_unit: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub late_cost_per_unit: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sla_breach_penalty: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub service_premium_cap: Option<f64>,
}

/// Disruption scenario: one site/period facing a demand shortfall
///
/// Absent numeric inputs read as 0, except the three unit caps which keep
/// their `Option` so the feasibility filter can tell "not offered" from "0".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub site_id: String,
    pub period: Option<String>,
    pub forecast_demand_units: f64,
    pub available_capacity_units: f64,
    pub sla_target_fill_rate: f64,
    pub max_ot_hours: f64,
    pub ot_units_per_hour: f64,
    pub ot_cost_per_hour: f64,
    pub max_temp_units: Option<f64>,
    pub temp_cost_per_unit: f64,
    pub max_reroute_units: Option<f64>,
    pub reroute_cost_per_unit: f64,
    pub max_outsource_units: Option<f64>,
    pub outsourcing_cost_per_unit: f64,
    pub late_cost_per_unit: f64,
    pub sla_breach_penalty: f64,
    pub service_premium_cap: Option<f64>,
}

impl ScenarioRecord {
    pub fn to_scenario(&self) -> Scenario {
        let num = |v: Option<f64>| v.unwrap_or(0.0);

        Scenario {
            scenario_id: self.scenario_id.trim().to_string(),
            site_id: self.site_id.trim().to_string(),
            period: self.period.clone().filter(|p| !p.trim().is_empty()),
            forecast_demand_units: num(self.forecast_demand_units),
            available_capacity_units: num(self.available_capacity_units),
            sla_target_fill_rate: num(self.sla_target_fill_rate),
            max_ot_hours: num(self.max_ot_hours),
            ot_units_per_hour: num(self.ot_units_per_hour),
            ot_cost_per_hour: num(self.ot_cost_per_hour),
            max_temp_units: self.max_temp_units,
            temp_cost_per_unit: num(self.temp_cost_per_unit),
            max_reroute_units: self.max_reroute_units,
            reroute_cost_per_unit: num(self.reroute_cost_per_unit),
            max_outsource_units: self.max_outsource_units,
            outsourcing_cost_per_unit: num(self.outsourcing_cost_per_unit),
            late_cost_per_unit: num(self.late_cost_per_unit),
            sla_breach_penalty: num(self.sla_breach_penalty),
            service_premium_cap: self.service_premium_cap,
        }
    }
}

impl From<&Scenario> for ScenarioRecord {
    fn from(s: &Scenario) -> Self {
        ScenarioRecord {
            scenario_id: s.scenario_id.clone(),
            site_id: s.site_id.clone(),
            period: s.period.clone(),
            forecast_demand_units: Some(s.forecast_demand_units),
            available_capacity_units: Some(s.available_capacity_units),
            sla_target_fill_rate: Some(s.sla_target_fill_rate),
            max_ot_hours: Some(s.max_ot_hours),
            ot_units_per_hour: Some(s.ot_units_per_hour),
            ot_cost_per_hour: Some(s.ot_cost_per_hour),
            max_temp_units: s.max_temp_units,
            temp_cost_per_unit: Some(s.temp_cost_per_unit),
            max_reroute_units: s.max_reroute_units,
            reroute_cost_per_unit: Some(s.reroute_cost_per_unit),
            max_outsource_units: s.max_outsource_units,
            outsourcing_cost_per_unit: Some(s.outsourcing_cost_per_unit),
            late_cost_per_unit: Some(s.late_cost_per_unit),
            sla_breach_penalty: Some(s.sla_breach_penalty),
            service_premium_cap: s.service_premium_cap,
        }
    }
}

/// One (scenario, option) row of the evaluation table
///
/// Columns are filled stage by stage: the simulator sets the unit columns,
/// the feasibility filter sets `feasible`, the cost evaluator the cost/SLA
/// columns, the selection policy `baseline_total_cost`,
/// `premium_cap_total_cost` and `rank`, and the explanation builder
/// `explanation`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOption<'a> {
    pub scenario: &'a Scenario,
    pub option: InterventionOption,
    pub gap_units: f64,
    pub max_allowed_unmet_units: f64,
    pub recovered_units: f64,
    pub unmet_units: f64,
    pub feasible: bool,
    pub sla_met: bool,
    pub intervention_cost: f64,
    pub service_cost: f64,
    pub total_cost: f64,
    pub ot_hours_used: f64,
    pub baseline_total_cost: Option<f64>,
    pub premium_cap_total_cost: Option<f64>,
    pub rank: Option<u32>,
    pub explanation: Option<String>,
}

impl ScoredOption<'_> {
    pub fn scenario_id(&self) -> &str {
        &self.scenario.scenario_id
    }

    /// Whether the row sits inside the scenario's premium-cap window
    pub fn within_cap(&self) -> bool {
        self.premium_cap_total_cost
            .map_or(true, |cap| self.total_cost <= cap)
    }
}

/// Flat export record: scenario inputs followed by the evaluation columns
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    pub scenario_id: String,
    pub site_id: String,
    pub period: Option<String>,
    pub forecast_demand_units: f64,
    pub available_capacity_units: f64,
    pub sla_target_fill_rate: f64,
    pub max_ot_hours: f64,
    pub ot_units_per_hour: f64,
    pub ot_cost_per_hour: f64,
    pub max_temp_units: Option<f64>,
    pub temp_cost_per_unit: f64,
    pub max_reroute_units: Option<f64>,
    pub reroute_cost_per_unit: f64,
    pub max_outsource_units: Option<f64>,
    pub outsourcing_cost_per_unit: f64,
    pub late_cost_per_unit: f64,
    pub sla_breach_penalty: f64,
    pub service_premium_cap: Option<f64>,
    pub option: InterventionOption,
    pub gap_units: f64,
    pub max_allowed_unmet_units: f64,
    pub recovered_units: f64,
    pub unmet_units: f64,
    pub feasible: bool,
    pub sla_met: bool,
    pub intervention_cost: f64,
    pub service_cost: f64,
    pub total_cost: f64,
    pub ot_hours_used: f64,
    pub baseline_total_cost: Option<f64>,
    pub premium_cap_total_cost: Option<f64>,
    pub rank: Option<u32>,
    pub explanation: String,
}

impl From<&ScoredOption<'_>> for ScoredRecord {
    fn from(row: &ScoredOption<'_>) -> Self {
        let s = row.scenario;
        ScoredRecord {
            scenario_id: s.scenario_id.clone(),
            site_id: s.site_id.clone(),
            period: s.period.clone(),
            forecast_demand_units: s.forecast_demand_units,
            available_capacity_units: s.available_capacity_units,
            sla_target_fill_rate: s.sla_target_fill_rate,
            max_ot_hours: s.max_ot_hours,
            ot_units_per_hour: s.ot_units_per_hour,
            ot_cost_per_hour: s.ot_cost_per_hour,
            max_temp_units: s.max_temp_units,
            temp_cost_per_unit: s.temp_cost_per_unit,
            max_reroute_units: s.max_reroute_units,
            reroute_cost_per_unit: s.reroute_cost_per_unit,
            max_outsource_units: s.max_outsource_units,
            outsourcing_cost_per_unit: s.outsourcing_cost_per_unit,
            late_cost_per_unit: s.late_cost_per_unit,
            sla_breach_penalty: s.sla_breach_penalty,
            service_premium_cap: s.service_premium_cap,
            option: row.option,
            gap_units: row.gap_units,
            max_allowed_unmet_units: row.max_allowed_unmet_units,
            recovered_units: row.recovered_units,
            unmet_units: row.unmet_units,
            feasible: row.feasible,
            sla_met: row.sla_met,
            intervention_cost: row.intervention_cost,
            service_cost: row.service_cost,
            total_cost: row.total_cost,
            ot_hours_used: row.ot_hours_used,
            baseline_total_cost: row.baseline_total_cost,
            premium_cap_total_cost: row.premium_cap_total_cost,
            rank: row.rank,
            explanation: row.explanation.clone().unwrap_or_default(),
        }
    }
}
