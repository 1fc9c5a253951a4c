//! Shared scenario builders for unit tests

use crate::models::Scenario;

/// Demand 1000, capacity 800 (gap 200), fill-rate target 0.98 (20 unmet allowed)
pub fn scenario(id: &str) -> Scenario {
    Scenario {
        scenario_id: id.to_string(),
        site_id: format!("SITE_{}", id),
        period: None,
        forecast_demand_units: 1000.0,
        available_capacity_units: 800.0,
        sla_target_fill_rate: 0.98,
        max_ot_hours: 50.0,
        ot_units_per_hour: 4.0,
        ot_cost_per_hour: 40.0,
        max_temp_units: Some(150.0),
        temp_cost_per_unit: 12.0,
        max_reroute_units: Some(100.0),
        reroute_cost_per_unit: 8.0,
        max_outsource_units: Some(200.0),
        outsourcing_cost_per_unit: 30.0,
        late_cost_per_unit: 20.0,
        sla_breach_penalty: 5000.0,
        service_premium_cap: None,
    }
}

/// Every option tops out at 50 unmet units against an allowance of 10
pub fn sla_unreachable(id: &str) -> Scenario {
    Scenario {
        forecast_demand_units: 500.0,
        available_capacity_units: 350.0,
        sla_target_fill_rate: 0.98,
        max_ot_hours: 25.0,
        ot_units_per_hour: 4.0,
        ot_cost_per_hour: 30.0,
        max_temp_units: Some(100.0),
        temp_cost_per_unit: 9.0,
        max_reroute_units: Some(60.0),
        reroute_cost_per_unit: 5.0,
        max_outsource_units: Some(100.0),
        outsourcing_cost_per_unit: 40.0,
        late_cost_per_unit: 10.0,
        sla_breach_penalty: 1000.0,
        ..scenario(id)
    }
}
