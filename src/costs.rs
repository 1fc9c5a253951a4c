//! Cost and service-level evaluation per option row

use crate::models::ScoredOption;

/// Computes `sla_met`, intervention cost, service cost (late cost plus breach
/// penalty) and total cost.
///
/// Inputs are not clamped: negative cost parameters give negative costs.
pub fn compute_costs_and_sla(rows: Vec<ScoredOption<'_>>) -> Vec<ScoredOption<'_>> {
    rows.into_iter().map(evaluate_row).collect()
}

fn evaluate_row(row: ScoredOption<'_>) -> ScoredOption<'_> {
    let s = row.scenario;
    let sla_met = row.unmet_units <= row.max_allowed_unmet_units;

    let ot_hours_used = row.option.ot_hours_used(s, row.recovered_units);
    let intervention_cost = row.option.intervention_cost(s, row.recovered_units);

    let breach_penalty = if sla_met { 0.0 } else { s.sla_breach_penalty };
    let service_cost = row.unmet_units * s.late_cost_per_unit + breach_penalty;

    ScoredOption {
        sla_met,
        ot_hours_used,
        intervention_cost,
        service_cost,
        total_cost: intervention_cost + service_cost,
        ..row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scenario;
    use crate::options::InterventionOption;
    use crate::scenarios::simulate_options;

    fn scenario() -> Scenario {
        Scenario {
            scenario_id: "SCN_A".to_string(),
            site_id: "DC_EAST".to_string(),
            period: Some("2024-W10".to_string()),
            forecast_demand_units: 1000.0,
            available_capacity_units: 800.0,
            sla_target_fill_rate: 0.98,
            max_ot_hours: 50.0,
            ot_units_per_hour: 4.0,
            ot_cost_per_hour: 60.0,
            max_temp_units: Some(150.0),
            temp_cost_per_unit: 10.0,
            max_reroute_units: Some(100.0),
            reroute_cost_per_unit: 6.0,
            max_outsource_units: Some(300.0),
            outsourcing_cost_per_unit: 25.0,
            late_cost_per_unit: 20.0,
            sla_breach_penalty: 5000.0,
            service_premium_cap: None,
        }
    }

    fn row<'a>(rows: &'a [ScoredOption<'a>], option: InterventionOption) -> &'a ScoredOption<'a> {
        rows.iter().find(|r| r.option == option).unwrap()
    }

    #[test]
    fn test_costs_per_option() {
        let scenarios = vec![scenario()];
        let rows = compute_costs_and_sla(simulate_options(&scenarios));

        // gap 200, allowed unmet 20
        let nothing = row(&rows, InterventionOption::DoNothing);
        assert!(!nothing.sla_met);
        assert_eq!(nothing.intervention_cost, 0.0);
        assert_eq!(nothing.service_cost, 200.0 * 20.0 + 5000.0);
        assert_eq!(nothing.total_cost, 9000.0);

        let overtime = row(&rows, InterventionOption::Overtime);
        assert!(overtime.sla_met);
        assert_eq!(overtime.ot_hours_used, 50.0);
        assert_eq!(overtime.intervention_cost, 3000.0);
        assert_eq!(overtime.service_cost, 0.0);
        assert_eq!(overtime.total_cost, 3000.0);

        let temp = row(&rows, InterventionOption::TempLabor);
        assert!(!temp.sla_met);
        assert_eq!(temp.intervention_cost, 1500.0);
        assert_eq!(temp.service_cost, 50.0 * 20.0 + 5000.0);

        let reroute = row(&rows, InterventionOption::Reroute);
        assert_eq!(reroute.intervention_cost, 600.0);
        assert_eq!(reroute.ot_hours_used, 0.0);

        let outsource = row(&rows, InterventionOption::Outsource);
        assert!(outsource.sla_met);
        assert_eq!(outsource.total_cost, 5000.0);

        for r in &rows {
            assert_eq!(r.total_cost, r.intervention_cost + r.service_cost);
        }
    }

    #[test]
    fn test_sla_boundary_is_inclusive() {
        let mut s = scenario();
        s.max_temp_units = Some(180.0);
        let scenarios = vec![s];
        let rows = compute_costs_and_sla(simulate_options(&scenarios));

        let temp = row(&rows, InterventionOption::TempLabor);
        assert_eq!(temp.unmet_units, 20.0);
        assert!(temp.sla_met);
        assert_eq!(temp.service_cost, 400.0);
    }

    #[test]
    fn test_negative_costs_propagate() {
        let mut s = scenario();
        s.reroute_cost_per_unit = -2.0;
        let scenarios = vec![s];
        let rows = compute_costs_and_sla(simulate_options(&scenarios));

        assert_eq!(row(&rows, InterventionOption::Reroute).intervention_cost, -200.0);
    }
}
