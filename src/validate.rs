//! Input diagnostics
//!
//! The pipeline evaluates whatever it is given; this module only reports
//! values that are probably data-entry mistakes so the shell can warn about
//! them or refuse the file.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::models::Scenario;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputIssue {
    pub scenario_id: String,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.scenario_id, self.field, self.message)
    }
}

/// Check every scenario; an empty result means the table looks sane
pub fn validate_scenarios(scenarios: &[Scenario]) -> Vec<InputIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for s in scenarios {
        let mut flag = |field: &'static str, message: String| {
            issues.push(InputIssue {
                scenario_id: s.scenario_id.clone(),
                field,
                message,
            })
        };

        if s.scenario_id.is_empty() {
            flag("scenario_id", "empty scenario id".to_string());
        } else if !seen.insert(s.scenario_id.as_str()) {
            flag("scenario_id", "duplicate scenario id".to_string());
        }

        if !(0.0..=1.0).contains(&s.sla_target_fill_rate) {
            flag(
                "sla_target_fill_rate",
                format!("{} is outside [0, 1]", s.sla_target_fill_rate),
            );
        }

        if let Some(cap) = s.service_premium_cap {
            if cap.is_nan() || cap < 1.0 {
                flag(
                    "service_premium_cap",
                    format!("{} is below 1.0; the premium window cannot hold the baseline", cap),
                );
            }
        }

        let non_negative = [
            ("forecast_demand_units", Some(s.forecast_demand_units)),
            ("available_capacity_units", Some(s.available_capacity_units)),
            ("max_ot_hours", Some(s.max_ot_hours)),
            ("ot_units_per_hour", Some(s.ot_units_per_hour)),
            ("ot_cost_per_hour", Some(s.ot_cost_per_hour)),
            ("max_temp_units", s.max_temp_units),
            ("temp_cost_per_unit", Some(s.temp_cost_per_unit)),
            ("max_reroute_units", s.max_reroute_units),
            ("reroute_cost_per_unit", Some(s.reroute_cost_per_unit)),
            ("max_outsource_units", s.max_outsource_units),
            ("outsourcing_cost_per_unit", Some(s.outsourcing_cost_per_unit)),
            ("late_cost_per_unit", Some(s.late_cost_per_unit)),
            ("sla_breach_penalty", Some(s.sla_breach_penalty)),
        ];
        for (field, value) in non_negative {
            match value {
                Some(v) if v.is_nan() => flag(field, "not a number".to_string()),
                Some(v) if v < 0.0 => flag(field, format!("negative value {}", v)),
                _ => {}
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_clean_input_has_no_issues() {
        let scenarios = vec![fixtures::scenario("SCN_001"), fixtures::sla_unreachable("SCN_002")];
        assert!(validate_scenarios(&scenarios).is_empty());
    }

    #[test]
    fn test_out_of_range_values_reported() {
        let mut bad = fixtures::scenario("SCN_001");
        bad.sla_target_fill_rate = 1.2;
        bad.reroute_cost_per_unit = -3.0;
        bad.max_temp_units = Some(-10.0);
        bad.service_premium_cap = Some(0.8);

        let issues = validate_scenarios(&[bad]);
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec![
                "sla_target_fill_rate",
                "service_premium_cap",
                "max_temp_units",
                "reroute_cost_per_unit",
            ]
        );
        assert_eq!(issues[0].to_string(), "SCN_001 [sla_target_fill_rate]: 1.2 is outside [0, 1]");
    }

    #[test]
    fn test_duplicate_ids_reported_once_per_repeat() {
        let scenarios = vec![
            fixtures::scenario("SCN_001"),
            fixtures::scenario("SCN_001"),
            fixtures::scenario("SCN_002"),
        ];
        let issues = validate_scenarios(&scenarios);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "duplicate scenario id");
    }

    #[test]
    fn test_missing_caps_are_not_issues() {
        let mut s = fixtures::scenario("SCN_001");
        s.max_outsource_units = None;
        assert!(validate_scenarios(&[s]).is_empty());
    }
}
