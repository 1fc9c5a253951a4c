//! Scenario-level selection policy
//!
//! Service first, cost as tie-break:
//! 1. Infeasible rows are dropped.
//! 2. If any feasible option meets the SLA, keep only SLA-met options and
//!    rank them by total cost.
//! 3. Otherwise keep options costing at most `baseline * premium_cap`
//!    (baseline = cheapest feasible total cost) and rank them by unmet units,
//!    then total cost.
//! 4. If that window is empty, keep the options tied at the baseline.
//!
//! Every kept row carries `baseline_total_cost` and `premium_cap_total_cost`
//! so reports can show why it survived.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::models::ScoredOption;

/// Which branch of the policy decided a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCase {
    /// At least one option meets the SLA
    ServiceFirst,
    /// No option meets the SLA; ranked inside the premium-cap window
    PremiumWindow,
    /// The premium-cap window was empty; only baseline-cost options kept
    BaselineFallback,
}

/// Drop, rank and annotate rows per scenario.
///
/// Scenarios decided service-first come first, premium-window and fallback
/// scenarios after them; each block is ordered by `scenario_id`. A scenario
/// with no feasible option contributes no rows.
pub fn select_and_rank<'a>(
    rows: Vec<ScoredOption<'a>>,
    config: &PolicyConfig,
) -> Vec<ScoredOption<'a>> {
    let mut groups: BTreeMap<&'a str, Vec<ScoredOption<'a>>> = BTreeMap::new();
    for row in rows.into_iter().filter(|r| r.feasible) {
        let scenario = row.scenario;
        groups
            .entry(scenario.scenario_id.as_str())
            .or_default()
            .push(row);
    }

    let mut with_sla = Vec::new();
    let mut without_sla = Vec::new();

    for (scenario_id, group) in groups {
        let (case, ranked) = select_scenario(group, config);
        debug!("{}: {:?}, {} options ranked", scenario_id, case, ranked.len());

        match case {
            SelectionCase::ServiceFirst => with_sla.extend(ranked),
            SelectionCase::PremiumWindow | SelectionCase::BaselineFallback => {
                without_sla.extend(ranked)
            }
        }
    }

    with_sla.extend(without_sla);
    with_sla
}

/// Decide a single scenario from its feasible rows (input order preserved)
pub fn select_scenario<'a>(
    group: Vec<ScoredOption<'a>>,
    config: &PolicyConfig,
) -> (SelectionCase, Vec<ScoredOption<'a>>) {
    let baseline = group
        .iter()
        .map(|r| r.total_cost)
        .fold(f64::INFINITY, f64::min);
    let sla_any = group.iter().any(|r| r.sla_met);

    let annotated: Vec<ScoredOption<'a>> = group
        .into_iter()
        .map(|row| {
            let cap = config.premium_cap_for(row.scenario);
            ScoredOption {
                baseline_total_cost: Some(baseline),
                premium_cap_total_cost: Some(baseline * cap),
                ..row
            }
        })
        .collect();

    let (case, mut kept) = if sla_any {
        let mut kept: Vec<_> = annotated.into_iter().filter(|r| r.sla_met).collect();
        kept.sort_by(|a, b| by_cost(a, b));
        (SelectionCase::ServiceFirst, kept)
    } else {
        let (mut window, outside): (Vec<_>, Vec<_>) =
            annotated.into_iter().partition(|r| r.within_cap());

        if window.is_empty() {
            let tied: Vec<_> = outside
                .into_iter()
                .filter(|r| r.total_cost == baseline)
                .collect();
            (SelectionCase::BaselineFallback, tied)
        } else {
            window.sort_by(|a, b| {
                a.unmet_units
                    .total_cmp(&b.unmet_units)
                    .then_with(|| by_cost(a, b))
            });
            (SelectionCase::PremiumWindow, window)
        }
    };

    for (i, row) in kept.iter_mut().enumerate() {
        row.rank = Some(i as u32 + 1);
    }

    (case, kept)
}

fn by_cost(a: &ScoredOption<'_>, b: &ScoredOption<'_>) -> Ordering {
    a.total_cost.total_cmp(&b.total_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::compute_costs_and_sla;
    use crate::constraints::flag_feasible;
    use crate::fixtures;
    use crate::models::Scenario;
    use crate::options::InterventionOption;
    use crate::scenarios::simulate_options;

    fn scored(scenarios: &[Scenario]) -> Vec<ScoredOption<'_>> {
        compute_costs_and_sla(flag_feasible(simulate_options(scenarios)))
    }

    fn options(rows: &[ScoredOption<'_>]) -> Vec<InterventionOption> {
        rows.iter().map(|r| r.option).collect()
    }

    #[test]
    fn test_service_first_ranks_sla_rows_by_cost() {
        let scenarios = vec![fixtures::scenario("SCN_A")];
        let (case, ranked) = select_scenario(scored(&scenarios), &PolicyConfig::default());

        assert_eq!(case, SelectionCase::ServiceFirst);
        assert_eq!(
            options(&ranked),
            vec![InterventionOption::Overtime, InterventionOption::Outsource]
        );
        assert!(ranked.iter().all(|r| r.sla_met));
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[0].total_cost, 2000.0);
        assert_eq!(ranked[0].baseline_total_cost, Some(2000.0));
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn test_premium_window_ranks_by_unmet_then_cost() {
        let scenarios = vec![fixtures::sla_unreachable("SCN_B")];
        let (case, ranked) = select_scenario(scored(&scenarios), &PolicyConfig::default());

        assert_eq!(case, SelectionCase::PremiumWindow);
        // outsource (5500) is above 2200 * 1.15
        assert_eq!(
            options(&ranked),
            vec![
                InterventionOption::Overtime,
                InterventionOption::TempLabor,
                InterventionOption::Reroute,
                InterventionOption::DoNothing,
            ]
        );
        let top = &ranked[0];
        assert!(!top.sla_met);
        assert_eq!(top.unmet_units, 50.0);
        assert_eq!(top.baseline_total_cost, Some(2200.0));
        assert!((top.premium_cap_total_cost.unwrap() - 2530.0).abs() < 1e-9);
        assert_eq!(
            ranked.iter().map(|r| r.rank.unwrap()).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_scenario_premium_cap_overrides_default() {
        let mut s = fixtures::sla_unreachable("SCN_B");
        s.service_premium_cap = Some(1.0);
        let scenarios = vec![s];
        let (case, ranked) = select_scenario(scored(&scenarios), &PolicyConfig::default());

        assert_eq!(case, SelectionCase::PremiumWindow);
        assert_eq!(options(&ranked), vec![InterventionOption::Reroute]);
    }

    #[test]
    fn test_fallback_keeps_baseline_ties_in_input_order() {
        let mut s = fixtures::sla_unreachable("SCN_D");
        s.service_premium_cap = Some(0.9);
        // temp labor total: 100 * 7 + 50 * 10 + 1000 = 2200, same as reroute
        s.temp_cost_per_unit = 7.0;
        let scenarios = vec![s];
        let (case, ranked) = select_scenario(scored(&scenarios), &PolicyConfig::default());

        assert_eq!(case, SelectionCase::BaselineFallback);
        assert_eq!(
            options(&ranked),
            vec![InterventionOption::TempLabor, InterventionOption::Reroute]
        );
        assert!(ranked.iter().all(|r| r.total_cost == 2200.0));
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn test_service_first_blocks_precede_premium_blocks() {
        let scenarios = vec![
            fixtures::sla_unreachable("SCN_001"),
            fixtures::scenario("SCN_002"),
        ];
        let ranked = select_and_rank(scored(&scenarios), &PolicyConfig::default());

        let ids: Vec<_> = ranked.iter().map(|r| r.scenario_id()).collect();
        assert_eq!(
            ids,
            vec!["SCN_002", "SCN_002", "SCN_001", "SCN_001", "SCN_001", "SCN_001"]
        );
    }

    #[test]
    fn test_infeasible_rows_never_ranked() {
        let mut s = fixtures::scenario("SCN_X");
        s.max_ot_hours = 0.0;
        s.max_outsource_units = None;
        let scenarios = vec![s];
        let ranked = select_and_rank(scored(&scenarios), &PolicyConfig::default());

        assert!(ranked.iter().all(|r| r.feasible));
        assert!(!ranked
            .iter()
            .any(|r| matches!(r.option, InterventionOption::Overtime | InterventionOption::Outsource)));
    }
}
