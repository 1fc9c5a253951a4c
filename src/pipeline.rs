//! The two entry points the shell calls: score every option, then pick the
//! top option per scenario.

use std::collections::HashSet;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::constraints::flag_feasible;
use crate::costs::compute_costs_and_sla;
use crate::explain::build_explanations;
use crate::models::{Scenario, ScoredOption};
use crate::policy::select_and_rank;
use crate::scenarios::simulate_options;

/// Simulate, gate, cost, rank and explain every (scenario, option) pair.
///
/// The result holds only rows that survived feasibility and selection.
pub fn evaluate_all_options<'a>(
    scenarios: &'a [Scenario],
    config: &PolicyConfig,
) -> Vec<ScoredOption<'a>> {
    let options = simulate_options(scenarios);
    let options = flag_feasible(options);
    let options = compute_costs_and_sla(options);
    let ranked = select_and_rank(options, config);
    let scored = build_explanations(ranked);

    debug!("Scored table has {} rows", scored.len());
    scored
}

/// The rank-1 row of each scenario, ordered by `scenario_id`
pub fn choose_recommendation<'a>(scored: &[ScoredOption<'a>]) -> Vec<ScoredOption<'a>> {
    let mut rows: Vec<ScoredOption<'a>> = scored.to_vec();
    rows.sort_by(|a, b| {
        a.scenario_id()
            .cmp(b.scenario_id())
            .then_with(|| a.rank.cmp(&b.rank))
    });
    rows.dedup_by(|later, first| later.scenario_id() == first.scenario_id());
    rows
}

/// Input scenarios without a recommendation (all options infeasible).
/// Ids come back in input order, once each.
pub fn missing_scenarios(scenarios: &[Scenario], recommendations: &[ScoredOption<'_>]) -> Vec<String> {
    let recommended: HashSet<&str> = recommendations.iter().map(|r| r.scenario_id()).collect();
    let mut seen = HashSet::new();

    scenarios
        .iter()
        .map(|s| s.scenario_id.as_str())
        .filter(|id| !recommended.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
