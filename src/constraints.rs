//! Feasibility gating

use tracing::debug;

use crate::models::ScoredOption;

/// Flag every row usable or not from its option's resource parameters.
///
/// Infeasible rows are kept; the selection policy drops them.
pub fn flag_feasible(rows: Vec<ScoredOption<'_>>) -> Vec<ScoredOption<'_>> {
    let rows: Vec<ScoredOption<'_>> = rows
        .into_iter()
        .map(|row| ScoredOption {
            feasible: row.option.is_feasible(row.scenario),
            ..row
        })
        .collect();

    debug!(
        "{} of {} option rows feasible",
        rows.iter().filter(|r| r.feasible).count(),
        rows.len()
    );
    rows
}
