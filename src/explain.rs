use crate::models::ScoredOption;

/// Attach a short human-readable rationale to each row.
/// Presentation only; no ranking or cost column is touched.
pub fn build_explanations(rows: Vec<ScoredOption<'_>>) -> Vec<ScoredOption<'_>> {
    rows.into_iter()
        .map(|row| {
            let explanation = row
                .option
                .explain(row.recovered_units, row.unmet_units, row.ot_hours_used);
            ScoredOption {
                explanation: Some(explanation),
                ..row
            }
        })
        .collect()
}
