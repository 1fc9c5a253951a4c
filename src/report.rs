//! Console tables, CSV/JSON exports and the plain-text decision brief

use anyhow::{Context, Result};
use chrono::Local;
use csv::WriterBuilder;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::{ScoredOption, ScoredRecord};

const DECISION_RULES: [&str; 4] = [
    "If any feasible option meets SLA, select the lowest total-cost SLA-met option.",
    "If no option can meet SLA, allow a controlled premium over the cheapest option.",
    "Within that premium window, minimize unmet units; tie-break by total cost.",
    "Total cost includes intervention cost, late cost, and SLA breach penalties.",
];

pub fn print_section_header(title: &str) {
    println!("\n{}", "═".repeat(100));
    println!("  {}", title);
    println!("{}\n", "═".repeat(100));
}

/// Whole dollars with thousands separators, e.g. `$12,345`
pub fn money(x: f64) -> String {
    if !x.is_finite() {
        return String::new();
    }
    let sign = if x < 0.0 { "-" } else { "" };
    format!("{}${}", sign, thousands(x.abs().round() as u64))
}

/// Whole units with thousands separators
pub fn num(x: f64) -> String {
    if !x.is_finite() {
        return String::new();
    }
    let sign = if x < 0.0 { "-" } else { "" };
    format!("{}{}", sign, thousands(x.abs().round() as u64))
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn sla_label(met: bool) -> &'static str {
    if met {
        "MET"
    } else {
        "MISS"
    }
}

pub fn print_recommendations(recommendations: &[ScoredOption<'_>]) {
    print_section_header("RECOMMENDATIONS (TOP OPTION PER SCENARIO)");

    println!(
        "  {:10} {:10} {:12} {:>7} {:>7} {:>7} {:>5} {:>10} {:>10} {:>10}",
        "Scenario", "Site", "Action", "Gap", "Recov", "Unmet", "SLA", "Base", "Cap", "Total"
    );
    println!("  {}", "─".repeat(96));

    for r in recommendations {
        println!(
            "  {:10} {:10} {:12} {:>7} {:>7} {:>7} {:>5} {:>10} {:>10} {:>10}",
            r.scenario_id(),
            r.scenario.site_id,
            r.option.as_str(),
            num(r.gap_units),
            num(r.recovered_units),
            num(r.unmet_units),
            sla_label(r.sla_met),
            money(r.baseline_total_cost.unwrap_or(0.0)),
            money(r.premium_cap_total_cost.unwrap_or(0.0)),
            money(r.total_cost),
        );
        if let Some(explanation) = &r.explanation {
            println!("  {:10} └ {}", "", explanation);
        }
    }
}

/// Write rows as CSV: scenario inputs followed by the evaluation columns
pub fn write_csv(path: &Path, rows: &[ScoredOption<'_>]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;

    for row in rows {
        writer.serialize(ScoredRecord::from(row))?;
    }
    writer.flush()?;

    debug!("Wrote {}", path.display());
    Ok(())
}

pub fn write_json(path: &Path, rows: &[ScoredOption<'_>]) -> Result<()> {
    let records: Vec<ScoredRecord> = rows.iter().map(ScoredRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Two-part brief: portfolio overview, then a single-scenario drilldown
pub fn render_brief(
    input_label: &str,
    recommendations: &[ScoredOption<'_>],
    scored: &[ScoredOption<'_>],
    drilldown_id: Option<&str>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let rule = "═".repeat(100);

    writeln!(out, "{}", rule)?;
    writeln!(out, "  INTERVENTION RECOMMENDATION BRIEF")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "Input: {}", input_label)?;

    let n = recommendations.len();
    let met = recommendations.iter().filter(|r| r.sla_met).count();
    let total_cost: f64 = recommendations.iter().map(|r| r.total_cost).sum();

    writeln!(out, "\nExecutive Summary")?;
    writeln!(out, "{}", "─".repeat(80))?;
    writeln!(out, "  • Scenarios evaluated: {}", n)?;
    writeln!(out, "  • SLA outcomes: {} met, {} missed", met, n - met)?;
    writeln!(
        out,
        "  • Projected total cost (recommended actions): {}",
        money(total_cost)
    )?;
    let actions: Vec<String> = recommendations
        .iter()
        .map(|r| {
            format!(
                "{} ({}): {} - {}",
                r.scenario_id(),
                r.scenario.site_id,
                r.option,
                money(r.total_cost)
            )
        })
        .collect();
    if !actions.is_empty() {
        writeln!(out, "  • Recommended actions: {}", actions.join("; "))?;
    }

    writeln!(out, "\nDecision Rules")?;
    writeln!(out, "{}", "─".repeat(80))?;
    for r in DECISION_RULES {
        writeln!(out, "  • {}", r)?;
    }

    writeln!(out, "\nRecommended Actions (Overview)")?;
    writeln!(out, "{}", "─".repeat(80))?;
    writeln!(
        out,
        "  {:10} {:10} {:12} {:>7} {:>7} {:>7} {:>5} {:>10} {:>10} {:>10}  {}",
        "Scenario", "Site", "Action", "Gap", "Recov", "Unmet", "SLA", "Base", "Cap", "Total", "Rationale"
    )?;
    for r in recommendations {
        writeln!(
            out,
            "  {:10} {:10} {:12} {:>7} {:>7} {:>7} {:>5} {:>10} {:>10} {:>10}  {}",
            r.scenario_id(),
            r.scenario.site_id,
            r.option.as_str(),
            num(r.gap_units),
            num(r.recovered_units),
            num(r.unmet_units),
            sla_label(r.sla_met),
            money(r.baseline_total_cost.unwrap_or(0.0)),
            money(r.premium_cap_total_cost.unwrap_or(0.0)),
            money(r.total_cost),
            r.explanation.as_deref().unwrap_or(""),
        )?;
    }
    writeln!(
        out,
        "\nLegend: Recov = recovered units; Base = baseline total cost; Cap = premium cap; costs in USD."
    )?;

    if let Some(id) = drilldown_id {
        render_drilldown(&mut out, id, recommendations, scored)?;
    }

    Ok(out)
}

fn render_drilldown(
    out: &mut String,
    id: &str,
    recommendations: &[ScoredOption<'_>],
    scored: &[ScoredOption<'_>],
) -> fmt::Result {
    let rule = "═".repeat(100);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "  SCENARIO DRILLDOWN: {}", id)?;
    writeln!(out, "{}", rule)?;

    let mut rows: Vec<&ScoredOption<'_>> = scored.iter().filter(|r| r.scenario_id() == id).collect();
    if rows.is_empty() {
        writeln!(out, "No data available for this scenario.")?;
        return Ok(());
    }

    let chosen = recommendations
        .iter()
        .find(|r| r.scenario_id() == id)
        .map(|r| r.option);

    // Service-first display order, matching how the policy decided
    if rows.iter().any(|r| r.sla_met) {
        rows.sort_by(|a, b| {
            b.sla_met
                .cmp(&a.sla_met)
                .then_with(|| a.total_cost.total_cmp(&b.total_cost))
        });
    } else {
        rows.sort_by(|a, b| {
            a.unmet_units
                .total_cmp(&b.unmet_units)
                .then_with(|| a.total_cost.total_cmp(&b.total_cost))
        });
    }

    writeln!(out, "\nOption Comparison")?;
    writeln!(out, "{}", "─".repeat(80))?;
    writeln!(
        out,
        "  {:14} {:>10} {:>8} {:>5} {:>10} {:>13} {:>10} {:>10}",
        "Option", "Recovered", "Unmet", "SLA", "Within Cap", "Intervention", "Service", "Total"
    )?;
    for r in rows {
        let mark = if Some(r.option) == chosen { "★ " } else { "  " };
        writeln!(
            out,
            "  {}{:12} {:>10} {:>8} {:>5} {:>10} {:>13} {:>10} {:>10}",
            mark,
            r.option.as_str(),
            num(r.recovered_units),
            num(r.unmet_units),
            sla_label(r.sla_met),
            if r.within_cap() { "YES" } else { "NO" },
            money(r.intervention_cost),
            money(r.service_cost),
            money(r.total_cost),
        )?;
    }
    writeln!(out, "\n★ indicates the recommended option.")?;
    Ok(())
}

pub fn write_brief(
    path: &Path,
    input_label: &str,
    recommendations: &[ScoredOption<'_>],
    scored: &[ScoredOption<'_>],
    drilldown_id: Option<&str>,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }

    let brief = render_brief(input_label, recommendations, scored, drilldown_id)?;
    fs::write(path, brief).with_context(|| format!("Cannot write {}", path.display()))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::fixtures;
    use crate::pipeline::{choose_recommendation, evaluate_all_options};

    #[test]
    fn test_money_and_num_formatting() {
        assert_eq!(money(1234567.4), "$1,234,567");
        assert_eq!(money(999.5), "$1,000");
        assert_eq!(money(-2500.0), "-$2,500");
        assert_eq!(money(f64::NAN), "");
        assert_eq!(num(200.0), "200");
        assert_eq!(num(12000.0), "12,000");
    }

    #[test]
    fn test_brief_contains_summary_and_drilldown() {
        let scenarios = vec![fixtures::scenario("SCN_001"), fixtures::sla_unreachable("SCN_002")];
        let scored = evaluate_all_options(&scenarios, &PolicyConfig::default());
        let recs = choose_recommendation(&scored);

        let brief = render_brief("data/sample_inputs.csv", &recs, &scored, Some("SCN_002")).unwrap();

        assert!(brief.contains("Scenarios evaluated: 2"));
        assert!(brief.contains("SLA outcomes: 1 met, 1 missed"));
        assert!(brief.contains("SCN_001 (SITE_SCN_001): overtime - $2,000"));
        assert!(brief.contains("SCENARIO DRILLDOWN: SCN_002"));
        assert!(brief.contains("★ overtime"));
    }

    #[test]
    fn test_brief_unknown_drilldown() {
        let scenarios = vec![fixtures::scenario("SCN_001")];
        let scored = evaluate_all_options(&scenarios, &PolicyConfig::default());
        let recs = choose_recommendation(&scored);

        let brief = render_brief("inline", &recs, &scored, Some("SCN_404")).unwrap();
        assert!(brief.contains("No data available for this scenario."));

        let brief = render_brief("inline", &recs, &scored, None).unwrap();
        assert!(!brief.contains("DRILLDOWN"));
    }
}
