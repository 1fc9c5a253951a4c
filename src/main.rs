use anyhow::{bail, Result};
use clap::Parser;
use intervention_planner::{
    choose_recommendation, evaluate_all_options, missing_scenarios, report, scenarios,
    validate::validate_scenarios, PolicyConfig,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "intervention_planner")]
#[command(about = "Score mitigation options per disruption scenario and recommend one action each")]
struct Args {
    /// Scenario input CSV
    #[arg(long, default_value = "data/sample_inputs.csv")]
    input: PathBuf,

    /// Directory for the scored table, recommendations and brief
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Scenario shown in the brief's drilldown section (empty to skip)
    #[arg(long, default_value = "SCN_002")]
    drilldown_id: String,

    /// Premium cap for scenarios without their own service_premium_cap
    #[arg(long, default_value = "1.15")]
    premium_cap: f64,

    /// Refuse inputs with out-of-range or duplicate values
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = PolicyConfig::with_premium_cap(args.premium_cap);

    let inputs = scenarios::load_inputs(&args.input)?;

    let issues = validate_scenarios(&inputs);
    for issue in issues.iter().take(20) {
        warn!("Input issue: {}", issue);
    }
    if issues.len() > 20 {
        warn!("... and {} more input issues", issues.len() - 20);
    }
    if args.strict && !issues.is_empty() {
        bail!("{} input issues found in {}", issues.len(), args.input.display());
    }

    let scored = evaluate_all_options(&inputs, &config);
    let recommendations = choose_recommendation(&scored);

    info!(
        "Scored {} option rows, {} recommendations for {} scenarios",
        scored.len(),
        recommendations.len(),
        inputs.len()
    );

    let missing = missing_scenarios(&inputs, &recommendations);
    if !missing.is_empty() {
        warn!("No feasible option for: {}", missing.join(", "));
    }

    report::print_recommendations(&recommendations);

    std::fs::create_dir_all(&args.output_dir)?;
    let scored_path = args.output_dir.join("intervention_option_results.csv");
    let recs_path = args.output_dir.join("recommendations.csv");
    let json_path = args.output_dir.join("recommendations.json");
    let brief_path = args.output_dir.join("intervention_brief.txt");

    report::write_csv(&scored_path, &scored)?;
    report::write_csv(&recs_path, &recommendations)?;
    report::write_json(&json_path, &recommendations)?;

    let drilldown = Some(args.drilldown_id.as_str()).filter(|id| !id.is_empty());
    report::write_brief(
        &brief_path,
        &args.input.display().to_string(),
        &recommendations,
        &scored,
        drilldown,
    )?;

    println!();
    for path in [&scored_path, &recs_path, &json_path, &brief_path] {
        println!("Saved: {}", path.display());
    }

    Ok(())
}
