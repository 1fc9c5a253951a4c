//! Disruption-mitigation planner
//!
//! Evaluates five mitigation options per shortfall scenario, costs them
//! against the fill-rate SLA and recommends one action per scenario.

pub mod config;
pub mod constraints;
pub mod costs;
pub mod explain;
pub mod models;
pub mod options;
pub mod pipeline;
pub mod policy;
pub mod report;
pub mod scenarios;
pub mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::PolicyConfig;
pub use models::{Scenario, ScoredOption};
pub use options::InterventionOption;
pub use pipeline::{choose_recommendation, evaluate_all_options, missing_scenarios};
