//! Decision-policy configuration passed into the selection stage

use serde::{Deserialize, Serialize};

use crate::models::Scenario;

/// Multiplier over the cheapest feasible option tolerated when no option can
/// meet the SLA.
pub const DEFAULT_SERVICE_PREMIUM_CAP: f64 = 1.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Used for scenarios that carry no `service_premium_cap` of their own
    pub default_premium_cap: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_premium_cap: DEFAULT_SERVICE_PREMIUM_CAP,
        }
    }
}

impl PolicyConfig {
    pub fn with_premium_cap(default_premium_cap: f64) -> Self {
        Self { default_premium_cap }
    }

    /// Per-scenario override if present and a number, else the configured default
    pub fn premium_cap_for(&self, scenario: &Scenario) -> f64 {
        scenario
            .service_premium_cap
            .filter(|cap| !cap.is_nan())
            .unwrap_or(self.default_premium_cap)
    }
}
