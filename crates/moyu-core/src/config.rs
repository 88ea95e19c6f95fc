//! Tracker configuration domain model.
//!
//! Storage lives in the infrastructure crate; this is the model only.

use serde::{Deserialize, Serialize};

/// Defaults remembered between runs.
///
/// `goal_hours` is meant to be edited while idle; changing it never affects
/// the rate of a session that is already running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Monthly salary used when tracking starts without an explicit value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_salary: Option<f64>,
    /// Daily goal duration in hours.
    #[serde(default = "default_goal_hours")]
    pub goal_hours: f64,
}

fn default_goal_hours() -> f64 {
    2.0
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            monthly_salary: None,
            goal_hours: default_goal_hours(),
        }
    }
}
