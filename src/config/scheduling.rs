use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SchedulingConfig {
    /// Items returned by a priority listing when the caller gives no limit.
    pub default_limit: usize,
    /// Horizon, in days, of the upcoming-deadlines view.
    pub upcoming_days: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        SchedulingConfig {
            default_limit: 10,
            upcoming_days: 3,
        }
    }
}
