//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A gradable unit within a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the parent step
    pub step_id: u64,

    /// Title of the task
    pub name: String,

    /// Highest mark a submission can earn
    pub max_mark: f64,

    /// Bonus task; its mark counts but its `max_mark` does not
    #[serde(default)]
    pub is_star: bool,

    /// Ordering key within the step
    pub sort_index: i64,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,
}
