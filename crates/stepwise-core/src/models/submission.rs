//! Submissions and the per-student histories built from them.

use std::collections::HashMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::stats::SubmissionHistory;

/// A student's graded attempt at a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    /// Unique identifier for the submission
    pub id: u64,

    /// Student who submitted
    pub student_id: u64,

    /// Task the submission answers
    pub task_id: u64,

    /// Mark given to the attempt
    pub mark: f64,

    /// Timestamp when the submission was recorded (UTC)
    pub created_at: Timestamp,
}

/// A student together with their full submission list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: u64,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl Student {
    pub fn new(id: u64, submissions: Vec<Submission>) -> Self {
        Self { id, submissions }
    }
}

impl SubmissionHistory for Student {
    fn student_id(&self) -> u64 {
        self.id
    }

    fn best_mark(&self, task_id: u64) -> Option<f64> {
        self.submissions
            .iter()
            .filter(|submission| submission.task_id == task_id)
            .map(|submission| submission.mark)
            .reduce(f64::max)
    }
}

/// Best mark per task for one student, as aggregated by the database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestMarks {
    pub student_id: u64,
    pub marks: HashMap<u64, f64>,
}

impl BestMarks {
    pub fn new(student_id: u64, marks: HashMap<u64, f64>) -> Self {
        Self { student_id, marks }
    }
}

impl SubmissionHistory for BestMarks {
    fn student_id(&self) -> u64 {
        self.student_id
    }

    fn best_mark(&self, task_id: u64) -> Option<f64> {
        self.marks.get(&task_id).copied()
    }
}
