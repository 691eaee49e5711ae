//! Lesson model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{next_sort_index, Step, StepData};
use crate::error::Result;

/// A lesson of a program, holding an ordered sequence of steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    /// Unique identifier for the lesson
    pub id: u64,

    /// ID of the owning program
    pub program_id: u64,

    /// Name of the lesson
    pub name: String,

    /// Date the lesson opens; new steps inherit it
    pub start_date: Option<Date>,

    /// Timestamp when the lesson was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the lesson was last modified (UTC)
    pub updated_at: Timestamp,

    /// Steps ordered by `(sort_index, id)` (lazy-loaded by default)
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Lesson {
    /// Sort index the next appended step receives.
    pub fn next_sort_index(&self) -> Result<i64> {
        next_sort_index(self.steps.last().map(|step| step.sort_index))
    }

    /// Unsaved step appended to the end of this lesson.
    pub fn draft_step(&self, data: &StepData) -> Result<Step> {
        Ok(Step::draft(self, data, self.next_sort_index()?))
    }
}
