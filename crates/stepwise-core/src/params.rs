//! Parameter structures for Stepwise operations
//!
//! Shared request structures used by every interface (CLI today) without
//! framework-specific derives. Interface layers define their own argument
//! types and convert into these via `From`, keeping clap out of the core:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Curriculum    │
//! │  (clap derives) │───▶│  (validated)    │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Validation lives here rather than in the models: the models assume
//! well-formed input, and every `validate` below is what makes it so.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{CurriculumError, Result};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_lesson, show_step, step_navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

fn require_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CurriculumError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

fn require_mark(field: &str, mark: f64) -> Result<()> {
    if !mark.is_finite() || mark < 0.0 {
        return Err(CurriculumError::invalid_input(field)
            .with_reason(format!("must be a non-negative number, got {mark}")));
    }
    Ok(())
}

/// Parameters for creating a new lesson.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLesson {
    /// Program the lesson belongs to
    pub program_id: u64,
    /// Name of the lesson (required)
    pub name: String,
    /// Optional opening date, `YYYY-MM-DD`
    pub start_date: Option<String>,
}

impl CreateLesson {
    /// Validate the name and parse the start date.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepwise_core::params::CreateLesson;
    ///
    /// let params = CreateLesson {
    ///     program_id: 1,
    ///     name: "Recursion".to_string(),
    ///     start_date: Some("2024-09-02".to_string()),
    /// };
    /// let start = params.validate()?;
    /// assert_eq!(start.map(|d| d.day()), Some(2));
    /// # stepwise_core::Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<Option<Date>> {
        require_name("name", &self.name)?;

        self.start_date
            .as_deref()
            .map(|raw| {
                raw.parse::<Date>().map_err(|e| {
                    CurriculumError::invalid_input("start_date")
                        .with_reason(format!("Invalid date '{raw}': {e}"))
                })
            })
            .transpose()
    }
}

/// Parameters for listing lessons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLessons {
    /// Restrict to lessons of one program
    pub program_id: Option<u64>,
}

/// Parameters for appending a step to a lesson.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStep {
    /// Lesson to append the step to
    pub lesson_id: u64,
    /// Name of the step (required)
    pub name: String,
    /// Instructor notes
    pub notes: Option<String>,
    /// Theory content
    pub theory: Option<String>,
    /// Treat the theory as notebook content
    #[serde(default)]
    pub notebook: bool,
}

impl CreateStep {
    pub fn validate(&self) -> Result<()> {
        require_name("name", &self.name)
    }
}

/// Parameters for editing an existing step.
///
/// Every field overwrites the stored value, so omitted optional fields are
/// cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditStep {
    /// Step ID to edit (required)
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub theory: Option<String>,
    pub video_url: Option<String>,
    /// Treat the theory as notebook content; `false` clears the flag
    #[serde(default)]
    pub notebook: bool,
}

impl EditStep {
    pub fn validate(&self) -> Result<()> {
        require_name("name", &self.name)
    }
}

/// Parameters for adding a task to a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTask {
    /// Step the task belongs to
    pub step_id: u64,
    /// Title of the task (required)
    pub name: String,
    /// Highest mark a submission can earn
    pub max_mark: f64,
    /// Bonus task, excluded from the step's max points
    #[serde(default)]
    pub is_star: bool,
    /// Explicit ordering key; appended after the last task when absent
    pub sort_index: Option<i64>,
}

impl AddTask {
    pub fn validate(&self) -> Result<()> {
        require_name("name", &self.name)?;
        require_mark("max_mark", self.max_mark)
    }
}

/// Parameters for recording a student's submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSubmission {
    pub student_id: u64,
    pub task_id: u64,
    pub mark: f64,
}

impl RecordSubmission {
    pub fn validate(&self) -> Result<()> {
        require_mark("mark", self.mark)
    }
}

/// Identifies a student's view of one step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentStep {
    pub step_id: u64,
    pub student_id: u64,
}

/// Identifies a student's view of one lesson.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentLesson {
    pub lesson_id: u64,
    pub student_id: u64,
}
