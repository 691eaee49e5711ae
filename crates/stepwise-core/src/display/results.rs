//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Lesson, Step, Task};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use stepwise_core::{display::CreateResult, models::Lesson};
/// use jiff::Timestamp;
///
/// let lesson = Lesson {
///     id: 1,
///     program_id: 2,
///     name: "Pointers".to_string(),
///     start_date: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     steps: vec![],
/// };
///
/// let output = CreateResult::new(lesson).to_string();
/// assert!(output.contains("Created lesson with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Lesson> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created lesson with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created step with ID: {} at position {}",
            self.resource.id, self.resource.sort_index
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created task with ID: {} in step {}",
            self.resource.id, self.resource.step_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl UpdateResult<Step> {
    /// Describes the field-level differences between `before` and the edited
    /// step.
    pub fn from_edit(before: &Step, after: Step) -> Self {
        let mut changes = Vec::new();
        if before.name != after.name {
            changes.push(format!("Renamed to '{}'", after.name));
        }
        if before.description != after.description {
            changes.push("Updated description".to_string());
        }
        if before.notes != after.notes {
            changes.push("Updated notes".to_string());
        }
        if before.theory != after.theory {
            changes.push("Updated theory".to_string());
        }
        if before.video_url != after.video_url {
            changes.push("Updated video url".to_string());
        }
        if before.is_notebook != after.is_notebook {
            changes.push(if after.is_notebook {
                "Enabled notebook mode".to_string()
            } else {
                "Disabled notebook mode".to_string()
            });
        }
        Self::with_changes(after, changes)
    }
}

impl fmt::Display for UpdateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated step with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}
