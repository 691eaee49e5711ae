//! Data models for lessons, steps, tasks and submissions.
//!
//! Display implementations for these models live in
//! [`crate::display::models`]. Navigation and stats memos hang off [`Step`];
//! see [`crate::navigation`] and [`crate::stats`] for the logic behind them.
//!
//! # Examples
//!
//! ```rust
//! use stepwise_core::models::{Lesson, StepData};
//! use jiff::Timestamp;
//!
//! let lesson = Lesson {
//!     id: 1,
//!     program_id: 7,
//!     name: "Loops".to_string(),
//!     start_date: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     steps: vec![],
//! };
//!
//! let step = lesson.draft_step(&StepData::named("for loops")).unwrap();
//! assert_eq!(step.sort_index, 100);
//! assert_eq!(step.program_id, 7);
//! ```

pub mod lesson;
pub mod progress;
pub mod requests;
pub mod step;
pub mod submission;
pub mod task;

#[cfg(test)]
mod tests;

pub use lesson::Lesson;
pub use progress::{LessonProgress, StepProgress};
pub use requests::StepData;
pub use step::{next_sort_index, strip_line_breaks, Step, FIRST_SORT_INDEX};
pub use submission::{BestMarks, Student, Submission};
pub use task::Task;
