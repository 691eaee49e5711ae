//! Core library for the Stepwise lesson tracker.
//!
//! Lessons are made of ordered steps; each step carries tasks that students
//! submit marks against. This crate provides the SQLite persistence layer,
//! the data models, positional navigation between steps and per-student
//! score aggregation.
//!
//! Navigation and stats are memoized on each [`Step`] instance: the first
//! query resolves and caches the result, later queries on the same instance
//! return it unchanged.
//!
//! # Quick Start
//!
//! ```rust
//! use stepwise_core::{CurriculumBuilder, params::{CreateLesson, CreateStep, Id}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let curriculum = CurriculumBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let lesson = curriculum
//!     .create_lesson(&CreateLesson {
//!         program_id: 1,
//!         name: "Iterators".to_string(),
//!         start_date: Some("2024-09-02".to_string()),
//!     })
//!     .await?;
//!
//! for name in ["map", "filter", "fold"] {
//!     curriculum
//!         .create_step(&CreateStep {
//!             lesson_id: lesson.id,
//!             name: name.to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//! }
//!
//! let steps = curriculum.get_steps(&Id { id: lesson.id }).await?;
//! let navigation = curriculum.step_navigation(&Id { id: steps[1].id }).await?;
//! println!("{navigation}");
//! # Ok(())
//! # }
//! ```

pub mod curriculum;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod navigation;
pub mod params;
pub mod stats;

pub use curriculum::{Curriculum, CurriculumBuilder};
pub use db::Database;
pub use display::{CreateResult, Lessons, LocalDateTime, StartDate, Steps, UpdateResult};
pub use error::{CurriculumError, Result};
pub use models::{
    BestMarks, Lesson, LessonProgress, Step, StepData, StepProgress, Student, Submission, Task,
};
pub use navigation::{NavigationState, Sequenced, StepRef};
pub use params::{
    AddTask, CreateLesson, CreateStep, EditStep, Id, ListLessons, RecordSubmission,
    StudentLesson, StudentStep,
};
pub use stats::{StatsRecord, SubmissionHistory};
