//! High-level curriculum API for lessons, steps and student progress.
//!
//! [`Curriculum`] is the async entry point used by interfaces. Each operation
//! opens the SQLite database on a blocking task and delegates to
//! [`Database`](crate::db::Database); navigation and stats are then computed
//! on freshly loaded step instances, so every call sees current data.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Curriculum    │    │     Models      │    │    Database     │
//! │ (lesson_ops,    │───▶│ (Step memos,    │◀───│   (via db/)     │
//! │  step_ops, ...) │    │  navigation)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Curriculum`] instances with configuration
//! - [`lesson_ops`]: Lesson creation, listing and per-student progress
//! - [`step_ops`]: Step creation, editing, lookup and navigation
//! - [`grading_ops`]: Tasks, submissions and step stats
//!
//! # Usage
//!
//! ```rust,no_run
//! use stepwise_core::{
//!     params::{CreateLesson, CreateStep, StudentStep},
//!     CurriculumBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let curriculum = CurriculumBuilder::new()
//!     .with_database_path(Some("stepwise.db"))
//!     .build()
//!     .await?;
//!
//! let lesson = curriculum
//!     .create_lesson(&CreateLesson {
//!         program_id: 1,
//!         name: "Loops".to_string(),
//!         start_date: None,
//!     })
//!     .await?;
//!
//! let step = curriculum
//!     .create_step(&CreateStep {
//!         lesson_id: lesson.id,
//!         name: "while".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let stats = curriculum
//!     .step_stats(&StudentStep { step_id: step.id, student_id: 42 })
//!     .await?;
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{CurriculumError, Result},
};

pub mod builder;
pub mod grading_ops;
pub mod lesson_ops;
pub mod step_ops;


pub use builder::CurriculumBuilder;

/// Main interface for managing lessons, steps and progress.
pub struct Curriculum {
    pub(crate) db_path: PathBuf,
}

impl Curriculum {
    /// Creates a new curriculum backed by the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing SQLite database.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on a blocking task.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(CurriculumError::join)?
    }
}
