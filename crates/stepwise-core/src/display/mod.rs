//! Display formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and operation outcomes
//! so the CLI can print any result through one code path. All output is
//! markdown.
//!
//! - [`collections`]: [`Lessons`] and [`Steps`]
//! - [`results`]: [`CreateResult`] and [`UpdateResult`]
//! - [`datetime`]: [`LocalDateTime`] and [`StartDate`]
//!
//! ```rust
//! use stepwise_core::{display::UpdateResult, models::{Lesson, StepData}};
//! use jiff::Timestamp;
//!
//! let lesson = Lesson {
//!     id: 1,
//!     program_id: 1,
//!     name: "Recursion".to_string(),
//!     start_date: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     steps: vec![],
//! };
//! let before = lesson.draft_step(&StepData::named("Base case")).unwrap();
//! let mut after = before.clone();
//! after.apply_edit(&StepData::named("Base cases"));
//!
//! let output = UpdateResult::from_edit(&before, after).to_string();
//! assert!(output.contains("Renamed to 'Base cases'"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Lessons, Steps};
pub use datetime::{LocalDateTime, StartDate};
pub use results::{CreateResult, UpdateResult};
