//! Step model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Lesson, StepData, Task};
use crate::{
    error::{self, CurriculumError},
    navigation::{resolve_positions, NavigationCache, NavigationState, Sequenced, StepRef},
    stats::{compute_stats, StatsCache, StatsRecord, SubmissionHistory},
};

/// Sort index given to the first step of an empty lesson.
pub const FIRST_SORT_INDEX: i64 = 100;

/// Sort index for an item appended after `last`.
///
/// Starts at [`FIRST_SORT_INDEX`] and otherwise follows the last item, leaving
/// any gaps in between untouched. Fails when `last` is already `i64::MAX`.
pub fn next_sort_index(last: Option<i64>) -> error::Result<i64> {
    match last {
        None => Ok(FIRST_SORT_INDEX),
        Some(last) => last.checked_add(1).ok_or_else(|| {
            CurriculumError::invalid_input("sort_index")
                .with_reason(format!("no sort index left after {last}"))
        }),
    }
}

/// Removes every `\n` and `\r` from notebook theory text.
pub fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

/// An ordered instructional unit within a lesson.
///
/// Besides its persisted fields a step owns two memos: its resolved
/// neighbours and a per-student stats map. Both live only as long as this
/// instance; reloading the step starts from empty caches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the program the lesson belongs to
    pub program_id: u64,

    /// ID of the parent lesson
    pub lesson_id: u64,

    /// Display name of the step
    pub name: String,

    /// Short description shown in listings
    pub description: Option<String>,

    /// Instructor notes
    pub notes: Option<String>,

    /// Theory content, markdown or notebook source
    pub theory: Option<String>,

    /// Optional lecture video
    pub video_url: Option<String>,

    /// Whether `theory` holds notebook content
    #[serde(default)]
    pub is_notebook: bool,

    /// Ordering key within the lesson; not necessarily contiguous
    pub sort_index: i64,

    /// Date the step opens, inherited from the lesson on creation
    pub start_date: Option<Date>,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,

    /// Tasks ordered by `(sort_index, id)`
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(skip)]
    pub(crate) navigation: NavigationCache,

    #[serde(skip)]
    pub(crate) stats_cache: StatsCache,
}

impl Step {
    /// Builds an unsaved step at `sort_index` in `lesson`.
    ///
    /// Only `name`, `notes` and `theory` are taken from `data`. Notebook data
    /// sets the flag and strips line breaks from the theory.
    pub fn draft(lesson: &Lesson, data: &StepData, sort_index: i64) -> Self {
        let now = Timestamp::now();
        let mut step = Self {
            id: 0,
            program_id: lesson.program_id,
            lesson_id: lesson.id,
            name: data.name.clone(),
            description: None,
            notes: data.notes.clone(),
            theory: data.theory.clone(),
            video_url: None,
            is_notebook: false,
            sort_index,
            start_date: lesson.start_date,
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
            navigation: NavigationCache::default(),
            stats_cache: StatsCache::default(),
        };

        if data.notebook {
            step.mark_notebook();
        }

        step
    }

    /// Overwrites the editable fields from `data`.
    ///
    /// Notebook data sets the flag and strips line breaks from the theory.
    /// Without it the flag is cleared but the theory is stored as given, line
    /// breaks included.
    pub fn apply_edit(&mut self, data: &StepData) {
        self.name = data.name.clone();
        self.description = data.description.clone();
        self.notes = data.notes.clone();
        self.theory = data.theory.clone();
        self.video_url = data.video_url.clone();

        if data.notebook {
            self.mark_notebook();
        } else {
            self.is_notebook = false;
        }
        self.updated_at = Timestamp::now();
    }

    fn mark_notebook(&mut self) {
        self.is_notebook = true;
        self.theory = self.theory.as_deref().map(strip_line_breaks);
    }

    /// Position reference for this step.
    pub fn as_step_ref(&self) -> StepRef {
        StepRef::new(self.id, self.name.clone(), self.sort_index)
    }

    /// Neighbours of this step in `lesson_steps`, resolved on first call.
    ///
    /// `lesson_steps` must be ordered by `(sort_index, id)`. Later calls
    /// return the memoized state without looking at the argument.
    pub fn navigation<S: Sequenced>(&self, lesson_steps: &[S]) -> &NavigationState {
        self.navigation.get_or_resolve(|| {
            debug!("Resolving neighbours of step {}", self.id);
            resolve_positions(self.id, lesson_steps)
        })
    }

    /// Like [`navigation`](Self::navigation), but the sequence is only loaded
    /// on a cache miss.
    pub fn try_navigation<F, E>(&self, load_sequence: F) -> Result<&NavigationState, E>
    where
        F: FnOnce() -> Result<Vec<StepRef>, E>,
    {
        self.navigation.get_or_try_resolve(|| {
            debug!("Loading lesson {} sequence for step {}", self.lesson_id, self.id);
            let sequence = load_sequence()?;
            Ok(resolve_positions(self.id, &sequence))
        })
    }

    /// Step following this one, if any.
    pub fn next_step<S: Sequenced>(&self, lesson_steps: &[S]) -> Option<&StepRef> {
        self.navigation(lesson_steps).next.as_ref()
    }

    /// Step preceding this one, if any.
    pub fn previous_step<S: Sequenced>(&self, lesson_steps: &[S]) -> Option<&StepRef> {
        self.navigation(lesson_steps).previous.as_ref()
    }

    /// Whether neighbours have been resolved for this instance.
    pub fn navigation_resolved(&self) -> bool {
        self.navigation.is_resolved()
    }

    /// The student's score on this step, memoized per student.
    ///
    /// A cached record is returned as is, even if `tasks` or the student's
    /// submissions changed after it was computed.
    pub fn stats<H>(&self, student: &H) -> StatsRecord
    where
        H: SubmissionHistory + ?Sized,
    {
        self.stats_cache.get_or_compute(student.student_id(), || {
            debug!(
                "Computing stats of step {} for student {}",
                self.id,
                student.student_id()
            );
            compute_stats(&self.tasks, student)
        })
    }

    /// Like [`stats`](Self::stats), but the submission history is only loaded
    /// on a cache miss.
    pub fn try_stats<H, F, E>(&self, student_id: u64, load_history: F) -> Result<StatsRecord, E>
    where
        H: SubmissionHistory,
        F: FnOnce() -> Result<H, E>,
    {
        self.stats_cache.get_or_try_compute(student_id, || {
            debug!("Loading submissions of student {student_id} for step {}", self.id);
            let history = load_history()?;
            Ok(compute_stats(&self.tasks, &history))
        })
    }

    pub fn percent<H: SubmissionHistory + ?Sized>(&self, student: &H) -> f64 {
        self.stats(student).percent
    }

    pub fn points<H: SubmissionHistory + ?Sized>(&self, student: &H) -> f64 {
        self.stats(student).points
    }

    pub fn max_points<H: SubmissionHistory + ?Sized>(&self, student: &H) -> f64 {
        self.stats(student).max_points
    }

    /// Stats already cached for `student_id`, without computing.
    pub fn cached_stats(&self, student_id: u64) -> Option<StatsRecord> {
        self.stats_cache.get(student_id)
    }
}

impl Sequenced for Step {
    fn step_id(&self) -> u64 {
        self.id
    }

    fn sort_index(&self) -> i64 {
        self.sort_index
    }

    fn to_step_ref(&self) -> StepRef {
        self.as_step_ref()
    }
}
