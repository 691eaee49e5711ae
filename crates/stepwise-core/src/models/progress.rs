//! Lesson progress types and functionality.

use serde::{Deserialize, Serialize};

use super::Lesson;
use crate::{navigation::StepRef, stats::StatsRecord, stats::SubmissionHistory};

/// A student's score on one step of a lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepProgress {
    pub step: StepRef,
    pub stats: StatsRecord,
}

/// A student's scores across every step of a lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonProgress {
    /// Lesson ID
    pub lesson_id: u64,
    /// Name of the lesson
    pub lesson_name: String,
    /// Student the scores belong to
    pub student_id: u64,
    /// Per-step scores in lesson order
    pub steps: Vec<StepProgress>,
    /// Points and max points summed over all steps
    pub total: StatsRecord,
}

impl LessonProgress {
    /// Collects each step's stats through the step's own memo.
    pub fn from_lesson<H>(lesson: &Lesson, student: &H) -> Self
    where
        H: SubmissionHistory + ?Sized,
    {
        let steps: Vec<StepProgress> = lesson
            .steps
            .iter()
            .map(|step| StepProgress {
                step: step.as_step_ref(),
                stats: step.stats(student),
            })
            .collect();

        let (points, max_points) = steps.iter().fold((0.0, 0.0), |(points, max), progress| {
            (points + progress.stats.points, max + progress.stats.max_points)
        });

        Self {
            lesson_id: lesson.id,
            lesson_name: lesson.name.clone(),
            student_id: student.student_id(),
            steps,
            total: StatsRecord::from_totals(points, max_points),
        }
    }

    /// Number of steps where the student reached `max_points`.
    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|p| p.stats.max_points > 0.0 && p.stats.points >= p.stats.max_points)
            .count()
    }
}
