//! Task, submission and stats operations for the Curriculum.

use super::Curriculum;
use crate::{
    db::task_queries::NewTask,
    error::{CurriculumError, Result},
    models::{Submission, Task},
    params::{AddTask, RecordSubmission, StudentStep},
    stats::StatsRecord,
};

impl Curriculum {
    /// Adds a task to a step.
    pub async fn add_task(&self, params: &AddTask) -> Result<Task> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| {
            db.add_task(
                params.step_id,
                NewTask {
                    name: &params.name,
                    max_mark: params.max_mark,
                    is_star: params.is_star,
                    sort_index: params.sort_index,
                },
            )
        })
        .await
    }

    /// Records a student's mark on a task. Earlier submissions are kept; only
    /// the best mark counts towards stats.
    pub async fn record_submission(&self, params: &RecordSubmission) -> Result<Submission> {
        params.validate()?;
        let RecordSubmission {
            student_id,
            task_id,
            mark,
        } = *params;

        self.with_database(move |db| db.record_submission(student_id, task_id, mark))
            .await
    }

    /// A student's points, max points and percentage on a step.
    pub async fn step_stats(&self, params: &StudentStep) -> Result<StatsRecord> {
        let StudentStep {
            step_id,
            student_id,
        } = *params;

        self.with_database(move |db| {
            let step = db
                .get_step(step_id)?
                .ok_or(CurriculumError::StepNotFound { id: step_id })?;
            step.try_stats(student_id, || db.best_marks(student_id, step_id))
        })
        .await
    }
}
