//! Task and submission operations and queries.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::utils::{id_column, timestamp_column};
use crate::{
    error::{CurriculumError, DatabaseResultExt, Result},
    models::{next_sort_index, BestMarks, Student, Submission, Task},
};

const CHECK_STEP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM steps WHERE id = ?1)";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";
const SELECT_LAST_TASK_SORT_INDEX_SQL: &str =
    "SELECT sort_index FROM tasks WHERE step_id = ?1 ORDER BY sort_index DESC, id DESC LIMIT 1";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (step_id, name, max_mark, is_star, sort_index, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_TASKS_BY_STEP_SQL: &str = "SELECT id, step_id, name, max_mark, is_star, sort_index, created_at FROM tasks WHERE step_id = ?1 ORDER BY sort_index, id";
const INSERT_SUBMISSION_SQL: &str =
    "INSERT INTO submissions (student_id, task_id, mark, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BEST_MARKS_SQL: &str = "SELECT sub.task_id, MAX(sub.mark) FROM submissions sub JOIN tasks t ON t.id = sub.task_id WHERE sub.student_id = ?1 AND t.step_id = ?2 GROUP BY sub.task_id";
const SELECT_STUDENT_SUBMISSIONS_SQL: &str = "SELECT id, student_id, task_id, mark, created_at FROM submissions WHERE student_id = ?1 ORDER BY id";

/// Fields of a task to insert.
#[derive(Debug, Clone)]
pub struct NewTask<'a> {
    pub name: &'a str,
    pub max_mark: f64,
    pub is_star: bool,
    pub sort_index: Option<i64>,
}

impl super::Database {
    /// Helper function to construct a Task from a database row
    pub(super) fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: id_column(row, 0)?,
            step_id: id_column(row, 1)?,
            name: row.get(2)?,
            max_mark: row.get(3)?,
            is_star: row.get(4)?,
            sort_index: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
        })
    }

    /// Adds a task to a step. Without an explicit sort index the task is
    /// appended after the step's last task.
    pub fn add_task(&mut self, step_id: u64, task: NewTask<'_>) -> Result<Task> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let step_exists: bool = tx
            .query_row(CHECK_STEP_EXISTS_SQL, params![step_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check step existence")?;

        if !step_exists {
            return Err(CurriculumError::StepNotFound { id: step_id });
        }

        let sort_index = match task.sort_index {
            Some(sort_index) => sort_index,
            None => {
                let last: Option<i64> = tx
                    .query_row(
                        SELECT_LAST_TASK_SORT_INDEX_SQL,
                        params![step_id as i64],
                        |row| row.get(0),
                    )
                    .optional()
                    .db_context("Failed to get last task sort index")?;
                next_sort_index(last)?
            }
        };

        let now = Timestamp::now();

        tx.execute(
            INSERT_TASK_SQL,
            params![
                step_id as i64,
                task.name,
                task.max_mark,
                task.is_star,
                sort_index,
                now.to_string()
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            step_id,
            name: task.name.into(),
            max_mark: task.max_mark,
            is_star: task.is_star,
            sort_index,
            created_at: now,
        })
    }

    /// Retrieves the tasks of a step ordered by `(sort_index, id)`.
    pub fn get_tasks(&self, step_id: u64) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TASKS_BY_STEP_SQL)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![step_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        Ok(tasks)
    }

    /// Records a student's mark on a task.
    pub fn record_submission(
        &mut self,
        student_id: u64,
        task_id: u64,
        mark: f64,
    ) -> Result<Submission> {
        let task_exists: bool = self
            .connection
            .query_row(CHECK_TASK_EXISTS_SQL, params![task_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check task existence")?;

        if !task_exists {
            return Err(CurriculumError::TaskNotFound { id: task_id });
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_SUBMISSION_SQL,
                params![student_id as i64, task_id as i64, mark, now.to_string()],
            )
            .db_context("Failed to insert submission")?;

        Ok(Submission {
            id: self.connection.last_insert_rowid() as u64,
            student_id,
            task_id,
            mark,
            created_at: now,
        })
    }

    /// The student's best mark on each task of a step they submitted to.
    pub fn best_marks(&self, student_id: u64, step_id: u64) -> Result<BestMarks> {
        let mut stmt = self
            .connection
            .prepare(SELECT_BEST_MARKS_SQL)
            .db_context("Failed to prepare query")?;

        let marks = stmt
            .query_map(params![student_id as i64, step_id as i64], |row| {
                Ok((id_column(row, 0)?, row.get::<_, f64>(1)?))
            })
            .db_context("Failed to query best marks")?
            .collect::<std::result::Result<HashMap<_, _>, _>>()
            .db_context("Failed to fetch best marks")?;

        Ok(BestMarks::new(student_id, marks))
    }

    /// A student with every submission they made.
    pub fn get_student(&self, student_id: u64) -> Result<Student> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STUDENT_SUBMISSIONS_SQL)
            .db_context("Failed to prepare query")?;

        let submissions = stmt
            .query_map(params![student_id as i64], |row| {
                Ok(Submission {
                    id: id_column(row, 0)?,
                    student_id: id_column(row, 1)?,
                    task_id: id_column(row, 2)?,
                    mark: row.get(3)?,
                    created_at: timestamp_column(row, 4)?,
                })
            })
            .db_context("Failed to query submissions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch submissions")?;

        Ok(Student::new(student_id, submissions))
    }
}
