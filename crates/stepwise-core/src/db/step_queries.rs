//! Step CRUD operations and queries.

use std::collections::HashMap;

use log::debug;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::utils::{date_column, date_param, id_column, timestamp_column};
use crate::{
    error::{CurriculumError, DatabaseResultExt, Result},
    models::{next_sort_index, Step, StepData, Task},
    navigation::StepRef,
};

const STEP_COLUMNS: &str = "id, program_id, lesson_id, name, description, notes, theory, video_url, is_notebook, sort_index, start_date, created_at, updated_at";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (program_id, lesson_id, name, description, notes, theory, video_url, is_notebook, sort_index, start_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_STEP_SQL: &str = "UPDATE steps SET name = ?1, description = ?2, notes = ?3, theory = ?4, video_url = ?5, is_notebook = ?6, updated_at = ?7 WHERE id = ?8";
const UPDATE_LESSON_TIMESTAMP_SQL: &str = "UPDATE lessons SET updated_at = ?1 WHERE id = ?2";
const SELECT_LAST_SORT_INDEX_SQL: &str =
    "SELECT sort_index FROM steps WHERE lesson_id = ?1 ORDER BY sort_index DESC, id DESC LIMIT 1";
const SELECT_SEQUENCE_SQL: &str =
    "SELECT id, name, sort_index FROM steps WHERE lesson_id = ?1 ORDER BY sort_index, id";
const SELECT_LESSON_TASKS_SQL: &str = "SELECT t.id, t.step_id, t.name, t.max_mark, t.is_star, t.sort_index, t.created_at FROM tasks t JOIN steps s ON s.id = t.step_id WHERE s.lesson_id = ?1 ORDER BY t.step_id, t.sort_index, t.id";

impl super::Database {
    /// Helper function to construct a Step (without tasks) from a row
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        Ok(Step {
            id: id_column(row, 0)?,
            program_id: id_column(row, 1)?,
            lesson_id: id_column(row, 2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            notes: row.get(5)?,
            theory: row.get(6)?,
            video_url: row.get(7)?,
            is_notebook: row.get(8)?,
            sort_index: row.get(9)?,
            start_date: date_column(row, 10)?,
            created_at: timestamp_column(row, 11)?,
            updated_at: timestamp_column(row, 12)?,
            tasks: Vec::new(),
            navigation: Default::default(),
            stats_cache: Default::default(),
        })
    }

    /// Appends a new step to a lesson.
    ///
    /// The sort index continues after the lesson's last step, or starts at
    /// 100 for an empty lesson. Program, lesson and start date come from the
    /// lesson. The write lock is taken up front so concurrent writers cannot
    /// read the same last sort index.
    pub fn create_step(&mut self, lesson_id: u64, data: &StepData) -> Result<Step> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let lesson = Self::lesson_row(&tx, lesson_id)?
            .ok_or(CurriculumError::LessonNotFound { id: lesson_id })?;

        let last_sort_index: Option<i64> = tx
            .query_row(SELECT_LAST_SORT_INDEX_SQL, params![lesson_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to get last step sort index")?;

        let mut step = Step::draft(&lesson, data, next_sort_index(last_sort_index)?);
        let now_str = step.created_at.to_string();

        tx.execute(
            INSERT_STEP_SQL,
            params![
                step.program_id as i64,
                step.lesson_id as i64,
                &step.name,
                &step.description,
                &step.notes,
                &step.theory,
                &step.video_url,
                step.is_notebook,
                step.sort_index,
                date_param(step.start_date),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert step")?;

        step.id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_LESSON_TIMESTAMP_SQL,
            params![&now_str, lesson_id as i64],
        )
        .db_context("Failed to update lesson timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "Created step {} in lesson {lesson_id} at sort index {}",
            step.id, step.sort_index
        );
        Ok(step)
    }

    /// Overwrites a step's editable fields and returns the saved step.
    pub fn edit_step(&mut self, step_id: u64, data: &StepData) -> Result<Step> {
        let mut step = self
            .get_step(step_id)?
            .ok_or(CurriculumError::StepNotFound { id: step_id })?;

        step.apply_edit(data);
        let now_str = step.updated_at.to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPDATE_STEP_SQL,
            params![
                &step.name,
                &step.description,
                &step.notes,
                &step.theory,
                &step.video_url,
                step.is_notebook,
                &now_str,
                step_id as i64
            ],
        )
        .db_context("Failed to update step")?;

        tx.execute(
            UPDATE_LESSON_TIMESTAMP_SQL,
            params![&now_str, step.lesson_id as i64],
        )
        .db_context("Failed to update lesson timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(step)
    }

    /// Retrieves a single step by its ID, with its ordered tasks.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        let sql = format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1");
        let mut step = self
            .connection
            .query_row(&sql, params![step_id as i64], Self::build_step_from_row)
            .optional()
            .db_context("Failed to get step")?;

        if let Some(ref mut step) = step {
            step.tasks = self.get_tasks(step.id)?;
        }

        Ok(step)
    }

    /// Retrieves all steps of a lesson ordered by `(sort_index, id)`, each with
    /// its ordered tasks.
    pub fn get_steps(&self, lesson_id: u64) -> Result<Vec<Step>> {
        let sql = format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE lesson_id = ?1 ORDER BY sort_index, id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let mut steps = stmt
            .query_map(params![lesson_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        let mut tasks_by_step = self.get_lesson_tasks(lesson_id)?;
        for step in &mut steps {
            step.tasks = tasks_by_step.remove(&step.id).unwrap_or_default();
        }

        Ok(steps)
    }

    /// Ordered position references of a lesson's steps, for navigation.
    pub fn lesson_sequence(&self, lesson_id: u64) -> Result<Vec<StepRef>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SEQUENCE_SQL)
            .db_context("Failed to prepare query")?;

        let sequence = stmt
            .query_map(params![lesson_id as i64], |row| {
                Ok(StepRef {
                    id: id_column(row, 0)?,
                    name: row.get(1)?,
                    sort_index: row.get(2)?,
                })
            })
            .db_context("Failed to query lesson sequence")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch lesson sequence")?;

        Ok(sequence)
    }

    /// All tasks of a lesson grouped by step, each group in task order.
    fn get_lesson_tasks(&self, lesson_id: u64) -> Result<HashMap<u64, Vec<Task>>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_LESSON_TASKS_SQL)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![lesson_id as i64], Self::build_task_from_row)
            .db_context("Failed to query lesson tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch lesson tasks")?;

        let mut grouped: HashMap<u64, Vec<Task>> = HashMap::new();
        for task in tasks {
            grouped.entry(task.step_id).or_default().push(task);
        }
        Ok(grouped)
    }
}
