//! Lesson CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{date_column, date_param, id_column, timestamp_column};
use crate::{
    error::{CurriculumError, DatabaseResultExt, Result},
    models::Lesson,
};

const INSERT_LESSON_SQL: &str = "INSERT INTO lessons (program_id, name, start_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_LESSON_SQL: &str =
    "SELECT id, program_id, name, start_date, created_at, updated_at FROM lessons WHERE id = ?1";
const SELECT_LESSONS_SQL: &str =
    "SELECT id, program_id, name, start_date, created_at, updated_at FROM lessons ORDER BY id";
const SELECT_PROGRAM_LESSONS_SQL: &str = "SELECT id, program_id, name, start_date, created_at, updated_at FROM lessons WHERE program_id = ?1 ORDER BY id";

impl super::Database {
    /// Helper function to construct a Lesson (without steps) from a row
    fn build_lesson_from_row(row: &rusqlite::Row) -> rusqlite::Result<Lesson> {
        Ok(Lesson {
            id: id_column(row, 0)?,
            program_id: id_column(row, 1)?,
            name: row.get(2)?,
            start_date: date_column(row, 3)?,
            created_at: timestamp_column(row, 4)?,
            updated_at: timestamp_column(row, 5)?,
            steps: Vec::new(),
        })
    }

    /// Creates a new lesson in the given program.
    pub fn create_lesson(
        &mut self,
        program_id: u64,
        name: &str,
        start_date: Option<Date>,
    ) -> Result<Lesson> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_LESSON_SQL,
                params![
                    program_id as i64,
                    name,
                    date_param(start_date),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert lesson")?;

        Ok(Lesson {
            id: self.connection.last_insert_rowid() as u64,
            program_id,
            name: name.into(),
            start_date,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
        })
    }

    /// Retrieves a lesson row without loading its steps.
    pub(crate) fn get_lesson_row(&self, id: u64) -> Result<Option<Lesson>> {
        Self::lesson_row(&self.connection, id)
    }

    /// Lesson row lookup on any connection, including an open transaction.
    pub(super) fn lesson_row(conn: &Connection, id: u64) -> Result<Option<Lesson>> {
        conn.query_row(SELECT_LESSON_SQL, params![id as i64], Self::build_lesson_from_row)
            .optional()
            .db_context("Failed to query lesson")
    }

    /// Retrieves a lesson with its ordered steps.
    pub fn get_lesson(&self, id: u64) -> Result<Option<Lesson>> {
        let mut lesson = self.get_lesson_row(id)?;

        // Eagerly load steps if lesson exists
        if let Some(ref mut lesson) = lesson {
            lesson.steps = self.get_steps(lesson.id)?;
        }

        Ok(lesson)
    }

    /// Retrieves a lesson with its steps, failing when it does not exist.
    pub fn require_lesson(&self, id: u64) -> Result<Lesson> {
        self.get_lesson(id)?
            .ok_or(CurriculumError::LessonNotFound { id })
    }

    /// Lists lessons, optionally restricted to one program. Steps are not
    /// loaded.
    pub fn list_lessons(&self, program_id: Option<u64>) -> Result<Vec<Lesson>> {
        let lessons = match program_id {
            Some(program_id) => {
                let mut stmt = self
                    .connection
                    .prepare(SELECT_PROGRAM_LESSONS_SQL)
                    .db_context("Failed to prepare query")?;
                let rows = stmt
                    .query_map(params![program_id as i64], Self::build_lesson_from_row)
                    .db_context("Failed to query lessons")?;
                rows.collect::<std::result::Result<Vec<_>, _>>()
            }
            None => {
                let mut stmt = self
                    .connection
                    .prepare(SELECT_LESSONS_SQL)
                    .db_context("Failed to prepare query")?;
                let rows = stmt
                    .query_map([], Self::build_lesson_from_row)
                    .db_context("Failed to query lessons")?;
                rows.collect::<std::result::Result<Vec<_>, _>>()
            }
        };

        lessons.db_context("Failed to fetch lessons")
    }
}
