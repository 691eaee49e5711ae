//! Lesson operations for the Curriculum.

use super::Curriculum;
use crate::{
    display::Lessons,
    error::Result,
    models::{Lesson, LessonProgress},
    params::{CreateLesson, Id, ListLessons, StudentLesson},
};

impl Curriculum {
    /// Creates a new lesson in a program.
    pub async fn create_lesson(&self, params: &CreateLesson) -> Result<Lesson> {
        let start_date = params.validate()?;
        let program_id = params.program_id;
        let name = params.name.clone();

        self.with_database(move |db| db.create_lesson(program_id, &name, start_date))
            .await
    }

    /// Retrieves a lesson with its ordered steps.
    pub async fn get_lesson(&self, params: &Id) -> Result<Option<Lesson>> {
        let lesson_id = params.id;
        self.with_database(move |db| db.get_lesson(lesson_id)).await
    }

    /// Lists lessons, optionally restricted to one program.
    pub async fn list_lessons(&self, params: &ListLessons) -> Result<Lessons> {
        let program_id = params.program_id;
        let lessons = self
            .with_database(move |db| db.list_lessons(program_id))
            .await?;
        Ok(Lessons(lessons))
    }

    /// A student's stats on every step of a lesson, plus the lesson total.
    pub async fn lesson_progress(&self, params: &StudentLesson) -> Result<LessonProgress> {
        let lesson_id = params.lesson_id;
        let student_id = params.student_id;

        self.with_database(move |db| {
            let lesson = db.require_lesson(lesson_id)?;
            let student = db.get_student(student_id)?;
            Ok(LessonProgress::from_lesson(&lesson, &student))
        })
        .await
    }
}
