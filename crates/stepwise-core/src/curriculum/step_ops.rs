//! Step operations for the Curriculum.

use super::Curriculum;
use crate::{
    display::Steps,
    error::{CurriculumError, Result},
    models::{Step, StepData},
    navigation::NavigationState,
    params::{CreateStep, EditStep, Id},
};

impl Curriculum {
    /// Appends a new step to a lesson.
    ///
    /// The step gets sort index 100 in an empty lesson, otherwise one past the
    /// lesson's last step.
    pub async fn create_step(&self, params: &CreateStep) -> Result<Step> {
        let lesson_id = params.lesson_id;
        let data = StepData::try_from(params.clone())?;

        self.with_database(move |db| db.create_step(lesson_id, &data))
            .await
    }

    /// Overwrites a step's name, description, notes, theory, video url and
    /// notebook flag.
    pub async fn edit_step(&self, params: &EditStep) -> Result<Step> {
        let step_id = params.id;
        let data = StepData::try_from(params.clone())?;

        self.with_database(move |db| db.edit_step(step_id, &data))
            .await
    }

    /// Retrieves a single step by its ID, with its tasks.
    pub async fn get_step(&self, params: &Id) -> Result<Option<Step>> {
        let step_id = params.id;
        self.with_database(move |db| db.get_step(step_id)).await
    }

    /// Retrieves all steps of a lesson in lesson order.
    pub async fn get_steps(&self, params: &Id) -> Result<Steps> {
        let lesson_id = params.id;
        let steps = self.with_database(move |db| db.get_steps(lesson_id)).await?;
        Ok(Steps(steps))
    }

    /// Previous and next steps of a step within its lesson.
    pub async fn step_navigation(&self, params: &Id) -> Result<NavigationState> {
        let step_id = params.id;

        self.with_database(move |db| {
            let step = db
                .get_step(step_id)?
                .ok_or(CurriculumError::StepNotFound { id: step_id })?;
            let state = step.try_navigation(|| db.lesson_sequence(step.lesson_id))?;
            Ok(state.clone())
        })
        .await
    }
}
