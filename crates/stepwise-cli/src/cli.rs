//! Command definitions and handlers for the `sw` binary.
//!
//! Argument structs carry the clap derives and convert into the
//! framework-free parameter types of `stepwise_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Curriculum
//! ```
//!
//! [`Cli`] runs a parsed command against a [`Curriculum`] and prints the
//! result as markdown through the [`TerminalRenderer`], or as JSON with
//! `--json`.

use std::fmt::Display;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use serde::Serialize;
use stepwise_core::{
    display::{CreateResult, UpdateResult},
    params::*,
    Curriculum, CurriculumError, StepRef,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Lesson arguments
// ============================================================================

/// Create a new lesson in a program
#[derive(Args)]
pub struct CreateLessonArgs {
    /// Name of the lesson
    pub name: String,
    #[arg(short, long, help = "ID of the program the lesson belongs to")]
    pub program: u64,
    #[arg(
        short,
        long,
        help = "Date the lesson opens (YYYY-MM-DD); new steps inherit it"
    )]
    pub start_date: Option<String>,
}

impl From<CreateLessonArgs> for CreateLesson {
    fn from(val: CreateLessonArgs) -> Self {
        CreateLesson {
            program_id: val.program,
            name: val.name,
            start_date: val.start_date,
        }
    }
}

/// List lessons
#[derive(Args)]
pub struct ListLessonsArgs {
    #[arg(short, long, help = "Only list lessons of this program")]
    pub program: Option<u64>,
}

impl From<ListLessonsArgs> for ListLessons {
    fn from(val: ListLessonsArgs) -> Self {
        ListLessons {
            program_id: val.program,
        }
    }
}

/// Show a lesson and its steps in order
#[derive(Args)]
pub struct ShowLessonArgs {
    #[arg(help = "Unique identifier of the lesson to show")]
    pub id: u64,
}

impl From<ShowLessonArgs> for Id {
    fn from(val: ShowLessonArgs) -> Self {
        Id { id: val.id }
    }
}

/// Show a student's score on every step of a lesson
#[derive(Args)]
pub struct LessonProgressArgs {
    #[arg(help = "Unique identifier of the lesson")]
    pub lesson_id: u64,
    #[arg(long, help = "ID of the student")]
    pub student: u64,
}

impl From<LessonProgressArgs> for StudentLesson {
    fn from(val: LessonProgressArgs) -> Self {
        StudentLesson {
            lesson_id: val.lesson_id,
            student_id: val.student,
        }
    }
}

#[derive(Subcommand)]
pub enum LessonCommands {
    /// Create a new lesson
    #[command(alias = "c")]
    Create(CreateLessonArgs),
    /// List lessons
    #[command(aliases = ["l", "ls"])]
    List(ListLessonsArgs),
    /// Show a lesson with its steps
    #[command(alias = "s")]
    Show(ShowLessonArgs),
    /// Show a student's progress through a lesson
    #[command(alias = "p")]
    Progress(LessonProgressArgs),
}

// ============================================================================
// Step arguments
// ============================================================================

/// Append a new step to a lesson
///
/// The first step of a lesson gets sort index 100, later steps follow the
/// last one. With --notebook, line breaks are removed from the theory.
#[derive(Args)]
pub struct CreateStepArgs {
    #[arg(help = "Unique identifier of the lesson to append the step to")]
    pub lesson_id: u64,
    /// Name of the step
    pub name: String,
    #[arg(short, long, help = "Instructor notes for the step")]
    pub notes: Option<String>,
    #[arg(short, long, help = "Theory content, markdown or notebook source")]
    pub theory: Option<String>,
    #[arg(long, help = "Treat the theory as notebook content")]
    pub notebook: bool,
}

impl From<CreateStepArgs> for CreateStep {
    fn from(val: CreateStepArgs) -> Self {
        CreateStep {
            lesson_id: val.lesson_id,
            name: val.name,
            notes: val.notes,
            theory: val.theory,
            notebook: val.notebook,
        }
    }
}

/// Edit a step
///
/// Omitted text fields keep their current value. The notebook flag is set
/// from --notebook on every edit: leaving it out turns notebook mode off
/// without touching the theory's line breaks.
#[derive(Args)]
pub struct EditStepArgs {
    #[arg(help = "Unique identifier of the step to edit")]
    pub id: u64,
    #[arg(long, help = "New name for the step")]
    pub name: Option<String>,
    #[arg(short, long, help = "New short description")]
    pub description: Option<String>,
    #[arg(short, long, help = "New instructor notes")]
    pub notes: Option<String>,
    #[arg(short, long, help = "New theory content")]
    pub theory: Option<String>,
    #[arg(short, long, help = "New lecture video URL")]
    pub video_url: Option<String>,
    #[arg(long, help = "Treat the theory as notebook content")]
    pub notebook: bool,
}

impl EditStepArgs {
    /// Core edit parameters, filling omitted fields from `current`.
    fn into_params(self, current: &stepwise_core::Step) -> EditStep {
        EditStep {
            id: self.id,
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self.description.or_else(|| current.description.clone()),
            notes: self.notes.or_else(|| current.notes.clone()),
            theory: self.theory.or_else(|| current.theory.clone()),
            video_url: self.video_url.or_else(|| current.video_url.clone()),
            notebook: self.notebook,
        }
    }
}

/// Refer to a single step
#[derive(Args)]
pub struct StepIdArgs {
    #[arg(help = "Unique identifier of the step")]
    pub id: u64,
}

impl From<StepIdArgs> for Id {
    fn from(val: StepIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// List the steps of a lesson in order
#[derive(Args)]
pub struct ListStepsArgs {
    #[arg(help = "Unique identifier of the lesson")]
    pub lesson_id: u64,
}

impl From<ListStepsArgs> for Id {
    fn from(val: ListStepsArgs) -> Self {
        Id { id: val.lesson_id }
    }
}

/// Show a student's points on a step
#[derive(Args)]
pub struct StepStatsArgs {
    #[arg(help = "Unique identifier of the step")]
    pub step_id: u64,
    #[arg(long, help = "ID of the student")]
    pub student: u64,
}

impl From<StepStatsArgs> for StudentStep {
    fn from(val: StepStatsArgs) -> Self {
        StudentStep {
            step_id: val.step_id,
            student_id: val.student,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a new step to a lesson
    #[command(alias = "c")]
    Create(CreateStepArgs),
    /// Edit a step
    #[command(alias = "e")]
    Edit(EditStepArgs),
    /// Show details of a step
    #[command(alias = "s")]
    Show(StepIdArgs),
    /// List the steps of a lesson
    #[command(aliases = ["l", "ls"])]
    List(ListStepsArgs),
    /// Show the step after this one
    #[command(alias = "n")]
    Next(StepIdArgs),
    /// Show the step before this one
    #[command(alias = "p")]
    Prev(StepIdArgs),
    /// Show a student's points on a step
    Stats(StepStatsArgs),
}

// ============================================================================
// Task and submission arguments
// ============================================================================

/// Add a graded task to a step
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the step")]
    pub step_id: u64,
    /// Name of the task
    pub name: String,
    #[arg(short, long, help = "Highest mark a submission can get")]
    pub max_mark: f64,
    #[arg(long, help = "Bonus task: counts towards points but not max points")]
    pub star: bool,
    #[arg(long, help = "Explicit ordering key; defaults to after the last task")]
    pub sort_index: Option<i64>,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            step_id: val.step_id,
            name: val.name,
            max_mark: val.max_mark,
            is_star: val.star,
            sort_index: val.sort_index,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a step
    #[command(alias = "a")]
    Add(AddTaskArgs),
}

/// Record a student's mark on a task
#[derive(Args)]
pub struct RecordSubmissionArgs {
    #[arg(help = "Unique identifier of the task")]
    pub task_id: u64,
    #[arg(help = "Mark the student received")]
    pub mark: f64,
    #[arg(long, help = "ID of the student")]
    pub student: u64,
}

impl From<RecordSubmissionArgs> for RecordSubmission {
    fn from(val: RecordSubmissionArgs) -> Self {
        RecordSubmission {
            student_id: val.student,
            task_id: val.task_id,
            mark: val.mark,
        }
    }
}

#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// Record a mark
    #[command(alias = "r")]
    Record(RecordSubmissionArgs),
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against a curriculum and prints their results.
pub struct Cli {
    curriculum: Curriculum,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(curriculum: Curriculum, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            curriculum,
            renderer,
            json,
        }
    }

    /// Prints `data` as JSON, or `markdown` through the renderer.
    fn emit<T: Serialize>(&self, data: &T, markdown: impl Display) -> Result<()> {
        if self.json {
            let json =
                serde_json::to_string_pretty(data).context("Failed to serialize output")?;
            println!("{json}");
            Ok(())
        } else {
            self.renderer.render(&markdown.to_string())
        }
    }

    pub async fn handle_lesson_command(&self, command: LessonCommands) -> Result<()> {
        match command {
            LessonCommands::Create(args) => {
                let lesson = self
                    .curriculum
                    .create_lesson(&args.into())
                    .await
                    .context("Failed to create lesson")?;
                self.emit(&lesson, CreateResult::new(lesson.clone()))
            }
            LessonCommands::List(args) => self.list_lessons(&args.into()).await,
            LessonCommands::Show(args) => {
                let id: Id = args.into();
                let lesson = self
                    .curriculum
                    .get_lesson(&id)
                    .await
                    .context("Failed to get lesson")?
                    .ok_or(CurriculumError::LessonNotFound { id: id.id })?;
                self.emit(&lesson, &lesson)
            }
            LessonCommands::Progress(args) => {
                let progress = self
                    .curriculum
                    .lesson_progress(&args.into())
                    .await
                    .context("Failed to compute lesson progress")?;
                self.emit(&progress, &progress)
            }
        }
    }

    pub async fn list_lessons(&self, params: &ListLessons) -> Result<()> {
        let lessons = self
            .curriculum
            .list_lessons(params)
            .await
            .context("Failed to list lessons")?;
        self.emit(&lessons.0, &lessons)
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Create(args) => {
                let step = self
                    .curriculum
                    .create_step(&args.into())
                    .await
                    .context("Failed to create step")?;
                self.emit(&step, CreateResult::new(step.clone()))
            }
            StepCommands::Edit(args) => {
                let before = self.require_step(args.id).await?;
                let params = args.into_params(&before);
                debug!("Editing step {}: {:?}", params.id, params);

                let after = self
                    .curriculum
                    .edit_step(&params)
                    .await
                    .context("Failed to edit step")?;
                self.emit(&after, UpdateResult::from_edit(&before, after.clone()))
            }
            StepCommands::Show(args) => {
                let step = self.require_step(args.id).await?;
                self.emit(&step, &step)
            }
            StepCommands::List(args) => {
                let steps = self
                    .curriculum
                    .get_steps(&args.into())
                    .await
                    .context("Failed to get steps")?;
                self.emit(&steps.0, &steps)
            }
            StepCommands::Next(args) => {
                let navigation = self
                    .curriculum
                    .step_navigation(&args.into())
                    .await
                    .context("Failed to navigate")?;
                self.emit_neighbour(navigation.next, "next")
            }
            StepCommands::Prev(args) => {
                let navigation = self
                    .curriculum
                    .step_navigation(&args.into())
                    .await
                    .context("Failed to navigate")?;
                self.emit_neighbour(navigation.previous, "previous")
            }
            StepCommands::Stats(args) => {
                let params: StudentStep = args.into();
                let stats = self
                    .curriculum
                    .step_stats(&params)
                    .await
                    .context("Failed to compute step stats")?;
                self.emit(
                    &stats,
                    format!(
                        "Step {} · student {}\n\nPoints: {stats}\n",
                        params.step_id, params.student_id
                    ),
                )
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self
                    .curriculum
                    .add_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.emit(&task, CreateResult::new(task.clone()))
            }
        }
    }

    pub async fn handle_submission_command(&self, command: SubmissionCommands) -> Result<()> {
        match command {
            SubmissionCommands::Record(args) => {
                let submission = self
                    .curriculum
                    .record_submission(&args.into())
                    .await
                    .context("Failed to record submission")?;
                self.emit(&submission, &submission)
            }
        }
    }

    async fn require_step(&self, id: u64) -> Result<stepwise_core::Step> {
        let step = self
            .curriculum
            .get_step(&Id { id })
            .await
            .context("Failed to get step")?
            .ok_or(CurriculumError::StepNotFound { id })?;
        Ok(step)
    }

    fn emit_neighbour(&self, neighbour: Option<StepRef>, direction: &str) -> Result<()> {
        match &neighbour {
            Some(step) => self.emit(&neighbour, format!("{step}\n")),
            None => self.emit(&neighbour, format!("No {direction} step.\n")),
        }
    }
}
