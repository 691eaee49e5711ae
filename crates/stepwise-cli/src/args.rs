use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{LessonCommands, StepCommands, SubmissionCommands, TaskCommands};

/// Lesson and progress tracker
///
/// Stepwise organizes lessons into ordered steps, each with graded tasks.
/// Use it to author steps, move between them and see how a student scores on
/// a step or across a whole lesson.
#[derive(Parser)]
#[command(version, about, name = "sw")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stepwise/stepwise.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, all lessons are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage lessons
    #[command(alias = "l")]
    Lesson {
        #[command(subcommand)]
        command: LessonCommands,
    },
    /// Manage and navigate steps within lessons
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage graded tasks of a step
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Record student submissions
    #[command(alias = "sub")]
    Submission {
        #[command(subcommand)]
        command: SubmissionCommands,
    },
}
