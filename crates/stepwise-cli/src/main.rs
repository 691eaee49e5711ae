//! Stepwise CLI Application
//!
//! Command-line interface for the stepwise lesson tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use stepwise_core::{params::ListLessons, CurriculumBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        command,
    } = Args::parse();

    let curriculum = CurriculumBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize curriculum")?;

    info!(
        "Stepwise started with database {}",
        curriculum.database_path().display()
    );

    let cli = Cli::new(curriculum, TerminalRenderer::new(!no_color), json);

    match command {
        Some(Lesson { command }) => cli.handle_lesson_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Submission { command }) => cli.handle_submission_command(command).await,
        None => cli.list_lessons(&ListLessons::default()).await,
    }
}
