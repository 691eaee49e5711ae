//! Display implementations for domain models.
//!
//! All output is markdown, rendered by the CLI's terminal renderer or printed
//! as is with `--no-color`.

use std::fmt;

use super::datetime::{LocalDateTime, StartDate};
use crate::{
    models::{Lesson, LessonProgress, Step, Submission, Task},
    navigation::{NavigationState, StepRef},
    stats::StatsRecord,
};

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.id, self.name)
    }
}

impl fmt::Display for StatsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({:.1}%)",
            self.points, self.max_points, self.percent
        )
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous {
            Some(step) => writeln!(f, "- Previous: {step}")?,
            None => writeln!(f, "- Previous: none")?,
        }
        match &self.next {
            Some(step) => writeln!(f, "- Next: {step}"),
            None => writeln!(f, "- Next: none"),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} (ID: {}, max {})", self.name, self.id, self.max_mark)?;
        if self.is_star {
            write!(f, " ★")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Recorded mark {} for student {} on task {} (ID: {})",
            self.mark, self.student_id, self.task_id, self.id
        )
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Program: {}", self.program_id)?;
        writeln!(f, "- Start: {}", StartDate(&self.start_date))?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this lesson.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "- [{}] {} (ID: {})", step.sort_index, step.name, step.id)?;
                if step.is_notebook {
                    write!(f, " · notebook")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Lesson: {}", self.lesson_id)?;
        writeln!(f, "- Position: {}", self.sort_index)?;
        writeln!(f, "- Start: {}", StartDate(&self.start_date))?;
        if self.is_notebook {
            writeln!(f, "- Notebook: yes")?;
        }
        if let Some(url) = &self.video_url {
            writeln!(f, "- Video: {url}")?;
        }
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if let Some(notes) = &self.notes {
            writeln!(f, "#### Notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }

        if let Some(theory) = &self.theory {
            writeln!(f, "#### Theory")?;
            writeln!(f)?;
            writeln!(f, "{theory}")?;
            writeln!(f)?;
        }

        if !self.tasks.is_empty() {
            writeln!(f, "#### Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for LessonProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) · student {}",
            self.lesson_name, self.lesson_id, self.student_id
        )?;
        writeln!(f)?;

        if self.steps.is_empty() {
            writeln!(f, "No steps in this lesson.")?;
            return Ok(());
        }

        for progress in &self.steps {
            writeln!(f, "- {}: {}", progress.step, progress.stats)?;
        }
        writeln!(f)?;
        writeln!(f, "- **Total**: {}", self.total)?;
        writeln!(
            f,
            "- **Completed steps**: {}/{}",
            self.completed_steps(),
            self.steps.len()
        )
    }
}
