//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Lesson, Step};

/// Newtype wrapper for displaying a list of lessons.
///
/// Each lesson is shown as a one-line summary rather than with its full step
/// listing.
///
/// ```rust
/// use stepwise_core::{display::Lessons, models::Lesson};
/// use jiff::Timestamp;
///
/// let lesson = Lesson {
///     id: 3,
///     program_id: 1,
///     name: "Closures".to_string(),
///     start_date: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     steps: vec![],
/// };
///
/// let output = Lessons(vec![lesson]).to_string();
/// assert!(output.contains("Closures"));
/// assert_eq!(Lessons(vec![]).to_string(), "No lessons found.\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lessons(pub Vec<Lesson>);

impl Lessons {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lesson> {
        self.0.iter()
    }
}

impl Index<usize> for Lessons {
    type Output = Lesson;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Lessons {
    type Item = Lesson;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Lessons {
    type Item = &'a Lesson;
    type IntoIter = std::slice::Iter<'a, Lesson>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Lessons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No lessons found.");
        }

        for lesson in &self.0 {
            write!(
                f,
                "- **{}** (ID: {}, program {})",
                lesson.name, lesson.id, lesson.program_id
            )?;
            if let Some(date) = lesson.start_date {
                write!(f, " · starts {date}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the steps of a lesson, each in full.
#[derive(Debug, Clone, Default)]
pub struct Steps(pub Vec<Step>);

impl Steps {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl Index<usize> for Steps {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Steps {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Steps {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                write!(f, "{step}")?;
            }
            Ok(())
        }
    }
}
