//! Database operations and SQLite management for lessons, steps and grades.
//!
//! This module is the persistence collaborator of the crate: it materializes
//! ordered step sequences, task lists and best marks for the navigation and
//! stats logic, and saves steps created or edited through the models.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod lesson_queries;
pub mod migrations;
pub mod step_queries;
pub mod task_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
