//! Builder for creating and configuring Curriculum instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Curriculum;
use crate::{
    db::Database,
    error::{CurriculumError, Result},
};

/// Builder for creating and configuring Curriculum instances.
#[derive(Debug, Clone)]
pub struct CurriculumBuilder {
    database_path: Option<PathBuf>,
}

impl CurriculumBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/stepwise/stepwise.db` or
    /// `~/.local/share/stepwise/stepwise.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured curriculum instance.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::FileSystem` if the database directory cannot
    /// be created.
    /// Returns `CurriculumError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Curriculum> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CurriculumError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Initializing database at {}", db_path.display());
        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CurriculumError>(())
        })
        .await
        .map_err(CurriculumError::join)??;

        Ok(Curriculum::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("stepwise")
            .place_data_file("stepwise.db")
            .map_err(|e| CurriculumError::XdgDirectory(e.to_string()))
    }
}

impl Default for CurriculumBuilder {
    fn default() -> Self {
        Self::new()
    }
}
