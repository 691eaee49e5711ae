use stepwise_core::{params::CreateLesson, Curriculum, CurriculumBuilder};
use tempfile::TempDir;

/// Helper function to create a test curriculum
pub async fn create_test_curriculum() -> (TempDir, Curriculum) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let curriculum = CurriculumBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create curriculum");
    (temp_dir, curriculum)
}

/// Creates a lesson without a start date and returns its ID
pub async fn create_lesson(curriculum: &Curriculum, name: &str) -> u64 {
    curriculum
        .create_lesson(&CreateLesson {
            program_id: 1,
            name: name.to_string(),
            start_date: None,
        })
        .await
        .expect("Failed to create lesson")
        .id
}
