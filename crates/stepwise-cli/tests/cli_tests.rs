use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with --no-color and the given database
fn sw_cmd(db_arg: &str) -> Command {
    let mut cmd = Command::cargo_bin("sw").expect("Failed to find sw binary");
    cmd.args(["--no-color", "--database-file", db_arg]);
    cmd
}

fn create_lesson(db_arg: &str, name: &str) {
    sw_cmd(db_arg)
        .args(["lesson", "create", name, "--program", "1"])
        .assert()
        .success();
}

fn create_step(db_arg: &str, lesson_id: &str, name: &str) {
    sw_cmd(db_arg)
        .args(["step", "create", lesson_id, name])
        .assert()
        .success();
}

#[test]
fn test_cli_create_lesson() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sw_cmd(db_path.to_str().unwrap())
        .args([
            "lesson",
            "create",
            "Ownership",
            "--program",
            "3",
            "--start-date",
            "2024-09-02",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lesson with ID: 1"))
        .stdout(predicate::str::contains("# 1. Ownership"))
        .stdout(predicate::str::contains("- Start: 2024-09-02"));
}

#[test]
fn test_cli_create_lesson_rejects_bad_date() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sw_cmd(db_path.to_str().unwrap())
        .args([
            "lesson",
            "create",
            "Ownership",
            "--program",
            "3",
            "--start-date",
            "2024-02-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start_date"));
}

#[test]
fn test_cli_list_empty_lessons() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sw_cmd(db_path.to_str().unwrap())
        .args(["lesson", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No lessons found."));
}

#[test]
fn test_cli_default_command_lists_lessons() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Traits");

    sw_cmd(db_arg)
        .assert()
        .success()
        .stdout(predicate::str::contains("**Traits** (ID: 1, program 1)"));
}

#[test]
fn test_cli_step_navigation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Loops");
    for name in ["A", "B", "C"] {
        create_step(db_arg, "1", name);
    }

    sw_cmd(db_arg)
        .args(["step", "next", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3. C"));

    sw_cmd(db_arg)
        .args(["step", "prev", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. A"));

    sw_cmd(db_arg)
        .args(["step", "prev", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No previous step."));

    sw_cmd(db_arg)
        .args(["step", "next", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No next step."));
}

#[test]
fn test_cli_step_sort_indices_in_lesson_show() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Loops");
    create_step(db_arg, "1", "for");
    create_step(db_arg, "1", "while");

    sw_cmd(db_arg)
        .args(["lesson", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [100] for (ID: 1)"))
        .stdout(predicate::str::contains("- [101] while (ID: 2)"));
}

#[test]
fn test_cli_notebook_step_strips_theory() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Data");

    sw_cmd(db_arg)
        .args([
            "step",
            "create",
            "1",
            "Lab",
            "--theory",
            "line1\r\nline2",
            "--notebook",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("line1line2"))
        .stdout(predicate::str::contains("- Notebook: yes"));
}

#[test]
fn test_cli_edit_step_reports_changes() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Data");
    sw_cmd(db_arg)
        .args(["step", "create", "1", "Lab", "--theory", "a\nb", "--notebook"])
        .assert()
        .success();

    sw_cmd(db_arg)
        .args(["step", "edit", "1", "--name", "Lab 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated step with ID: 1"))
        .stdout(predicate::str::contains("Renamed to 'Lab 2'"))
        .stdout(predicate::str::contains("Disabled notebook mode"));
}

#[test]
fn test_cli_show_missing_step() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    sw_cmd(db_path.to_str().unwrap())
        .args(["step", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step with ID 99 not found"));
}

#[test]
fn test_cli_stats_and_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Loops");
    create_step(db_arg, "1", "Practice");

    for (name, max) in [("first", "5"), ("second", "5")] {
        sw_cmd(db_arg)
            .args(["task", "add", "1", name, "--max-mark", max])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created task with ID"));
    }

    for (task, mark) in [("1", "5"), ("2", "2")] {
        sw_cmd(db_arg)
            .args(["submission", "record", task, mark, "--student", "42"])
            .assert()
            .success()
            .stdout(predicate::str::contains("for student 42"));
    }

    sw_cmd(db_arg)
        .args(["step", "stats", "1", "--student", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Points: 7 / 10 (70.0%)"));

    sw_cmd(db_arg)
        .args(["lesson", "progress", "1", "--student", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Practice: 7 / 10 (70.0%)"))
        .stdout(predicate::str::contains("**Completed steps**: 0/1"));
}

#[test]
fn test_cli_json_output() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_lesson(db_arg, "Loops");
    create_step(db_arg, "1", "Only");

    sw_cmd(db_arg)
        .args(["--json", "step", "stats", "1", "--student", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_points\": 0.0"))
        .stdout(predicate::str::contains("\"percent\": 0.0"));

    sw_cmd(db_arg)
        .args(["--json", "step", "next", "1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}
