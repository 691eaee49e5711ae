#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::error::CurriculumError;
    use crate::models::{
        Lesson, LessonProgress, Step, StepData, Student, Submission, Task, FIRST_SORT_INDEX,
    };

    fn create_test_lesson() -> Lesson {
        Lesson {
            id: 10,
            program_id: 3,
            name: "Ownership".to_string(),
            start_date: Some(jiff::civil::date(2024, 9, 2)),
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
            steps: vec![],
        }
    }

    fn create_test_step(lesson: &Lesson, id: u64, name: &str, sort_index: i64) -> Step {
        let mut step = Step::draft(lesson, &StepData::named(name), sort_index);
        step.id = id;
        step
    }

    fn task(id: u64, step_id: u64, max_mark: f64, is_star: bool) -> Task {
        Task {
            id,
            step_id,
            name: format!("Task {id}"),
            max_mark,
            is_star,
            sort_index: id as i64,
            created_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    fn submission(task_id: u64, mark: f64) -> Submission {
        Submission {
            id: task_id * 100,
            student_id: 42,
            task_id,
            mark,
            created_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    fn lesson_with_steps() -> (Lesson, Vec<Step>) {
        let lesson = create_test_lesson();
        let steps = vec![
            create_test_step(&lesson, 1, "A", 100),
            create_test_step(&lesson, 2, "B", 200),
            create_test_step(&lesson, 3, "C", 300),
        ];
        (lesson, steps)
    }

    #[test]
    fn test_first_step_of_empty_lesson_gets_sort_index_100() {
        let lesson = create_test_lesson();
        let step = lesson.draft_step(&StepData::named("Moves")).unwrap();

        assert_eq!(step.sort_index, FIRST_SORT_INDEX);
        assert_eq!(step.lesson_id, 10);
        assert_eq!(step.program_id, 3);
        assert_eq!(step.start_date, lesson.start_date);
    }

    #[test]
    fn test_appended_step_follows_last_sort_index() {
        let mut lesson = create_test_lesson();
        lesson.steps = vec![
            create_test_step(&lesson, 1, "A", 100),
            create_test_step(&lesson, 2, "B", 250),
        ];

        let step = lesson.draft_step(&StepData::named("C")).unwrap();
        assert_eq!(step.sort_index, 251);
    }

    #[test]
    fn test_append_after_max_sort_index_is_rejected() {
        let mut lesson = create_test_lesson();
        lesson.steps = vec![create_test_step(&lesson, 1, "Last", i64::MAX)];

        let err = lesson.draft_step(&StepData::named("Overflow")).unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::InvalidInput { ref field, .. } if field == "sort_index"
        ));
    }

    #[test]
    fn test_draft_ignores_description_and_video() {
        let lesson = create_test_lesson();
        let mut data = StepData::named("Intro").with_notes("bring laptops");
        data.description = Some("ignored".to_string());
        data.video_url = Some("https://example.com/v".to_string());

        let step = lesson.draft_step(&data).unwrap();
        assert_eq!(step.notes.as_deref(), Some("bring laptops"));
        assert_eq!(step.description, None);
        assert_eq!(step.video_url, None);
    }

    #[test]
    fn test_notebook_theory_is_stripped_on_create() {
        let lesson = create_test_lesson();
        let step = lesson
            .draft_step(
                &StepData::named("Notebook")
                    .with_theory("line1\r\nline2")
                    .notebook(),
            )
            .unwrap();

        assert!(step.is_notebook);
        assert_eq!(step.theory.as_deref(), Some("line1line2"));
    }

    #[test]
    fn test_plain_theory_is_kept_verbatim_on_create() {
        let lesson = create_test_lesson();
        let step = lesson
            .draft_step(&StepData::named("Plain").with_theory("line1\r\nline2"))
            .unwrap();

        assert!(!step.is_notebook);
        assert_eq!(step.theory.as_deref(), Some("line1\r\nline2"));
    }

    #[test]
    fn test_edit_to_notebook_strips_theory() {
        let lesson = create_test_lesson();
        let mut step = lesson
            .draft_step(&StepData::named("Plain").with_theory("a\nb"))
            .unwrap();

        step.apply_edit(&StepData::named("Now notebook").with_theory("x\ny\rz").notebook());
        assert!(step.is_notebook);
        assert_eq!(step.name, "Now notebook");
        assert_eq!(step.theory.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_edit_without_notebook_clears_flag_but_keeps_line_breaks() {
        let lesson = create_test_lesson();
        let mut step = lesson
            .draft_step(&StepData::named("NB").with_theory("a\nb").notebook())
            .unwrap();
        assert_eq!(step.theory.as_deref(), Some("ab"));

        // The flag is cleared, but theory is stored exactly as submitted.
        step.apply_edit(&StepData::named("NB").with_theory("c\nd"));
        assert!(!step.is_notebook);
        assert_eq!(step.theory.as_deref(), Some("c\nd"));
    }

    #[test]
    fn test_edit_overwrites_optional_fields() {
        let lesson = create_test_lesson();
        let mut step = lesson
            .draft_step(&StepData::named("S").with_notes("old notes"))
            .unwrap();

        let mut data = StepData::named("S");
        data.video_url = Some("https://example.com/lecture".to_string());
        step.apply_edit(&data);

        assert_eq!(step.notes, None);
        assert_eq!(step.video_url.as_deref(), Some("https://example.com/lecture"));
    }

    #[test]
    fn test_navigation_neighbours() {
        let (_, steps) = lesson_with_steps();

        let middle = steps[1].navigation(&steps);
        assert_eq!(middle.previous.as_ref().map(|s| s.id), Some(1));
        assert_eq!(middle.next.as_ref().map(|s| s.id), Some(3));

        assert!(steps[0].previous_step(&steps).is_none());
        assert_eq!(steps[0].next_step(&steps).map(|s| s.name.as_str()), Some("B"));

        assert_eq!(steps[2].previous_step(&steps).map(|s| s.id), Some(2));
        assert!(steps[2].next_step(&steps).is_none());
    }

    #[test]
    fn test_single_step_lesson_has_no_neighbours() {
        let lesson = create_test_lesson();
        let only = vec![create_test_step(&lesson, 1, "Only", 100)];

        assert!(only[0].navigation(&only).is_isolated());
    }

    #[test]
    fn test_navigation_is_memoized_per_instance() {
        let (lesson, steps) = lesson_with_steps();
        let step = steps[1].clone();
        assert!(!step.navigation_resolved());
        step.navigation(&steps);
        assert!(step.navigation_resolved());

        // A different sequence is ignored once resolved.
        let reordered = vec![
            create_test_step(&lesson, 9, "Z", 50),
            step.clone(),
        ];
        let state = step.navigation(&reordered);
        assert_eq!(state.previous.as_ref().map(|s| s.id), Some(1));
        assert_eq!(state.next.as_ref().map(|s| s.id), Some(3));
    }

    #[test]
    fn test_boundary_result_is_memoized_too() {
        let (lesson, steps) = lesson_with_steps();
        let last = &steps[2];
        assert!(last.next_step(&steps).is_none());

        let mut longer = steps.clone();
        longer.push(create_test_step(&lesson, 4, "D", 400));
        assert!(last.next_step(&longer).is_none());
    }

    #[test]
    fn test_try_navigation_loads_once() {
        let (_, steps) = lesson_with_steps();
        let refs: Vec<_> = steps.iter().map(Step::as_step_ref).collect();
        let step = &steps[0];

        let mut loads = 0;
        let state = step
            .try_navigation(|| {
                loads += 1;
                Ok::<_, ()>(refs.clone())
            })
            .unwrap();
        assert_eq!(state.next.as_ref().map(|s| s.id), Some(2));

        let again = step
            .try_navigation(|| {
                loads += 1;
                Err(())
            })
            .unwrap();
        assert_eq!(again.next.as_ref().map(|s| s.id), Some(2));
        assert_eq!(loads, 1);
    }

    #[test]
    fn test_failed_load_leaves_navigation_unresolved() {
        let (_, steps) = lesson_with_steps();
        let step = &steps[0];

        let result = step.try_navigation(|| Err::<Vec<_>, _>("offline"));
        assert_eq!(result.err(), Some("offline"));
        assert!(!step.navigation_resolved());
    }

    #[test]
    fn test_step_stats() {
        let (_, steps) = lesson_with_steps();
        let mut step = steps[0].clone();
        step.tasks = vec![task(1, 1, 5.0, false), task(2, 1, 5.0, false)];

        let student = Student::new(42, vec![submission(1, 5.0), submission(2, 2.0)]);
        let stats = step.stats(&student);

        assert_eq!(stats.points, 7.0);
        assert_eq!(stats.max_points, 10.0);
        assert_eq!(stats.percent, 70.0);
        assert_eq!(step.percent(&student), 70.0);
    }

    #[test]
    fn test_best_submission_counts() {
        let (_, steps) = lesson_with_steps();
        let mut step = steps[0].clone();
        step.tasks = vec![task(1, 1, 10.0, false)];

        let student = Student::new(
            42,
            vec![submission(1, 4.0), submission(1, 9.0), submission(1, 6.0)],
        );
        assert_eq!(step.points(&student), 9.0);
    }

    #[test]
    fn test_star_task_raises_points_only() {
        let (_, steps) = lesson_with_steps();
        let mut step = steps[0].clone();
        step.tasks = vec![task(1, 1, 10.0, false), task(2, 1, 5.0, true)];

        let student = Student::new(42, vec![submission(1, 10.0), submission(2, 5.0)]);
        let stats = step.stats(&student);
        assert_eq!(stats.points, 15.0);
        assert_eq!(stats.max_points, 10.0);
        assert_eq!(stats.percent, 150.0);
    }

    #[test]
    fn test_stats_are_memoized_after_task_changes() {
        let (_, steps) = lesson_with_steps();
        let mut step = steps[0].clone();
        step.tasks = vec![task(1, 1, 10.0, false)];
        let student = Student::new(42, vec![submission(1, 7.0)]);

        let first = step.stats(&student);
        assert_eq!(step.cached_stats(42), Some(first));

        step.tasks.push(task(2, 1, 10.0, false));
        assert_eq!(step.stats(&student), first);
        assert_eq!(step.max_points(&student), 10.0);

        // Another student is computed against the current tasks.
        let other = Student::new(7, vec![]);
        assert_eq!(step.max_points(&other), 20.0);
    }

    #[test]
    fn test_clone_carries_memos() {
        let (_, steps) = lesson_with_steps();
        let mut step = steps[0].clone();
        step.tasks = vec![task(1, 1, 4.0, false)];
        let student = Student::new(42, vec![submission(1, 2.0)]);
        step.stats(&student);
        step.navigation(&steps);

        let copy = step.clone();
        assert!(copy.navigation_resolved());
        assert_eq!(copy.cached_stats(42).map(|s| s.percent), Some(50.0));
        assert_eq!(copy, step);
    }

    #[test]
    fn test_lesson_progress_totals() {
        let mut lesson = create_test_lesson();
        let mut a = create_test_step(&lesson, 1, "A", 100);
        a.tasks = vec![task(1, 1, 10.0, false)];
        let mut b = create_test_step(&lesson, 2, "B", 101);
        b.tasks = vec![task(2, 2, 10.0, false)];
        lesson.steps = vec![a, b];

        let student = Student::new(42, vec![submission(1, 10.0), submission(2, 4.0)]);
        let progress = LessonProgress::from_lesson(&lesson, &student);

        assert_eq!(progress.steps.len(), 2);
        assert_eq!(progress.total.points, 14.0);
        assert_eq!(progress.total.max_points, 20.0);
        assert_eq!(progress.total.percent, 70.0);
        assert_eq!(progress.completed_steps(), 1);
        assert_eq!(lesson.steps[0].cached_stats(42).map(|s| s.points), Some(10.0));
    }

    #[test]
    fn test_step_display() {
        let lesson = create_test_lesson();
        let mut step = lesson
            .draft_step(
                &StepData::named("Borrowing")
                    .with_notes("Remember the rules")
                    .with_theory("# Title\nBody"),
            )
            .unwrap();
        step.id = 5;
        step.video_url = Some("https://example.com/borrow".to_string());
        step.tasks = vec![task(1, 5, 10.0, false), task(2, 5, 3.5, true)];

        let output = step.to_string();
        assert!(output.contains("### 5. Borrowing"));
        assert!(output.contains("- Position: 100"));
        assert!(output.contains("- Start: 2024-09-02"));
        assert!(output.contains("- Video: https://example.com/borrow"));
        assert!(output.contains("#### Notes"));
        assert!(output.contains("#### Theory"));
        assert!(output.contains("- Task 1 (ID: 1, max 10)"));
        assert!(output.contains("- Task 2 (ID: 2, max 3.5) ★"));
        assert!(!output.contains("Notebook"));
    }

    #[test]
    fn test_lesson_display() {
        let mut lesson = create_test_lesson();
        let output = lesson.to_string();
        assert!(output.contains("# 10. Ownership"));
        assert!(output.contains("- Program: 3"));
        assert!(output.contains("No steps in this lesson."));

        let notebook = lesson.draft_step(&StepData::named("Lab").notebook()).unwrap();
        lesson.steps = vec![create_test_step(&lesson, 1, "Moves", 100), notebook];
        let output = lesson.to_string();
        assert!(output.contains("## Steps"));
        assert!(output.contains("- [100] Moves (ID: 1)"));
        assert!(output.contains("Lab (ID: 0) · notebook"));
    }

    #[test]
    fn test_navigation_and_stats_display() {
        let (_, steps) = lesson_with_steps();
        let output = steps[0].navigation(&steps).to_string();
        assert_eq!(output, "- Previous: none\n- Next: 2. B\n");

        let mut step = steps[0].clone();
        step.tasks = vec![task(1, 1, 3.0, false)];
        let student = Student::new(42, vec![submission(1, 1.0)]);
        assert_eq!(step.stats(&student).to_string(), "1 / 3 (33.3%)");
    }
}
